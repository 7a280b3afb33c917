//! # CLI Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  qris convert --amount 15a00 0002...                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, CliError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  QrisError::InvalidAmount(NonNumeric) ──► CliError ─────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  text:  error: [INVALID_AMOUNT] invalid amount: amount contains ...    │
//! │  json:  {"code":"INVALID_AMOUNT","message":"invalid amount: ..."}      │
//! │  exit:  2                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use qris_core::QrisError;
use serde::Serialize;

/// Error returned from CLI commands.
///
/// ## Serialization
/// In JSON mode this is what scripts receive on stdout:
/// ```json
/// {
///   "code": "MISSING_CHECKSUM",
///   "message": "payload missing checksum tag 63"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Payload is shorter than any valid QRIS payload
    PayloadTooShort,

    /// Payload exceeds the configured size limit
    PayloadTooLarge,

    /// No `6304` checksum tag where one is required
    MissingChecksum,

    /// The payload's TLV framing is broken
    InvalidPayload,

    /// Amount failed normalization
    InvalidAmount,

    /// Stored checksum does not match the content
    ChecksumMismatch,

    /// Reading input failed
    Io,
}

impl ErrorCode {
    /// Wire name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::PayloadTooShort => "PAYLOAD_TOO_SHORT",
            ErrorCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ErrorCode::MissingChecksum => "MISSING_CHECKSUM",
            ErrorCode::InvalidPayload => "INVALID_PAYLOAD",
            ErrorCode::InvalidAmount => "INVALID_AMOUNT",
            ErrorCode::ChecksumMismatch => "CHECKSUM_MISMATCH",
            ErrorCode::Io => "IO",
        }
    }

    /// Process exit status for this error.
    ///
    /// `1` means "checked and found invalid", `2` means the input could not
    /// be processed at all.
    pub fn exit_status(self) -> u8 {
        match self {
            ErrorCode::ChecksumMismatch => 1,
            _ => 2,
        }
    }
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Io, message)
    }
}

/// Converts core errors to CLI errors.
impl From<QrisError> for CliError {
    fn from(err: QrisError) -> Self {
        let code = match &err {
            QrisError::TooShort { .. } => ErrorCode::PayloadTooShort,
            QrisError::MissingChecksumTag => ErrorCode::MissingChecksum,
            QrisError::MalformedStream(_) | QrisError::InvalidStaticQris(_) => {
                ErrorCode::InvalidPayload
            }
            QrisError::InvalidAmount(_) => ErrorCode::InvalidAmount,
            QrisError::ChecksumMismatch { .. } => ErrorCode::ChecksumMismatch,
        };
        CliError::new(code, err.to_string())
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;
    use qris_core::{AmountError, TlvError};

    #[test]
    fn test_core_error_mapping() {
        let cases = [
            (
                QrisError::TooShort { len: 3, min: 10 },
                ErrorCode::PayloadTooShort,
            ),
            (QrisError::MissingChecksumTag, ErrorCode::MissingChecksum),
            (
                QrisError::InvalidStaticQris(TlvError::IncompleteHeader { offset: 4 }),
                ErrorCode::InvalidPayload,
            ),
            (
                QrisError::MalformedStream(TlvError::InvalidTag { offset: 0 }),
                ErrorCode::InvalidPayload,
            ),
            (
                QrisError::InvalidAmount(AmountError::Empty),
                ErrorCode::InvalidAmount,
            ),
            (
                QrisError::ChecksumMismatch {
                    expected: "DC71".to_string(),
                    found: "0000".to_string(),
                },
                ErrorCode::ChecksumMismatch,
            ),
        ];
        for (core, code) in cases {
            assert_eq!(CliError::from(core).code, code);
        }
    }

    #[test]
    fn test_message_is_core_reason() {
        let err = CliError::from(QrisError::InvalidAmount(AmountError::NonNumeric));
        assert_eq!(
            err.message,
            "invalid amount: amount contains non-numeric characters"
        );
    }

    #[test]
    fn test_display_and_json() {
        let err = CliError::from(QrisError::MissingChecksumTag);
        assert_eq!(
            err.to_string(),
            "[MISSING_CHECKSUM] payload missing checksum tag 63"
        );
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            r#"{"code":"MISSING_CHECKSUM","message":"payload missing checksum tag 63"}"#
        );
    }

    #[test]
    fn test_as_str_matches_serialized_form() {
        for code in [
            ErrorCode::PayloadTooShort,
            ErrorCode::PayloadTooLarge,
            ErrorCode::MissingChecksum,
            ErrorCode::InvalidPayload,
            ErrorCode::InvalidAmount,
            ErrorCode::ChecksumMismatch,
            ErrorCode::Io,
        ] {
            assert_eq!(
                serde_json::to_value(code).unwrap(),
                serde_json::Value::from(code.as_str())
            );
        }
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(ErrorCode::ChecksumMismatch.exit_status(), 1);
        assert_eq!(ErrorCode::InvalidAmount.exit_status(), 2);
        assert_eq!(ErrorCode::Io.exit_status(), 2);
    }
}
