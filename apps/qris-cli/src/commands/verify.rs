//! # Verify Command
//!
//! `qris verify <PAYLOAD>`: exit 0 when the trailing checksum is right,
//! exit 1 when it is wrong.

use serde::Serialize;
use tracing::debug;

use crate::error::CliError;

#[derive(Debug, Clone, Serialize)]
pub struct VerifyOutput {
    pub valid: bool,
    pub checksum: String,
}

impl VerifyOutput {
    pub fn to_text(&self) -> String {
        format!("OK {}", self.checksum)
    }
}

pub fn run(payload: &str) -> Result<VerifyOutput, CliError> {
    qris_core::verify_checksum(payload)?;

    let payload = payload.trim();
    let checksum = payload[payload.len() - qris_core::CHECKSUM_HEX_LEN..].to_string();
    debug!(%checksum, "checksum verified");

    Ok(VerifyOutput {
        valid: true,
        checksum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_verify_ok() {
        let out = run("0002010102115906WARUNG6304F7A0\n").unwrap();
        assert!(out.valid);
        assert_eq!(out.to_text(), "OK F7A0");
    }

    #[test]
    fn test_verify_mismatch() {
        let err = run("0002010102115906WARUNG6304F7A1").unwrap_err();
        assert_eq!(err.code, ErrorCode::ChecksumMismatch);
        assert_eq!(err.code.exit_status(), 1);
        assert_eq!(
            err.message,
            "checksum mismatch: expected F7A0, found F7A1"
        );
    }

    #[test]
    fn test_verify_missing_tag() {
        let err = run("0002010102115906WARUNG").unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingChecksum);
    }
}
