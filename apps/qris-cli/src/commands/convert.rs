//! # Convert Command
//!
//! `qris convert --amount <AMOUNT> <PAYLOAD>`: binds an amount to a static
//! payload.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::CliError;

/// Result of a conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertOutput {
    /// The new payload, ready to be rendered as a QR code.
    pub dynamic_qris: String,

    /// Value written into tag `54`.
    pub amount: String,
}

impl ConvertOutput {
    pub fn to_text(&self) -> String {
        self.dynamic_qris.clone()
    }
}

/// Converts a static payload into a dynamic one.
///
/// ## Flow
/// ```text
/// payload, "10000"
///      │
///      ▼
/// qris_core::convert_static_to_dynamic ──► Err ──► CliError (exit 2)
///      │
///      ▼
/// ConvertOutput { dynamic_qris, amount: "10000" }
/// ```
pub fn run(payload: &str, amount: &str) -> Result<ConvertOutput, CliError> {
    debug!(payload_len = payload.len(), amount, "convert command");

    let dynamic_qris = qris_core::convert_static_to_dynamic(payload, amount)?;
    let amount = qris_core::amount::normalize(amount).map_err(qris_core::QrisError::from)?;

    info!(
        amount = %amount,
        output_len = dynamic_qris.len(),
        "dynamic QRIS generated"
    );
    Ok(ConvertOutput {
        dynamic_qris,
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const STATIC_QRIS: &str = "0002010102115906WARUNG62070703A01630484B6";

    #[test]
    fn test_convert() {
        let out = run(STATIC_QRIS, "25.00").unwrap();
        assert_eq!(out.amount, "2500");
        assert_eq!(
            out.dynamic_qris,
            "0002010102115906WARUNG5404250062070703A016304D77E"
        );
        assert_eq!(out.to_text(), out.dynamic_qris);
    }

    #[test]
    fn test_convert_errors() {
        assert_eq!(
            run(STATIC_QRIS, "1.2.3").unwrap_err().code,
            ErrorCode::InvalidAmount
        );
        assert_eq!(
            run("0002010102115906WARUNG", "100").unwrap_err().code,
            ErrorCode::MissingChecksum
        );
        assert_eq!(
            run("0002010102115999WARUNG6304ABCD", "100").unwrap_err().code,
            ErrorCode::InvalidPayload
        );
    }
}
