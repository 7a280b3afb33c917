//! # CLI Commands Module
//!
//! Every subcommand of the `qris` binary.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (shared input/output plumbing)
//! ├── convert.rs   ◄─── static → dynamic conversion
//! ├── inspect.rs   ◄─── decoded view of a payload
//! ├── verify.rs    ◄─── checksum verification
//! └── checksum.rs  ◄─── raw CRC of arbitrary text
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  argv ──► clap ──► Command                                             │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  read_input("-" → stdin) ──► enforce_limit ──► qris-core               │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                          Result<Output, CliError>                       │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                         Output::render(Text | Json) ──► stdout          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod checksum;
pub mod convert;
pub mod inspect;
pub mod verify;

use std::io::Read;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::error::{CliError, ErrorCode};

pub use checksum::ChecksumOutput;
pub use convert::ConvertOutput;
pub use inspect::InspectOutput;
pub use verify::VerifyOutput;

/// Argument value that means "read from stdin".
pub const STDIN_ARG: &str = "-";

/// Result of a successful command.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Output {
    Convert(ConvertOutput),
    Inspect(InspectOutput),
    Verify(VerifyOutput),
    Checksum(ChecksumOutput),
}

impl Output {
    /// Renders the output in the requested format, without a trailing newline.
    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Json => serde_json::to_string(self),
            OutputFormat::Text => Ok(match self {
                Output::Convert(out) => out.to_text(),
                Output::Inspect(out) => out.to_text(),
                Output::Verify(out) => out.to_text(),
                Output::Checksum(out) => out.to_text(),
            }),
        }
    }
}

/// Resolves a positional argument, reading stdin when it is `-`.
///
/// Trailing line breaks from stdin are dropped; `echo` and here-strings
/// always add one.
pub fn read_input(arg: &str, stdin: &mut dyn Read) -> Result<String, CliError> {
    if arg != STDIN_ARG {
        return Ok(arg.to_string());
    }

    let mut buf = String::new();
    stdin
        .read_to_string(&mut buf)
        .map_err(|err| CliError::io(format!("failed to read stdin: {}", err)))?;
    let len = buf.trim_end_matches(&['\r', '\n'][..]).len();
    buf.truncate(len);
    Ok(buf)
}

/// Rejects payloads longer than the configured limit.
pub fn enforce_limit(payload: &str, max_len: usize) -> Result<(), CliError> {
    if payload.len() > max_len {
        return Err(CliError::new(
            ErrorCode::PayloadTooLarge,
            format!(
                "payload is {} bytes, the limit is {} (QRIS_MAX_PAYLOAD_LEN)",
                payload.len(),
                max_len
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_input_literal() {
        let mut stdin = Cursor::new("ignored");
        assert_eq!(read_input("000201", &mut stdin).unwrap(), "000201");
    }

    #[test]
    fn test_read_input_stdin_strips_line_breaks() {
        let mut stdin = Cursor::new("0002010102115906WARUNG6304F7A0\r\n");
        assert_eq!(
            read_input("-", &mut stdin).unwrap(),
            "0002010102115906WARUNG6304F7A0"
        );
    }

    #[test]
    fn test_read_input_stdin_keeps_inner_spaces() {
        let mut stdin = Cursor::new(" TOKO  \n");
        assert_eq!(read_input("-", &mut stdin).unwrap(), " TOKO  ");
    }

    #[test]
    fn test_read_input_invalid_utf8() {
        let mut stdin = Cursor::new(vec![0xFF, 0xFE]);
        let err = read_input("-", &mut stdin).unwrap_err();
        assert_eq!(err.code, ErrorCode::Io);
    }

    #[test]
    fn test_enforce_limit() {
        assert!(enforce_limit("0123456789", 10).is_ok());
        let err = enforce_limit("0123456789X", 10).unwrap_err();
        assert_eq!(err.code, ErrorCode::PayloadTooLarge);
    }
}
