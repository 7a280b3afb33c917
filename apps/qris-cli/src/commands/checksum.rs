//! # Checksum Command
//!
//! `qris checksum <TEXT>`: prints the CRC-16/CCITT-FALSE of the text exactly
//! as given. Handy when hand-building a payload: pass everything up to and
//! including `6304`.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ChecksumOutput {
    pub checksum: String,
}

impl ChecksumOutput {
    pub fn to_text(&self) -> String {
        self.checksum.clone()
    }
}

pub fn run(text: &str) -> ChecksumOutput {
    ChecksumOutput {
        checksum: qris_core::checksum::checksum_hex(text),
    }
}
