//! # Checksum Engine
//!
//! CRC-16/CCITT-FALSE, the checksum carried in tag `63` of every QRIS
//! payload.
//!
//! ## Parameters
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  width    16                                  │
//! │  poly     0x1021                              │
//! │  init     0xFFFF                              │
//! │  refin    false                               │
//! │  refout   false                               │
//! │  xorout   0x0000                              │
//! │  check    0x29B1  ("123456789")               │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Covered Range
//! The checksum covers the serialized payload up to and including the
//! checksum tag header `6304`, but not the four hex digits that follow:
//! ```text
//! 000201 ... 62070703A01 6304 DC71
//! └──────────── covered ──────┘ └─┘ value
//! ```

/// Generator polynomial (x^16 + x^12 + x^5 + 1).
const POLYNOMIAL: u16 = 0x1021;

/// Initial register value.
const INIT: u16 = 0xFFFF;

/// Computes the CRC-16/CCITT-FALSE of `bytes`.
///
/// ## Example
/// ```rust
/// use qris_core::checksum::compute;
///
/// assert_eq!(compute(b"123456789"), 0x29B1);
/// assert_eq!(compute(b""), 0xFFFF);
/// ```
pub fn compute(bytes: &[u8]) -> u16 {
    bytes.iter().fold(INIT, |crc, &byte| {
        let mut crc = crc ^ (u16::from(byte) << 8);
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
        }
        crc
    })
}

/// Renders a checksum as four uppercase hex digits, zero-padded.
///
/// ## Example
/// ```rust
/// use qris_core::checksum::render;
///
/// assert_eq!(render(0xAB), "00AB");
/// assert_eq!(render(0x29B1), "29B1");
/// ```
#[inline]
pub fn render(value: u16) -> String {
    format!("{:04X}", value)
}

/// Computes and renders the checksum of `text` in one step.
#[inline]
pub fn checksum_hex(text: &str) -> String {
    render(compute(text.as_bytes()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crc::{Crc, CRC_16_IBM_3740};

    /// The catalogue name for CCITT-FALSE.
    const REFERENCE: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

    #[test]
    fn test_check_value() {
        assert_eq!(compute(b"123456789"), 0x29B1);
        assert_eq!(checksum_hex("123456789"), "29B1");
    }

    #[test]
    fn test_empty_input_is_init() {
        assert_eq!(compute(&[]), 0xFFFF);
        assert_eq!(checksum_hex(""), "FFFF");
    }

    #[test]
    fn test_render_pads_and_uppercases() {
        assert_eq!(render(0), "0000");
        assert_eq!(render(0xAB), "00AB");
        assert_eq!(render(0x0F0F), "0F0F");
        assert_eq!(render(0xFFFF), "FFFF");
    }

    #[test]
    fn test_known_payloads() {
        assert_eq!(checksum_hex("0002010102115906WARUNG6304"), "F7A0");
        assert_eq!(
            checksum_hex("00020101021126680016ID.CO.TELKOM.WWW01189360089801234567890215ID10200123456780303UMI51440014ID.CO.QRIS.WWW0215ID10200123456780303UMI5204581253033605802ID5914TOKO SEJAHTERA6007JAKARTA61051011062070703A016304"),
            "DC71"
        );
    }

    #[test]
    fn test_matches_reference_catalogue() {
        let samples: [&[u8]; 5] = [
            b"",
            b"A",
            b"123456789",
            b"0002010102115906WARUNG6304",
            &[0x00, 0xFF, 0x80, 0x7F, 0x10, 0x21],
        ];
        for sample in samples {
            assert_eq!(compute(sample), REFERENCE.checksum(sample));
        }
    }

    #[test]
    fn test_deterministic() {
        let payload = b"0002010102125204581253033605405150505802ID5906WARUNG6304";
        assert_eq!(compute(payload), compute(payload));
    }

    #[test]
    fn test_single_byte_change_is_detected() {
        let original = checksum_hex("0002010102115906WARUNG6304");
        let tampered = checksum_hex("0002010102115906WARUNH6304");
        assert_ne!(original, tampered);
    }
}
