//! # Amount Module
//!
//! Turns a user-typed amount into the value of the transaction-amount tag.
//!
//! ## Value Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE SEPARATOR PROBLEM                                                  │
//! │                                                                         │
//! │  Payers type "150.5", "150.50" or "150". The tag value carries no       │
//! │  separator, so fractional digits are packed in as minor units:          │
//! │                                                                         │
//! │    "15000"    → "15000"     whole units (IDR has no minor unit)         │
//! │    "150.5"    → "15050"     one digit is right-padded                   │
//! │    "150.555"  → "15055"     anything past two digits is TRUNCATED       │
//! │    "150."     → "15000"     empty fraction counts as "00"               │
//! │                                                                         │
//! │  No floats anywhere: the digits are moved, never re-computed.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use qris_core::amount::normalize;
//!
//! assert_eq!(normalize(" 150.5 ").unwrap(), "15050");
//! assert!(normalize("15a00").is_err());
//! ```

use crate::error::AmountError;
use crate::MAX_VALUE_LEN;

/// Result type for amount normalization.
pub type AmountResult<T> = Result<T, AmountError>;

/// Decimal separator accepted in user input.
const SEPARATOR: char = '.';

/// Number of fractional digits packed into the value.
const MINOR_DIGITS: usize = 2;

/// Normalizes a raw amount string into a tag `54` value.
///
/// ## Rules
/// 1. Surrounding whitespace is ignored; nothing left → [`AmountError::Empty`]
/// 2. More than one `.` → [`AmountError::InvalidFormat`]
/// 3. With one `.` the fraction is cut or padded to exactly two digits and
///    joined to the integer part
/// 4. Without `.` the input is used as-is (whole currency units)
/// 5. The result must be ASCII digits only → [`AmountError::NonNumeric`]
///    and fit a TLV value → [`AmountError::TooLong`]
///
/// The output knows nothing about framing; the caller wraps it in a tag.
///
/// ## User Workflow
/// ```text
/// Cashier types: "25000"
///      │
///      ▼
/// normalize("25000") ← THIS FUNCTION
///      │
///      ├── "" / "  "      → Error: "empty amount"
///      ├── "1.2.3"        → Error: "invalid amount format"
///      ├── "15a00", "-5"  → Error: "amount contains non-numeric characters"
///      │
///      ▼
/// "25000" ──► TlvEntry { tag: "54", value: "25000" }
/// ```
pub fn normalize(raw: &str) -> AmountResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    let digits = match trimmed.split_once(SEPARATOR) {
        None => trimmed.to_string(),
        Some((_, fraction)) if fraction.contains(SEPARATOR) => {
            return Err(AmountError::InvalidFormat);
        }
        Some((integer, fraction)) => {
            let mut packed = String::with_capacity(integer.len() + MINOR_DIGITS);
            packed.push_str(integer);
            packed.extend(fraction.chars().take(MINOR_DIGITS));
            for _ in fraction.chars().count()..MINOR_DIGITS {
                packed.push('0');
            }
            packed
        }
    };

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::NonNumeric);
    }
    if digits.len() > MAX_VALUE_LEN {
        return Err(AmountError::TooLong { max: MAX_VALUE_LEN });
    }

    Ok(digits)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_amounts_pass_through() {
        assert_eq!(normalize("15000").unwrap(), "15000");
        assert_eq!(normalize("0").unwrap(), "0");
        assert_eq!(normalize("007").unwrap(), "007");
    }

    #[test]
    fn test_fraction_padding() {
        assert_eq!(normalize("150.5").unwrap(), "15050");
        assert_eq!(normalize("150.50").unwrap(), "15050");
        assert_eq!(normalize("150.").unwrap(), "15000");
        assert_eq!(normalize(".5").unwrap(), "50");
    }

    #[test]
    fn test_fraction_truncation() {
        // Truncated, not rounded.
        assert_eq!(normalize("150.555").unwrap(), "15055");
        assert_eq!(normalize("150.999").unwrap(), "15099");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(normalize("  10000\n").unwrap(), "10000");
        assert_eq!(normalize("\t12.5 ").unwrap(), "1250");
    }

    #[test]
    fn test_empty_amount() {
        assert_eq!(normalize(""), Err(AmountError::Empty));
        assert_eq!(normalize("   "), Err(AmountError::Empty));
    }

    #[test]
    fn test_multiple_separators() {
        assert_eq!(normalize("1.2.3"), Err(AmountError::InvalidFormat));
        assert_eq!(normalize("1..0"), Err(AmountError::InvalidFormat));
    }

    #[test]
    fn test_non_numeric() {
        assert_eq!(normalize("15a00"), Err(AmountError::NonNumeric));
        assert_eq!(normalize("-500"), Err(AmountError::NonNumeric));
        assert_eq!(normalize("+500"), Err(AmountError::NonNumeric));
        assert_eq!(normalize("1,000"), Err(AmountError::NonNumeric));
        assert_eq!(normalize("1 000"), Err(AmountError::NonNumeric));
        assert_eq!(normalize("Rp10.00"), Err(AmountError::NonNumeric));
        // Non-ASCII digits are not decimal digits here.
        assert_eq!(normalize("١٠٠"), Err(AmountError::NonNumeric));
    }

    #[test]
    fn test_multibyte_fraction_does_not_panic() {
        assert_eq!(normalize("1.éé"), Err(AmountError::NonNumeric));
    }

    #[test]
    fn test_too_many_digits() {
        assert!(normalize(&"9".repeat(99)).is_ok());
        assert_eq!(
            normalize(&"9".repeat(100)),
            Err(AmountError::TooLong { max: 99 })
        );
    }
}
