//! # Tag Identifiers
//!
//! Well-known top-level tags of an EMV merchant-presented QR payload.
//!
//! ## Payload Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  00 02 01          Payload Format Indicator                             │
//! │  01 02 11|12       Point of Initiation (11 static, 12 dynamic)          │
//! │  26..51 nn ...     Merchant Account Information (nested TLV)            │
//! │  52 04 5812        Merchant Category Code                               │
//! │  53 03 360         Transaction Currency (ISO 4217, 360 = IDR)           │
//! │  54 nn 10000       Transaction Amount       ◄── inserted by transform  │
//! │  58 02 ID          Country Code             ◄── preferred anchor       │
//! │  59 nn ...         Merchant Name                                        │
//! │  60 nn ...         Merchant City                                        │
//! │  61 nn ...         Postal Code                                          │
//! │  62 nn ...         Additional Data Field (nested TLV)                   │
//! │  63 04 XXXX        CRC, always last                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub const PAYLOAD_FORMAT_INDICATOR: &str = "00";
pub const POINT_OF_INITIATION: &str = "01";
pub const MERCHANT_CATEGORY_CODE: &str = "52";
pub const TRANSACTION_CURRENCY: &str = "53";
pub const TRANSACTION_AMOUNT: &str = "54";
pub const TIP_INDICATOR: &str = "55";
pub const CONVENIENCE_FEE_FIXED: &str = "56";
pub const CONVENIENCE_FEE_PERCENTAGE: &str = "57";
pub const COUNTRY_CODE: &str = "58";
pub const MERCHANT_NAME: &str = "59";
pub const MERCHANT_CITY: &str = "60";
pub const POSTAL_CODE: &str = "61";
pub const ADDITIONAL_DATA: &str = "62";
pub const CRC: &str = "63";

/// Tags before which a new amount is inserted, most preferred first.
///
/// If none is present the amount is appended after the last entry.
pub const AMOUNT_ANCHORS: [&str; 2] = [COUNTRY_CODE, ADDITIONAL_DATA];

/// Human-readable name of a top-level tag, if it is one we know.
///
/// ## Example
/// ```rust
/// use qris_core::tags::describe;
///
/// assert_eq!(describe("58"), Some("Country Code"));
/// assert_eq!(describe("27"), Some("Merchant Account Information"));
/// assert_eq!(describe("99"), Some("Unreserved Template"));
/// assert_eq!(describe("7A"), None);
/// ```
pub fn describe(tag: &str) -> Option<&'static str> {
    let name = match tag {
        "00" => "Payload Format Indicator",
        "01" => "Point of Initiation Method",
        "52" => "Merchant Category Code",
        "53" => "Transaction Currency",
        "54" => "Transaction Amount",
        "55" => "Tip or Convenience Indicator",
        "56" => "Value of Convenience Fee Fixed",
        "57" => "Value of Convenience Fee Percentage",
        "58" => "Country Code",
        "59" => "Merchant Name",
        "60" => "Merchant City",
        "61" => "Postal Code",
        "62" => "Additional Data Field Template",
        "63" => "CRC",
        "64" => "Merchant Information Language Template",
        _ => match tag_number(tag)? {
            2..=51 => "Merchant Account Information",
            80..=99 => "Unreserved Template",
            _ => return None,
        },
    };
    Some(name)
}

/// Whether the tag's value is itself a TLV stream.
///
/// Merchant account templates (`26`-`51`), the additional data field
/// (`62`), the language template (`64`) and unreserved templates (`80`-`99`)
/// nest one level down. Account ids `02`-`25` are primitive card-scheme
/// values and are *not* templates.
pub fn is_template(tag: &str) -> bool {
    matches!(tag_number(tag), Some(26..=51 | 62 | 64 | 80..=99))
}

/// Whether `tag` is a well-formed identifier: exactly two ASCII digits.
pub fn is_valid_id(tag: &str) -> bool {
    tag.len() == 2 && tag.bytes().all(|b| b.is_ascii_digit())
}

/// Numeric value of a well-formed tag id.
fn tag_number(tag: &str) -> Option<u8> {
    if !is_valid_id(tag) {
        return None;
    }
    tag.parse().ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_known_tags() {
        assert_eq!(describe(TRANSACTION_AMOUNT), Some("Transaction Amount"));
        assert_eq!(describe(CRC), Some("CRC"));
        assert_eq!(describe("26"), Some("Merchant Account Information"));
        assert_eq!(describe("51"), Some("Merchant Account Information"));
    }

    #[test]
    fn test_describe_unknown_tags() {
        assert_eq!(describe("70"), None);
        assert_eq!(describe(""), None);
        assert_eq!(describe("+5"), None);
    }

    #[test]
    fn test_is_valid_id() {
        assert!(is_valid_id("00"));
        assert!(is_valid_id("99"));

        assert!(!is_valid_id("5"));
        assert!(!is_valid_id("540"));
        assert!(!is_valid_id("+5"));
        assert!(!is_valid_id("A1"));
    }

    #[test]
    fn test_is_template() {
        assert!(is_template("26"));
        assert!(is_template(ADDITIONAL_DATA));
        assert!(is_template("99"));

        assert!(!is_template("04"));
        assert!(!is_template(TRANSACTION_AMOUNT));
        assert!(!is_template(COUNTRY_CODE));
        assert!(!is_template("6"));
    }
}
