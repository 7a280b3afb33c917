//! # Inspect Command
//!
//! `qris inspect <PAYLOAD>`: shows every entry of a payload with its name,
//! one level of nested template entries, and the checksum status.

use qris_core::tlv::{self, TlvEntry};
use qris_core::{tags, Payload};
use serde::Serialize;
use tracing::debug;

use crate::error::CliError;

/// Width of the name column in text output.
const NAME_WIDTH: usize = 38;

/// One decoded entry, annotated for display.
#[derive(Debug, Clone, Serialize)]
pub struct InspectedEntry {
    pub tag: String,

    /// Well-known name of the tag. Always `None` inside templates, where
    /// sub-tag meaning depends on the template.
    pub name: Option<&'static str>,

    pub value: String,

    /// Entries of a template value that decodes cleanly.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<InspectedEntry>,
}

impl InspectedEntry {
    fn top_level(entry: TlvEntry) -> Self {
        let nested = if entry.is_template() {
            tlv::decode_nested(&entry)
                .map(|subs| subs.into_iter().map(InspectedEntry::nested).collect())
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        InspectedEntry {
            name: tags::describe(&entry.tag),
            tag: entry.tag,
            value: entry.value,
            nested,
        }
    }

    fn nested(entry: TlvEntry) -> Self {
        InspectedEntry {
            tag: entry.tag,
            name: None,
            value: entry.value,
            nested: Vec::new(),
        }
    }
}

/// Decoded view of a payload.
#[derive(Debug, Clone, Serialize)]
pub struct InspectOutput {
    pub entries: Vec<InspectedEntry>,
    pub checksum: String,
    pub checksum_valid: bool,

    /// Whether the payload already carries an amount.
    pub dynamic: bool,
}

impl InspectOutput {
    pub fn to_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.entries.len() + 1);
        for entry in &self.entries {
            lines.push(format!(
                "{} {:<width$} {}",
                entry.tag,
                entry.name.unwrap_or("-"),
                entry.value,
                width = NAME_WIDTH
            ));
            for sub in &entry.nested {
                lines.push(format!(
                    "   {} {:<width$} {}",
                    sub.tag,
                    "",
                    sub.value,
                    width = NAME_WIDTH - 3
                ));
            }
        }
        lines.push(format!(
            "{} {:<width$} {} ({})",
            tags::CRC,
            "CRC",
            self.checksum,
            if self.checksum_valid { "valid" } else { "INVALID" },
            width = NAME_WIDTH
        ));
        lines.join("\n")
    }
}

/// Decodes a full payload for display.
///
/// A wrong checksum is reported, not rejected, so a damaged code can still
/// be examined.
pub fn run(payload: &str) -> Result<InspectOutput, CliError> {
    let parsed = Payload::parse(payload)?;
    debug!(
        entries = parsed.entries.len(),
        checksum_valid = parsed.checksum_valid,
        "payload decoded"
    );

    let dynamic = parsed.is_dynamic();
    Ok(InspectOutput {
        entries: parsed
            .entries
            .into_iter()
            .map(InspectedEntry::top_level)
            .collect(),
        checksum: parsed.checksum,
        checksum_valid: parsed.checksum_valid,
        dynamic,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const STATIC_QRIS: &str = "00020101021126680016ID.CO.TELKOM.WWW01189360089801234567890215ID10200123456780303UMI51440014ID.CO.QRIS.WWW0215ID10200123456780303UMI5204581253033605802ID5914TOKO SEJAHTERA6007JAKARTA61051011062070703A016304DC71";

    #[test]
    fn test_inspect_names_and_nesting() {
        let out = run(STATIC_QRIS).unwrap();
        assert!(out.checksum_valid);
        assert!(!out.dynamic);
        assert_eq!(out.checksum, "DC71");

        let country = out.entries.iter().find(|e| e.tag == "58").unwrap();
        assert_eq!(country.name, Some("Country Code"));
        assert!(country.nested.is_empty());

        let account = out.entries.iter().find(|e| e.tag == "26").unwrap();
        assert_eq!(account.nested.len(), 4);
        assert_eq!(account.nested[0].value, "ID.CO.TELKOM.WWW");

        let additional = out.entries.iter().find(|e| e.tag == "62").unwrap();
        assert_eq!(additional.nested[0].tag, "07");
        assert_eq!(additional.nested[0].value, "A01");
    }

    #[test]
    fn test_inspect_text() {
        let text = run("0002010102115906WARUNG6304FFFF").unwrap().to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("00 Payload Format Indicator"));
        assert!(lines[0].ends_with(" 01"));
        assert!(lines[3].ends_with("FFFF (INVALID)"));
    }

    #[test]
    fn test_inspect_json_omits_empty_nesting() {
        let out = run("0002010102115906WARUNG6304F7A0").unwrap();
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["checksum_valid"], true);
        assert_eq!(json["entries"][2]["name"], "Merchant Name");
        assert!(json["entries"][2].get("nested").is_none());
    }

    #[test]
    fn test_inspect_rejects_broken_framing() {
        let err = run("0002010102115999WARUNG6304ABCD").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPayload);
    }
}
