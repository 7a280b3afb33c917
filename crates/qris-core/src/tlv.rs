//! # TLV Codec
//!
//! Decodes and encodes one nesting level of an EMV text TLV stream.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "0002010102115802ID"                                                   │
//! │                                                                         │
//! │   00 02 01 │ 01 02 11 │ 58 02 ID                                        │
//! │   ── ── ── │ ── ── ── │ ── ── ──                                        │
//! │   │  │  │                                                               │
//! │   │  │  └── value: exactly <length> bytes                               │
//! │   │  └───── length: two ASCII digits, zero-padded (00-99)               │
//! │   └──────── tag: two ASCII digits                                       │
//! │                                                                         │
//! │  Entries are kept in wire order. Position is part of the format.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nested templates (merchant account information, additional data) are
//! opaque values here. [`decode_nested`] runs the same decoder over such a
//! value when a caller wants to look inside.
//!
//! ## Round Trip
//! For every stream `s` that decodes, `encode(&decode(s)?, &[])? == s`.

use serde::{Deserialize, Serialize};

use crate::error::{TlvError, TlvResult};
use crate::tags;
use crate::MAX_VALUE_LEN;

/// Tag (2) + length (2).
const HEADER_LEN: usize = 4;

// =============================================================================
// TLV Entry
// =============================================================================

/// One tag/value pair at a single nesting level.
///
/// ## Invariants
/// - `tag` is exactly two ASCII digits
/// - `value` is at most 99 bytes so its length fits the two-digit field
///
/// [`decode`] only produces entries that hold both. Entries built by hand
/// are checked by [`TlvEntry::new`], and again by [`encode`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TlvEntry {
    /// Two-digit tag identifier, e.g. `"54"`.
    pub tag: String,

    /// Raw value without framing.
    pub value: String,
}

impl TlvEntry {
    /// Creates an entry, rejecting anything that could not be framed.
    ///
    /// ## Example
    /// ```rust
    /// use qris_core::TlvEntry;
    ///
    /// let amount = TlvEntry::new("54", "10000").unwrap();
    /// assert_eq!(amount.encoded_len(), 9);
    ///
    /// assert!(TlvEntry::new("5", "10000").is_err());
    /// assert!(TlvEntry::new("59", "X".repeat(100)).is_err());
    /// ```
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> TlvResult<Self> {
        let entry = TlvEntry {
            tag: tag.into(),
            value: value.into(),
        };
        entry.check()?;
        Ok(entry)
    }

    /// Number of bytes this entry occupies on the wire.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.value.len()
    }

    /// Whether this entry's value is itself a TLV stream.
    #[inline]
    pub fn is_template(&self) -> bool {
        tags::is_template(&self.tag)
    }

    fn check(&self) -> TlvResult<()> {
        if !tags::is_valid_id(&self.tag) {
            return Err(TlvError::InvalidTag { offset: 0 });
        }
        if self.value.len() > MAX_VALUE_LEN {
            return Err(TlvError::ValueTooLong {
                tag: self.tag.clone(),
                len: self.value.len(),
            });
        }
        Ok(())
    }

    fn write_to(&self, out: &mut String) {
        out.push_str(&self.tag);
        out.push_str(&format!("{:02}", self.value.len()));
        out.push_str(&self.value);
    }
}

// =============================================================================
// Decode
// =============================================================================

/// Decodes a flat TLV stream into its entries, in order.
///
/// The whole input must be consumed: a trailing partial header or a value
/// that runs past the end is an error, never silently dropped.
///
/// ## Errors
/// ```text
/// remaining < 4 bytes at a header ──► IncompleteHeader
/// tag not two digits              ──► InvalidTag
/// length not two digits           ──► InvalidLength
/// value runs past the end         ──► LengthOutOfRange
/// value ends mid-character        ──► SplitCharacter
/// ```
///
/// ## Example
/// ```rust
/// use qris_core::tlv::decode;
///
/// let entries = decode("0002015802ID").unwrap();
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[1].tag, "58");
/// assert_eq!(entries[1].value, "ID");
/// ```
pub fn decode(input: &str) -> TlvResult<Vec<TlvEntry>> {
    let bytes = input.as_bytes();
    let mut entries = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        if bytes.len() - offset < HEADER_LEN {
            return Err(TlvError::IncompleteHeader { offset });
        }

        let header = &bytes[offset..offset + HEADER_LEN];
        if !header[..2].iter().all(u8::is_ascii_digit) {
            return Err(TlvError::InvalidTag { offset });
        }
        // Both tag bytes are ASCII, so this slice sits on char boundaries.
        let tag = &input[offset..offset + 2];

        if !header[2..].iter().all(u8::is_ascii_digit) {
            return Err(TlvError::InvalidLength {
                tag: tag.to_string(),
            });
        }
        let len = usize::from(header[2] - b'0') * 10 + usize::from(header[3] - b'0');

        let start = offset + HEADER_LEN;
        let end = start + len;
        if end > bytes.len() {
            return Err(TlvError::LengthOutOfRange {
                tag: tag.to_string(),
            });
        }
        let value = input.get(start..end).ok_or_else(|| TlvError::SplitCharacter {
            tag: tag.to_string(),
        })?;

        entries.push(TlvEntry {
            tag: tag.to_string(),
            value: value.to_string(),
        });
        offset = end;
    }

    Ok(entries)
}

/// Decodes the value of a template entry as its own TLV stream.
///
/// Works on any entry; primitive values usually fail to decode, which is
/// the caller's signal that there is nothing nested to show.
pub fn decode_nested(entry: &TlvEntry) -> TlvResult<Vec<TlvEntry>> {
    decode(&entry.value)
}

// =============================================================================
// Encode
// =============================================================================

/// Encodes entries back into a flat stream, skipping tags in `exclude`.
///
/// Order is preserved exactly. Each entry is written as
/// `tag + two-digit zero-padded length + value`.
///
/// ## Errors
/// - [`TlvError::InvalidTag`] when a tag is not two digits
///   (`offset` is the entry's position in the output)
/// - [`TlvError::ValueTooLong`] when a value exceeds 99 bytes
///
/// ## Example
/// ```rust
/// use qris_core::tlv::{decode, encode};
///
/// let entries = decode("00020154031005802ID").unwrap();
/// assert_eq!(encode(&entries, &[]).unwrap(), "00020154031005802ID");
/// assert_eq!(encode(&entries, &["54"]).unwrap(), "0002015802ID");
/// ```
pub fn encode(entries: &[TlvEntry], exclude: &[&str]) -> TlvResult<String> {
    let capacity = entries.iter().map(TlvEntry::encoded_len).sum();
    let mut out = String::with_capacity(capacity);

    for entry in entries
        .iter()
        .filter(|entry| !exclude.contains(&entry.tag.as_str()))
    {
        entry.check().map_err(|err| match err {
            TlvError::InvalidTag { .. } => TlvError::InvalidTag { offset: out.len() },
            other => other,
        })?;
        entry.write_to(&mut out);
    }

    Ok(out)
}

// =============================================================================
// Sequence Helpers
// =============================================================================

/// Inserts `new_entry` right before the first entry tagged `anchor`.
///
/// When no entry carries `anchor` the new entry is appended at the end.
///
/// ## Example
/// ```rust
/// use qris_core::tlv::{decode, insert_before};
/// use qris_core::TlvEntry;
///
/// let entries = decode("0002015802ID").unwrap();
/// let amount = TlvEntry::new("54", "500").unwrap();
///
/// let with_amount = insert_before(entries.clone(), "58", amount.clone());
/// assert_eq!(with_amount[1], amount);
///
/// let appended = insert_before(entries, "62", amount.clone());
/// assert_eq!(appended.last(), Some(&amount));
/// ```
pub fn insert_before(
    mut entries: Vec<TlvEntry>,
    anchor: &str,
    new_entry: TlvEntry,
) -> Vec<TlvEntry> {
    let position = entries
        .iter()
        .position(|entry| entry.tag == anchor)
        .unwrap_or(entries.len());
    entries.insert(position, new_entry);
    entries
}

/// Returns the first entry tagged `tag`.
pub fn find<'a>(entries: &'a [TlvEntry], tag: &str) -> Option<&'a TlvEntry> {
    entries.iter().find(|entry| entry.tag == tag)
}

/// Removes every entry tagged `tag`, returning how many were removed.
pub fn remove_all(entries: &mut Vec<TlvEntry>, tag: &str) -> usize {
    let before = entries.len();
    entries.retain(|entry| entry.tag != tag);
    before - entries.len()
}

// =============================================================================
// Unit Tests
// =============================================================================
