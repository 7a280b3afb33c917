//! # QRIS Transform
//!
//! Converts a static payload into a dynamic one, and signs or verifies the
//! trailing checksum.
//!
//! ## Conversion Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  static payload + amount                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. LocateChecksumTag   trim, length check, find first "6304"           │
//! │       │                 ──► TooShort / MissingChecksumTag               │
//! │       ▼                                                                 │
//! │  2. ParseCore           tlv::decode(everything before the marker)       │
//! │       │                 ──► InvalidStaticQris                           │
//! │       ▼                                                                 │
//! │  3. StripAmountTags     drop every "54" entry                           │
//! │       ▼                                                                 │
//! │  4. LocateAnchor        "58" if present, else "62", else append         │
//! │       ▼                                                                 │
//! │  5. InsertAmount        amount::normalize ──► InvalidAmount             │
//! │       ▼                                                                 │
//! │  6. Reencode            tlv::encode ──► MalformedStream                 │
//! │       ▼                                                                 │
//! │  7. ComputeChecksum     core + "6304" + CRC(core + "6304")              │
//! │       ▼                                                                 │
//! │  dynamic payload                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any failure ends the conversion. There is no partial output.

use serde::Serialize;

use crate::checksum;
use crate::error::{QrisError, QrisResult};
use crate::tags;
use crate::tlv::{self, TlvEntry};
use crate::{CHECKSUM_HEX_LEN, CHECKSUM_MARKER, MIN_PAYLOAD_LEN};

/// Marker plus checksum value: the fixed-size tail of every payload.
const TRAILER_LEN: usize = CHECKSUM_MARKER.len() + CHECKSUM_HEX_LEN;

// =============================================================================
// Conversion
// =============================================================================

/// Converts a static QRIS payload into a dynamic one bound to `amount`.
///
/// Any amount already present is replaced, so converting an already
/// dynamic payload re-prices it instead of adding a second amount.
/// The checksum in the input is discarded and recomputed.
///
/// ## Example
/// ```rust
/// use qris_core::convert_static_to_dynamic;
///
/// let static_qris = "0002010102115906WARUNG62070703A01630484B6";
/// let dynamic = convert_static_to_dynamic(static_qris, "2500").unwrap();
///
/// // The amount lands right before the additional data field.
/// assert_eq!(dynamic, "0002010102115906WARUNG5404250062070703A016304D77E");
/// ```
pub fn convert_static_to_dynamic(static_payload: &str, amount: &str) -> QrisResult<String> {
    let core = locate_core(static_payload)?;

    let mut entries = tlv::decode(core).map_err(QrisError::InvalidStaticQris)?;
    tlv::remove_all(&mut entries, tags::TRANSACTION_AMOUNT);

    let anchor = insertion_anchor(&entries);
    let amount_entry = TlvEntry::new(
        tags::TRANSACTION_AMOUNT,
        crate::amount::normalize(amount)?,
    )?;
    let entries = tlv::insert_before(entries, anchor, amount_entry);

    let new_core = tlv::encode(&entries, &[])?;
    Ok(sign(&new_core))
}

/// Returns everything before the first checksum marker.
fn locate_core(payload: &str) -> QrisResult<&str> {
    let payload = payload.trim();
    if payload.len() < MIN_PAYLOAD_LEN {
        return Err(QrisError::TooShort {
            len: payload.len(),
            min: MIN_PAYLOAD_LEN,
        });
    }

    payload
        .find(CHECKSUM_MARKER)
        .map(|idx| &payload[..idx])
        .ok_or(QrisError::MissingChecksumTag)
}

/// Picks the tag the amount is inserted before.
///
/// Returns the first anchor present in `entries`. When none is present the
/// least preferred anchor is returned anyway; it is absent by definition,
/// so [`tlv::insert_before`] appends.
fn insertion_anchor(entries: &[TlvEntry]) -> &'static str {
    tags::AMOUNT_ANCHORS
        .into_iter()
        .find(|anchor| tlv::find(entries, anchor).is_some())
        .unwrap_or(tags::ADDITIONAL_DATA)
}

// =============================================================================
// Signing & Verification
// =============================================================================

/// Appends the checksum tag to a serialized core.
///
/// ## Example
/// ```rust
/// use qris_core::sign;
///
/// assert_eq!(sign("0002010102115906WARUNG"), "0002010102115906WARUNG6304F7A0");
/// ```
pub fn sign(core: &str) -> String {
    let mut payload = String::with_capacity(core.len() + TRAILER_LEN);
    payload.push_str(core);
    payload.push_str(CHECKSUM_MARKER);
    let crc = checksum::checksum_hex(&payload);
    payload.push_str(&crc);
    payload
}

/// Checks that a payload ends in a checksum tag matching its content.
///
/// Hex digits are compared case-insensitively; some generators emit
/// lowercase.
///
/// ## Errors
/// - [`QrisError::TooShort`] when there is no room for a checksum tag
/// - [`QrisError::MissingChecksumTag`] when the payload does not end in
///   `6304` + four characters
/// - [`QrisError::ChecksumMismatch`] when the value is wrong
pub fn verify_checksum(payload: &str) -> QrisResult<()> {
    let (signed, found) = split_trailer(payload.trim())?;

    let expected = checksum::checksum_hex(signed);
    if !expected.eq_ignore_ascii_case(found) {
        return Err(QrisError::ChecksumMismatch {
            expected,
            found: found.to_string(),
        });
    }
    Ok(())
}

/// Splits a payload into the checksummed prefix (core + `6304`) and the
/// stored checksum value.
fn split_trailer(payload: &str) -> QrisResult<(&str, &str)> {
    if payload.len() < MIN_PAYLOAD_LEN {
        return Err(QrisError::TooShort {
            len: payload.len(),
            min: MIN_PAYLOAD_LEN,
        });
    }

    let value_start = payload.len() - CHECKSUM_HEX_LEN;
    let marker_start = value_start - CHECKSUM_MARKER.len();
    match (
        payload.get(marker_start..value_start),
        payload.get(..value_start),
        payload.get(value_start..),
    ) {
        (Some(CHECKSUM_MARKER), Some(signed), Some(found)) => Ok((signed, found)),
        _ => Err(QrisError::MissingChecksumTag),
    }
}

// =============================================================================
// Payload View
// =============================================================================

/// A full payload split into its entries and stored checksum.
///
/// Used by front ends that want to show what a scanned code contains. The
/// checksum tag itself is not part of `entries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    /// Top-level entries before the checksum tag, in wire order.
    pub entries: Vec<TlvEntry>,

    /// Checksum value as stored in the payload.
    pub checksum: String,

    /// Whether `checksum` matches the payload content.
    pub checksum_valid: bool,
}

impl Payload {
    /// Parses a complete payload ending in `6304XXXX`.
    ///
    /// A wrong checksum is not an error here; it is reported through
    /// `checksum_valid` so the entries can still be shown.
    ///
    /// ## Example
    /// ```rust
    /// use qris_core::Payload;
    ///
    /// let payload = Payload::parse("0002010102115906WARUNG6304F7A0").unwrap();
    /// assert_eq!(payload.entries.len(), 3);
    /// assert_eq!(payload.checksum, "F7A0");
    /// assert!(payload.checksum_valid);
    /// assert!(!payload.is_dynamic());
    /// ```
    pub fn parse(payload: &str) -> QrisResult<Self> {
        let payload = payload.trim();
        let (signed, found) = split_trailer(payload)?;
        let core = &signed[..signed.len() - CHECKSUM_MARKER.len()];

        Ok(Payload {
            entries: tlv::decode(core)?,
            checksum: found.to_string(),
            checksum_valid: verify_checksum(payload).is_ok(),
        })
    }

    /// Returns the value of the first entry tagged `tag`.
    pub fn value(&self, tag: &str) -> Option<&str> {
        tlv::find(&self.entries, tag).map(|entry| entry.value.as_str())
    }

    /// Whether the payload carries a transaction amount.
    pub fn is_dynamic(&self) -> bool {
        self.value(tags::TRANSACTION_AMOUNT).is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
