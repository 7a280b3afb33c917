//! # Error Types
//!
//! Domain-specific error types for qris-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  qris-core errors (this file)                                          │
//! │  ├── TlvError     - Stream framing failures (MalformedStream)          │
//! │  ├── AmountError  - Amount normalization failures (InvalidAmount)      │
//! │  └── QrisError    - Everything the transform can report                │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError     - What the terminal sees (code + message)            │
//! │                                                                         │
//! │  Flow: TlvError/AmountError → QrisError → CliError → stderr / JSON     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (tag id, offset, lengths)
//! 3. Errors are enum variants, never String
//! 4. Nothing here is logged; callers decide how to surface it

use thiserror::Error;

// =============================================================================
// TLV Error
// =============================================================================

/// A TLV stream could not be decoded or encoded.
///
/// Every variant means the framing itself is wrong. Values are never
/// inspected beyond their length.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TlvError {
    /// Fewer than four characters remain where a tag header should start.
    #[error("malformed EMV data: incomplete tag header at offset {offset}")]
    IncompleteHeader { offset: usize },

    /// The tag identifier is not two ASCII digits.
    #[error("malformed EMV data: invalid tag id at offset {offset}")]
    InvalidTag { offset: usize },

    /// The length field is not two ASCII digits.
    #[error("invalid length for tag `{tag}`")]
    InvalidLength { tag: String },

    /// The declared length runs past the end of the input.
    ///
    /// ## When This Occurs
    /// ```text
    /// ... 59 99 WARUNG
    ///        │  └──────┘ only 6 characters left
    ///        └── claims 99
    /// ```
    #[error("malformed EMV data: tag `{tag}` length out of range")]
    LengthOutOfRange { tag: String },

    /// The declared length ends inside a multi-byte UTF-8 character.
    #[error("malformed EMV data: tag `{tag}` length splits a multi-byte character")]
    SplitCharacter { tag: String },

    /// A value is too long for a two-digit length field.
    #[error("value of tag `{tag}` is {len} bytes, at most 99 fit in a length field")]
    ValueTooLong { tag: String, len: usize },
}

// =============================================================================
// Amount Error
// =============================================================================

/// The user-supplied amount could not be normalized.
///
/// The display strings are the reasons shown to the payer, so they stay
/// short and free of internal detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Nothing left after trimming whitespace.
    #[error("empty amount")]
    Empty,

    /// More than one decimal separator.
    #[error("invalid amount format")]
    InvalidFormat,

    /// Anything other than ASCII digits after removing the separator.
    #[error("amount contains non-numeric characters")]
    NonNumeric,

    /// Too many digits to frame as a single TLV value.
    #[error("amount has more than {max} digits")]
    TooLong { max: usize },
}

// =============================================================================
// QRIS Error
// =============================================================================

/// Errors reported by payload conversion and verification.
///
/// All of these are terminal for one call: there are no partial results and
/// retrying with the same input gives the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrisError {
    /// Input is shorter than any payload that could carry a checksum.
    #[error("payload too short: {len} characters, need at least {min}")]
    TooShort { len: usize, min: usize },

    /// The `6304` checksum marker is missing.
    #[error("payload missing checksum tag 63")]
    MissingChecksumTag,

    /// A TLV stream failed to decode or encode.
    #[error("malformed TLV stream: {0}")]
    MalformedStream(#[from] TlvError),

    /// The amount failed normalization.
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// The core of the static payload is not a valid TLV stream.
    ///
    /// ## Why not just `MalformedStream`?
    /// Front ends distinguish "the QR you scanned is broken" from our own
    /// encoding failures; this variant marks the former.
    #[error("failed to parse static QRIS: {0}")]
    InvalidStaticQris(#[source] TlvError),

    /// The stored checksum does not match the payload.
    #[error("checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with QrisError.
pub type QrisResult<T> = Result<T, QrisError>;

/// Result type for TLV codec operations.
pub type TlvResult<T> = Result<T, TlvError>;

// =============================================================================
// Unit Tests
// =============================================================================
