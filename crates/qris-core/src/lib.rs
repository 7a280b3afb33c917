//! # qris-core: Pure Payload Logic for QRIS
//!
//! This crate turns a *static* QRIS payload (merchant only, payer types the
//! amount) into a *dynamic* one (amount pre-filled), and exposes the pieces
//! it is built from as independently usable primitives.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QRIS Toolkit Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Front end (CLI, HTTP service, mobile app)            │   │
//! │  │     QR image ──► decoded text          payload ──► QR image     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &str in, String out                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ qris-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │    tlv    │  │ checksum  │  │  amount   │  │ transform │  │   │
//! │  │   │  decode   │  │  CRC-16   │  │ normalize │  │  static → │  │   │
//! │  │   │  encode   │  │  render   │  │           │  │  dynamic  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`tlv`] - Tag-Length-Value codec for one nesting level
//! - [`checksum`] - CRC-16/CCITT-FALSE engine and hex rendering
//! - [`amount`] - Amount string normalization for tag `54`
//! - [`transform`] - Static-to-dynamic conversion, signing and verification
//! - [`tags`] - Well-known EMV/QRIS tag identifiers
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, safe to call from any thread
//! 2. **Byte-Exact Framing**: decode then encode reproduces the input exactly
//! 3. **Explicit Errors**: every failure is a typed variant, never a panic
//!
//! ## Example Usage
//!
//! ```rust
//! use qris_core::convert_static_to_dynamic;
//!
//! let static_qris = "0002010102115906WARUNG6304F7A0";
//! let dynamic = convert_static_to_dynamic(static_qris, "2500").unwrap();
//!
//! // No country code or additional data tag: the amount goes last.
//! assert_eq!(dynamic, "0002010102115906WARUNG5404250063044D4D");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod checksum;
pub mod error;
pub mod tags;
pub mod tlv;
pub mod transform;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use qris_core::TlvEntry` instead of
// `use qris_core::tlv::TlvEntry`

pub use error::{AmountError, QrisError, QrisResult, TlvError};
pub use tlv::TlvEntry;
pub use transform::{convert_static_to_dynamic, sign, verify_checksum, Payload};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Shortest input worth searching for a checksum marker.
///
/// A payload-format entry (`000201`) plus the `6304` marker is already ten
/// characters; anything shorter cannot be a QRIS payload.
pub const MIN_PAYLOAD_LEN: usize = 10;

/// Largest value length a two-digit length field can express.
pub const MAX_VALUE_LEN: usize = 99;

/// Checksum tag header: tag `63` followed by its fixed length `04`.
pub const CHECKSUM_MARKER: &str = "6304";

/// Number of hex digits in a rendered checksum.
pub const CHECKSUM_HEX_LEN: usize = 4;
