//! TON address validation and normalization.
//!
//! A transfer recipient can arrive in any of three textual forms:
//!
//! - **Bounceable** user-friendly base64 (`EQ...`)
//! - **Non-bounceable** user-friendly base64 (`UQ...`)
//! - **Raw** `workchain:hex` form (`0:abc...`)
//!
//! [`ValidatedAddress::validate`] accepts all three, checks structure and
//! checksum, and canonicalizes to the raw form so that address equality is
//! plain string equality after normalization. Validation is purely
//! syntactic (no chain lookups) and total: malformed input yields
//! `kind = Invalid` rather than an error.
//!
//! # Example
//!
//! ```
//! use tonlink_address::{AddressKind, ValidatedAddress};
//!
//! let addr = ValidatedAddress::validate(
//!     "0:3d7eb227e5a3eb00b24894134799b1f334e06b5073f3a4e7261ef60631d7e3a0",
//! );
//! assert_eq!(addr.kind(), AddressKind::Raw);
//! assert!(addr.is_valid());
//! ```

use thiserror::Error;

mod address;

pub use address::{AddressKind, ValidatedAddress};

/// Errors raised by the internal address parsers.
///
/// These never escape [`ValidatedAddress::validate`]; they are folded into
/// `AddressKind::Invalid` and kept for diagnostics.
#[derive(Debug, Error)]
pub enum AddressError {
    /// Input is empty or whitespace only.
    #[error("Address is empty")]
    Empty,

    /// Workchain part of a raw-form address is not a valid integer.
    #[error("Invalid workchain: {0}")]
    InvalidWorkchain(String),

    /// Hex part of a raw-form address has the wrong length or bad digits.
    #[error("Invalid address hex: {0}")]
    InvalidHex(String),

    /// User-friendly form is not valid base64.
    #[error("Invalid base64: {0}")]
    InvalidBase64(String),

    /// User-friendly form decoded to the wrong byte length.
    #[error("User-friendly address must be 36 bytes, got {0}")]
    WrongLength(usize),

    /// CRC16 checksum of a user-friendly form does not match.
    #[error("CRC16 mismatch: expected {expected:04x}, got {actual:04x}")]
    CrcMismatch { expected: u16, actual: u16 },

    /// Tag byte of a user-friendly form is neither bounceable nor
    /// non-bounceable.
    #[error("Unknown address tag: {0:#04x}")]
    UnknownTag(u8),

    /// Input matches no known representation.
    #[error("Unrecognized address format: {0}")]
    Unrecognized(String),
}

/// Result type for address parsing.
pub type AddressResult<T> = Result<T, AddressError>;
