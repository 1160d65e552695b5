//! Errors for key parsing, derivation and representation.

use bitcoin::{
    address::P2shError,
    bip32::{self, ChildNumber},
};
use thiserror::Error;

/// Error while parsing a textual derivation path such as `m/84'/0'/0'`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path does not start with the master marker `m`.
    #[error("derivation path must start with 'm', got {0:?}")]
    MissingMaster(String),

    /// A segment between two separators (or after a trailing separator) is empty.
    #[error("empty segment at position {position} in derivation path")]
    EmptySegment {
        /// Zero-based position of the segment after the master marker.
        position: usize,
    },

    /// A segment is not a decimal number with an optional hardened marker.
    #[error("invalid derivation path segment {0:?}")]
    InvalidSegment(String),

    /// A segment's numeric part has a leading zero, e.g. `084'`.
    #[error("derivation path segment {0:?} has a leading zero")]
    LeadingZero(String),

    /// A segment's numeric part does not fit in 31 bits.
    #[error("derivation index {0} is out of range, must be below 2^31")]
    IndexOutOfRange(u64),
}

/// Error while decoding an encoded extended key.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The string is neither a valid extended private key nor a valid extended public key.
    #[error("malformed extended key: {0}")]
    Malformed(#[source] bip32::Error),
}

/// Error while deriving a child key.
#[derive(Debug, Error)]
pub enum DerivationError {
    /// A hardened step was attempted on a key without private material.
    #[error("private material required for hardened step {child} at depth {depth}")]
    PrivateMaterialRequired {
        /// The hardened child that was requested.
        child: ChildNumber,

        /// Depth of the public-only key the step was attempted on.
        depth: u8,
    },

    /// The underlying BIP32 step failed, e.g. the maximum depth was exceeded.
    #[error("bip32 derivation failed: {0}")]
    Bip32(#[from] bip32::Error),
}

/// Error while building the wallet representations of a derived key.
#[derive(Debug, Error)]
pub enum RepresentationError {
    /// The private key export was requested for a key without private material.
    #[error("private material required to export the signing key")]
    PrivateMaterialRequired,

    /// The nested witness script could not be wrapped into a script hash address.
    #[error("could not create script hash address: {0}")]
    RedeemScript(#[from] P2shError),
}
