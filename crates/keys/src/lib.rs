//! BIP32 key handling for wallet recovery: derivation path prefixes, hierarchical child key
//! derivation over private or public-only extended keys, and the wallet-facing representations
//! (WIF, compressed public key, hash160 and the common address encodings) of a derived key.

pub mod derive;
pub mod errors;
pub mod path;
pub mod represent;
pub mod xkey;

pub use derive::{derive, derive_step};
pub use errors::{DerivationError, KeyError, PathError, RepresentationError};
pub use path::DerivationPath;
pub use represent::{represent, KeyRepresentation};
pub use xkey::ExtendedKey;

#[cfg(test)]
pub(crate) mod test_utils;
