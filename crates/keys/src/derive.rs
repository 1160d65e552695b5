//! Hierarchical child key derivation.

use bitcoin::bip32::ChildNumber;
use secp256k1::SECP256K1;
use tracing::trace;

use crate::{errors::DerivationError, xkey::ExtendedKey};

/// Performs a single BIP32 child key derivation step.
///
/// Private keys derive private children for both hardened and normal steps. Public-only keys can
/// only take normal steps.
pub fn derive_step(key: &ExtendedKey, child: ChildNumber) -> Result<ExtendedKey, DerivationError> {
    match key {
        ExtendedKey::Private(xpriv) => Ok(ExtendedKey::Private(
            xpriv.derive_priv(SECP256K1, &[child])?,
        )),
        ExtendedKey::Public(xpub) => {
            if child.is_hardened() {
                return Err(DerivationError::PrivateMaterialRequired {
                    child,
                    depth: xpub.depth,
                });
            }
            Ok(ExtendedKey::Public(xpub.ckd_pub(SECP256K1, child)?))
        }
    }
}

/// Derives the key at `path` relative to `root`, one step at a time.
///
/// The path is applied relative to whatever depth `root` is at; an empty path returns `root`
/// unchanged.
pub fn derive(
    root: &ExtendedKey,
    path: impl AsRef<[ChildNumber]>,
) -> Result<ExtendedKey, DerivationError> {
    let path = path.as_ref();
    trace!(depth = root.depth(), steps = path.len(), "deriving child key");

    let mut key = *root;
    for child in path {
        key = derive_step(&key, *child)?;
    }
    Ok(key)
}
