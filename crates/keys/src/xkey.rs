//! Extended keys that may or may not carry private material.

use std::{fmt, str::FromStr};

use bitcoin::{
    bip32::{ChainCode, ChildNumber, Fingerprint, Xpriv, Xpub},
    CompressedPublicKey, NetworkKind,
};
use secp256k1::{SecretKey, SECP256K1};

use crate::errors::KeyError;

/// A BIP32 extended key.
///
/// The public half is always available; the private half only for [`ExtendedKey::Private`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedKey {
    /// Full private key material (`xprv`/`tprv`).
    Private(Xpriv),

    /// Public-only key material (`xpub`/`tpub`).
    Public(Xpub),
}

impl ExtendedKey {
    /// Returns `true` if the key holds private material.
    pub const fn has_private(&self) -> bool {
        matches!(self, Self::Private(_))
    }

    /// Number of derivation steps between the master key and this key.
    pub const fn depth(&self) -> u8 {
        match self {
            Self::Private(xpriv) => xpriv.depth,
            Self::Public(xpub) => xpub.depth,
        }
    }

    /// The 32-byte chain code.
    pub const fn chain_code(&self) -> ChainCode {
        match self {
            Self::Private(xpriv) => xpriv.chain_code,
            Self::Public(xpub) => xpub.chain_code,
        }
    }

    /// The child number this key was derived with.
    pub const fn child_number(&self) -> ChildNumber {
        match self {
            Self::Private(xpriv) => xpriv.child_number,
            Self::Public(xpub) => xpub.child_number,
        }
    }

    /// The network kind encoded in the key's version bytes.
    pub const fn network(&self) -> NetworkKind {
        match self {
            Self::Private(xpriv) => xpriv.network,
            Self::Public(xpub) => xpub.network,
        }
    }

    /// The private scalar, if present.
    pub const fn secret_key(&self) -> Option<SecretKey> {
        match self {
            Self::Private(xpriv) => Some(xpriv.private_key),
            Self::Public(_) => None,
        }
    }

    /// The extended public key, computed from the private key when needed.
    pub fn to_xpub(&self) -> Xpub {
        match self {
            Self::Private(xpriv) => Xpub::from_priv(SECP256K1, xpriv),
            Self::Public(xpub) => *xpub,
        }
    }

    /// The compressed public key.
    pub fn public_key(&self) -> CompressedPublicKey {
        CompressedPublicKey(self.to_xpub().public_key)
    }

    /// Fingerprint of this key, as used in the parent fingerprint of its children.
    pub fn fingerprint(&self) -> Fingerprint {
        self.to_xpub().fingerprint()
    }

    /// Drops the private material, if any.
    pub fn neuter(&self) -> Self {
        Self::Public(self.to_xpub())
    }
}

impl From<Xpriv> for ExtendedKey {
    fn from(xpriv: Xpriv) -> Self {
        Self::Private(xpriv)
    }
}

impl From<Xpub> for ExtendedKey {
    fn from(xpub: Xpub) -> Self {
        Self::Public(xpub)
    }
}

impl FromStr for ExtendedKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match Xpriv::from_str(s) {
            Ok(xpriv) => Ok(Self::Private(xpriv)),
            // Report the private key error, an xprv is what recovery normally starts from.
            Err(priv_err) => Xpub::from_str(s)
                .map(Self::Public)
                .map_err(|_| KeyError::Malformed(priv_err)),
        }
    }
}

impl fmt::Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Private(xpriv) => fmt::Display::fmt(xpriv, f),
            Self::Public(xpub) => fmt::Display::fmt(xpub, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use bitcoin::Network;

    use super::*;
    use crate::test_utils::{abandon_master, TEST_SEED};

    #[test]
    fn parses_private_and_public_encodings() {
        let master = Xpriv::new_master(Network::Bitcoin, &TEST_SEED).unwrap();
        let xprv = master.to_string();
        let xpub = Xpub::from_priv(SECP256K1, &master).to_string();

        let private: ExtendedKey = xprv.parse().unwrap();
        let public: ExtendedKey = xpub.parse().unwrap();

        assert!(private.has_private());
        assert!(!public.has_private());
        assert_eq!(private.to_string(), xprv);
        assert_eq!(public.to_string(), xpub);
        assert_eq!(private.public_key(), public.public_key());
        assert_eq!(private.chain_code(), public.chain_code());
        assert_eq!(private.neuter(), public);
        assert_eq!(private.network(), NetworkKind::Main);
        assert_eq!(private.depth(), 0);
    }

    #[test]
    fn accepts_surrounding_whitespace() {
        let master = abandon_master(Network::Testnet);
        let parsed: ExtendedKey = format!("  {master}\n").parse().unwrap();
        assert_eq!(parsed, ExtendedKey::Private(master));
        assert_eq!(parsed.network(), NetworkKind::Test);
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", "xprv", "not a key", "tpubDoesNotDecode"] {
            assert!(
                matches!(input.parse::<ExtendedKey>(), Err(KeyError::Malformed(_))),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn public_key_is_compressed() {
        let key = ExtendedKey::from(abandon_master(Network::Bitcoin));
        let serialized = key.public_key().to_bytes();

        assert_eq!(serialized.len(), 33);
        assert!(matches!(serialized[0], 0x02 | 0x03));
        assert!(key.secret_key().is_some());
        assert!(key.neuter().secret_key().is_none());
    }
}
