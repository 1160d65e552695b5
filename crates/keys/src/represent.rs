//! Wallet-facing representations of a derived key.

use bitcoin::{Address, CompressedPublicKey, Network, PrivateKey, PubkeyHash, ScriptBuf};

use crate::{errors::RepresentationError, xkey::ExtendedKey};

/// Everything an external wallet may want to know about one derived key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRepresentation {
    /// The private key, always flagged as compressed, if the key holds private material.
    pub private_key: Option<PrivateKey>,

    /// The 33-byte compressed public key.
    pub public_key: CompressedPublicKey,

    /// `RIPEMD160(SHA256(public_key))`.
    pub pubkey_hash: PubkeyHash,

    /// Legacy pay-to-public-key-hash address.
    pub p2pkh: Address,

    /// Native segwit v0 pay-to-witness-public-key-hash address.
    pub p2wpkh: Address,

    /// Pay-to-witness-public-key-hash nested in pay-to-script-hash.
    pub p2sh_p2wpkh: Address,
}

impl KeyRepresentation {
    /// The WIF encoding of the private key, `None` for public-only keys.
    pub fn wif(&self) -> Option<String> {
        self.private_key.as_ref().map(|k| k.to_wif())
    }

    /// The serialized compressed public key.
    pub fn public_key_bytes(&self) -> [u8; 33] {
        self.public_key.to_bytes()
    }
}

/// Computes all representations of `key` for `network`.
///
/// Public-only keys yield every representation except the private key export.
pub fn represent(
    key: &ExtendedKey,
    network: Network,
) -> Result<KeyRepresentation, RepresentationError> {
    // `PrivateKey::new` always sets the compression flag.
    let private_key = key.secret_key().map(|sk| PrivateKey::new(sk, network));
    let public_key = key.public_key();
    let pubkey_hash = public_key.pubkey_hash();

    let p2pkh = Address::p2pkh(pubkey_hash, network);
    let p2wpkh = Address::p2wpkh(&public_key, network);

    let witness_script = ScriptBuf::new_p2wpkh(&public_key.wpubkey_hash());
    let p2sh_p2wpkh = Address::p2sh(&witness_script, network)?;

    Ok(KeyRepresentation {
        private_key,
        public_key,
        pubkey_hash,
        p2pkh,
        p2wpkh,
        p2sh_p2wpkh,
    })
}
