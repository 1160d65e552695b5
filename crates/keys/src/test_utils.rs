//! Fixtures shared by the unit tests of this crate.

use bip39::Mnemonic;
use bitcoin::{bip32::Xpriv, Network};

/// BIP32 test vector 1 seed.
pub(crate) const TEST_SEED: [u8; 16] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
];

/// The all-`abandon` mnemonic used by the BIP49/BIP84 test vectors.
pub(crate) const ABANDON_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon \
                                           abandon abandon abandon abandon abandon about";

/// Master key of [`ABANDON_MNEMONIC`] with an empty passphrase.
pub(crate) fn abandon_master(network: Network) -> Xpriv {
    let mnemonic = Mnemonic::parse(ABANDON_MNEMONIC).expect("valid mnemonic");
    let seed = mnemonic.to_seed("");
    Xpriv::new_master(network, &seed).expect("valid seed")
}
