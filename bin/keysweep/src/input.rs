//! Reads the root key and wallet birthday from flags or the console.

use anyhow::{bail, Context, Result};
use bip39::Mnemonic;
use bitcoin::{bip32::Xpriv, Network, NetworkKind};
use chrono::{DateTime, NaiveDate, Utc};
use dialoguer::{Input, Password, Select};
use keysweep_keys::ExtendedKey;
use tracing::{debug, info};
use zeroize::Zeroizing;

/// What the user was asked for when no root key was passed on the command line.
#[derive(Debug)]
pub(crate) struct PromptedInput {
    pub(crate) root: ExtendedKey,
    pub(crate) birthday: Option<DateTime<Utc>>,
}

/// Parses a wallet birthday given either as RFC 3339 timestamp or as `YYYY-MM-DD` date.
pub(crate) fn parse_birthday(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid birthday `{s}`, expected RFC 3339 or YYYY-MM-DD"))
}

/// Parses an encoded extended key and checks it belongs to `network`.
pub(crate) fn parse_root_key(encoded: &str, network: Network) -> Result<ExtendedKey> {
    let root: ExtendedKey = encoded.parse().context("malformed root key")?;
    check_network(&root, network)?;
    Ok(root)
}

/// Turns a BIP39 mnemonic and passphrase into a master private key for `network`.
pub(crate) fn master_from_mnemonic(
    phrase: &str,
    passphrase: &str,
    network: Network,
) -> Result<ExtendedKey> {
    let mnemonic = Mnemonic::parse(phrase.trim()).context("malformed mnemonic")?;
    let seed = Zeroizing::new(mnemonic.to_seed(passphrase));
    let master = Xpriv::new_master(network, &seed[..]).context("could not create master key")?;
    Ok(master.into())
}

fn check_network(root: &ExtendedKey, network: Network) -> Result<()> {
    let expected = NetworkKind::from(network);
    if root.network() != expected {
        bail!(
            "root key is a {} key but network {network} was selected",
            kind_name(root.network())
        );
    }
    Ok(())
}

const fn kind_name(kind: NetworkKind) -> &'static str {
    match kind {
        NetworkKind::Main => "mainnet",
        NetworkKind::Test => "test network",
    }
}

/// Asks on the console for a root key, either encoded or as mnemonic, and an optional birthday.
pub(crate) fn prompt(network: Network) -> Result<PromptedInput> {
    let choice = Select::new()
        .with_prompt("How do you want to enter the root key?")
        .items(&["extended key (xprv/tprv/xpub/tpub)", "BIP39 mnemonic"])
        .default(0)
        .interact()
        .context("could not read key source")?;

    let root = match choice {
        0 => {
            let encoded = Password::new()
                .with_prompt("Extended root key")
                .interact()
                .map(Zeroizing::new)
                .context("could not read root key")?;
            parse_root_key(&encoded, network)?
        }
        _ => {
            let phrase = Password::new()
                .with_prompt("Mnemonic words, separated by spaces")
                .interact()
                .map(Zeroizing::new)
                .context("could not read mnemonic")?;
            let passphrase = Password::new()
                .with_prompt("Mnemonic passphrase (leave empty if none)")
                .allow_empty_password(true)
                .interact()
                .map(Zeroizing::new)
                .context("could not read passphrase")?;
            master_from_mnemonic(&phrase, &passphrase, network)?
        }
    };
    info!(fingerprint = %root.fingerprint(), private = root.has_private(), "read root key");

    let birthday: String = Input::new()
        .with_prompt("Wallet birthday, RFC 3339 or YYYY-MM-DD (leave empty if unknown)")
        .allow_empty(true)
        .interact_text()
        .context("could not read birthday")?;
    let birthday = match birthday.trim() {
        "" => None,
        s => Some(parse_birthday(s).map_err(anyhow::Error::msg)?),
    };
    debug!(?birthday, "read birthday");

    Ok(PromptedInput { root, birthday })
}
