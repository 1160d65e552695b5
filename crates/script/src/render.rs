//! Rendering of derived keys into `bitcoin-cli` friendly lines.

use std::fmt;

use bitcoin::hex::DisplayHex;
use keysweep_keys::{DerivationPath, KeyRepresentation, RepresentationError};
use tracing::debug;

use crate::{
    constants::{BITCOIN_CLI, DUMP_KEY_TIMESTAMP},
    generator::Branch,
};

/// Selector of [`RenderStrategy::DirectImport`].
pub const DIRECT_IMPORT_SELECTOR: &str = "bitcoin-cli";

/// Selector of [`RenderStrategy::WatchOnlyImport`].
pub const WATCH_ONLY_IMPORT_SELECTOR: &str = "bitcoin-cli-watchonly";

/// Selector of [`RenderStrategy::BulkDump`].
pub const BULK_DUMP_SELECTOR: &str = "bitcoin-importwallet";

/// The output format of the import script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RenderStrategy {
    /// One `bitcoin-cli importprivkey` call per key.
    #[default]
    DirectImport,

    /// One `bitcoin-cli importpubkey` call per key, no private material is emitted.
    WatchOnlyImport,

    /// A wallet dump file for `bitcoin-cli importwallet`.
    BulkDump,
}

impl RenderStrategy {
    /// All strategies, in selector documentation order.
    pub const ALL: [Self; 3] = [Self::DirectImport, Self::WatchOnlyImport, Self::BulkDump];

    /// Picks the strategy for a selector string.
    ///
    /// Unknown selectors fall back to [`RenderStrategy::DirectImport`].
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            DIRECT_IMPORT_SELECTOR => Self::DirectImport,
            WATCH_ONLY_IMPORT_SELECTOR => Self::WatchOnlyImport,
            BULK_DUMP_SELECTOR => Self::BulkDump,
            other => {
                debug!(selector = other, fallback = DIRECT_IMPORT_SELECTOR, "unknown format");
                Self::DirectImport
            }
        }
    }

    /// The selector string of this strategy.
    pub const fn selector(&self) -> &'static str {
        match self {
            Self::DirectImport => DIRECT_IMPORT_SELECTOR,
            Self::WatchOnlyImport => WATCH_ONLY_IMPORT_SELECTOR,
            Self::BulkDump => BULK_DUMP_SELECTOR,
        }
    }

    /// Returns `true` if the rendered lines contain private keys.
    pub const fn exports_private_keys(&self) -> bool {
        !matches!(self, Self::WatchOnlyImport)
    }

    /// Comment line telling the user what to do with the output.
    pub const fn usage_hint(&self) -> &'static str {
        match self {
            Self::DirectImport | Self::WatchOnlyImport => {
                "# Paste the following lines into a command line window."
            }
            Self::BulkDump => {
                "# Save this output to a file and use the importwallet command of bitcoin core."
            }
        }
    }

    /// Renders one key as a single line, without the trailing newline.
    ///
    /// Fails for public-only keys if the strategy exports private keys.
    pub fn render(
        &self,
        repr: &KeyRepresentation,
        label: &KeyLabel<'_>,
    ) -> Result<String, RepresentationError> {
        let line = match self {
            Self::DirectImport => {
                let wif = private_export(repr)?;
                format!("{BITCOIN_CLI} importprivkey {wif} \"{label}\" false")
            }
            Self::WatchOnlyImport => format!(
                "{BITCOIN_CLI} importpubkey {} \"{label}\" false",
                repr.public_key_bytes().to_lower_hex_string()
            ),
            Self::BulkDump => format!(
                "{} {DUMP_KEY_TIMESTAMP} label={label} # addr={},{},{}",
                private_export(repr)?,
                repr.p2pkh,
                repr.p2sh_p2wpkh,
                repr.p2wpkh
            ),
        };
        Ok(line)
    }
}

fn private_export(repr: &KeyRepresentation) -> Result<String, RepresentationError> {
    match repr.wif() {
        Some(wif) => Ok(wif),
        None => Err(RepresentationError::PrivateMaterialRequired),
    }
}

impl fmt::Display for RenderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// Position of a key, printed as `<prefix>/<branch>/<index>/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLabel<'a> {
    /// The configured path prefix.
    pub prefix: &'a DerivationPath,

    /// The branch below the prefix.
    pub branch: Branch,

    /// The index below the branch.
    pub index: u32,
}

impl fmt::Display for KeyLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}/", self.prefix, self.branch, self.index)
    }
}
