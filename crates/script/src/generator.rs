//! Enumerates the receive and change branches and writes the import script.

use std::{fmt, io::Write};

use bitcoin::{bip32::ChildNumber, Network};
use chrono::{DateTime, Utc};
use keysweep_keys::{derive, represent, DerivationPath, ExtendedKey, KeyRepresentation};
use tracing::{debug, info, warn};

use crate::{
    config::ResolvedConfig,
    constants::BITCOIN_CLI,
    errors::GenerateError,
    render::KeyLabel,
};

/// One of the two conventional branches below an account key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Branch {
    /// Receive addresses, `.../0/i`.
    External,

    /// Change addresses, `.../1/i`.
    Internal,
}

impl Branch {
    /// Both branches in the order they are written.
    pub const ALL: [Self; 2] = [Self::External, Self::Internal];

    /// The non-hardened index of the branch.
    pub const fn index(&self) -> u32 {
        match self {
            Self::External => 0,
            Self::Internal => 1,
        }
    }

    /// The branch as a derivation step.
    pub const fn child_number(&self) -> ChildNumber {
        ChildNumber::Normal {
            index: self.index(),
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Totals of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Number of key lines written.
    pub keys_written: u64,

    /// Height used in the rescan directive.
    pub rescan_from: u32,
}

/// Writes import scripts for the keys below one root key.
#[derive(Debug, Clone)]
pub struct ImportScriptGenerator {
    root: ExtendedKey,
    network: Network,
    config: ResolvedConfig,
}

impl ImportScriptGenerator {
    /// Creates a generator for `root` on `network`.
    pub const fn new(root: ExtendedKey, network: Network, config: ResolvedConfig) -> Self {
        Self {
            root,
            network,
            config,
        }
    }

    /// The settings the generator runs with.
    pub const fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// All `(branch, index)` pairs in output order: the whole external branch first, then the
    /// internal one, indices ascending.
    pub fn entries(&self) -> impl Iterator<Item = (Branch, u32)> {
        let window = self.config.recovery_window;
        Branch::ALL
            .into_iter()
            .flat_map(move |branch| (0..window).map(move |index| (branch, index)))
    }

    /// The full path of the key at `index` on `branch`.
    pub fn key_path(&self, branch: Branch, index: u32) -> Result<DerivationPath, GenerateError> {
        let index_step = ChildNumber::from_normal_idx(index).map_err(|e| {
            GenerateError::Derivation {
                branch,
                index,
                source: e.into(),
            }
        })?;
        Ok(self
            .config
            .derivation_path
            .extend([branch.child_number(), index_step]))
    }

    /// Derives and represents the key at `index` on `branch`.
    pub fn key_representation(
        &self,
        branch: Branch,
        index: u32,
    ) -> Result<KeyRepresentation, GenerateError> {
        let path = self.key_path(branch, index)?;
        let key = derive(&self.root, &path).map_err(|source| GenerateError::Derivation {
            branch,
            index,
            source,
        })?;
        represent(&key, self.network).map_err(|source| GenerateError::Representation {
            branch,
            index,
            source,
        })
    }

    /// Renders the script line of the key at `index` on `branch`.
    pub fn key_line(&self, branch: Branch, index: u32) -> Result<String, GenerateError> {
        let repr = self.key_representation(branch, index)?;
        let label = KeyLabel {
            prefix: &self.config.derivation_path,
            branch,
            index,
        };
        let strategy = self.config.strategy;
        strategy.render(&repr, &label).map_err(|source| GenerateError::Representation {
            branch,
            index,
            source,
        })
    }

    /// The final line asking the wallet to rescan the chain.
    pub fn rescan_directive(&self) -> String {
        format!("{BITCOIN_CLI} rescanblockchain {}", self.config.rescan_from)
    }

    /// Writes the complete script to `out`.
    ///
    /// `created_at` only appears in the header comment, the rest of the output depends on the
    /// root key, network and config alone. The first failing key aborts the run; lines written
    /// before it are not taken back.
    pub fn write_script<W: Write>(
        &self,
        created_at: DateTime<Utc>,
        out: &mut W,
    ) -> Result<GenerateSummary, GenerateError> {
        let strategy = self.config.strategy;
        info!(
            format = %strategy,
            path = %self.config.derivation_path,
            window = self.config.recovery_window,
            "generating import script"
        );
        if strategy.exports_private_keys() {
            warn!("the generated script contains private keys, handle it with care");
        }

        writeln!(out, "# Wallet dump created by keysweep on {created_at}")?;
        writeln!(out, "{}", strategy.usage_hint())?;

        let mut keys_written = 0u64;
        for (branch, index) in self.entries() {
            if index == 0 {
                debug!(%branch, "starting branch");
            }
            let line = self.key_line(branch, index)?;
            writeln!(out, "{line}")?;
            keys_written += 1;
        }

        writeln!(out, "{}", self.rescan_directive())?;
        out.flush()?;

        info!(keys_written, rescan_from = self.config.rescan_from, "import script done");
        Ok(GenerateSummary {
            keys_written,
            rescan_from: self.config.rescan_from,
        })
    }
}
