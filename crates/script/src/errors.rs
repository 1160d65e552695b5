//! Errors raised while generating an import script.

use std::io;

use bitcoin::Network;
use keysweep_keys::{DerivationError, PathError, RepresentationError};
use thiserror::Error;

use crate::generator::Branch;

/// Error while estimating a block height from a wallet birthday.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BirthdayError {
    /// No genesis timestamp is known for the network.
    #[error("unimplemented network {0}, cannot estimate a birthday height")]
    UnknownNetwork(Network),
}

/// Error while resolving a [`ScriptConfig`](crate::ScriptConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The configured derivation path prefix could not be parsed.
    #[error("error parsing path: {0}")]
    MalformedPath(#[from] PathError),

    /// The wallet birthday could not be turned into a rescan height.
    #[error(transparent)]
    Birthday(#[from] BirthdayError),
}

/// Error while writing an import script.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A key on the enumerated path could not be derived.
    #[error("could not derive key {branch}/{index}: {source}")]
    Derivation {
        /// Branch of the failing key.
        branch: Branch,

        /// Index of the failing key within its branch.
        index: u32,

        /// Underlying failure.
        #[source]
        source: DerivationError,
    },

    /// A derived key could not be turned into its wallet representations.
    #[error("could not represent key {branch}/{index}: {source}")]
    Representation {
        /// Branch of the failing key.
        branch: Branch,

        /// Index of the failing key within its branch.
        index: u32,

        /// Underlying failure.
        #[source]
        source: RepresentationError,
    },

    /// The output could not be written.
    #[error("could not write import script: {0}")]
    Io(#[from] io::Error),
}
