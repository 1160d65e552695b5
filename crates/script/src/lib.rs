//! Generation of wallet import scripts for `bitcoin-cli`.
//!
//! Given a root extended key, the generator derives the receive (`0`) and change (`1`) branches
//! below a path prefix over a recovery window, renders every key in one of the supported script
//! formats and finishes with a `rescanblockchain` directive whose start height can be estimated
//! from the wallet birthday.

pub mod birthday;
pub mod config;
pub mod constants;
pub mod errors;
pub mod generator;
pub mod render;

pub use birthday::{estimate, estimate_with_margin};
pub use config::{ResolvedConfig, RescanSource, ScriptConfig};
pub use errors::{BirthdayError, ConfigError, GenerateError};
pub use generator::{Branch, GenerateSummary, ImportScriptGenerator};
pub use render::{KeyLabel, RenderStrategy};
