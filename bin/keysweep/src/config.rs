//! Loads script options from a TOML file.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use keysweep_script::ScriptConfig;
use tracing::{debug, trace};

/// Reads and parses the config file at `path`.
///
/// No path means no file, in which case every option is left unset.
pub(crate) fn load(path: Option<&Path>) -> Result<ScriptConfig> {
    let Some(path) = path else {
        return Ok(ScriptConfig::default());
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    trace!(?raw, "read config file");

    let parsed = toml::from_str::<ScriptConfig>(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    debug!(?parsed, "parsed config file");

    Ok(parsed)
}
