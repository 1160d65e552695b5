//! Generates `bitcoin-cli` import scripts for the keys below an extended root key.

mod args;
mod config;
mod input;

use std::io::{self, BufWriter, IsTerminal};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use keysweep_common::logging::{self, LoggerConfig};
use keysweep_script::{ImportScriptGenerator, RescanSource, ScriptConfig};
use tracing::{info, warn};

use crate::args::Cli;

fn main() -> Result<()> {
    let mut logger_config = LoggerConfig::with_base_name("keysweep");
    logger_config.set_ansi(io::stderr().is_terminal());
    logging::init(logger_config);

    let cli = Cli::parse();
    let network = cli.network;

    let file_config = config::load(cli.config.as_deref())?;

    let (root, prompted) = match cli.rootkey.as_deref() {
        Some(encoded) => (
            input::parse_root_key(encoded, network)?,
            ScriptConfig::default(),
        ),
        None => {
            let input = input::prompt(network)?;
            let prompted = ScriptConfig {
                birthday: input.birthday,
                ..Default::default()
            };
            (input.root, prompted)
        }
    };

    let resolved = file_config
        .merge(prompted)
        .merge(cli.script_config())
        .resolve(network)
        .context("invalid script options")?;

    match resolved.rescan_source {
        RescanSource::Explicit => {}
        RescanSource::Birthday => {
            info!(
                height = resolved.rescan_from,
                "estimated rescan height from birthday"
            );
        }
        RescanSource::Default => {
            warn!(
                height = resolved.rescan_from,
                "no rescan height known, using default"
            );
        }
    }

    let generator = ImportScriptGenerator::new(root, network, resolved);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = generator
        .write_script(Utc::now(), &mut out)
        .context("failed to generate import script")?;

    info!(
        keys = summary.keys_written,
        rescan_from = summary.rescan_from,
        "wrote import script"
    );

    Ok(())
}
