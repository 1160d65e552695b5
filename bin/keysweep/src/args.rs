//! Parses command-line arguments for the keysweep CLI.

use std::path::PathBuf;

use bitcoin::Network;
use chrono::{DateTime, Utc};
use clap::{crate_version, Parser};
use keysweep_script::ScriptConfig;

use crate::input::parse_birthday;

#[derive(Debug, Parser)]
#[clap(
    name = "keysweep",
    about = "Generates a bitcoin-cli import script for the keys below an extended root key",
    version = crate_version!()
)]
pub(crate) struct Cli {
    #[arg(
        long,
        env = "KEYSWEEP_ROOTKEY",
        hide_env_values = true,
        help = "the extended root key (xprv/tprv/xpub/tpub), prompted for if omitted"
    )]
    pub(crate) rootkey: Option<String>,

    #[arg(
        long,
        env = "KEYSWEEP_FORMAT",
        help = "output format: bitcoin-cli, bitcoin-cli-watchonly or bitcoin-importwallet"
    )]
    pub(crate) format: Option<String>,

    #[arg(
        long = "derivationpath",
        env = "KEYSWEEP_DERIVATION_PATH",
        help = "path prefix below which the 0 and 1 branches are derived [default: m/84'/0'/0']"
    )]
    pub(crate) derivation_path: Option<String>,

    #[arg(
        long = "recoverywindow",
        env = "KEYSWEEP_RECOVERY_WINDOW",
        help = "number of keys per branch [default: 2500]"
    )]
    pub(crate) recovery_window: Option<u32>,

    #[arg(
        long = "rescanfrom",
        env = "KEYSWEEP_RESCAN_FROM",
        help = "block height to rescan from [default: estimated from the birthday, else 500000]"
    )]
    pub(crate) rescan_from: Option<u32>,

    #[arg(
        long,
        env = "KEYSWEEP_BIRTHDAY",
        value_parser = parse_birthday,
        help = "wallet creation time as RFC 3339 timestamp or YYYY-MM-DD date"
    )]
    pub(crate) birthday: Option<DateTime<Utc>>,

    #[arg(
        long,
        short = 'n',
        env = "KEYSWEEP_NETWORK",
        default_value_t = Network::Bitcoin,
        help = "the network of the root key: bitcoin, testnet, signet or regtest"
    )]
    pub(crate) network: Network,

    #[arg(
        long,
        short = 'c',
        env = "KEYSWEEP_CONFIG",
        help = "TOML file with defaults for the script options"
    )]
    pub(crate) config: Option<PathBuf>,
}

impl Cli {
    /// The script options given on the command line, unset values left at zero or `None`.
    pub(crate) fn script_config(&self) -> ScriptConfig {
        ScriptConfig {
            format: self.format.clone(),
            derivation_path: self.derivation_path.clone(),
            recovery_window: self.recovery_window.unwrap_or_default(),
            rescan_from: self.rescan_from.unwrap_or_default(),
            birthday: self.birthday,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "keysweep",
            "--rootkey",
            "tprv-placeholder",
            "--format",
            "bitcoin-importwallet",
            "--derivationpath",
            "m/49'/1'/0'",
            "--recoverywindow",
            "10",
            "--rescanfrom",
            "1234",
            "--birthday",
            "2021-05-06",
            "--network",
            "testnet",
        ])
        .unwrap();

        assert_eq!(cli.network, Network::Testnet);
        assert_eq!(cli.rootkey.as_deref(), Some("tprv-placeholder"));

        let config = cli.script_config();
        assert_eq!(config.format.as_deref(), Some("bitcoin-importwallet"));
        assert_eq!(config.derivation_path.as_deref(), Some("m/49'/1'/0'"));
        assert_eq!(config.recovery_window, 10);
        assert_eq!(config.rescan_from, 1234);
        assert_eq!(
            config.birthday,
            Some(Utc.with_ymd_and_hms(2021, 5, 6, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn omitted_flags_stay_unset() {
        let cli = Cli::try_parse_from(["keysweep"]).unwrap();

        assert_eq!(cli.network, Network::Bitcoin);
        assert_eq!(cli.script_config(), ScriptConfig::default());
    }

    #[test]
    fn rejects_malformed_birthday() {
        assert!(Cli::try_parse_from(["keysweep", "--birthday", "last tuesday"]).is_err());
    }
}
