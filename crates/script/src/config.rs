//! User supplied settings and their resolution into the values the generator runs with.

use bitcoin::Network;
use chrono::{DateTime, Utc};
use keysweep_keys::DerivationPath;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    birthday::estimate_with_margin,
    constants::{DEFAULT_DERIVATION_PATH, DEFAULT_RECOVERY_WINDOW, DEFAULT_RESCAN_FROM},
    errors::ConfigError,
    render::RenderStrategy,
};

/// Settings of an import script run as provided by the user.
///
/// Zero and empty values mean "unset" and are replaced by defaults during
/// [`resolve`](Self::resolve).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptConfig {
    /// Output format selector, see [`RenderStrategy::from_selector`].
    pub format: Option<String>,

    /// Path prefix below which the receive and change branches are derived.
    pub derivation_path: Option<String>,

    /// Number of keys per branch.
    pub recovery_window: u32,

    /// Block height to rescan from.
    pub rescan_from: u32,

    /// Creation time of the wallet, used to estimate the rescan height.
    pub birthday: Option<DateTime<Utc>>,
}

/// Where the resolved rescan height came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescanSource {
    /// The user set it explicitly.
    Explicit,

    /// Estimated from the wallet birthday.
    Birthday,

    /// Nothing usable was given.
    Default,
}

/// Fully resolved settings of an import script run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// The selected output format.
    pub strategy: RenderStrategy,

    /// The parsed path prefix.
    pub derivation_path: DerivationPath,

    /// Number of keys per branch, never zero.
    pub recovery_window: u32,

    /// Block height for the final rescan directive.
    pub rescan_from: u32,

    /// Origin of [`rescan_from`](Self::rescan_from).
    pub rescan_source: RescanSource,
}

impl ScriptConfig {
    /// Overlays the set values of `other` on top of `self`.
    ///
    /// Used to let command line flags take precedence over a config file.
    pub fn merge(self, other: ScriptConfig) -> Self {
        Self {
            format: other.format.or(self.format),
            derivation_path: other.derivation_path.or(self.derivation_path),
            recovery_window: match other.recovery_window {
                0 => self.recovery_window,
                window => window,
            },
            rescan_from: match other.rescan_from {
                0 => self.rescan_from,
                height => height,
            },
            birthday: other.birthday.or(self.birthday),
        }
    }

    /// Replaces unset values with defaults and parses everything the generator needs.
    ///
    /// An explicit rescan height wins over a birthday estimate. The estimate subtracts the
    /// birthday safety margin first. Each value falls back to its default independently when it
    /// is unset or resolves to zero.
    pub fn resolve(&self, network: Network) -> Result<ResolvedConfig, ConfigError> {
        let strategy = self
            .format
            .as_deref()
            .map(RenderStrategy::from_selector)
            .unwrap_or_default();

        let derivation_path = self
            .derivation_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .unwrap_or(DEFAULT_DERIVATION_PATH)
            .parse::<DerivationPath>()?;

        let recovery_window = match self.recovery_window {
            0 => DEFAULT_RECOVERY_WINDOW,
            window => window,
        };

        let (rescan_from, rescan_source) = match (self.rescan_from, self.birthday) {
            (0, Some(birthday)) => match estimate_with_margin(birthday, network)? {
                0 => (DEFAULT_RESCAN_FROM, RescanSource::Default),
                height => (height, RescanSource::Birthday),
            },
            (0, None) => (DEFAULT_RESCAN_FROM, RescanSource::Default),
            (height, _) => (height, RescanSource::Explicit),
        };

        let resolved = ResolvedConfig {
            strategy,
            derivation_path,
            recovery_window,
            rescan_from,
            rescan_source,
        };
        debug!(?resolved, %network, "resolved import script config");

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use keysweep_keys::PathError;

    use super::*;

    #[test]
    fn empty_config_resolves_to_defaults() {
        let resolved = ScriptConfig::default().resolve(Network::Bitcoin).unwrap();

        assert_eq!(resolved.strategy, RenderStrategy::DirectImport);
        assert_eq!(resolved.derivation_path.to_string(), "m/84'/0'/0'");
        assert_eq!(resolved.recovery_window, 2500);
        assert_eq!(resolved.rescan_from, 500_000);
        assert_eq!(resolved.rescan_source, RescanSource::Default);
    }

    #[test]
    fn empty_path_string_is_unset() {
        let config = ScriptConfig {
            derivation_path: Some(String::new()),
            ..Default::default()
        };
        let resolved = config.resolve(Network::Bitcoin).unwrap();
        assert_eq!(
            resolved.derivation_path.to_string(),
            DEFAULT_DERIVATION_PATH
        );
    }

    #[test]
    fn explicit_values_are_kept() {
        let config = ScriptConfig {
            format: Some("bitcoin-importwallet".to_string()),
            derivation_path: Some("m/49'/1'/0'".to_string()),
            recovery_window: 10,
            rescan_from: 123,
            birthday: Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
        };
        let resolved = config.resolve(Network::Testnet).unwrap();

        assert_eq!(resolved.strategy, RenderStrategy::BulkDump);
        assert_eq!(resolved.derivation_path.to_string(), "m/49'/1'/0'");
        assert_eq!(resolved.recovery_window, 10);
        assert_eq!(resolved.rescan_from, 123);
        assert_eq!(resolved.rescan_source, RescanSource::Explicit);
    }

    #[test]
    fn birthday_is_used_without_explicit_height() {
        // 1000 blocks after the mainnet genesis block, plus the 48h margin.
        let birthday = Utc
            .timestamp_opt(1_231_006_505 + 172_800 + 600_000, 0)
            .unwrap();
        let config = ScriptConfig {
            birthday: Some(birthday),
            ..Default::default()
        };

        let resolved = config.resolve(Network::Bitcoin).unwrap();
        assert_eq!(resolved.rescan_from, 1_000);
        assert_eq!(resolved.rescan_source, RescanSource::Birthday);
    }

    #[test]
    fn zero_estimate_falls_back_to_default() {
        let config = ScriptConfig {
            birthday: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };

        let resolved = config.resolve(Network::Regtest).unwrap();
        assert_eq!(resolved.rescan_from, DEFAULT_RESCAN_FROM);
        assert_eq!(resolved.rescan_source, RescanSource::Default);
    }

    #[test]
    fn birthday_on_unknown_network_is_fatal() {
        let config = ScriptConfig {
            birthday: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };

        assert!(matches!(
            config.resolve(Network::Signet),
            Err(ConfigError::Birthday(_))
        ));
    }

    #[test]
    fn malformed_path_is_rejected() {
        let config = ScriptConfig {
            derivation_path: Some("84'/0'/0'".to_string()),
            ..Default::default()
        };

        assert_eq!(
            config.resolve(Network::Bitcoin),
            Err(ConfigError::MalformedPath(PathError::MissingMaster(
                "84'/0'/0'".to_string()
            )))
        );
    }

    #[test]
    fn non_canonical_path_is_rejected() {
        let config = ScriptConfig {
            derivation_path: Some("m/084'/0'/0'".to_string()),
            ..Default::default()
        };

        assert_eq!(
            config.resolve(Network::Bitcoin),
            Err(ConfigError::MalformedPath(PathError::LeadingZero(
                "084'".to_string()
            )))
        );
    }

    #[test]
    fn unknown_format_resolves_to_direct_import() {
        let config = ScriptConfig {
            format: Some("electrum".to_string()),
            ..Default::default()
        };
        let resolved = config.resolve(Network::Bitcoin).unwrap();
        assert_eq!(resolved.strategy, RenderStrategy::DirectImport);
    }

    #[test]
    fn merge_prefers_set_values_of_the_overlay() {
        let file = ScriptConfig {
            format: Some("bitcoin-cli-watchonly".to_string()),
            derivation_path: Some("m/44'/0'/0'".to_string()),
            recovery_window: 100,
            rescan_from: 700_000,
            birthday: None,
        };
        let flags = ScriptConfig {
            recovery_window: 5,
            ..Default::default()
        };

        let merged = file.clone().merge(flags);
        assert_eq!(merged.format, file.format);
        assert_eq!(merged.derivation_path, file.derivation_path);
        assert_eq!(merged.recovery_window, 5);
        assert_eq!(merged.rescan_from, 700_000);
    }

    #[test]
    fn deserializes_from_toml() {
        let config: ScriptConfig = toml::from_str(
            r#"
            format = "bitcoin-importwallet"
            derivation_path = "m/84'/1'/0'"
            recovery_window = 42
            birthday = "2021-03-04T05:06:07Z"
            "#,
        )
        .unwrap();

        assert_eq!(config.format.as_deref(), Some("bitcoin-importwallet"));
        assert_eq!(config.derivation_path.as_deref(), Some("m/84'/1'/0'"));
        assert_eq!(config.recovery_window, 42);
        assert_eq!(config.rescan_from, 0);
        assert_eq!(
            config.birthday,
            Some(Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap())
        );

        assert!(toml::from_str::<ScriptConfig>("window = 3").is_err());
    }
}
