//! Defaults and fixed values used while generating import scripts.

/// Path prefix used when none is configured.
pub const DEFAULT_DERIVATION_PATH: &str = "m/84'/0'/0'";

/// Number of keys per branch used when the window is unset or zero.
pub const DEFAULT_RECOVERY_WINDOW: u32 = 2500;

/// Block height to rescan from when neither an explicit height nor a usable birthday is known.
pub const DEFAULT_RESCAN_FROM: u32 = 500_000;

/// Average number of seconds between two blocks.
pub const AVERAGE_BLOCK_INTERVAL_SECS: i64 = 600;

/// Slack subtracted from a wallet birthday before estimating its height.
///
/// Matches the slack the reference wallet applies to its own birthday.
pub const BIRTHDAY_SAFETY_MARGIN_HOURS: i64 = 48;

/// Creation time written for every key in the `importwallet` dump format.
pub const DUMP_KEY_TIMESTAMP: &str = "1970-01-01T00:00:01Z";

/// Command prefix of the generated script lines.
pub const BITCOIN_CLI: &str = "bitcoin-cli";
