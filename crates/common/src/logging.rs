//! Provides utilities to initialize logging.
//!
//! Everything is written to stderr. Stdout is reserved for the generated import script so that it
//! can be piped straight into a file or a shell.
use std::{env, io};

use tracing::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable name for the service label, which is appended to the whoami string.
pub const SVC_LABEL_ENVVAR: &str = "KEYSWEEP_SVC_LABEL";

/// Filter directive used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "warn";

/// Configuration for the logger.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// The whoami string, which is used to identify the program in logs.
    whoami: String,

    /// Whether to colorize the output.
    ansi: bool,
}

impl LoggerConfig {
    /// Creates a new instance with whoami set and colors enabled.
    pub const fn new(whoami: String) -> Self {
        Self { whoami, ansi: true }
    }

    /// Creates a new instance with the whoami string derived from the provided base name.
    pub fn with_base_name(s: &str) -> Self {
        Self::new(get_whoami_string(s))
    }

    /// Enables or disables ANSI colors in the output.
    pub fn set_ansi(&mut self, ansi: bool) {
        self.ansi = ansi;
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::with_base_name("keysweep")
    }
}

/// Initializes the logging subsystem with the provided config.
///
/// # Panics
///
/// If a global subscriber has already been installed.
pub fn init(config: LoggerConfig) {
    let filt = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let log_file = env::var("LOG_FILE").is_ok_and(|v| v == "1");
    let log_line_num = env::var("LOG_LINE_NUM").is_ok_and(|v| v == "1");

    let stderr_sub = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_ansi(config.ansi)
        .event_format(
            tracing_subscriber::fmt::format()
                .with_file(log_file)
                .with_line_number(log_line_num),
        )
        .with_filter(filt);

    tracing_subscriber::registry().with(stderr_sub).init();

    debug!(whoami = %config.whoami, "logging started");
}

/// Gets the service label from the standard envvar, which should be included in the whoami
/// string.
pub fn get_service_label_from_env() -> Option<String> {
    env::var(SVC_LABEL_ENVVAR).ok()
}

/// Computes a standard whoami string.
pub fn get_whoami_string(base: &str) -> String {
    match get_service_label_from_env() {
        Some(label) => format!("{base}%{label}"),
        None => base.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_can_be_turned_off() {
        let mut config = LoggerConfig::new("keysweep".to_string());
        assert!(config.ansi);

        config.set_ansi(false);
        assert!(!config.ansi);
        assert_eq!(config.whoami, "keysweep");
    }
}
