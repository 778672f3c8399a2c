//! Log subscriber setup
//!
//! Logs go to stderr so they never mix with the display lines on stdout.
//! `RUST_LOG` takes precedence over the `-v`/`-q` derived filter.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Builds the filter for `config`, preferring `RUST_LOG` when it parses
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.default_filter()))
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(config: &CliConfig) -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color())
        .with_target(config.verbosity.is_verbose())
        .try_init()
        .map_err(|e| CliError::logging(e.to_string()))
}
