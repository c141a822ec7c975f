//! Diagnostic logging for the CLI.
//!
//! Library crates only emit `tracing` events; the binary decides where they
//! go. Everything is written to stderr so stdout stays clean for results and
//! `--json` output.

use anyhow::{anyhow, Result};
use clap::Args;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

#[derive(Args, Debug, Clone, Default)]
pub struct LogArgs {
    /// Log filter, e.g. `info` or `costar_graph=debug` (falls back to `COSTAR_LOG`).
    #[arg(long = "log-level", env = "COSTAR_LOG", global = true)]
    pub log_level: Option<String>,
}

impl LogArgs {
    fn filter(&self) -> &str {
        self.log_level
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_FILTER)
    }
}

/// Install the global subscriber. Safe to call once per process.
pub fn init(args: &LogArgs) -> Result<()> {
    let filter = EnvFilter::try_new(args.filter())
        .map_err(|e| anyhow!("invalid log filter `{}`: {e}", args.filter()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_level_falls_back_to_default() {
        let args = LogArgs {
            log_level: Some("  ".to_string()),
        };
        assert_eq!(args.filter(), DEFAULT_FILTER);
        assert_eq!(LogArgs::default().filter(), DEFAULT_FILTER);
    }

    #[test]
    fn explicit_level_wins() {
        let args = LogArgs {
            log_level: Some("costar_graph=debug".to_string()),
        };
        assert_eq!(args.filter(), "costar_graph=debug");
    }
}
