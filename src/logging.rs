//! Structured logging on stderr via `tracing`.
//!
//! Stdout carries the catalog, so log events never go there.

use crate::error::{CatalogError, Result};
use std::io::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub const LOG_ENV: &str = "AGENT_CATALOG_LOG";

/// Install the global subscriber. `AGENT_CATALOG_LOG` (EnvFilter syntax)
/// wins over the verbosity flag.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = build_env_filter(verbose);
    Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| CatalogError::Logging(e.to_string()))
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }
    EnvFilter::new(default_level(verbose))
}

fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}
