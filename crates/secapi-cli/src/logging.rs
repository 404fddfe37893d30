// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the secapi CLI.
//!
//! Uses `tracing` with `tracing-subscriber`, writing to stderr so stdout
//! carries only response bodies. `RUST_LOG` overrides the defaults:
//!
//! ```bash
//! # Request/response dumps
//! secapi --verbose snyk list-groups
//!
//! # Everything, including reqwest internals
//! RUST_LOG=debug secapi snyk list-groups
//! ```
//!
//! Debug output includes response bodies. Treat it as sensitive.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "secapi=warn,secapi_core=warn,reqwest=error";
const VERBOSE_FILTER: &str = "secapi=debug,secapi_core=debug,reqwest=error";

/// Directives used when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Initialize the logging subsystem.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_parse() {
        for verbose in [false, true] {
            assert!(EnvFilter::try_new(default_filter(verbose)).is_ok());
        }
    }

    #[test]
    fn test_verbose_enables_debug() {
        assert!(default_filter(true).contains("secapi_core=debug"));
        assert!(default_filter(false).contains("secapi_core=warn"));
    }
}
