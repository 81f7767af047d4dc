//! Logging setup
//!
//! `RUST_LOG` overrides the default filter in every mode.
//! - development: compact human-readable lines, HTTP request spans included
//! - production: one JSON object per line

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::http_server::Environment;

/// Default filter when `RUST_LOG` is unset
pub fn default_filter(environment: Environment, verbose: bool) -> &'static str {
    match (environment, verbose) {
        (_, true) => "executive_registry=debug,tower_http=debug,info",
        (Environment::Development, false) => "executive_registry=debug,tower_http=debug,warn",
        (Environment::Production, false) => "executive_registry=info,warn",
    }
}

/// Install the global subscriber. Call once, before the server starts.
pub fn init_logging(environment: Environment, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment, verbose)));

    let registry = tracing_subscriber::registry().with(filter);

    match environment {
        Environment::Development => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .compact(),
            )
            .init(),
        Environment::Production => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .json(),
            )
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_parse() {
        for env in [Environment::Development, Environment::Production] {
            for verbose in [false, true] {
                let directives = default_filter(env, verbose);
                assert!(EnvFilter::try_new(directives).is_ok(), "{directives}");
            }
        }
    }

    #[test]
    fn test_production_is_quieter() {
        assert!(default_filter(Environment::Production, false).contains("executive_registry=info"));
        assert!(default_filter(Environment::Development, false).contains("executive_registry=debug"));
    }
}
