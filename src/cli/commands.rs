//! CLI command implementations
//!
//! Startup order: configuration, logging, store, server. Configuration
//! errors are caught before anything is opened.

use crate::http_server::{HttpServer, ServerConfig};
use crate::observability::init_logging;
use crate::storage::DatabaseUri;

use super::args::Cli;
use super::errors::{CliError, CliResult};

/// Turn parsed arguments into a validated server configuration
pub fn build_config(cli: &Cli) -> CliResult<ServerConfig> {
    let database_uri: DatabaseUri = cli.database_uri.parse()?;

    if cli.default_limit == 0 {
        return Err(CliError::config_error("default limit must be at least 1"));
    }

    Ok(ServerConfig {
        host: cli.host.clone(),
        port: cli.port,
        environment: cli.environment,
        database_uri,
        default_limit: cli.default_limit,
    })
}

/// Open the store and serve until shutdown
pub async fn serve(config: ServerConfig) -> CliResult<()> {
    let store = config.database_uri.open().await?;
    tracing::debug!(uri = %config.database_uri, backend = store.backend(), "store opened");

    HttpServer::new(config, store).start().await?;
    Ok(())
}

/// Parse configuration, initialise logging, and run the server to
/// completion on a fresh runtime
pub fn run_command(cli: Cli) -> CliResult<()> {
    let config = build_config(&cli)?;
    init_logging(config.environment, cli.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(serve(config)).map_err(|e| {
        tracing::error!(error = %e, "server terminated");
        e
    })
}
