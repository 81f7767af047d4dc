//! CLI argument definitions using clap
//!
//! Every flag falls back to an environment variable, so the server can be
//! configured entirely from the environment:
//!
//! - `executive-registry --port 8080 --env production`
//! - `PORT=8080 APP_ENV=production executive-registry`

use clap::Parser;

use crate::http_server::config::{Environment, DEFAULT_HOST, DEFAULT_PORT};

/// Executive registry - a small REST service for executive records
#[derive(Parser, Debug, Clone)]
#[command(name = "executive-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Address to bind to
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Run mode
    #[arg(long = "env", env = "APP_ENV", value_enum, default_value_t = Environment::Development)]
    pub environment: Environment,

    /// Storage connection string: memory:// or file://<path>
    #[arg(long, env = "DATABASE_URI", default_value = "memory://")]
    pub database_uri: String,

    /// Page size used when a list request has no `limit`
    #[arg(long, env = "DEFAULT_PAGE_LIMIT", default_value_t = 1)]
    pub default_limit: u64,

    /// Log at debug level regardless of mode
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
