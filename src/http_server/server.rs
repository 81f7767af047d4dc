//! # HTTP Server
//!
//! Assembles the routers around one shared store handle and serves them
//! until a shutdown signal arrives, then closes the store.

use std::io;
use std::net::{AddrParseError, SocketAddr};
use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::storage::{ExecutiveStore, StoreError};

use super::config::ServerConfig;
use super::executive_routes::{executive_routes, ExecutiveState};
use super::observability_routes::health_routes;

/// Versioned prefix for the resource routes
pub const API_BASE_PATH: &str = "/api/v1";

/// Fatal server failures
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid listen address {addr}: {source}")]
    Address {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),

    #[error("failed to close store: {0}")]
    Store(#[from] StoreError),
}

/// HTTP server for the executive registry
pub struct HttpServer {
    config: ServerConfig,
    store: Arc<dyn ExecutiveStore>,
    router: Router,
}

impl HttpServer {
    /// Create a server over an already opened store
    pub fn new(config: ServerConfig, store: Arc<dyn ExecutiveStore>) -> Self {
        let router = Self::build_router(&config, store.clone());
        Self {
            config,
            store,
            router,
        }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &ServerConfig, store: Arc<dyn ExecutiveStore>) -> Router {
        let state = Arc::new(ExecutiveState::new(store, config.default_limit));

        let router = Router::new()
            .merge(health_routes())
            .nest(API_BASE_PATH, executive_routes(state));

        // Per-request logging only while developing
        if config.environment.is_development() {
            router.layer(TraceLayer::new_for_http())
        } else {
            router
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C or SIGTERM, then close the store
    pub async fn start(self) -> Result<(), ServerError> {
        let raw = self.config.socket_addr();
        let addr: SocketAddr = raw
            .parse()
            .map_err(|source| ServerError::Address { addr: raw, source })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        tracing::info!(
            mode = %self.config.environment,
            %addr,
            storage = self.store.backend(),
            "server running"
        );

        let served = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Serve);

        // Release the store even when serving failed.
        let closed = self.store.close().await;
        tracing::info!("store closed");

        served?;
        closed?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
