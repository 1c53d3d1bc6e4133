//! Startup orchestration.
//!
//! Order: logging → metrics → listener → upstream client → serve.
//! Any error before serving is fatal.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::RelayConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, metrics};
use crate::upstream::UpstreamClient;

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid upstream url '{url}': {source}")]
    UpstreamUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Build the server for a validated config.
pub fn build_server(config: RelayConfig) -> Result<HttpServer, StartupError> {
    let url: url::Url = config
        .upstream
        .url
        .parse()
        .map_err(|source| StartupError::UpstreamUrl {
            url: config.upstream.url.clone(),
            source,
        })?;
    let upstream = UpstreamClient::new(url)?;
    Ok(HttpServer::new(config, upstream))
}

/// Bind the configured listener address.
pub async fn bind(config: &RelayConfig) -> Result<TcpListener, StartupError> {
    let address = &config.listener.bind_address;
    TcpListener::bind(address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })
}

/// Run the relay until a shutdown signal arrives.
///
/// Logging is initialised here; callers must not install a subscriber first.
pub async fn run(config: RelayConfig) -> Result<(), StartupError> {
    if let Err(e) = logging::init_logging(&config.observability) {
        eprintln!("logging already initialised: {e}");
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        route = %config.route.full_path(),
        "relay-proxy starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = bind(&config).await?;
    let server = build_server(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    server
        .run(listener, server_shutdown)
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("Shutdown complete");
    Ok(())
}
