//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with the single forwarding route
//! - Wire up middleware (request id, tracing)
//! - Serve on a listener until shutdown is triggered
//!
//! Unmatched paths and methods get axum's default 404 / 405.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::http::request::{
    request_id, MakeRequestUuidV4, PropagateRequestIdLayer, SetRequestIdLayer,
};
use crate::http::response::relay_response;
use crate::lifecycle::shutdown::wait_for;
use crate::observability::metrics;
use crate::upstream::UpstreamClient;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
}

/// HTTP server exposing the forwarding endpoint.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a server that forwards to `upstream`.
    ///
    /// `config` must already be validated.
    pub fn new(config: RelayConfig, upstream: UpstreamClient) -> Self {
        let state = AppState { upstream };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request),
                )
            }))
            .layer(PropagateRequestIdLayer::x_request_id());

        Router::new()
            .route(&config.route.full_path(), get(forward_handler))
            .with_state(state)
            .layer(middleware)
    }

    /// The router, for serving it under a custom host or driving it in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            route = %self.config.route.full_path(),
            upstream = %self.config.upstream.url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Forwarding handler.
///
/// Nothing from the inbound request is read; the upstream is fixed by config.
async fn forward_handler(State(state): State<AppState>) -> Response {
    let start = Instant::now();

    let outcome = state.upstream.fetch_detached().await;
    metrics::record_forward(&outcome, start);

    if let Err(e) = &outcome {
        tracing::warn!(
            upstream = %state.upstream.url(),
            kind = e.kind(),
            error = %e,
            "Upstream fetch failed"
        );
    }

    relay_response(outcome)
}
