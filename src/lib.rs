//! Single-endpoint HTTP relay.
//!
//! `GET /proxy/google` (by default) fetches the configured upstream page and
//! returns it as `text/html`; any failure becomes `500 "Error: ..."`.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::{UpstreamClient, UpstreamError};
