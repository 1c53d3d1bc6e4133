//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, middleware)
//!     → request.rs (request id)
//!     → forward handler → upstream client
//!     → response.rs (200 text/html or 500 "Error: ...")
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::{relay_ok, relay_response, ERROR_PREFIX, RELAY_CONTENT_TYPE};
pub use server::HttpServer;
