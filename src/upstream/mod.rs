//! Upstream subsystem.
//!
//! # Data Flow
//! ```text
//! forward handler
//!     → client.rs (GET upstream url, fail on 4xx/5xx)
//!     → body.rs (decode, join lines without separators)
//!     → Ok(String) or UpstreamError (types.rs)
//! ```

pub mod body;
pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::UpstreamError;
