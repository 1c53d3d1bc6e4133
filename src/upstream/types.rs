//! Upstream error definitions.

use std::error::Error as StdError;

use thiserror::Error;

/// Everything that can go wrong while fetching the upstream page.
///
/// The variants exist for logs and metrics only; the HTTP layer maps every
/// one of them to the same 500 response.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// DNS, connect, TLS or request write failure.
    #[error("{}", describe(.0))]
    Connect(#[source] reqwest::Error),

    /// Upstream answered with a 4xx or 5xx status.
    #[error("{}", describe(.0))]
    Status(#[source] reqwest::Error),

    /// The connection broke while the body was being read.
    #[error("{}", describe(.0))]
    Body(#[source] reqwest::Error),

    /// The task driving the outbound call panicked or was aborted.
    #[error("forwarding task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl UpstreamError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Connect(_) => "connect",
            UpstreamError::Status(_) => "status",
            UpstreamError::Body(_) => "body",
            UpstreamError::Task(_) => "task",
        }
    }
}

/// Render an error followed by its sources, separated by `": "`.
///
/// reqwest keeps the interesting part (refused, dns, certificate) in the
/// source chain, so the top-level message alone says very little.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
