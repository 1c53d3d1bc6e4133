//! Response shaping for the forwarding endpoint.
//!
//! - Success: 200, `Content-Type: text/html`, body = joined upstream text.
//!   No upstream header is copied.
//! - Failure: 500, body = `"Error: " + message`, whatever went wrong. The
//!   upstream status is never relayed.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::upstream::UpstreamError;

/// Content type forced onto every successful relay.
pub const RELAY_CONTENT_TYPE: &str = "text/html";

/// Prefix of every error body.
pub const ERROR_PREFIX: &str = "Error: ";

/// Build the success response around the buffered upstream text.
pub fn relay_ok(content: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, RELAY_CONTENT_TYPE)],
        content,
    )
        .into_response()
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("{}{}", ERROR_PREFIX, self),
        )
            .into_response()
    }
}

/// Turn the outcome of one upstream fetch into the inbound response.
pub fn relay_response(outcome: Result<String, UpstreamError>) -> Response {
    match outcome {
        Ok(content) => relay_ok(content),
        Err(e) => e.into_response(),
    }
}
