//! Listener error types.

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pipeline::ForgeError;
use serde::Serialize;
use thiserror::Error;

/// Failures of the HTTP server itself.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Body returned for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub detail: String,
}

/// A request that reached the pipeline and failed there.
///
/// Always rendered as `500` with an [`ErrorBody`]; malformed request bodies
/// are rejected earlier by the JSON extractor.
#[derive(Debug)]
pub struct ApiError(pub ForgeError);

impl From<ForgeError> for ApiError {
    fn from(err: ForgeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "gauntlet run failed");
        let body = ErrorBody {
            detail: self.0.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
