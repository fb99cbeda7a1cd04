//! FORGE kernel HTTP front end.
//!
//! Binds an HTTP server (axum on tokio) exposing:
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /health` | Liveness check, always `{"status": "ok"}` |
//! | `POST /run-gauntlet` | Run one idea through the pipeline, respond `{"state": ...}` |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Request parsing, routing, and response shaping live
//! here. The pipeline itself is synchronous and owns no shared mutable state,
//! so handlers call [`nodes::PipelineRunner::run`] directly and concurrent
//! requests never contend.

pub mod error;
pub mod routes;

use std::future::Future;
use std::net::SocketAddr;

pub use error::{ApiError, ErrorBody, ListenerError};
pub use routes::{router, AppState, HealthResponse, RunRequest, RunResponse};

/// Serves the router on `addr` until `shutdown` resolves.
///
/// # Errors
///
/// [`ListenerError::Bind`] if the socket cannot be bound,
/// [`ListenerError::Serve`] if the server fails while running.
pub async fn serve<F>(addr: SocketAddr, state: AppState, shutdown: F) -> Result<(), ListenerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| ListenerError::Bind { addr, source })?;
    tracing::info!(%local_addr, "forge kernel listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ListenerError::Serve)?;

    tracing::info!("forge kernel stopped");
    Ok(())
}
