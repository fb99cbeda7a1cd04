//! HTTP routes: `GET /health` and `POST /run-gauntlet`.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use nodes::PipelineRunner;
use pipeline::{ForgeState, Metadata, ProjectId};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared handler state. Cloned per request; the runner itself is shared.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Pipeline every request is run through.
    pub runner: Arc<PipelineRunner>,
}

impl AppState {
    /// Wraps `runner` for use as router state.
    pub fn new(runner: Arc<PipelineRunner>) -> Self {
        Self { runner }
    }
}

/// Body of `POST /run-gauntlet`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunRequest {
    /// Raw idea text.
    pub idea: String,

    /// Optional pre-structured brief; the normalised idea is used when absent.
    #[serde(default)]
    pub feature_brief: Option<String>,

    /// Optional external project id.
    #[serde(default)]
    pub project_id: Option<ProjectId>,

    /// Optional extra tags/flags.
    #[serde(default)]
    pub metadata: Metadata,
}

impl RunRequest {
    /// Builds the state a run starts from.
    ///
    /// An empty `feature_brief` is treated as absent so the intake step seeds
    /// it from the normalised idea. An empty `project_id` is dropped, matching
    /// [`ProjectId::new`].
    pub fn into_initial_state(self) -> ForgeState {
        ForgeState {
            idea: self.idea,
            feature_brief: self.feature_brief.filter(|brief| !brief.is_empty()),
            project_id: self.project_id.filter(|id| !id.as_str().is_empty()),
            metadata: self.metadata,
            logs: Vec::new(),
        }
    }
}

/// Body of a successful `POST /run-gauntlet`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunResponse {
    /// Final state after every step has run.
    pub state: ForgeState,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/run-gauntlet", post(run_gauntlet))
        .with_state(state)
}

/// Liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
    })
}

/// Runs one idea through the pipeline and returns the final state.
#[tracing::instrument(skip_all)]
pub async fn run_gauntlet(
    State(app): State<AppState>,
    Json(request): Json<RunRequest>,
) -> Result<Json<RunResponse>, ApiError> {
    tracing::debug!(project_id = ?request.project_id, "gauntlet run requested");
    let initial = request.into_initial_state();
    let state = app.runner.run(&initial)?;
    Ok(Json(RunResponse { state }))
}
