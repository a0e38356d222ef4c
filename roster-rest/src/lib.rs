use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use roster_core::backend::{CbcBackend, MipBackend};
use roster_core::engine::{self, TracingProgress};
use roster_core::extensions::loader::BackendRegistry;
use roster_core::model::{RosterResult, SolveRequest, SolveStatus};
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn MipBackend>,
    pub registry: Arc<BackendRegistry>,
}

#[derive(Serialize)]
struct BackendInfo {
    id: String,
    version: String,
    api_version: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/v1/solve", post(solve))
        .route("/v1/backends", get(list_backends))
        .with_state(state)
}

/// Run the engine on a blocking worker; the solve is CPU- and
/// subprocess-bound. Engine faults stay inside the result body; only
/// transport problems surface as HTTP errors.
async fn solve(State(state): State<AppState>, Json(request): Json<SolveRequest>) -> Json<RosterResult> {
    let backend = state.backend.clone();
    let handle =
        tokio::task::spawn_blocking(move || engine::solve(&request, backend.as_ref(), &TracingProgress));
    match handle.await {
        Ok(result) => Json(result),
        Err(err) => Json(RosterResult::zeroed(
            SolveStatus::Error,
            Some(format!("solver task failed: {err}")),
            0,
        )),
    }
}

async fn list_backends(State(state): State<AppState>) -> Json<Vec<BackendInfo>> {
    let mut backends = vec![BackendInfo {
        id: CbcBackend::ID.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_version: "builtin".to_string(),
    }];
    backends.extend(state.registry.metadata().into_iter().map(|metadata| BackendInfo {
        id: metadata.id.to_string(),
        version: metadata.version.to_string(),
        api_version: metadata.api_version.to_string(),
    }));
    Json(backends)
}
