use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::controllers::batch::BatchController;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(controller): State<Arc<BatchController>>) -> impl IntoResponse {
    let orchestrator = controller.orchestrator();
    let snapshot = orchestrator.snapshot();

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "provider": orchestrator.profile().kind,
            "credential_configured": orchestrator.has_default_credential(),
            "batch_phase": snapshot.phase,
        })),
    )
}
