use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    controllers::batch::{header_value, BatchController},
    error::{AppError, AppResult},
};

/// Response for DELETE /api/previews
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub released: usize,
}

/// GET /api/previews/:id - Stream one generated clip
pub async fn get_preview(
    State(controller): State<Arc<BatchController>>,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, HeaderMap, Body)> {
    let orchestrator = controller.orchestrator();
    let bytes = orchestrator
        .previews()
        .get(id)
        .ok_or_else(|| AppError::NotFound("Preview not found".to_string()))?;
    let mime = orchestrator.profile().output.container().mime_type();

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(mime));
    headers.insert(header::CONTENT_LENGTH, header_value(&bytes.len().to_string())?);

    Ok((StatusCode::OK, headers, Body::from(bytes.as_ref().clone())))
}

/// DELETE /api/previews - Release every preview and clear the log
pub async fn clear_previews(
    State(controller): State<Arc<BatchController>>,
) -> AppResult<Json<ClearResponse>> {
    let released = controller.orchestrator().clear()?;
    tracing::info!(released, "Previews cleared");
    Ok(Json(ClearResponse { released }))
}
