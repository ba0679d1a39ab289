use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::{
    domain::{
        batch::{BatchOrchestrator, BatchRequest, BatchSnapshot},
        tts::{Language, ProviderKind, Voice},
    },
    error::{AppError, AppResult},
};

/// Request for POST /api/batches
#[derive(Debug, Serialize, Deserialize)]
pub struct StartBatchRequest {
    /// Newline-separated words
    pub words: String,
    pub language: Language,
    #[serde(default)]
    pub voice: Voice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Response for GET /api/options
#[derive(Debug, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub provider: ProviderKind,
    pub languages: Vec<Language>,
    pub voices: Vec<Voice>,
    pub default_delay_ms: u64,
    pub credential_configured: bool,
}

pub struct BatchController {
    orchestrator: Arc<BatchOrchestrator>,
}

impl BatchController {
    pub fn new(orchestrator: Arc<BatchOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub fn orchestrator(&self) -> &Arc<BatchOrchestrator> {
        &self.orchestrator
    }

    /// POST /api/batches - Accept a word list and process it in the background
    pub async fn start(
        State(controller): State<Arc<BatchController>>,
        Json(request): Json<StartBatchRequest>,
    ) -> AppResult<(StatusCode, Json<BatchSnapshot>)> {
        let run = controller.orchestrator.begin(BatchRequest {
            words: request.words,
            language: request.language,
            voice: request.voice,
            delay: request.delay_ms.map(Duration::from_millis),
            credential: request.api_key,
        })?;

        tracing::info!(word_count = run.total(), "Batch started");

        controller.orchestrator.spawn_run(run);

        Ok((StatusCode::ACCEPTED, Json(controller.orchestrator.snapshot())))
    }

    /// GET /api/batches/current - Progress, log and previews of the current or last run
    pub async fn current(State(controller): State<Arc<BatchController>>) -> Json<BatchSnapshot> {
        Json(controller.orchestrator.snapshot())
    }

    /// GET /api/batches/current/archive - Download the last exported archive
    pub async fn download_archive(
        State(controller): State<Arc<BatchController>>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let archive = controller
            .orchestrator
            .archive()
            .ok_or_else(|| AppError::NotFound("No archive available".to_string()))?;
        let report = controller.orchestrator.snapshot().last_report.unwrap_or_default();

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/zip"));
        headers.insert(
            header::CONTENT_DISPOSITION,
            header_value(&format!("attachment; filename=\"{}\"", archive.file_name))?,
        );
        headers.insert("X-Entry-Count", header_value(&archive.entry_count.to_string())?);
        headers.insert("X-Success-Count", header_value(&report.successes.to_string())?);
        headers.insert("X-Failure-Count", header_value(&report.failures.to_string())?);

        Ok((StatusCode::OK, headers, Body::from(archive.bytes.clone())))
    }

    /// GET /api/options - Languages, voices and provider settings
    pub async fn options(State(controller): State<Arc<BatchController>>) -> Json<OptionsResponse> {
        let profile = controller.orchestrator.profile();
        Json(OptionsResponse {
            provider: profile.kind,
            languages: Language::ALL.to_vec(),
            voices: Voice::ALL.to_vec(),
            default_delay_ms: profile.default_delay.as_millis() as u64,
            credential_configured: controller.orchestrator.has_default_credential(),
        })
    }
}

pub(crate) fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| AppError::Internal(format!("invalid header: {}", e)))
}
