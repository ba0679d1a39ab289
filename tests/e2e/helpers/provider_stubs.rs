use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

use super::fixtures::{loud_pcm, loud_wav, silent_wav};

pub const GOOD_KEY: &str = "good-key";

/// Local HTTP server standing in for a provider API
pub struct ProviderStub {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<Value>>>,
}

impl ProviderStub {
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Failed to get stub addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Gemini generateContent stand-in.
///
/// Prompts containing `boom` get a 500, prompts containing `mute` get a
/// response without audio, any key other than [`GOOD_KEY`] gets a 401.
pub async fn start_gemini_stub() -> ProviderStub {
    let requests = Arc::new(Mutex::new(Vec::new()));

    async fn generate(
        State(requests): State<Arc<Mutex<Vec<Value>>>>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Response {
        requests.lock().push(body.clone());

        let key = headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if key != GOOD_KEY {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": { "code": 401, "message": "API key not valid", "status": "UNAUTHENTICATED" } })),
            )
                .into_response();
        }

        let prompt = body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        if prompt.contains("boom") {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": { "code": 500, "message": "Internal error encountered.", "status": "INTERNAL" } })),
            )
                .into_response();
        }

        if prompt.contains("mute") {
            return Json(json!({ "candidates": [{ "content": { "parts": [{ "text": "no audio" }] } }] }))
                .into_response();
        }

        Json(json!({
            "candidates": [{
                "content": {
                    "parts": [{
                        "inlineData": {
                            "mimeType": "audio/L16;codec=pcm;rate=24000",
                            "data": STANDARD.encode(loud_pcm())
                        }
                    }]
                }
            }]
        }))
        .into_response()
    }

    let router = Router::new()
        .route("/v1beta/models/:model", post(generate))
        .with_state(requests.clone());

    ProviderStub {
        base_url: serve(router).await,
        requests,
    }
}

/// OpenAI audio/speech stand-in returning WAV bodies.
///
/// The input `?!` yields a silent clip; a wrong bearer token yields the
/// invalid API key error.
pub async fn start_openai_stub() -> ProviderStub {
    let requests = Arc::new(Mutex::new(Vec::new()));

    async fn speech(
        State(requests): State<Arc<Mutex<Vec<Value>>>>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Response {
        requests.lock().push(body.clone());

        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {}", GOOD_KEY))
            .unwrap_or(false);
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": {
                        "message": "Incorrect API key provided: bad-key.",
                        "type": "invalid_request_error",
                        "param": null,
                        "code": "invalid_api_key"
                    }
                })),
            )
                .into_response();
        }

        let audio = if body["input"].as_str() == Some("?!") {
            silent_wav()
        } else {
            loud_wav()
        };

        ([("content-type", "audio/wav")], audio).into_response()
    }

    let router = Router::new()
        .route("/v1/audio/speech", post(speech))
        .with_state(requests.clone());

    ProviderStub {
        base_url: serve(router).await,
        requests,
    }
}
