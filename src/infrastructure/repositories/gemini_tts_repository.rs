use super::tts_repository::TtsRepository;
use crate::domain::tts::{ProviderProfile, SpeechClientError, SpeechRequest};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-tts";

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Gemini TTS implementation of TTS repository.
///
/// The API answers with base64 inline data holding headerless 16-bit PCM,
/// so clips from this provider still need a WAV header.
pub struct GeminiTtsRepository {
    client: Client,
    api_base: String,
    model: String,
}

impl GeminiTtsRepository {
    pub fn new(client: Client, api_base: String, model: String) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }

    /// Prompt that pins the pronunciation to the selected language
    fn build_prompt(request: &SpeechRequest) -> String {
        format!(
            "Pronounce the following {} sentence clearly: \"{}\"",
            request.language, request.word
        )
    }

    /// Call the generateContent endpoint for a single word
    async fn call_gemini(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechClientError> {
        tracing::info!(
            model = %self.model,
            voice = %request.voice,
            language = %request.language,
            word = request.word_preview(),
            "Calling Gemini TTS API"
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": Self::build_prompt(request) }] }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": request.voice.as_str() }
                    }
                }
            }
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &request.credential)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, model = %self.model, "Gemini TTS request failed");
                SpeechClientError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("Gemini API Error: {}", status));

            tracing::error!(
                status = status.as_u16(),
                error = %message,
                model = %self.model,
                "Gemini TTS API returned an error"
            );

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    SpeechClientError::Auth(message)
                }
                _ => SpeechClientError::Provider(message),
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        let audio_bytes = extract_audio(payload)?;

        tracing::debug!(
            audio_size = audio_bytes.len(),
            "Gemini TTS audio received successfully"
        );

        Ok(audio_bytes)
    }
}

/// Pull the first inline audio part out of a response and decode it
fn extract_audio(payload: GenerateContentResponse) -> Result<Vec<u8>, SpeechClientError> {
    let encoded = payload
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.inline_data)
        .map(|d| d.data)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| {
            SpeechClientError::Provider("No audio data returned from Gemini API".to_string())
        })?;

    let bytes = STANDARD
        .decode(encoded.as_bytes())
        .map_err(|e| SpeechClientError::Provider(format!("invalid base64 audio payload: {}", e)))?;

    if bytes.is_empty() {
        return Err(SpeechClientError::Provider(
            "No audio data returned from Gemini API".to_string(),
        ));
    }

    Ok(bytes)
}

#[async_trait]
impl TtsRepository for GeminiTtsRepository {
    async fn generate(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechClientError> {
        if request.credential.trim().is_empty() {
            return Err(SpeechClientError::missing_credential());
        }

        let start_time = std::time::Instant::now();
        let audio_data = self.call_gemini(request).await?;
        let duration = start_time.elapsed();

        tracing::info!(
            provider = "gemini",
            model = %self.model,
            voice = %request.voice,
            latency_ms = duration.as_millis(),
            audio_size_bytes = audio_data.len(),
            "TTS generation completed"
        );

        Ok(audio_data)
    }

    fn profile(&self) -> ProviderProfile {
        ProviderProfile::GEMINI
    }
}
