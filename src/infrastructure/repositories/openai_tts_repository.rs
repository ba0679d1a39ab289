use super::tts_repository::TtsRepository;
use crate::domain::tts::{ProviderProfile, SpeechClientError, SpeechRequest, Voice};
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{CreateSpeechRequest, SpeechModel, SpeechResponseFormat, Voice as OpenAiVoice},
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;

pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "tts-1";

/// OpenAI TTS implementation of TTS repository.
///
/// Requests WAV output, so clips are stored without re-encoding but are
/// checked for silence by the batch pipeline.
pub struct OpenAiTtsRepository {
    api_base: String,
    model: String,
}

impl OpenAiTtsRepository {
    pub fn new(api_base: String, model: String) -> Self {
        Self { api_base, model }
    }

    /// Map the shared voice catalogue onto OpenAI voices
    fn map_voice(voice: Voice) -> OpenAiVoice {
        match voice {
            Voice::Kore => OpenAiVoice::Nova,
            Voice::Puck => OpenAiVoice::Echo,
            Voice::Charon => OpenAiVoice::Onyx,
            Voice::Fenrir => OpenAiVoice::Fable,
            Voice::Zephyr => OpenAiVoice::Shimmer,
        }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    /// The credential comes with each request, so the client is built per call.
    /// The SDK's rate-limit backoff is disabled: a failed word stays failed.
    fn client_for(&self, credential: &str) -> Client<OpenAIConfig> {
        let config = OpenAIConfig::new()
            .with_api_key(credential)
            .with_api_base(&self.api_base);
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        Client::with_config(config).with_backoff(no_retry)
    }

    /// Call OpenAI TTS API for a single word
    async fn call_openai(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechClientError> {
        let voice = Self::map_voice(request.voice);

        tracing::info!(
            model = %self.model,
            voice = ?voice,
            word = request.word_preview(),
            "Calling OpenAI TTS API"
        );

        let speech_request = CreateSpeechRequest {
            model: self.speech_model(),
            input: request.word.clone(),
            voice,
            response_format: Some(SpeechResponseFormat::Wav),
            speed: None,
        };

        let response = self
            .client_for(&request.credential)
            .audio()
            .speech(speech_request)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = %self.model,
                    "OpenAI TTS API call failed"
                );
                classify_error(e)
            })?;

        let audio_bytes = response.bytes.to_vec();
        if audio_bytes.is_empty() {
            return Err(SpeechClientError::Provider(
                "OpenAI API returned an empty audio payload".to_string(),
            ));
        }

        tracing::debug!(
            audio_size = audio_bytes.len(),
            "OpenAI TTS audio received successfully"
        );

        Ok(audio_bytes)
    }
}

fn classify_error(err: OpenAIError) -> SpeechClientError {
    match err {
        OpenAIError::Reqwest(e) => SpeechClientError::Network(e.to_string()),
        OpenAIError::ApiError(api) => {
            if api.message.to_lowercase().contains("api key") {
                SpeechClientError::Auth(api.message)
            } else {
                SpeechClientError::Provider(api.message)
            }
        }
        other => SpeechClientError::Provider(format!("OpenAI TTS error: {}", other)),
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn generate(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechClientError> {
        if request.credential.trim().is_empty() {
            return Err(SpeechClientError::missing_credential());
        }

        let start_time = std::time::Instant::now();
        let audio_data = self.call_openai(request).await?;
        let duration = start_time.elapsed();

        tracing::info!(
            provider = "openai",
            model = %self.model,
            voice = %request.voice,
            latency_ms = duration.as_millis(),
            audio_size_bytes = audio_data.len(),
            "TTS generation completed"
        );

        Ok(audio_data)
    }

    fn profile(&self) -> ProviderProfile {
        ProviderProfile::OPENAI
    }
}
