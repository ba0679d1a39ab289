use crate::domain::tts::{ProviderProfile, SpeechClientError, SpeechRequest};
use async_trait::async_trait;

/// Remote text-to-speech provider.
///
/// Implementations are responsible for:
/// - Provider-specific request shape and voice mapping
/// - Decoding the transport payload into audio bytes
/// - Classifying failures as auth, provider or network errors
///
/// Each call performs exactly one outbound request and never retries.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Generate the pronunciation of a single word
    ///
    /// Returns the audio in the shape described by [`TtsRepository::profile`].
    /// A successful result is never empty.
    async fn generate(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechClientError>;

    /// Output shape, validation and pacing settings for this provider
    fn profile(&self) -> ProviderProfile;
}
