pub mod error;
pub mod language;
pub mod provider;

pub use error::SpeechClientError;
pub use language::{Language, Voice};
pub use provider::{AudioOutput, ContainerFormat, ProviderKind, ProviderProfile};

/// Everything a provider needs to pronounce one word
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub word: String,
    pub language: Language,
    pub voice: Voice,
    pub credential: String,
}

impl SpeechRequest {
    /// Short preview of the word for log fields
    pub fn word_preview(&self) -> &str {
        let end = self
            .word
            .char_indices()
            .nth(64)
            .map(|(i, _)| i)
            .unwrap_or(self.word.len());
        &self.word[..end]
    }
}
