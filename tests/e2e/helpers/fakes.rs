use async_trait::async_trait;
use parking_lot::Mutex;
use pronunciation_batcher::domain::tts::{ProviderProfile, SpeechClientError, SpeechRequest};
use pronunciation_batcher::infrastructure::repositories::TtsRepository;
use std::collections::HashSet;
use std::sync::Arc;

use super::fixtures::loud_pcm;

/// In-process provider returning raw PCM like Gemini does
pub struct FakeTtsRepository {
    failing: HashSet<String>,
    requests: Mutex<Vec<SpeechRequest>>,
}

impl FakeTtsRepository {
    pub fn new() -> Arc<Self> {
        Self::failing_on(&[])
    }

    pub fn failing_on(words: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            failing: words.iter().map(|w| w.to_string()).collect(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requested_words(&self) -> Vec<String> {
        self.requests.lock().iter().map(|r| r.word.clone()).collect()
    }

    pub fn last_credential(&self) -> Option<String> {
        self.requests.lock().last().map(|r| r.credential.clone())
    }
}

#[async_trait]
impl TtsRepository for FakeTtsRepository {
    async fn generate(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechClientError> {
        self.requests.lock().push(request.clone());
        if self.failing.contains(&request.word) {
            return Err(SpeechClientError::Provider(format!(
                "upstream rejected {}",
                request.word
            )));
        }
        Ok(loud_pcm())
    }

    fn profile(&self) -> ProviderProfile {
        ProviderProfile::GEMINI
    }
}
