/// Failure of a single speech generation call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpeechClientError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
}

impl SpeechClientError {
    pub fn missing_credential() -> Self {
        SpeechClientError::Auth("API Key is required".to_string())
    }
}

impl From<reqwest::Error> for SpeechClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SpeechClientError::Provider(format!("malformed response: {}", err))
        } else {
            SpeechClientError::Network(err.to_string())
        }
    }
}
