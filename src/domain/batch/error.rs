use crate::domain::audio::ValidationFailure;
use crate::domain::tts::SpeechClientError;
use crate::error::AppError;

/// Reasons a batch cannot start. A rejected start leaves all state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("Please enter a valid API key.")]
    MissingCredential,
    #[error("Please enter at least one word.")]
    EmptyWordList,
    #[error("A batch is already running")]
    AlreadyRunning,
}

/// Per-word failure; logged and counted, never propagated past the orchestrator
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WordFailure {
    #[error(transparent)]
    Speech(#[from] SpeechClientError),
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error("provider returned an empty audio payload")]
    EmptyAudio,
}

impl From<BatchError> for AppError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::MissingCredential => AppError::Unauthorized(err.to_string()),
            BatchError::EmptyWordList => AppError::BadRequest(err.to_string()),
            BatchError::AlreadyRunning => AppError::Conflict(err.to_string()),
        }
    }
}
