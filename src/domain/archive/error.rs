#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("archive write failed: {0}")]
    Write(String),
    #[error("archive entry {name} could not be stored: {reason}")]
    Entry { name: String, reason: String },
}
