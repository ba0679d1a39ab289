use super::error::WordFailure;
use super::preview::PreviewItem;
use crate::domain::tts::{ContainerFormat, Language, Voice};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `current_word` while the archive is being written
pub const FINALIZING_MARKER: &str = "Finalizing ZIP...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSeverity {
    Info,
    Success,
    Error,
}

/// Immutable line of the user-facing run log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub severity: LogSeverity,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, severity: LogSeverity) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.into(),
            severity,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, LogSeverity::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, LogSeverity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, LogSeverity::Error)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    pub is_running: bool,
    pub completed_count: usize,
    pub total_count: usize,
    pub current_word: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchPhase {
    #[default]
    Idle,
    Running,
    Finalizing,
}

/// Outcome of one word
#[derive(Debug)]
pub enum GenerationResult {
    Succeeded {
        audio_bytes: Vec<u8>,
        container_format: ContainerFormat,
    },
    Failed {
        reason: WordFailure,
    },
}

/// Counts reported once a run returns to idle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub successes: usize,
    pub failures: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_error: Option<String>,
}

/// Metadata of the archive available for download
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSummary {
    pub file_name: String,
    pub entry_count: usize,
    pub size_bytes: usize,
}

/// Everything observers see about the orchestrator, pushed on every change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSnapshot {
    pub phase: BatchPhase,
    pub progress: BatchProgress,
    pub logs: Vec<LogEntry>,
    pub previews: Vec<PreviewItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<ArchiveSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_report: Option<BatchReport>,
}

/// Start request for a run
#[derive(Debug, Clone)]
pub struct BatchRequest {
    /// Newline-separated word list as typed by the user
    pub words: String,
    pub language: Language,
    pub voice: Voice,
    /// Overrides the configured pause between provider calls
    pub delay: Option<Duration>,
    /// Overrides the configured credential
    pub credential: Option<String>,
}
