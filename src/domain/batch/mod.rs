pub mod error;
pub mod model;
pub mod orchestrator;
pub mod preview;
pub mod word_list;

pub use error::{BatchError, WordFailure};
pub use model::{
    ArchiveSummary, BatchPhase, BatchProgress, BatchReport, BatchRequest, BatchSnapshot,
    GenerationResult, LogEntry, LogSeverity, FINALIZING_MARKER,
};
pub use orchestrator::{BatchOrchestrator, BatchRun, OrchestratorSettings};
pub use preview::{PreviewItem, PreviewStore};
pub use word_list::parse_word_list;
