use crate::domain::archive::{ArchiveBuilder, ExportError};

/// Serializes the accumulated entries of a run into one downloadable blob.
///
/// Export either yields the complete archive or a single error; callers never
/// see partial output.
pub trait ArchiveRepository: Send + Sync {
    fn export(&self, archive: &ArchiveBuilder) -> Result<Vec<u8>, ExportError>;
}
