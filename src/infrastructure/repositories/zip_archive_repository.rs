use super::archive_repository::ArchiveRepository;
use crate::domain::archive::{ArchiveBuilder, ExportError};
use std::io::{Cursor, Write};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

/// Writes the run's clips into an in-memory deflate zip under one folder
#[derive(Debug, Default, Clone)]
pub struct ZipArchiveRepository;

impl ZipArchiveRepository {
    pub fn new() -> Self {
        Self
    }
}

impl ArchiveRepository for ZipArchiveRepository {
    fn export(&self, archive: &ArchiveBuilder) -> Result<Vec<u8>, ExportError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        writer
            .add_directory(format!("{}/", archive.folder()), options)
            .map_err(|e| ExportError::Write(e.to_string()))?;

        for entry in archive.entries() {
            let path = format!("{}/{}", archive.folder(), entry.name);
            let entry_error = |reason: String| ExportError::Entry {
                name: entry.name.clone(),
                reason,
            };
            writer
                .start_file(path, options)
                .map_err(|e| entry_error(e.to_string()))?;
            writer
                .write_all(&entry.bytes)
                .map_err(|e| entry_error(e.to_string()))?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| ExportError::Write(e.to_string()))?;
        let bytes = cursor.into_inner();

        tracing::info!(
            folder = archive.folder(),
            entry_count = archive.len(),
            archive_size_bytes = bytes.len(),
            "Archive exported"
        );

        Ok(bytes)
    }
}
