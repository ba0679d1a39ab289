use crate::domain::tts::Language;
use chrono::NaiveDate;

/// One named file inside the archive folder
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Accumulates generated clips for a single run until export.
///
/// Entries keep insertion order. Adding a name that already exists replaces
/// the earlier bytes in place, which is what happens when two words sanitize
/// to the same file name.
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    folder: String,
    entries: Vec<ArchiveEntry>,
}

impl ArchiveBuilder {
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            entries: Vec::new(),
        }
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// File name offered for download
    pub fn archive_file_name(&self) -> String {
        format!("{}.zip", self.folder)
    }

    pub fn add(&mut self, name: String, bytes: Vec<u8>) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.name == name) {
            tracing::warn!(entry = %name, "Archive entry overwritten by a later word");
            existing.bytes = bytes;
        } else {
            self.entries.push(ArchiveEntry { name, bytes });
        }
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `pronunciations_<language>_<YYYY-MM-DD>`
pub fn archive_folder_name(language: Language, date: NaiveDate) -> String {
    format!(
        "pronunciations_{}_{}",
        language.as_str().to_lowercase(),
        date.format("%Y-%m-%d")
    )
}
