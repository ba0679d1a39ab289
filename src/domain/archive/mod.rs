pub mod builder;
pub mod error;
pub mod sanitizer;

pub use builder::{archive_folder_name, ArchiveBuilder, ArchiveEntry};
pub use error::ExportError;
pub use sanitizer::{entry_file_name, sanitize_filename};

/// Archive produced by the last finished run, ready for download
#[derive(Debug, Clone)]
pub struct ExportedArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub entry_count: usize,
}
