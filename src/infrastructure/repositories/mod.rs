pub mod archive_repository;
pub mod gemini_tts_repository;
pub mod openai_tts_repository;
pub mod tts_repository;
pub mod zip_archive_repository;

pub use archive_repository::ArchiveRepository;
pub use gemini_tts_repository::GeminiTtsRepository;
pub use openai_tts_repository::OpenAiTtsRepository;
pub use tts_repository::TtsRepository;
pub use zip_archive_repository::ZipArchiveRepository;
