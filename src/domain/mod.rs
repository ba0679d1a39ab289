pub mod archive;
pub mod audio;
pub mod batch;
pub mod tts;
