use crate::domain::audio::PcmFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Self-describing audio formats a provider may return directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    Wav,
}

impl ContainerFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ContainerFormat::Wav => "wav",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ContainerFormat::Wav => "audio/wav",
        }
    }
}

/// Shape of the bytes a provider hands back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioOutput {
    /// Headerless PCM that still needs a container
    RawPcm(PcmFormat),
    /// Already wrapped; stored as-is
    Container(ContainerFormat),
}

impl AudioOutput {
    /// Container the stored clip ends up in
    pub fn container(&self) -> ContainerFormat {
        match self {
            AudioOutput::RawPcm(_) => ContainerFormat::Wav,
            AudioOutput::Container(format) => *format,
        }
    }
}

/// Per-provider pipeline settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderProfile {
    pub kind: ProviderKind,
    pub output: AudioOutput,
    /// Run the duration/silence check on every clip
    pub validate_content: bool,
    pub default_delay: Duration,
}

impl ProviderProfile {
    pub const GEMINI: ProviderProfile = ProviderProfile {
        kind: ProviderKind::Gemini,
        output: AudioOutput::RawPcm(PcmFormat::GEMINI),
        validate_content: false,
        default_delay: Duration::from_millis(500),
    };

    pub const OPENAI: ProviderProfile = ProviderProfile {
        kind: ProviderKind::OpenAi,
        output: AudioOutput::Container(ContainerFormat::Wav),
        validate_content: true,
        default_delay: Duration::from_millis(1000),
    };

    pub fn for_kind(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::Gemini => Self::GEMINI,
            ProviderKind::OpenAi => Self::OPENAI,
        }
    }
}
