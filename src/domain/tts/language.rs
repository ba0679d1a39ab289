use serde::{Deserialize, Serialize};

/// Target languages offered for pronunciation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[serde(alias = "Lithuanian", alias = "lt")]
    Lithuanian,
    #[serde(alias = "Russian", alias = "ru")]
    Russian,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Lithuanian, Language::Russian];

    /// English name, used in provider prompts and log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Lithuanian => "Lithuanian",
            Language::Russian => "Russian",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Prebuilt voices. Providers with a different catalogue map these onto their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Voice {
    #[default]
    #[serde(alias = "kore")]
    Kore,
    #[serde(alias = "puck")]
    Puck,
    #[serde(alias = "charon")]
    Charon,
    #[serde(alias = "fenrir")]
    Fenrir,
    #[serde(alias = "zephyr")]
    Zephyr,
}

impl Voice {
    pub const ALL: [Voice; 5] = [
        Voice::Kore,
        Voice::Puck,
        Voice::Charon,
        Voice::Fenrir,
        Voice::Zephyr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Kore => "Kore",
            Voice::Puck => "Puck",
            Voice::Charon => "Charon",
            Voice::Fenrir => "Fenrir",
            Voice::Zephyr => "Zephyr",
        }
    }
}

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
