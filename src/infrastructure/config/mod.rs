use crate::domain::tts::ProviderKind;
use crate::infrastructure::repositories::{
    gemini_tts_repository::{DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL},
    openai_tts_repository::{DEFAULT_OPENAI_API_BASE, DEFAULT_OPENAI_MODEL},
};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub tts_provider: ProviderKind,
    // Gemini
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub gemini_model: String,
    // OpenAI
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub openai_model: String,
    /// Pause between provider calls; the provider default applies when unset
    pub request_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            tts_provider: match env::var("TTS_PROVIDER")
                .unwrap_or_else(|_| "gemini".to_string())
                .to_lowercase()
                .as_str()
            {
                "gemini" => ProviderKind::Gemini,
                "openai" => ProviderKind::OpenAi,
                other => return Err(format!("unsupported TTS_PROVIDER: {}", other).into()),
            },
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            gemini_api_base: env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_BASE.to_string()),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            request_delay_ms: env::var("REQUEST_DELAY_MS")
                .ok()
                .map(|v| v.parse())
                .transpose()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Credential for the selected provider, if one is configured
    pub fn provider_api_key(&self) -> Option<String> {
        match self.tts_provider {
            ProviderKind::Gemini => self.gemini_api_key.clone(),
            ProviderKind::OpenAi => self.openai_api_key.clone(),
        }
    }

    pub fn request_delay(&self) -> Option<Duration> {
        self.request_delay_ms.map(Duration::from_millis)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
