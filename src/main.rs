use pronunciation_batcher::controllers::batch::BatchController;
use pronunciation_batcher::domain::batch::{BatchOrchestrator, OrchestratorSettings, PreviewStore};
use pronunciation_batcher::domain::tts::ProviderKind;
use pronunciation_batcher::infrastructure::config::{Config, LogFormat};
use pronunciation_batcher::infrastructure::http::start_http_server;
use pronunciation_batcher::infrastructure::repositories::{
    GeminiTtsRepository, OpenAiTtsRepository, TtsRepository, ZipArchiveRepository,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting pronunciation batcher on {}:{}",
        config.host,
        config.port
    );

    let has_api_key = config.provider_api_key().is_some();
    tracing::info!(
        provider = %config.tts_provider,
        has_api_key,
        development = config.is_development(),
        "TTS provider configuration"
    );
    if !has_api_key {
        tracing::warn!("No API key configured. Batches must supply their own api_key.");
    }

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    let tts_repo: Arc<dyn TtsRepository> = match config.tts_provider {
        ProviderKind::Gemini => Arc::new(GeminiTtsRepository::new(
            reqwest::Client::new(),
            config.gemini_api_base.clone(),
            config.gemini_model.clone(),
        )),
        ProviderKind::OpenAi => Arc::new(OpenAiTtsRepository::new(
            config.openai_api_base.clone(),
            config.openai_model.clone(),
        )),
    };
    let archive_repo = Arc::new(ZipArchiveRepository::new());
    let previews = Arc::new(PreviewStore::new());

    // 2. Instantiate the orchestrator
    let orchestrator = Arc::new(BatchOrchestrator::new(
        tts_repo,
        archive_repo,
        previews,
        OrchestratorSettings {
            default_credential: config.provider_api_key(),
            delay_override: config.request_delay(),
        },
    ));

    // 3. Instantiate controllers
    let batch_controller = Arc::new(BatchController::new(orchestrator));

    start_http_server(Arc::new(config), batch_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pronunciation_batcher=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
