pub mod request_id;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{batch::BatchController, health, preview};
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, request_span, X_REQUEST_ID};

/// Build the application router with all routes configured
pub fn create_router(batch_controller: Arc<BatchController>) -> Router {
    let batch_routes = Router::new()
        .route("/api/batches", post(BatchController::start))
        .route("/api/batches/current", get(BatchController::current))
        .route(
            "/api/batches/current/archive",
            get(BatchController::download_archive),
        )
        .route("/api/options", get(BatchController::options))
        .with_state(batch_controller.clone());

    let preview_routes = Router::new()
        .route("/api/previews", delete(preview::clear_previews))
        .route("/api/previews/:id", get(preview::get_preview))
        .with_state(batch_controller.clone());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(batch_controller)
        .merge(batch_routes)
        .merge(preview_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    batch_controller: Arc<BatchController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(batch_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
