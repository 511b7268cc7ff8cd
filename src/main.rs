//! CoS Portal server binary.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cos_portal::adapters::ai::{OpenAiCompletionService, OpenAiConfig};
use cos_portal::adapters::document::DocumentTextExtractor;
use cos_portal::adapters::gmail::GmailDraftGateway;
use cos_portal::adapters::http::{build_router, ArtistsAppState, DocumentsAppState, DraftsAppState};
use cos_portal::adapters::postgres::{PostgresApplicantRepository, PostgresDocumentRepository};
use cos_portal::adapters::storage::SupabaseFileStorage;
use cos_portal::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("database connected and migrated");

    let openai_config = OpenAiConfig::new(config.ai.api_key.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_timeout(config.ai.timeout());

    let documents_state = DocumentsAppState::new(
        Arc::new(DocumentTextExtractor::new(config.extraction.max_text_chars)),
        Arc::new(OpenAiCompletionService::new(
            openai_config.clone(),
            config.ai.extraction_model.clone(),
        )),
        Arc::new(OpenAiCompletionService::new(
            openai_config,
            config.ai.merge_model.clone(),
        )),
        Arc::new(PostgresDocumentRepository::new(pool.clone())),
    );
    let artists_state = ArtistsAppState::new(
        Arc::new(PostgresApplicantRepository::new(pool.clone())),
        Arc::new(SupabaseFileStorage::new(&config.storage)),
    );
    let drafts_state = DraftsAppState::new(Arc::new(GmailDraftGateway::new(&config.gmail)));

    let cors = match config.server.cors_origins_list() {
        origins if origins.is_empty() => CorsLayer::permissive(),
        origins => {
            let origins: Vec<HeaderValue> =
                origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = build_router(documents_state, artists_state, drafts_state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    info!(%addr, "starting CoS Portal server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
