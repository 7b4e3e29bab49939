//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{DbAdapter, FallbackStorage, MemoryStorage, StaticCatalog},
    config::Config,
    error::ApiError,
    web::{build_router, rest::ApiDoc, state::AppState},
};
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::Router;
use bookle_core::ports::StorageService;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Load the Book Catalog ---
    let catalog = Arc::new(match &config.catalog_path {
        Some(path) => StaticCatalog::from_path(path)?,
        None => StaticCatalog::bundled()?,
    });
    info!("Catalog ready with {} books.", catalog.len());

    // --- 3. Choose Storage ---
    let storage: Arc<dyn StorageService> = match &config.database_url {
        Some(database_url) => {
            info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            let db_adapter = Arc::new(DbAdapter::new(db_pool));
            info!("Running database migrations...");
            db_adapter.run_migrations().await?;
            db_adapter.seed_books(catalog.books()).await?;
            info!("Database migrations complete.");

            Arc::new(FallbackStorage::new(db_adapter, Arc::new(MemoryStorage::new())))
        }
        None => {
            warn!("DATABASE_URL is not set; games and stats will not survive a restart.");
            Arc::new(MemoryStorage::new())
        }
    };

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(catalog, storage, config.player_id.clone()));

    let allowed_origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .map_err(|e| ApiError::Internal(format!("Invalid ALLOWED_ORIGIN: {}", e)))?;
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    // --- 5. Create the Web Router ---
    let app = Router::new()
        .merge(build_router(app_state))
        .layer(cors)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
