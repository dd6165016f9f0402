//! services/engine/src/bin/engine.rs

use axum::{
    http::{header::CONTENT_TYPE, Method},
    Router,
};
use engine_lib::{
    adapters::{DbReportStore, TemplateArticleGenerator, WordPressAdapter},
    config::Config,
    cycle::run_improvement_cycles,
    error::EngineError,
    web::{rest::ApiDoc, router, state::AppState},
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting engine...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let report_store = Arc::new(DbReportStore::new(db_pool));
    info!("Running database migrations...");
    report_store.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Initialize Service Adapters ---
    let http_client = reqwest::Client::builder()
        .user_agent(concat!("content-quality-engine/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let wordpress = Arc::new(WordPressAdapter::from_config(http_client, &config));
    let generator = Arc::new(TemplateArticleGenerator::new());

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(
        config.clone(),
        wordpress.clone(),
        wordpress,
        report_store,
        generator,
    )?);

    // --- 5. Start the Improvement Cycle ---
    let shutdown = CancellationToken::new();
    let cycle = tokio::spawn(run_improvement_cycles(app_state.clone(), shutdown.clone()));

    // --- 6. Create the Web Router ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .merge(router(app_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors);

    // --- 7. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    let server_shutdown = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for the shutdown signal: {}", e);
            }
            info!("Shutdown signal received.");
            server_shutdown.cancel();
        })
        .await?;

    // The cycle finishes its current run before it observes the cancellation.
    shutdown.cancel();
    if let Err(e) = cycle.await {
        return Err(EngineError::Internal(format!("Improvement cycle task failed: {}", e)));
    }

    Ok(())
}
