// src/bin/api_server.rs

use anyhow::Context;
use profile_intake::infra::telemetry;
use profile_intake::transport;
use profile_intake::{
    Config, InMemoryProfileStore, IntakeService, PostgresProfileStore, ProfileStore, StoreBackend,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init_tracing()?;

    // --- Record Store Initialization ---
    let store: Arc<dyn ProfileStore> = match config.store_backend {
        StoreBackend::Postgres => {
            tracing::info!(max_connections = config.db_max_connections, "connecting to PostgreSQL");
            let store = PostgresProfileStore::connect(config.database_url()?, config.db_max_connections)
                .await
                .context("failed to connect to DATABASE_URL")?;
            store
                .ensure_schema()
                .await
                .context("failed to create the user_profiles table")?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory record store; profiles are lost on restart");
            Arc::new(InMemoryProfileStore::new())
        }
    };
    tracing::info!(backend = store.backend(), "record store ready");

    let app_state = transport::http::AppState {
        intake: IntakeService::new(store),
    };

    // --- HTTP Server Initialization ---
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()));
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "profile intake listening");
    tracing::info!("entry form at http://{}/form.html", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        return;
    }
    tracing::info!("shutdown signal received");
}
