use anyhow::Context;
use tracing::info;

use resource_server::config::AppConfig;
use resource_server::state::AppState;
use resource_server::{build_router, database, notifier, schema};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = database::init_db(&config.database.connection_url())
        .await
        .context("Failed to connect to database")?;
    info!("Database connected and schema synced");

    schema::ensure_indexes(&db)
        .await
        .context("Failed to create indexes")?;

    let notifier = notifier::from_config(&config.notifications)
        .context("Failed to build webhook client")?;
    if !notifier.is_enabled() {
        info!("No webhook configured, new resources will not be announced");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db,
        config,
        notifier,
    };
    let app = build_router(state);

    info!("Server running at http://{}", addr);
    info!("Swagger UI: http://{}/swagger-ui", addr);
    info!("Scalar UI: http://{}/scalar", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
