//! Server assembly: repository, action registry, routes and the listener.

use crate::config::Config;
use crate::gui;
use crate::parts::{InMemoryPartRepository, PartRepository, SqlitePartRepository};
use anyhow::Context;
use axum::Router;
use guiapi_core::RegistryBuilder;
use guiapi_web::{correlation_id_layer, guiapi_router, GuiState};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Open the repository named by the configuration and apply migrations.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrated.
pub async fn open_repository(config: &Config) -> anyhow::Result<Arc<dyn PartRepository>> {
    if config.uses_memory_database() {
        warn!("Using in-memory storage; parts are lost on exit");
        return Ok(Arc::new(InMemoryPartRepository::new()));
    }

    let repo = SqlitePartRepository::connect(&config.database.url, config.database.max_connections)
        .await
        .with_context(|| format!("opening database {}", config.database.url))?;
    repo.migrate().await.context("migrating database")?;
    Ok(Arc::new(repo))
}

/// Build the application router.
///
/// # Routes
///
/// - `GET /` - Parts list
/// - `GET /part/:id` - One part
/// - `POST /guiapi/:name` - Run an action
/// - `GET /health`, `GET /health/ready` - Health checks
/// - `GET /js/*` - Client scripts
pub fn build_router(config: &Config, parts: Arc<dyn PartRepository>) -> Router {
    let registry = RegistryBuilder::new()
        .install(gui::install(Arc::clone(&parts)))
        .freeze();
    info!(actions = ?registry.names(), "Action registry ready");

    gui::routes(parts)
        .merge(guiapi_router(GuiState::new(registry)))
        .nest_service("/js", ServeDir::new(&config.assets_dir))
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
}

/// Bind the listener and serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: &Config, parts: Arc<dyn PartRepository>) -> anyhow::Result<()> {
    let app = build_router(config, parts);
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;

    info!(address = %address, "Inventory server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("Server stopped");
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Could not listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Could not listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C signal"),
        () = terminate => info!("Received SIGTERM signal"),
    }
}
