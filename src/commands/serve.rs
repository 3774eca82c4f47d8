//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    // Connects, migrates and seeds roles
    let db = Arc::new(Database::connect(&config).await?);

    let app_state = AppState::from_config(db, &config);
    app_state.storage.init().await?;
    tracing::info!(
        storage_dir = %app_state.storage.root().display(),
        "File storage ready"
    );

    let app = create_router(app_state);

    let addr = match (args.host, args.port) {
        (None, None) => config.server_addr(),
        (host, port) => format!(
            "{}:{}",
            host.unwrap_or_else(|| config.server_host.clone()),
            port.unwrap_or(config.server_port)
        ),
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
