//! Tutor bot gateway.
//!
//! Wires configuration, logging, SQLite and the local completion endpoint
//! into the conversation controller and serves it over HTTP.

use std::sync::Arc;

use brain_core::CompletionClient;
use database::{ConversationStore, Database};
use local_brain::LocalBrain;
use orchestrator::{ConversationController, DynController};
use tracing::{error, info};
use tutor_gateway::{init_logging, log_dir_from_env, router, AppState, GatewayConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let _log_guard = init_logging(&log_dir_from_env())?;

    // Load configuration
    let config = GatewayConfig::from_env()
        .inspect_err(|e| error!("Refusing to start: {}", e))?;
    info!(addr = %config.addr, "Starting tutor gateway");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Completion endpoint
    let brain = LocalBrain::from_env()?;

    let store: Arc<dyn ConversationStore> = Arc::new(db.clone());
    let client: Arc<dyn CompletionClient> = Arc::new(brain);
    let controller = ConversationController::new(store, client, config.controller_config())?;
    let controller: Arc<DynController> = Arc::new(controller);

    let app = router(AppState::new(controller, config.bot_token.as_str()));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "Tutor gateway listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
