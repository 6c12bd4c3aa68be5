//! Focus Suite - A local productivity daemon
//! 
//! This is the main entry point for the focus-suite application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use focus_suite::{
    config::Config,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_suite={},tower_http=info", config.log_level()))
        .init();

    info!("Starting focus-suite v{}", env!("CARGO_PKG_VERSION"));
    match config.data_file() {
        Some(path) => info!("Storage file: {}", path.display()),
        None => info!("Running ephemeral, nothing will be persisted"),
    }

    // Create application state from persisted widget data
    let state = Arc::new(AppState::new(
        config.persistence(),
        config.notifier(),
        config.port,
        config.host.clone(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timer                    - Countdown, phase and progress");
    info!("  POST /timer/toggle             - Start or pause the timer");
    info!("  POST /timer/reset              - Reset to a full focus period");
    info!("  POST /timer/settings/open      - Edit durations (then PUT draft, POST save)");
    info!("  GET  /todos, /kanban, /clock   - Widgets");
    info!("  GET  /status, /health          - Server status");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Release the ticker before exit
    state.shutdown();

    info!("Server shutdown complete");
    Ok(())
}
