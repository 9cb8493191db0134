mod bootstrap;
mod health;
mod routes;
mod sessions;

use anyhow::Result;
use cardwise_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use cardwise_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config)?;

    health::spawn(
        &app.config.server.bind_address,
        app.config.server.health_check_port,
        app.config.catalog.path.clone(),
    )
    .await?;

    let state = routes::AppState {
        sessions: app.sessions.clone(),
        runtime: app.runtime.clone(),
        catalog_path: app.config.catalog.path.clone(),
    };
    let router = routes::router(state, &app.config.server.static_dir);

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        session_id = "unknown",
        bind_address = %address,
        "cardwise-server started"
    );

    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!(
        event_name = "system.server.stopping",
        correlation_id = "shutdown",
        session_id = "unknown",
        "cardwise-server stopping"
    );

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
