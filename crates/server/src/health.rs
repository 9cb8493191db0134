use std::path::{Path, PathBuf};

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use tracing::{error, info};

use cardwise_core::catalog;

#[derive(Clone)]
pub struct HealthState {
    catalog_path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub catalog: HealthCheck,
    pub checked_at: String,
}

pub fn router(catalog_path: PathBuf) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { catalog_path })
}

pub async fn spawn(
    bind_address: &str,
    port: u16,
    catalog_path: PathBuf,
) -> std::io::Result<()> {
    let address = format!("{bind_address}:{port}");
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(
        event_name = "system.health.start",
        correlation_id = "bootstrap",
        session_id = "unknown",
        bind_address = %address,
        "health endpoint started"
    );

    tokio::spawn(async move {
        if let Err(error) = axum::serve(listener, router(catalog_path)).await {
            error!(
                event_name = "system.health.error",
                correlation_id = "bootstrap",
                session_id = "unknown",
                error = %error,
                "health endpoint server terminated unexpectedly"
            );
        }
    });

    Ok(())
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let catalog = catalog_check(&state.catalog_path);
    let ready = catalog.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "cardwise-server runtime initialized".to_string(),
        },
        catalog,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn catalog_check(catalog_path: &Path) -> HealthCheck {
    match catalog::load_from_path(catalog_path) {
        Ok(snapshot) => HealthCheck {
            status: "ready",
            detail: format!("catalog loaded with {} card(s)", snapshot.len()),
        },
        Err(error) => {
            HealthCheck { status: "degraded", detail: format!("catalog load failed: {error}") }
        }
    }
}
