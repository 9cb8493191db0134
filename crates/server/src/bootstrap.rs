use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use cardwise_agent::{ConversationRuntime, DisabledOracle, LanguageOracle, OracleClient};
use cardwise_core::catalog;
use cardwise_core::config::{AppConfig, ConfigError, LoadOptions};

use crate::sessions::SessionStore;

pub struct Application {
    pub config: AppConfig,
    pub sessions: Arc<SessionStore>,
    pub runtime: Arc<ConversationRuntime>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("oracle client construction failed: {0}")]
    Oracle(String),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        session_id = "unknown",
        "starting application bootstrap"
    );
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    let oracle: Arc<dyn LanguageOracle> = if config.oracle.enabled {
        let client = OracleClient::from_config(&config.oracle)
            .map_err(|error| BootstrapError::Oracle(error.to_string()))?;
        Arc::new(client)
    } else {
        Arc::new(DisabledOracle)
    };

    info!(
        event_name = "system.bootstrap.oracle_mode",
        correlation_id = "bootstrap",
        session_id = "unknown",
        oracle_mode = if config.oracle.enabled { "remote" } else { "disabled" },
        "language oracle initialized"
    );

    // The catalog is read per request; probe once here so a broken path is
    // visible at startup instead of on the first recommendation.
    match catalog::load_from_path(&config.catalog.path) {
        Ok(snapshot) => info!(
            event_name = "system.bootstrap.catalog_probe",
            correlation_id = "bootstrap",
            session_id = "unknown",
            card_count = snapshot.len(),
            "catalog probe succeeded"
        ),
        Err(error) => warn!(
            event_name = "system.bootstrap.catalog_probe_failed",
            correlation_id = "bootstrap",
            session_id = "unknown",
            error = %error,
            "catalog probe failed; recommendations will be unavailable until fixed"
        ),
    }

    Ok(Application {
        sessions: Arc::new(SessionStore::new()),
        runtime: Arc::new(ConversationRuntime::new(oracle)),
        config,
    })
}
