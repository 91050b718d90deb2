use axum::Router;
use rosco_core::config::{AppConfig, ConfigError, LoadOptions};
use thiserror::Error;
use tracing::info;

use crate::{api, health};

pub struct Application {
    pub config: AppConfig,
    pub state: api::ApiState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("tracking reference data is unavailable: {0}")]
    ReferenceData(String),
}

impl Application {
    pub fn router(&self) -> Router {
        api::router(self.state.clone()).merge(health::router(self.state.directory()))
    }
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let state = api::ApiState::from_config(&config);
    let directory = state.directory();
    if directory.is_empty() {
        return Err(BootstrapError::ReferenceData("no tracking records loaded".to_string()));
    }
    info!(
        event_name = "system.bootstrap.reference_data_loaded",
        correlation_id = "bootstrap",
        tracking_records = directory.len(),
        tracking_latency_ms = config.tracking.simulated_latency_ms,
        "tracking reference table ready"
    );

    Ok(Application { config, state })
}
