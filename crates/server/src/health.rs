use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use rosco_core::ShipmentDirectory;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    directory: Arc<dyn ShipmentDirectory>,
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
    pub reference_data: HealthCheck,
    pub checked_at: String,
}

pub fn router(directory: Arc<dyn ShipmentDirectory>) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { directory })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let reference_data = reference_data_check(state.directory.as_ref());
    let ready = reference_data.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "rosco-server runtime initialized".to_string(),
        },
        reference_data,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn reference_data_check(directory: &dyn ShipmentDirectory) -> HealthCheck {
    match directory.len() {
        0 => HealthCheck {
            status: "degraded",
            detail: "tracking reference table is empty".to_string(),
        },
        count => HealthCheck {
            status: "ready",
            detail: format!("{count} tracking records loaded"),
        },
    }
}
