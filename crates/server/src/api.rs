//! JSON API consumed by the marketing site.
//!
//! - `POST /api/quote/estimate` prices a quote form.
//! - `GET /api/tracking/{trackingNumber}` looks up a reference shipment.
//! - `GET /api/tracking?number=…` is the same lookup in query-string form.
//! - `POST /api/contact` accepts a contact submission; other methods get 405.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rosco_core::{
    config::AppConfig,
    contact::{self, ContactInbox, LoggingContactInbox},
    ApplicationError, ContactAcknowledgement, ContactSubmission, DeterministicQuoteEngine,
    InterfaceError, QuoteEngine, QuoteEstimate, QuoteForm, ReferenceDirectory, ShipmentDirectory,
    StageProgress, TrackingNumber, TrackingRecord, ValidationErrors,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct ApiState {
    quote_engine: Arc<dyn QuoteEngine>,
    directory: Arc<dyn ShipmentDirectory>,
    inbox: Arc<dyn ContactInbox>,
    tracking_latency: Duration,
}

impl ApiState {
    pub fn new(
        quote_engine: Arc<dyn QuoteEngine>,
        directory: Arc<dyn ShipmentDirectory>,
        inbox: Arc<dyn ContactInbox>,
        tracking_latency: Duration,
    ) -> Self {
        Self { quote_engine, directory, inbox, tracking_latency }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(DeterministicQuoteEngine),
            Arc::new(ReferenceDirectory::shared().clone()),
            Arc::new(LoggingContactInbox),
            Duration::from_millis(config.tracking.simulated_latency_ms),
        )
    }

    pub fn directory(&self) -> Arc<dyn ShipmentDirectory> {
        Arc::clone(&self.directory)
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct TrackingQuery {
    pub number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    #[serde(flatten)]
    pub record: TrackingRecord,
    pub progress: [StageProgress; 3],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub correlation_id: String,
    #[serde(skip_serializing_if = "ValidationErrors::is_empty")]
    pub fields: ValidationErrors,
}

/// Interface error rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub InterfaceError);

impl From<InterfaceError> for ApiError {
    fn from(value: InterfaceError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let correlation_id = self.0.correlation_id().to_string();
        let (status, error, fields) = match self.0 {
            InterfaceError::BadRequest { message, fields, .. } => {
                (StatusCode::BAD_REQUEST, message, fields)
            }
            InterfaceError::NotFound { message, .. } => {
                (StatusCode::NOT_FOUND, message, ValidationErrors::default())
            }
            error @ InterfaceError::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error.user_message().to_string(),
                ValidationErrors::default(),
            ),
        };

        (status, Json(ErrorBody { error, correlation_id, fields })).into_response()
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/quote/estimate", post(estimate_quote))
        .route("/api/tracking", get(track_by_query))
        .route("/api/tracking/{tracking_number}", get(track_by_path))
        .route("/api/contact", post(submit_contact).fallback(method_not_allowed))
        .with_state(state)
}

fn new_correlation_id() -> String {
    Uuid::new_v4().simple().to_string()
}

async fn estimate_quote(
    State(state): State<ApiState>,
    payload: Result<Json<QuoteForm>, JsonRejection>,
) -> Result<Json<QuoteEstimate>, ApiError> {
    let correlation_id = new_correlation_id();
    let Json(form) = payload.map_err(|rejection| {
        warn!(
            event_name = "api.quote.malformed",
            correlation_id = %correlation_id,
            error = %rejection,
            "quote payload could not be decoded"
        );
        InterfaceError::malformed(rejection.body_text(), correlation_id.as_str())
    })?;

    match state.quote_engine.estimate(&form) {
        Ok(estimate) => {
            info!(
                event_name = "api.quote.estimated",
                correlation_id = %correlation_id,
                price = %estimate.price,
                currency = %estimate.currency,
                route = %estimate.route_summary,
                "quote estimate computed"
            );
            Ok(Json(estimate))
        }
        Err(fields) => {
            info!(
                event_name = "api.quote.rejected",
                correlation_id = %correlation_id,
                invalid_fields = fields.len(),
                "quote form failed validation"
            );
            Err(ApplicationError::from(fields).into_interface(correlation_id).into())
        }
    }
}

async fn track_by_path(
    State(state): State<ApiState>,
    Path(tracking_number): Path<String>,
) -> Result<Json<TrackingResponse>, ApiError> {
    lookup(&state, &tracking_number).await
}

async fn track_by_query(
    State(state): State<ApiState>,
    Query(query): Query<TrackingQuery>,
) -> Result<Json<TrackingResponse>, ApiError> {
    lookup(&state, query.number.as_deref().unwrap_or_default()).await
}

async fn lookup(state: &ApiState, raw: &str) -> Result<Json<TrackingResponse>, ApiError> {
    let correlation_id = new_correlation_id();

    // Empty input is answered immediately; only real lookups pay the latency.
    if TrackingNumber::normalize(raw).is_some() && !state.tracking_latency.is_zero() {
        tokio::time::sleep(state.tracking_latency).await;
    }

    match state.directory.track(raw) {
        Ok(record) => {
            info!(
                event_name = "api.tracking.found",
                correlation_id = %correlation_id,
                tracking_number = %record.tracking_number,
                status = %record.status,
                "shipment located"
            );
            let progress = record.progress();
            Ok(Json(TrackingResponse { record, progress }))
        }
        Err(error) => {
            info!(
                event_name = "api.tracking.miss",
                correlation_id = %correlation_id,
                reason = %error,
                "shipment lookup failed"
            );
            Err(ApplicationError::from(error).into_interface(correlation_id).into())
        }
    }
}

async fn submit_contact(
    State(state): State<ApiState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<ContactAcknowledgement>, ApiError> {
    let correlation_id = new_correlation_id();
    let Json(submission) = payload.map_err(|rejection| {
        warn!(
            event_name = "api.contact.malformed",
            correlation_id = %correlation_id,
            error = %rejection,
            "contact payload could not be decoded"
        );
        InterfaceError::malformed("Missing required fields", correlation_id.as_str())
    })?;

    contact::submit(state.inbox.as_ref(), &submission, &correlation_id).await.map(Json).map_err(
        |error| {
            warn!(
                event_name = "api.contact.failed",
                correlation_id = %correlation_id,
                error = %error,
                "contact submission was not accepted"
            );
            error.into_interface(correlation_id.as_str()).into()
        },
    )
}

async fn method_not_allowed() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::METHOD_NOT_ALLOWED, Json(serde_json::json!({ "error": "Method not allowed" })))
}
