//! HTTP adapter: the scoring service behind an axum router.
//!
//! - `POST /calculate` takes a patient document and answers with the bare
//!   probability as a JSON number.
//! - `GET /health` answers `ok`.
//!
//! CORS is permissive so browser front-ends on other origins can call the API.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::application::ScoringService;
use crate::ports::RiskModel;
use crate::PrmError;

/// Error body returned for rejected requests: `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<PrmError> for ApiError {
    fn from(err: PrmError) -> Self {
        let status = match err {
            PrmError::Record(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PrmError::Json(_) => StatusCode::BAD_REQUEST,
            PrmError::Io(_) | PrmError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Build the API router around a scoring service.
pub fn router<M>(service: ScoringService<M>) -> Router
where
    M: RiskModel + 'static,
{
    Router::new()
        .route("/calculate", post(calculate::<M>))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

async fn calculate<M>(
    State(service): State<ScoringService<M>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<f64>, ApiError>
where
    M: RiskModel + 'static,
{
    let Json(document) = payload.map_err(|rejection| {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;
    let (_, assessment) = service.assess_document(&document)?;
    Ok(Json(assessment.probability))
}

async fn health() -> &'static str {
    "ok"
}
