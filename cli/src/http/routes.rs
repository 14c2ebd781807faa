//! HTTP route handlers

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Local;

use crate::http::{
    error::HttpServerError,
    models::{GiftQuery, HealthResponse},
    state::AppState,
};

pub const GIFT_IDEAS_PATH: &str = "/api/gift-ideas";

/// Builds every route. Other verbs on a known path answer 405.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(GIFT_IDEAS_PATH, get(gift_ideas_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// GET /api/gift-ideas - forwards the body (or the query) to the core binary
///
/// Extraction is done here rather than by axum so malformed requests get
/// the same `{"error": ...}` 400 as a rejected payload.
async fn gift_ideas_handler(
    State(state): State<AppState>,
    query: Result<Query<GiftQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Response, HttpServerError> {
    state.stats.increment_request();

    let payload = match request_payload(query, &body) {
        Ok(payload) => payload,
        Err(e) => {
            state.stats.increment_validation_error();
            return Err(e);
        }
    };

    match state.generator.generate_gifts(&payload).await {
        Ok(ideas) => Ok(([(header::CONTENT_TYPE, "application/json")], ideas).into_response()),
        Err(e) => {
            if e.is_validation() {
                state.stats.increment_validation_error();
            } else {
                state.stats.increment_internal_error();
            }
            Err(e.into())
        }
    }
}

/// A non-blank body wins; the query is only looked at without one.
fn request_payload(
    query: Result<Query<GiftQuery>, QueryRejection>,
    body: &[u8],
) -> Result<String, HttpServerError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        let Query(query) = query.map_err(|e| HttpServerError::Validation(e.body_text()))?;
        return Ok(query.to_payload());
    }
    String::from_utf8(body.to_vec())
        .map_err(|_| HttpServerError::Validation("Request body is not valid UTF-8".into()))
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = &state.stats;

    Json(HealthResponse {
        status: "healthy".into(),
        uptime_seconds: stats.uptime_seconds(),
        requests_handled: stats.requests_total(),
        validation_errors: stats.validation_errors(),
        internal_errors: stats.internal_errors(),
        timestamp: Local::now().to_rfc3339(),
    })
}
