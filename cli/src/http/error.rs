use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use giftgen_core::api::{GiftError, INTERNAL_PUBLIC_MESSAGE};
use thiserror::Error;

use super::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum HttpServerError {
    #[error("{0}")]
    Validation(String),

    /// Diagnostic text for the log; never sent to the client.
    #[error("{0}")]
    Internal(String),
}

impl From<GiftError> for HttpServerError {
    fn from(err: GiftError) -> Self {
        match err {
            GiftError::Validation { message, .. } => HttpServerError::Validation(message),
            internal @ GiftError::Internal { .. } => HttpServerError::Internal(internal.to_string()),
        }
    }
}

impl IntoResponse for HttpServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpServerError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            HttpServerError::Internal(detail) => {
                // already reported by the generator
                tracing::debug!(%detail, "answering 500");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_PUBLIC_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
