//! Handler error types

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failures surfaced by the JSON API as `{ "error": ... }` bodies
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload failed validation; nothing was attempted
    #[error("{0}")]
    BadRequest(String),

    /// The mailer is not configured on this deployment
    #[error("notifications are not configured")]
    NotifyUnavailable,

    /// An outbound call (email API, comment store) failed; single attempt,
    /// no retry
    #[error("upstream request failed")]
    Upstream(#[source] anyhow::Error),

    /// Anything else
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotifyUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match &self {
            ApiError::Upstream(source) => tracing::error!("upstream failure: {:#}", source),
            ApiError::Internal(source) => tracing::error!("handler failure: {:#}", source),
            _ => {}
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Failures while rendering an HTML page
pub struct PageError(anyhow::Error);

impl<E> From<E> for PageError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!("page render failure: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Something went wrong</h1>".to_string()),
        )
            .into_response()
    }
}
