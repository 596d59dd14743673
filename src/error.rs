use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Request-level failure kinds. Each maps to exactly one HTTP status and a
/// `{"error": ...}` JSON body. Per-token delivery failures are not errors
/// and never appear here.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Missing env")]
    MissingEnv,

    #[error("Missing required fields (user_id/title/body)")]
    MissingFields,

    #[error("Notifikasi not found")]
    NotifikasiNotFound,

    /// Non-success response from the data store or the OAuth endpoint; the
    /// message carries the upstream body text.
    #[error("{0}")]
    Upstream(String),

    /// Anything unexpected: malformed request JSON, a broken credential
    /// blob, transport failures. Reported as the stringified cause.
    #[error("{0}")]
    Internal(String),
}

impl DispatchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DispatchError::MissingFields => StatusCode::BAD_REQUEST,
            DispatchError::NotifikasiNotFound => StatusCode::NOT_FOUND,
            DispatchError::MissingEnv
            | DispatchError::Upstream(_)
            | DispatchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<reqwest::Error> for DispatchError {
    fn from(e: reqwest::Error) -> Self {
        DispatchError::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(e: serde_json::Error) -> Self {
        DispatchError::Internal(e.to_string())
    }
}
