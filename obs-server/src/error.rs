use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error};

/// Error type for the session API
#[derive(Debug)]
pub enum ApiError {
    /// Session load/update failure
    Session(obs_core::Error),
    /// The update body could not be bound to a session patch
    Body(JsonRejection),
}

impl ApiError {
    /// Status and short client-facing message
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Session(obs_core::Error::Decode(_)) => {
                (StatusCode::BAD_REQUEST, "Failed to decode Base64")
            }
            Self::Session(obs_core::Error::Parse(_)) => {
                (StatusCode::BAD_REQUEST, "Failed to unmarshal JSON")
            }
            Self::Session(obs_core::Error::NoSession) => {
                (StatusCode::BAD_REQUEST, "No valid cookie found")
            }
            Self::Session(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
            Self::Body(_) => (StatusCode::BAD_REQUEST, "Failed to bind request body"),
        }
    }
}

impl From<obs_core::Error> for ApiError {
    fn from(e: obs_core::Error) -> Self {
        Self::Session(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::Body(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        match &self {
            Self::Session(e) if !e.is_client_error() => error!(error = %e, "Session handling failed"),
            Self::Session(e) => debug!(error = %e, "Rejected session cookie"),
            Self::Body(e) => debug!(error = %e, "Rejected update body"),
        }
        (status, Json(message)).into_response()
    }
}
