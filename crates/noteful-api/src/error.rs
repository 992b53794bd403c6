//! HTTP error responder.
//!
//! Every failure leaves the API as `{"error": "<message>"}` with a status
//! derived from the core error taxonomy.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use noteful_core::logging::{ERROR_MSG, SUBSYSTEM};
use serde::Serialize;
use tracing::error;

/// Message returned for unknown routes and lookup misses.
pub const NOT_FOUND: &str = "Not Found";

/// Message returned for infrastructure failures; details go to the log only.
pub const INTERNAL_ERROR: &str = "Internal Server Error";

/// JSON body of every error response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    /// An extractor refused the request; keeps the extractor's status.
    #[error("{1}")]
    Rejected(StatusCode, String),
    #[error(transparent)]
    Internal(noteful_core::Error),
}

impl ApiError {
    /// A bare 404.
    pub fn not_found() -> Self {
        ApiError::NotFound(NOT_FOUND.to_string())
    }
}

impl From<noteful_core::Error> for ApiError {
    fn from(err: noteful_core::Error) -> Self {
        use noteful_core::Error;

        match err {
            Error::InvalidInput(msg) | Error::Conflict(msg) => ApiError::BadRequest(msg),
            Error::NotFound(_) | Error::NoteNotFound(_) | Error::FolderNotFound(_) => {
                ApiError::not_found()
            }
            other => ApiError::Internal(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Rejected(status, msg) => (status, msg),
            ApiError::Internal(err) => {
                error!({ SUBSYSTEM } = "api", { ERROR_MSG } = %err, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
