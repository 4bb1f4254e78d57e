use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pagecraft_model::ModelError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("You must be logged in to save changes")]
    Unauthorized,

    #[error("Layout not found: {0}")]
    LayoutNotFound(String),

    #[error("Version not found: {0}")]
    VersionNotFound(String),

    #[error("Layout already exists: {0}")]
    Conflict(String),

    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ModelError> for ServerError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::VersionNotFound(id) => ServerError::VersionNotFound(id),
            other => ServerError::BadRequest(other.to_string()),
        }
    }
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServerError::LayoutNotFound(_) | ServerError::VersionNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::InvalidSlug(_) | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Io(_) | ServerError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
