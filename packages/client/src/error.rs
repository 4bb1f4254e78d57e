//! Error types for the layout API client.

use pagecraft_model::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("You must be logged in to save changes")]
    NotAuthenticated,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl From<ClientError> for StoreError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotAuthenticated => StoreError::Unauthorized,
            ClientError::NotFound(what) => StoreError::NotFound(what),
            ClientError::ServerError { status, message } => StoreError::Rejected { status, message },
            other => StoreError::Transport(other.to_string()),
        }
    }
}
