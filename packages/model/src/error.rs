//! Error types for the content model

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Item index {index} out of bounds for '{field}' (len {len})")]
    ItemIndexOutOfBounds {
        field: String,
        index: usize,
        len: usize,
    },

    #[error("Field '{0}' is not an array")]
    NotAnArray(String),

    #[error("Item {index} of '{field}' is not an object")]
    ItemNotObject { field: String, index: usize },

    #[error("Version not found: {0}")]
    VersionNotFound(String),

    #[error("Invalid content: {0}")]
    InvalidContent(String),
}
