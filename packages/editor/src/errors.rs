//! Error types for the editor

use crate::mutations::MutationError;
use pagecraft_model::{ModelError, StoreError};
use thiserror::Error;

/// Rejected control input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field '{0}' is not a repeatable list")]
    NotRepeatable(String),

    #[error("Field '{field}' expects {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("Invalid colour for '{field}': {value}")]
    InvalidColor { field: String, value: String },

    #[error("'{value}' is not an option of '{field}'")]
    InvalidOption { field: String, value: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    /// Generic editor text that does not parse to a JSON object
    #[error("Malformed content: {0}")]
    MalformedContent(String),

    #[error("Section type '{section_type}' does not accept {input} input")]
    UnsupportedInput {
        section_type: String,
        input: &'static str,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComposerError {
    #[error("You must be logged in to save changes")]
    NotLoggedIn,

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Store error: {0}")]
    Store(StoreError),
}

/// A store rejecting the token is the same condition as having no token
impl From<StoreError> for ComposerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unauthorized => ComposerError::NotLoggedIn,
            other => ComposerError::Store(other),
        }
    }
}
