//! Persistence collaborator contracts.
//!
//! The editor never talks HTTP itself; it goes through [`LayoutStore`] and
//! [`MediaUploader`]. `pagecraft-client` implements both over REST and tests
//! substitute in-memory versions.

use crate::layout::LayoutState;
use crate::section::Section;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the broadcast signal sent after a publish
pub const CACHE_INVALIDATE_EVENT: &str = "layout-cache-invalidate";

/// Body of `POST /api/layouts/{id}/version`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveVersionRequest {
    pub sections: Vec<Section>,
    pub is_draft: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `POST /api/layouts/{id}/revert`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevertRequest {
    pub version_id: String,
}

/// Published content changed; cached layout data must be refetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheInvalidation {
    pub layout_id: String,
    pub slug: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("You must be logged in to save changes")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),
}

/// Durable layout storage
#[allow(async_fn_in_trait)]
pub trait LayoutStore {
    /// Append a version and return the canonical layout state
    async fn save_version(
        &self,
        layout_id: &str,
        request: &SaveVersionRequest,
        token: &str,
    ) -> Result<LayoutState, StoreError>;

    /// Republish a stored version and return the canonical layout state
    async fn revert(
        &self,
        layout_id: &str,
        version_id: &str,
        token: &str,
    ) -> Result<LayoutState, StoreError>;
}

/// Media acquisition: stores the file somewhere and returns its URL
#[allow(async_fn_in_trait)]
pub trait MediaUploader {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>, token: &str)
        -> Result<String, StoreError>;
}
