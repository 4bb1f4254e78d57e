//! Layout endpoints: navigation, listing, lookup, save and revert.

use pagecraft_model::{
    Layout, LayoutState, LayoutSummary, NavigationItem, RevertRequest, SaveVersionRequest,
};

use crate::error::ClientError;
use crate::{parse_response, LayoutClient};

impl LayoutClient {
    /// Header menu entries.
    ///
    /// Calls `GET /api/navigation`.
    pub async fn navigation(&self) -> Result<Vec<NavigationItem>, ClientError> {
        let response = self.get("/api/navigation").send().await?;
        parse_response(response).await
    }

    /// Calls `GET /api/layouts`.
    pub async fn list_layouts(&self) -> Result<Vec<LayoutSummary>, ClientError> {
        let response = self.get("/api/layouts").send().await?;
        parse_response(response).await
    }

    /// Calls `GET /api/layouts/{layout_id}`.
    pub async fn layout(&self, layout_id: &str) -> Result<Layout, ClientError> {
        let path = format!("/api/layouts/{layout_id}");
        let response = self.get(&path).send().await?;
        parse_response(response).await
    }

    /// Layout published at `slug` (nested slugs such as `services/civil` included).
    ///
    /// Calls `GET /api/layouts/by-slug/{slug}`.
    pub async fn layout_by_slug(&self, slug: &str) -> Result<Layout, ClientError> {
        let path = format!("/api/layouts/by-slug/{}", slug.trim_matches('/'));
        let response = self.get(&path).send().await?;
        parse_response(response).await
    }

    /// Append a version; publishing also replaces the live sections.
    ///
    /// Calls `POST /api/layouts/{layout_id}/version`.
    pub async fn save_layout_version(
        &self,
        layout_id: &str,
        request: &SaveVersionRequest,
        token: &str,
    ) -> Result<LayoutState, ClientError> {
        let path = format!("/api/layouts/{layout_id}/version");
        let response = self.post(&path, token).json(request).send().await?;
        parse_response(response).await
    }

    /// Republish a stored version as a new version.
    ///
    /// Calls `POST /api/layouts/{layout_id}/revert`.
    pub async fn revert_layout(
        &self,
        layout_id: &str,
        version_id: &str,
        token: &str,
    ) -> Result<LayoutState, ClientError> {
        let path = format!("/api/layouts/{layout_id}/revert");
        let request = RevertRequest {
            version_id: version_id.to_string(),
        };
        let response = self.post(&path, token).json(&request).send().await?;
        parse_response(response).await
    }
}
