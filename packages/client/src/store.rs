use pagecraft_model::{LayoutState, LayoutStore, MediaUploader, SaveVersionRequest, StoreError};

use crate::LayoutClient;

impl LayoutStore for LayoutClient {
    async fn save_version(
        &self,
        layout_id: &str,
        request: &SaveVersionRequest,
        token: &str,
    ) -> Result<LayoutState, StoreError> {
        self.save_layout_version(layout_id, request, token)
            .await
            .map_err(StoreError::from)
    }

    async fn revert(
        &self,
        layout_id: &str,
        version_id: &str,
        token: &str,
    ) -> Result<LayoutState, StoreError> {
        self.revert_layout(layout_id, version_id, token)
            .await
            .map_err(StoreError::from)
    }
}

impl MediaUploader for LayoutClient {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>, token: &str) -> Result<String, StoreError> {
        self.upload_file(file_name, bytes, token)
            .await
            .map_err(StoreError::from)
    }
}
