//! Media upload endpoint.

use serde::Deserialize;

use crate::error::ClientError;
use crate::{parse_response, LayoutClient};

#[derive(Debug, Deserialize)]
struct Uploaded {
    url: String,
}

impl LayoutClient {
    /// Upload a file and return the URL it is served at.
    ///
    /// Calls `POST /api/media` with the raw bytes and an `X-File-Name` header.
    pub async fn upload_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        token: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .post("/api/media", token)
            .header("x-file-name", file_name)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await?;
        let uploaded: Uploaded = parse_response(response).await?;
        Ok(uploaded.url)
    }
}
