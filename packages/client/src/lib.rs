//! REST client for the Pagecraft layout API.
//!
//! Implements [`LayoutStore`](pagecraft_model::LayoutStore) and
//! [`MediaUploader`](pagecraft_model::MediaUploader) so a
//! `PageComposer` can persist straight to a running server.
//!
//! # Example
//!
//! ```no_run
//! use pagecraft_client::LayoutClient;
//!
//! # async fn example() -> Result<(), pagecraft_client::ClientError> {
//! let client = LayoutClient::new("http://localhost:3030");
//! let home = client.layout_by_slug("home").await?;
//! println!("{} has {} sections", home.name, home.sections.len());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod events;
pub mod layouts;
pub mod media;
mod store;

pub use cache::{LayoutListCache, DEFAULT_TTL};
pub use error::ClientError;
pub use events::{SseEvent, SseParser};

use reqwest::Client;
use serde::Deserialize;

/// A typed REST client for the layout API
#[derive(Debug, Clone)]
pub struct LayoutClient {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl LayoutClient {
    /// Create a client pointing at the server base URL, e.g. `"http://localhost:3030"`
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path returned by the server, such as a media URL
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            self.url(path)
        }
    }

    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.get(self.url(path))
    }

    /// Build a POST request carrying `Authorization: Bearer {token}`
    pub(crate) fn post(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.http
            .post(self.url(path))
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Decode a JSON body on success, or map the status to [`ClientError`]
pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status().as_u16();
    match status {
        200 | 201 => Ok(response.json().await?),
        401 => Err(ClientError::NotAuthenticated),
        404 => Err(ClientError::NotFound(error_message(response).await)),
        _ => Err(ClientError::ServerError {
            status,
            message: error_message(response).await,
        }),
    }
}

/// The `error` field of a `{ "error": ... }` body, or the raw text
pub(crate) async fn error_message(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) => text,
    }
}
