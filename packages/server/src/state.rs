use crate::config::Config;
use crate::error::ServerError;
use crate::repository::LayoutRepository;
use axum::http::{header, HeaderMap};
use pagecraft_editor::Registry;
use pagecraft_model::{CacheInvalidation, Layout};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Recorded as `createdBy` on versions written through the API
pub const ADMIN_USER: &str = "admin";

pub type SharedState = Arc<AppState>;

/// State shared by every HTTP handler
pub struct AppState {
    pub config: Config,
    pub repo: LayoutRepository,
    pub registry: Registry,
    pub media_dir: PathBuf,
    invalidations: broadcast::Sender<CacheInvalidation>,
}

impl AppState {
    pub fn new(config: Config, repo: LayoutRepository, media_dir: PathBuf) -> Self {
        let (invalidations, _) = broadcast::channel(64);
        Self {
            config,
            repo,
            registry: Registry::new(),
            media_dir,
            invalidations,
        }
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(self)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheInvalidation> {
        self.invalidations.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.invalidations.receiver_count()
    }

    /// Tell every subscriber that the published content of `layout` changed
    pub fn invalidate(&self, layout: &Layout) {
        let signal = CacheInvalidation {
            layout_id: layout.id.clone(),
            slug: layout.slug.clone(),
        };
        // No subscribers is fine
        let _ = self.invalidations.send(signal);
    }

    /// Check the `Authorization: Bearer` header against the configured admin tokens
    pub fn authorize(&self, headers: &HeaderMap) -> Result<&'static str, ServerError> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .unwrap_or_default();

        if self.config.accepts_token(token) {
            Ok(ADMIN_USER)
        } else {
            tracing::warn!("rejected request without a valid admin token");
            Err(ServerError::Unauthorized)
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("data_dir", &self.repo.dir())
            .field("media_dir", &self.media_dir)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
