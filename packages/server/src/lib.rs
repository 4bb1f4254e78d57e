//! # Pagecraft Server
//!
//! Owns the durable layout records and serves them over HTTP.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  REST   ┌──────────────────┐  files  ┌────────────┐
//! │ client/shell │ ──────→ │ routes (axum)    │ ──────→ │ data/*.json│
//! └──────────────┘         │  - bearer auth   │         └────────────┘
//!        ↑                 │  - page HTML     │
//!        │   SSE           └──────────────────┘
//!        └──────────── broadcast<CacheInvalidation>
//! ```
//!
//! ## Core Principles
//!
//! 1. **Last write wins**: saves append a version without conflict checks
//! 2. **Versions are append-only**: revert republishes as a new version
//! 3. **Publishing is observable**: every publish and revert emits an invalidation

mod config;
mod error;
mod events;
mod media;
mod pages;
mod repository;
mod routes;
mod state;

pub use config::{Config, DEFAULT_CONFIG_NAME};
pub use error::ServerError;
pub use media::{sanitize_file_name, MediaUploaded, FILE_NAME_HEADER};
pub use pages::{not_found_page, render_layout_page};
pub use repository::{is_valid_id, is_valid_slug, LayoutRepository, NewLayout};
pub use routes::{router, HOME_SLUG};
pub use state::{AppState, SharedState, ADMIN_USER};

use std::path::Path;

/// Build the shared state for a project rooted at `root`
pub async fn build_state(config: Config, root: &Path) -> Result<SharedState, ServerError> {
    let repo = LayoutRepository::open(config.data_path(root)).await?;
    let media_dir = config.media_path(root);
    Ok(AppState::new(config, repo, media_dir).into_shared())
}

/// Serve the project rooted at `root` until the process is stopped
pub async fn serve(config: Config, root: &Path) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let state = build_state(config, root).await?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
