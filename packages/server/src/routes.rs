//! HTTP routes.
//!
//! ```text
//! GET  /api/navigation                 → [NavigationItem]
//! GET  /api/layouts                    → [LayoutSummary]
//! POST /api/layouts              (auth) → Layout
//! GET  /api/layouts/{id}               → Layout
//! GET  /api/layouts/by-slug/{slug}     → Layout
//! POST /api/layouts/{id}/version (auth) → { sections, versions }
//! POST /api/layouts/{id}/revert  (auth) → { sections, versions }
//! POST /api/media                (auth) → { url }
//! GET  /api/events                     → SSE layout-cache-invalidate
//! GET  /media/*                        → uploaded files
//! GET  /{slug}                         → published page
//! ```

use crate::error::ServerError;
use crate::events::events_handler;
use crate::media::upload_media;
use crate::pages::{not_found_page, render_layout_page};
use crate::repository::{is_valid_slug, NewLayout};
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use pagecraft_editor::Mode;
use pagecraft_model::{Layout, LayoutState, LayoutSummary, NavigationItem, RevertRequest, SaveVersionRequest};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

/// Slug served at `/`
pub const HOME_SLUG: &str = "home";

pub fn router(state: SharedState) -> Router {
    let media = ServeDir::new(&state.media_dir);

    Router::new()
        .route("/api/navigation", get(navigation))
        .route("/api/layouts", get(list_layouts).post(create_layout))
        .route("/api/layouts/by-slug/*slug", get(layout_by_slug))
        .route("/api/layouts/:id", get(get_layout))
        .route("/api/layouts/:id/version", post(save_version))
        .route("/api/layouts/:id/revert", post(revert))
        .route("/api/media", post(upload_media))
        .route("/api/events", get(events_handler))
        .nest_service("/media", media)
        .fallback(page)
        .with_state(state)
        .layer(CorsLayer::permissive())
}

async fn navigation(State(state): State<SharedState>) -> Json<Vec<NavigationItem>> {
    Json(state.config.navigation.clone())
}

async fn list_layouts(State(state): State<SharedState>) -> Json<Vec<LayoutSummary>> {
    Json(state.repo.list().await)
}

async fn create_layout(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<NewLayout>,
) -> Result<(StatusCode, Json<Layout>), ServerError> {
    let user = state.authorize(&headers)?;
    let layout = state.repo.create(request, user).await?;
    if !layout.sections.is_empty() {
        state.invalidate(&layout);
    }
    Ok((StatusCode::CREATED, Json(layout)))
}

async fn get_layout(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Layout>, ServerError> {
    Ok(Json(state.repo.get(&id).await?))
}

async fn layout_by_slug(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> Result<Json<Layout>, ServerError> {
    let slug = slug.trim_matches('/');
    Ok(Json(state.repo.by_slug(slug).await?))
}

async fn save_version(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<SaveVersionRequest>,
) -> Result<Json<LayoutState>, ServerError> {
    let user = state.authorize(&headers)?;
    let is_draft = request.is_draft;
    let layout = state.repo.save_version(&id, request, user).await?;

    if !is_draft {
        state.invalidate(&layout);
    }
    Ok(Json(layout.state()))
}

async fn revert(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<RevertRequest>,
) -> Result<Json<LayoutState>, ServerError> {
    let user = state.authorize(&headers)?;
    let layout = state.repo.revert(&id, &request.version_id, user).await?;

    state.invalidate(&layout);
    Ok(Json(layout.state()))
}

/// Published page for the request path; `/` is the home page
async fn page(State(state): State<SharedState>, uri: Uri) -> Response {
    let slug = match uri.path().trim_matches('/') {
        "" => HOME_SLUG,
        slug => slug,
    };

    if !is_valid_slug(slug) {
        return (StatusCode::NOT_FOUND, Html(not_found_page(slug))).into_response();
    }

    match state.repo.by_slug(slug).await {
        Ok(layout) => Html(render_layout_page(
            &layout,
            &state.config.navigation,
            &state.registry,
            Mode::Viewing,
        ))
        .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, Html(not_found_page(slug))).into_response(),
    }
}
