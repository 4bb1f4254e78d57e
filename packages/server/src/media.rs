use crate::error::ServerError;
use crate::state::SharedState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use pagecraft_model::now_millis;
use serde::{Deserialize, Serialize};

/// Header carrying the original file name of an upload
pub const FILE_NAME_HEADER: &str = "x-file-name";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaUploaded {
    pub url: String,
}

/// Reduce an uploaded file name to its last path component, keeping only
/// ASCII letters, digits, `.`, `-` and `_`.
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// `POST /api/media`: raw body, name in `X-File-Name`
pub async fn upload_media(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<MediaUploaded>), ServerError> {
    state.authorize(&headers)?;

    let original = headers
        .get(FILE_NAME_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let name = sanitize_file_name(original)
        .ok_or_else(|| ServerError::BadRequest("missing file name".to_string()))?;
    if body.is_empty() {
        return Err(ServerError::BadRequest("empty upload".to_string()));
    }

    let stored = format!("{}-{}", now_millis(), name);
    tokio::fs::create_dir_all(&state.media_dir).await?;
    tokio::fs::write(state.media_dir.join(&stored), &body).await?;

    tracing::info!(file = %stored, bytes = body.len(), "stored media upload");
    Ok((
        StatusCode::CREATED,
        Json(MediaUploaded {
            url: format!("/media/{}", stored),
        }),
    ))
}
