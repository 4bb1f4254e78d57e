//! File-backed layout storage.
//!
//! Each layout lives in `{data_dir}/{id}.json`. All layouts are loaded at
//! startup and kept in memory behind a `RwLock`; every mutation rewrites the
//! layout's file (temp file + rename) while the write lock is held.

use crate::error::ServerError;
use pagecraft_model::{unique_id, Layout, LayoutSummary, SaveVersionRequest, Section};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tokio::sync::RwLock;

/// Body of `POST /api/layouts`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLayout {
    #[serde(default)]
    pub id: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug)]
pub struct LayoutRepository {
    dir: PathBuf,
    layouts: RwLock<BTreeMap<String, Layout>>,
}

fn slug_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[a-z0-9]+(?:[-/][a-z0-9]+)*$").ok())
        .as_ref()
}

fn id_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").ok())
        .as_ref()
}

/// Lowercase words joined by `-`, nested with `/` (`services/civil`)
pub fn is_valid_slug(slug: &str) -> bool {
    slug_pattern().map(|re| re.is_match(slug)).unwrap_or(false)
}

/// Ids become file names, so only a safe character set is accepted
pub fn is_valid_id(id: &str) -> bool {
    id_pattern().map(|re| re.is_match(id)).unwrap_or(false)
}

impl LayoutRepository {
    /// Open (and create if needed) the data directory, loading every layout
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, ServerError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        let mut layouts = BTreeMap::new();
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map(|e| e != "json").unwrap_or(true) {
                continue;
            }

            let source = tokio::fs::read_to_string(&path).await?;
            match serde_json::from_str::<Layout>(&source) {
                Ok(layout) => {
                    layouts.insert(layout.id.clone(), layout);
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable layout");
                }
            }
        }

        tracing::info!(dir = %dir.display(), count = layouts.len(), "loaded layouts");
        Ok(Self {
            dir,
            layouts: RwLock::new(layouts),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn list(&self) -> Vec<LayoutSummary> {
        let layouts = self.layouts.read().await;
        layouts.values().map(Layout::summary).collect()
    }

    pub async fn get(&self, id: &str) -> Result<Layout, ServerError> {
        let layouts = self.layouts.read().await;
        layouts
            .get(id)
            .cloned()
            .ok_or_else(|| ServerError::LayoutNotFound(id.to_string()))
    }

    pub async fn by_slug(&self, slug: &str) -> Result<Layout, ServerError> {
        let layouts = self.layouts.read().await;
        layouts
            .values()
            .find(|layout| layout.slug == slug)
            .cloned()
            .ok_or_else(|| ServerError::LayoutNotFound(slug.to_string()))
    }

    /// Create a layout. Initial sections are recorded as the first published version.
    pub async fn create(&self, request: NewLayout, created_by: &str) -> Result<Layout, ServerError> {
        if !is_valid_slug(&request.slug) {
            return Err(ServerError::InvalidSlug(request.slug));
        }

        let mut layouts = self.layouts.write().await;
        if layouts.values().any(|layout| layout.slug == request.slug) {
            return Err(ServerError::Conflict(request.slug));
        }

        let id = match request.id {
            Some(id) if !is_valid_id(&id) => {
                return Err(ServerError::BadRequest(format!("invalid layout id '{}'", id)))
            }
            Some(id) if layouts.contains_key(&id) => return Err(ServerError::Conflict(id)),
            Some(id) => id,
            None => unique_id(Some("layout"), |candidate| layouts.contains_key(candidate)),
        };

        let name = if request.name.is_empty() {
            request.slug.clone()
        } else {
            request.name
        };
        let mut layout = Layout::new(id, request.slug, name);
        if !request.sections.is_empty() {
            layout.record_save(request.sections, false, Some("Created".to_string()), created_by);
        }

        self.persist(&layout).await?;
        tracing::info!(layout = %layout.id, slug = %layout.slug, "created layout");
        layouts.insert(layout.id.clone(), layout.clone());
        Ok(layout)
    }

    /// Append a version. Last write wins.
    pub async fn save_version(
        &self,
        id: &str,
        request: SaveVersionRequest,
        created_by: &str,
    ) -> Result<Layout, ServerError> {
        let mut layouts = self.layouts.write().await;
        let mut layout = layouts
            .get(id)
            .cloned()
            .ok_or_else(|| ServerError::LayoutNotFound(id.to_string()))?;

        let version_id = layout
            .record_save(request.sections, request.is_draft, request.notes, created_by)
            .version_id
            .clone();

        self.persist(&layout).await?;
        tracing::info!(layout = %id, version = %version_id, draft = request.is_draft, "saved version");
        layouts.insert(id.to_string(), layout.clone());
        Ok(layout)
    }

    pub async fn revert(&self, id: &str, version_id: &str, created_by: &str) -> Result<Layout, ServerError> {
        let mut layouts = self.layouts.write().await;
        let mut layout = layouts
            .get(id)
            .cloned()
            .ok_or_else(|| ServerError::LayoutNotFound(id.to_string()))?;

        let new_version = layout.revert_to(version_id, created_by)?.version_id.clone();

        self.persist(&layout).await?;
        tracing::info!(layout = %id, from = %version_id, version = %new_version, "reverted layout");
        layouts.insert(id.to_string(), layout.clone());
        Ok(layout)
    }

    async fn persist(&self, layout: &Layout) -> Result<(), ServerError> {
        let path = self.dir.join(format!("{}.json", layout.id));
        let tmp = self.dir.join(format!(".{}.json.tmp", layout.id));

        let json = serde_json::to_string_pretty(layout)?;
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::ContentMap;

    fn hero(id: &str) -> Section {
        Section::with_content(id, "hero", ContentMap::new())
    }

    fn new_layout(slug: &str) -> NewLayout {
        NewLayout {
            id: Some("home".to_string()),
            slug: slug.to_string(),
            name: "Home".to_string(),
            sections: vec![hero("hero-1")],
        }
    }

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("home"));
        assert!(is_valid_slug("services/civil-works"));
        assert!(!is_valid_slug("Home"));
        assert!(!is_valid_slug("../etc"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("trailing-"));
    }

    #[test]
    fn test_id_validation() {
        assert!(is_valid_id("layout-1700000000000"));
        assert!(!is_valid_id("../home"));
        assert!(!is_valid_id(""));
    }

    #[tokio::test]
    async fn test_create_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LayoutRepository::open(dir.path()).await.unwrap();
        repo.create(new_layout("home"), "admin").await.unwrap();

        let reopened = LayoutRepository::open(dir.path()).await.unwrap();
        let layout = reopened.by_slug("home").await.unwrap();
        assert_eq!(layout.id, "home");
        assert_eq!(layout.sections.len(), 1);
        assert_eq!(layout.versions[0].notes.as_deref(), Some("Created"));
    }

    #[tokio::test]
    async fn test_duplicate_slug_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LayoutRepository::open(dir.path()).await.unwrap();
        repo.create(new_layout("home"), "admin").await.unwrap();

        let mut again = new_layout("home");
        again.id = None;
        let err = repo.create(again, "admin").await.unwrap_err();
        assert!(matches!(err, ServerError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_draft_does_not_publish() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LayoutRepository::open(dir.path()).await.unwrap();
        repo.create(new_layout("home"), "admin").await.unwrap();

        let request = SaveVersionRequest {
            sections: vec![hero("hero-1"), hero("hero-2")],
            is_draft: true,
            notes: None,
        };
        let layout = repo.save_version("home", request, "admin").await.unwrap();

        assert_eq!(layout.sections.len(), 1);
        assert_eq!(layout.versions.len(), 2);
        assert!(repo.list().await[0].has_draft);
    }

    #[tokio::test]
    async fn test_revert_unknown_version_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LayoutRepository::open(dir.path()).await.unwrap();
        repo.create(new_layout("home"), "admin").await.unwrap();

        let err = repo.revert("home", "v9", "admin").await.unwrap_err();
        assert!(matches!(err, ServerError::VersionNotFound(_)));
        assert_eq!(repo.get("home").await.unwrap().versions.len(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let repo = LayoutRepository::open(dir.path()).await.unwrap();
        assert!(repo.list().await.is_empty());
    }
}
