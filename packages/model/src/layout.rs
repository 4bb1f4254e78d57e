//! # Layouts and Versions
//!
//! A layout is one page addressed by `slug`. Its `sections` are the
//! published content; `versions` is the append-only save history.
//!
//! ```text
//! save(draft)   → versions += { isDraft: true,  sections }
//! save(publish) → versions += { isDraft: false, sections }, sections = snapshot
//! revert(v)     → versions += { isDraft: false, v.sections }, sections = v.sections
//! ```

use crate::error::ModelError;
use crate::section::Section;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable snapshot created by every save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub version_id: String,
    pub is_draft: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub versions: Vec<Version>,
    pub updated_at: DateTime<Utc>,
}

/// Canonical state returned by save and revert. `sections` is the working
/// copy: the pending draft when there is one, else the published sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutState {
    pub sections: Vec<Section>,
    pub versions: Vec<Version>,
}

/// Entry of the cached layout list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSummary {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub updated_at: DateTime<Utc>,
    pub has_draft: bool,
}

/// Header menu entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submenu: Vec<NavigationItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_line: Option<String>,
}

impl Layout {
    pub fn new(id: impl Into<String>, slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            name: name.into(),
            sections: Vec::new(),
            versions: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Most recent version, if any save happened
    pub fn latest_version(&self) -> Option<&Version> {
        self.versions.last()
    }

    /// Most recent non-draft version
    pub fn published_version(&self) -> Option<&Version> {
        self.versions.iter().rev().find(|v| !v.is_draft)
    }

    /// True when the newest save is an unpublished draft
    pub fn has_draft(&self) -> bool {
        self.latest_version().map(|v| v.is_draft).unwrap_or(false)
    }

    /// Sections an editing session starts from: the pending draft if there
    /// is one, otherwise the published sections.
    pub fn working_sections(&self) -> Vec<Section> {
        match self.latest_version() {
            Some(version) if version.is_draft => version.sections.clone(),
            _ => self.sections.clone(),
        }
    }

    pub fn state(&self) -> LayoutState {
        LayoutState {
            sections: self.working_sections(),
            versions: self.versions.clone(),
        }
    }

    pub fn summary(&self) -> LayoutSummary {
        LayoutSummary {
            id: self.id.clone(),
            slug: self.slug.clone(),
            name: self.name.clone(),
            updated_at: self.updated_at,
            has_draft: self.has_draft(),
        }
    }

    /// Record a save. Publishing also replaces the live sections.
    pub fn record_save(
        &mut self,
        sections: Vec<Section>,
        is_draft: bool,
        notes: Option<String>,
        created_by: impl Into<String>,
    ) -> &Version {
        let now = Utc::now();
        if !is_draft {
            self.sections = sections.clone();
        }
        self.updated_at = now;
        self.versions.push(Version {
            version_id: self.next_version_id(),
            is_draft,
            notes,
            created_at: now,
            created_by: created_by.into(),
            sections,
        });
        &self.versions[self.versions.len() - 1]
    }

    /// Republish the snapshot of `version_id` as a new version
    pub fn revert_to(
        &mut self,
        version_id: &str,
        created_by: impl Into<String>,
    ) -> Result<&Version, ModelError> {
        let snapshot = self
            .versions
            .iter()
            .find(|v| v.version_id == version_id)
            .map(|v| v.sections.clone())
            .ok_or_else(|| ModelError::VersionNotFound(version_id.to_string()))?;

        let notes = Some(format!("Reverted to {}", version_id));
        Ok(self.record_save(snapshot, false, notes, created_by))
    }

    fn next_version_id(&self) -> String {
        format!("v{}", self.versions.len() + 1)
    }
}
