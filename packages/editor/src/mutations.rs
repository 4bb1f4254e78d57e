//! # Page Mutations
//!
//! Structural operations on a page's section list.
//!
//! ## Mutation Semantics
//!
//! ### InsertSection
//! - Creates a section of a known type seeded with that type's defaults
//! - New id is derived from the type and unique on the page
//! - Index may equal the section count (append)
//!
//! ### RemoveSection / MoveSection / SetHidden
//! - Address the section by id, never by position
//! - Fail when the id is not on the page
//!
//! Content edits are not mutations; they go through the section's component.

use pagecraft_model::{Section, SectionKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PageMutation {
    #[serde(rename_all = "camelCase")]
    InsertSection { section_type: String, index: usize },

    #[serde(rename_all = "camelCase")]
    RemoveSection { section_id: String },

    #[serde(rename_all = "camelCase")]
    MoveSection { section_id: String, index: usize },

    #[serde(rename_all = "camelCase")]
    SetHidden { section_id: String, hidden: bool },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Unknown section type: {0}")]
    UnknownSectionType(String),

    #[error("Index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl PageMutation {
    /// Apply to `sections`, returning the id of the affected section
    pub fn apply(&self, sections: &mut Vec<Section>) -> Result<String, MutationError> {
        self.validate(sections)?;

        match self {
            PageMutation::InsertSection {
                section_type,
                index,
            } => {
                let kind = SectionKind::parse(section_type)
                    .ok_or_else(|| MutationError::UnknownSectionType(section_type.clone()))?;
                let section = Section::new(kind, |id| sections.iter().any(|s| s.id == id));
                let id = section.id.clone();
                sections.insert(*index, section);
                Ok(id)
            }

            PageMutation::RemoveSection { section_id } => {
                let position = position_of(sections, section_id)?;
                sections.remove(position);
                Ok(section_id.clone())
            }

            PageMutation::MoveSection { section_id, index } => {
                let position = position_of(sections, section_id)?;
                let section = sections.remove(position);
                sections.insert(*index, section);
                Ok(section_id.clone())
            }

            PageMutation::SetHidden { section_id, hidden } => {
                let position = position_of(sections, section_id)?;
                sections[position].hidden = *hidden;
                Ok(section_id.clone())
            }
        }
    }

    /// Check the mutation against `sections` without changing them
    pub fn validate(&self, sections: &[Section]) -> Result<(), MutationError> {
        match self {
            PageMutation::InsertSection {
                section_type,
                index,
            } => {
                if SectionKind::parse(section_type).is_none() {
                    return Err(MutationError::UnknownSectionType(section_type.clone()));
                }
                check_index(*index, sections.len())
            }

            PageMutation::MoveSection { section_id, index } => {
                position_of(sections, section_id)?;
                // The section leaves the list before it is reinserted
                check_index(*index, sections.len() - 1)
            }

            PageMutation::RemoveSection { section_id }
            | PageMutation::SetHidden { section_id, .. } => {
                position_of(sections, section_id).map(|_| ())
            }
        }
    }
}

fn position_of(sections: &[Section], section_id: &str) -> Result<usize, MutationError> {
    sections
        .iter()
        .position(|section| section.id == section_id)
        .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))
}

fn check_index(index: usize, len: usize) -> Result<(), MutationError> {
    if index > len {
        Err(MutationError::IndexOutOfBounds { index, len })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::ContentMap;
    use serde_json::json;

    fn page() -> Vec<Section> {
        vec![
            Section::with_content("a", "hero", ContentMap::new()),
            Section::with_content("b", "rich-text", ContentMap::new()),
            Section::with_content("c", "call-to-action", ContentMap::new()),
        ]
    }

    fn ids(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = PageMutation::MoveSection {
            section_id: "b".to_string(),
            index: 0,
        };
        let json = serde_json::to_value(&mutation).unwrap();

        assert_eq!(json, json!({ "op": "moveSection", "sectionId": "b", "index": 0 }));
        let back: PageMutation = serde_json::from_value(json).unwrap();
        assert_eq!(back, mutation);
    }

    #[test]
    fn test_insert_seeds_defaults() {
        let mut sections = page();
        let id = PageMutation::InsertSection {
            section_type: "stat-cards".to_string(),
            index: 1,
        }
        .apply(&mut sections)
        .unwrap();

        assert_eq!(sections.len(), 4);
        assert_eq!(sections[1].id, id);
        assert!(id.starts_with("stat-cards-"));
        assert_eq!(sections[1].content["heading"], json!("By the Numbers"));
    }

    #[test]
    fn test_insert_rejects_unknown_type_and_bad_index() {
        let mut sections = page();

        let err = PageMutation::InsertSection {
            section_type: "carousel".to_string(),
            index: 0,
        }
        .apply(&mut sections)
        .unwrap_err();
        assert_eq!(err, MutationError::UnknownSectionType("carousel".to_string()));

        let err = PageMutation::InsertSection {
            section_type: "hero".to_string(),
            index: 9,
        }
        .apply(&mut sections)
        .unwrap_err();
        assert_eq!(err, MutationError::IndexOutOfBounds { index: 9, len: 3 });
        assert_eq!(sections.len(), 3);
    }

    #[test]
    fn test_move_section() {
        let mut sections = page();
        PageMutation::MoveSection {
            section_id: "a".to_string(),
            index: 2,
        }
        .apply(&mut sections)
        .unwrap();

        assert_eq!(ids(&sections), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_remove_and_hide() {
        let mut sections = page();
        PageMutation::SetHidden {
            section_id: "c".to_string(),
            hidden: true,
        }
        .apply(&mut sections)
        .unwrap();
        PageMutation::RemoveSection {
            section_id: "a".to_string(),
        }
        .apply(&mut sections)
        .unwrap();

        assert_eq!(ids(&sections), vec!["b", "c"]);
        assert!(sections[1].hidden);
    }

    #[test]
    fn test_missing_section() {
        let mut sections = page();
        let err = PageMutation::RemoveSection {
            section_id: "zzz".to_string(),
        }
        .apply(&mut sections)
        .unwrap_err();

        assert_eq!(err, MutationError::SectionNotFound("zzz".to_string()));
    }
}
