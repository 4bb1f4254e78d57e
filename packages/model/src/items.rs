//! # Repeatable Items
//!
//! Array fields (services, stats, testimonials, ...) share one contract:
//!
//! - every item carries a stable `id` assigned when it is created
//! - items are added at the end
//! - items are removed by index; other items keep their `id`
//! - a single field of an item is patched by index

use crate::error::ModelError;
use crate::ids::unique_id;
use crate::section::ContentMap;
use serde_json::Value;

/// Working copy of one array field
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatableItems {
    field: String,
    items: Vec<Value>,
}

impl RepeatableItems {
    /// Wrap the current value of `field`. A missing value is an empty list.
    pub fn from_value(field: impl Into<String>, value: Option<&Value>) -> Result<Self, ModelError> {
        let field = field.into();
        let items = match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(_) => return Err(ModelError::NotAnArray(field)),
        };
        Ok(Self { field, items })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Ids of all items in order. Numeric ids are read as their decimal
    /// text; items without an id are skipped.
    pub fn ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|item| match item.get("id") {
                Some(Value::String(id)) => Some(id.clone()),
                Some(Value::Number(id)) => Some(id.to_string()),
                _ => None,
            })
            .collect()
    }

    /// Append a new item built from `template`, returning its fresh id.
    pub fn push(&mut self, mut template: ContentMap) -> String {
        let id = {
            let existing = self.ids();
            unique_id(None, |candidate| existing.iter().any(|id| id == candidate))
        };
        template.insert("id".to_string(), Value::String(id.clone()));
        self.items.push(Value::Object(template));
        id
    }

    /// Remove the item at `index`
    pub fn remove(&mut self, index: usize) -> Result<Value, ModelError> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Set one field of the item at `index`. The `id` field cannot be set.
    pub fn set_field(&mut self, index: usize, key: &str, value: Value) -> Result<(), ModelError> {
        self.check_index(index)?;
        if key == "id" {
            return Err(ModelError::InvalidContent(
                "item ids are assigned at creation".to_string(),
            ));
        }
        match &mut self.items[index] {
            Value::Object(item) => {
                item.insert(key.to_string(), value);
                Ok(())
            }
            _ => Err(ModelError::ItemNotObject {
                field: self.field.clone(),
                index,
            }),
        }
    }

    /// Content patch replacing the whole array field
    pub fn into_patch(self) -> ContentMap {
        let mut patch = ContentMap::new();
        patch.insert(self.field, Value::Array(self.items));
        patch
    }

    fn check_index(&self, index: usize) -> Result<(), ModelError> {
        if index >= self.items.len() {
            return Err(ModelError::ItemIndexOutOfBounds {
                field: self.field.clone(),
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}
