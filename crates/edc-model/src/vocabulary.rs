//! Controlled vocabulary lists referenced by a death report.
//!
//! Each vocabulary is an ordered list of labeled items:
//!
//! - **Item**: `id` is the stored reference, `name` the label shown to the
//!   user, `short_name` a stable machine value.
//! - **Ordering**: items are presented by `display_index`, ties broken by
//!   `name`. Ids carry no ordering meaning.
//!
//! ## Example: cause of death
//!
//! ```text
//! id  name                          display_index
//! 1   Cryptococcal meningitis       10
//! 2   Tuberculosis                  20
//! 9   Other, specify                90
//! ```
//!
//! Items whose label mentions "other" require a free-text override on the
//! report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::VocabularyKind;
use crate::error::{ModelError, Result};
use crate::ids::ItemId;

/// A single option within a vocabulary list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Stored reference value.
    pub id: ItemId,

    /// Label shown to the user (e.g. "Other, specify").
    pub name: String,

    /// Stable machine value (e.g. "other").
    pub short_name: String,

    /// Position in the presented list.
    pub display_index: i32,

    /// Form field this item applies to, when a list is shared.
    #[serde(default)]
    pub field_name: Option<String>,

    /// List version the item was published in.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl ListItem {
    pub fn new(id: u32, name: impl Into<String>, display_index: i32) -> Self {
        let name = name.into();
        Self {
            id: ItemId::new(id),
            short_name: short_name_for(&name),
            name,
            display_index,
            field_name: None,
            version: default_version(),
        }
    }

    /// Whether the label asks the submitter to specify the value in free text.
    pub fn is_other(&self) -> bool {
        self.name.to_lowercase().contains("other")
    }
}

fn short_name_for(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// An ordered vocabulary list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyList {
    pub kind: VocabularyKind,

    /// Items in presentation order.
    items: Vec<ListItem>,
}

impl VocabularyList {
    pub fn new(kind: VocabularyKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    /// Add an item, keeping presentation order.
    ///
    /// Ids must be unique within a list.
    pub fn add_item(&mut self, item: ListItem) -> Result<()> {
        if self.get(item.id).is_some() {
            return Err(ModelError::DuplicateItem {
                kind: self.kind,
                id: item.id,
            });
        }
        self.items.push(item);
        self.items.sort_by(|left, right| {
            left.display_index
                .cmp(&right.display_index)
                .then_with(|| left.name.cmp(&right.name))
        });
        Ok(())
    }

    /// Items in presentation order.
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&ListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// First item in presentation order.
    pub fn first(&self) -> Option<&ListItem> {
        self.items.first()
    }

    /// Look up an item by label or short name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&ListItem> {
        let key = name.trim().to_lowercase();
        self.items.iter().find(|item| {
            item.name.to_lowercase() == key || item.short_name.to_lowercase() == key
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Registry of all loaded vocabulary lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularyRegistry {
    lists: BTreeMap<VocabularyKind, VocabularyList>,
}

impl VocabularyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a list, replacing any list of the same kind.
    pub fn add_list(&mut self, list: VocabularyList) {
        self.lists.insert(list.kind, list);
    }

    pub fn list(&self, kind: VocabularyKind) -> Option<&VocabularyList> {
        self.lists.get(&kind)
    }

    /// Resolve a referenced item.
    pub fn resolve(&self, kind: VocabularyKind, id: ItemId) -> Option<&ListItem> {
        self.list(kind).and_then(|list| list.get(id))
    }

    /// Loaded lists in kind order.
    pub fn lists(&self) -> impl Iterator<Item = &VocabularyList> {
        self.lists.values()
    }
}
