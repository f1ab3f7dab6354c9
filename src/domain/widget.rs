// Widget domain models - Registrations, catalog and renderable descriptors
use super::form::FormSpec;
use std::collections::BTreeMap;

pub type BlockId = i64;
pub type ScopeId = i64;

pub const DASHBOARD_AREA: &str = "dashboard";
pub const GLOBAL_SCOPE: ScopeId = 0;

/// Reserved id of the "Add Item" pseudo-widget; never sortable, never persisted
pub const ADD_ITEM_ID: &str = "nosort";
pub const ADD_ITEM_LABEL: &str = "Add Item";

/// Stable, underscore separated slug used in hook topic names
pub fn widget_slug(label: &str) -> String {
    slug::slugify(label).replace('-', "_")
}

/// Addable widget types, keyed by type with a display label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetCatalog {
    entries: BTreeMap<String, String>,
}

impl WidgetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: impl Into<String>, label: impl Into<String>) {
        self.entries.insert(kind.into(), label.into());
    }

    pub fn label(&self, kind: &str) -> Option<&str> {
        self.entries.get(kind).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The stored block behind a registration
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub title: String,
    pub kind: String,
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct NewBlock {
    pub title: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetRegistration {
    pub block_id: BlockId,
    pub kind: String,
    pub area: String,
    pub scope: ScopeId,
    pub display_order: i64,
}

/// A registration joined with its block, as listed for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveWidget {
    pub block_id: BlockId,
    pub kind: String,
    pub title: String,
    pub display_order: i64,
}

/// In-progress widget handed to `dash_module_<slug>` hooks
#[derive(Debug, Clone)]
pub struct WidgetDraft {
    pub id: String,
    pub name: String,
    pub title: String,
    pub content: String,
    pub form: FormSpec,
}

#[derive(Debug, Clone)]
pub struct WidgetDescriptor {
    pub id: String,
    pub name: String,
    pub title: String,
    pub content: String,
    pub config_form: Option<FormSpec>,
    /// Flattened values of `config_form`, present exactly when the form is
    pub options: Option<BTreeMap<String, String>>,
}

impl WidgetDescriptor {
    /// Placeholder for a widget whose extension failed while composing
    pub fn unavailable(id: &str, label: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            name: label.to_string(),
            title: title.to_string(),
            content: "This module is currently unavailable.".to_string(),
            config_form: None,
            options: None,
        }
    }

    pub fn is_sortable(&self) -> bool {
        self.id != ADD_ITEM_ID
    }
}
