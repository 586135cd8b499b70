//! Tag domain model.
//!
//! # Invariants
//! - `(user_id, name)` is unique in storage.
//! - `color` defaults to [`DEFAULT_TAG_COLOR`].

use crate::model::UserId;
use serde::{Deserialize, Serialize};

/// Storage-assigned tag identifier.
pub type TagId = i64;

/// Color used when the caller does not pick one.
pub const DEFAULT_TAG_COLOR: &str = "#1abc9c";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub color: String,
    pub user_id: UserId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Input for creating a tag or fully replacing its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInput {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl TagInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Color to persist, falling back to the default.
    pub fn effective_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_TAG_COLOR)
    }
}
