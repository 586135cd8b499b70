//! Memo domain model.
//!
//! # Invariants
//! - `user_id` is fixed at creation.
//! - `updated_at` is `None` until the first update, then strictly greater
//!   than `created_at`.
//! - `tags` only reference tags owned by `user_id`.

use crate::model::tag::{Tag, TagId};
use crate::model::validation::{validate_search_query, ValidationError};
use crate::model::UserId;
use serde::{Deserialize, Serialize};

/// Storage-assigned memo identifier.
pub type MemoId = i64;

/// Memo read model with its tags resolved to full records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub id: MemoId,
    pub title: String,
    pub content: String,
    pub is_public: bool,
    pub user_id: UserId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds of the last update.
    pub updated_at: Option<i64>,
    /// Attached tags ordered by name.
    pub tags: Vec<Tag>,
}

impl Memo {
    /// Whether `uid` may read this memo.
    pub fn is_readable_by(&self, uid: UserId) -> bool {
        self.is_public || self.user_id == uid
    }

    /// Whether `uid` may update or delete this memo.
    pub fn is_owned_by(&self, uid: UserId) -> bool {
        self.user_id == uid
    }

    /// Ids of attached tags, in display order.
    pub fn tag_ids(&self) -> Vec<TagId> {
        self.tags.iter().map(|tag| tag.id).collect()
    }
}

/// Input for creating a memo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoCreate {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub is_public: bool,
    /// Tags to attach; every id must belong to the creating user.
    #[serde(default)]
    pub tags: Vec<TagId>,
}

impl MemoCreate {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            is_public: false,
            tags: Vec::new(),
        }
    }

    pub fn public(mut self) -> Self {
        self.is_public = true;
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagId>) -> Self {
        self.tags = tags;
        self
    }
}

/// Partial update for a memo. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    /// `Some` replaces the whole tag set, `None` leaves it untouched.
    #[serde(default)]
    pub tags: Option<Vec<TagId>>,
}

/// Substring query for memo search.
///
/// Only constructible from text of at least
/// [`MIN_SEARCH_QUERY_CHARS`](crate::model::validation::MIN_SEARCH_QUERY_CHARS)
/// characters, so short queries never reach storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoSearch {
    text: String,
}

impl MemoSearch {
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        validate_search_query(&text)?;
        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
