//! Explicit input validation for memo and tag writes.
//!
//! # Responsibility
//! - Reject malformed caller input before it reaches persistence.
//! - Report failures as typed [`ValidationError`] values.
//!
//! # Invariants
//! - Validation never mutates its input.
//! - Checks are purely local; ownership and existence are service concerns.
//! - Tag color is free text; only its default is fixed.

use crate::model::memo::{MemoCreate, MemoUpdate};
use crate::model::tag::TagInput;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum number of characters accepted by memo search.
pub const MIN_SEARCH_QUERY_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Memo title is the empty string.
    EmptyTitle,
    /// Tag name is the empty string.
    EmptyTagName,
    /// Search query shorter than [`MIN_SEARCH_QUERY_CHARS`].
    QueryTooShort { min_chars: usize, actual_chars: usize },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "memo title must not be empty"),
            Self::EmptyTagName => write!(f, "tag name must not be empty"),
            Self::QueryTooShort {
                min_chars,
                actual_chars,
            } => write!(
                f,
                "search query must have at least {min_chars} characters, got {actual_chars}"
            ),
        }
    }
}

impl Error for ValidationError {}

pub fn validate_memo_create(input: &MemoCreate) -> Result<(), ValidationError> {
    validate_title(&input.title)
}

pub fn validate_memo_update(input: &MemoUpdate) -> Result<(), ValidationError> {
    match input.title.as_deref() {
        Some(title) => validate_title(title),
        None => Ok(()),
    }
}

pub fn validate_tag_input(input: &TagInput) -> Result<(), ValidationError> {
    if input.name.is_empty() {
        return Err(ValidationError::EmptyTagName);
    }
    Ok(())
}

/// Checks the raw search text length, counted in characters.
pub fn validate_search_query(query: &str) -> Result<(), ValidationError> {
    let actual_chars = query.chars().count();
    if actual_chars < MIN_SEARCH_QUERY_CHARS {
        return Err(ValidationError::QueryTooShort {
            min_chars: MIN_SEARCH_QUERY_CHARS,
            actual_chars,
        });
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}
