//! Memo and tag use-case services.
//!
//! # Responsibility
//! - Enforce ownership and visibility rules on top of repositories.
//! - Validate caller input before any write.
//! - Translate repository failures into semantic [`ServiceError`] values.
//!
//! # Invariants
//! - Services never log; callers decide what to report.
//! - Services hold no state of their own beyond repository handles.

use crate::model::validation::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memo_service;
pub mod tag_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Referenced record does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// Caller is authenticated but may not access the record.
    Forbidden { entity: &'static str, id: i64 },
    /// Caller input failed validation.
    Validation(ValidationError),
    /// Storage rejected a duplicate.
    Conflict(String),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal mismatch between a write and its read-back.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Forbidden { entity, id } => {
                write!(f, "not enough permissions for {entity} {id}")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::Conflict(message) => Self::Conflict(message),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
