//! Transport-facing helpers for request boundaries.
//!
//! # Responsibility
//! - Map [`ServiceError`] values to transport status codes and details.
//! - Build validated inputs (search queries) before services are called.
//!
//! # Invariants
//! - Permission failures map to 400, not 403.
//! - Storage failures other than conflicts map to 500.

use crate::model::memo::MemoSearch;
use crate::service::{ServiceError, ServiceResult};
use serde::Serialize;

pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_CONFLICT: u16 = 409;
pub const STATUS_UNPROCESSABLE: u16 = 422;
pub const STATUS_INTERNAL: u16 = 500;

/// Error payload returned to transport callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub detail: String,
}

impl From<&ServiceError> for ErrorResponse {
    fn from(value: &ServiceError) -> Self {
        Self {
            status: status_code(value),
            detail: detail(value),
        }
    }
}

/// Transport status code for a service failure.
pub fn status_code(err: &ServiceError) -> u16 {
    match err {
        ServiceError::NotFound { .. } => STATUS_NOT_FOUND,
        ServiceError::Forbidden { .. } => STATUS_BAD_REQUEST,
        ServiceError::Validation(_) => STATUS_UNPROCESSABLE,
        ServiceError::Conflict(_) => STATUS_CONFLICT,
        ServiceError::Repo(_) | ServiceError::InconsistentState(_) => STATUS_INTERNAL,
    }
}

/// User-visible message for a service failure.
///
/// Internal failures get a generic message; the full error stays in logs.
pub fn detail(err: &ServiceError) -> String {
    match err {
        ServiceError::NotFound { entity: "memo", .. } => "Memo not found".to_string(),
        ServiceError::NotFound { entity: "tag", .. } => "Tag not found".to_string(),
        ServiceError::NotFound { entity, .. } => format!("{entity} not found"),
        ServiceError::Forbidden { .. } => "Not enough permissions".to_string(),
        ServiceError::Validation(err) => err.to_string(),
        ServiceError::Conflict(_) => "Resource already exists".to_string(),
        ServiceError::Repo(_) | ServiceError::InconsistentState(_) => {
            "Internal server error".to_string()
        }
    }
}

/// Parses raw search text into a [`MemoSearch`] at the boundary.
pub fn parse_search_query(raw: &str) -> ServiceResult<MemoSearch> {
    Ok(MemoSearch::new(raw)?)
}
