//! Core domain logic for PMemo.
//! This crate owns memo/tag ownership, visibility and search rules.

pub mod boundary;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use boundary::{parse_search_query, status_code, ErrorResponse};
pub use config::{CoreConfig, DatabaseConfig, LoggingConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingStatus};
pub use model::memo::{Memo, MemoCreate, MemoId, MemoSearch, MemoUpdate};
pub use model::page::Page;
pub use model::tag::{Tag, TagId, TagInput, DEFAULT_TAG_COLOR};
pub use model::validation::ValidationError;
pub use model::UserId;
pub use repo::memo_repo::{MemoRepository, SqliteMemoRepository};
pub use repo::tag_repo::{SqliteTagRepository, TagRepository};
pub use repo::{RepoError, RepoResult};
pub use service::memo_service::MemoService;
pub use service::tag_service::TagService;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
