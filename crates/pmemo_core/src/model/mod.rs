//! Domain model for memos, tags and their inputs.
//!
//! # Responsibility
//! - Define the records returned by repositories and services.
//! - Define caller-facing input shapes and their validation.
//!
//! # Invariants
//! - Every record carries exactly one owning `UserId`.
//! - Ids are assigned by storage and never reused within one database.

pub mod memo;
pub mod page;
pub mod tag;
pub mod validation;

/// Opaque identity of an authenticated caller / record owner.
pub type UserId = i64;
