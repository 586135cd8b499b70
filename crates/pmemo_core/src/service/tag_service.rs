//! Tag use-case service.
//!
//! # Responsibility
//! - Provide list/create/get/update/delete for tags.
//! - Restrict every single-tag operation to the owner.
//!
//! # Invariants
//! - Tags have no public visibility; reads are owner-only.
//! - Update replaces name and color together.
//! - Duplicate names are detected by storage and reported as `Conflict`.

use crate::model::page::Page;
use crate::model::tag::{Tag, TagId, TagInput};
use crate::model::validation::validate_tag_input;
use crate::model::UserId;
use crate::repo::tag_repo::TagRepository;
use crate::service::{ServiceError, ServiceResult};

pub struct TagService<R: TagRepository> {
    repo: R,
}

impl<R: TagRepository> TagService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists tags owned by `uid`.
    pub fn list(&self, uid: UserId, page: Page) -> ServiceResult<Vec<Tag>> {
        Ok(self.repo.list_tags_by_owner(uid, page)?)
    }

    /// Creates a tag owned by `uid`.
    pub fn create(&self, uid: UserId, input: &TagInput) -> ServiceResult<Tag> {
        validate_tag_input(input)?;
        let id = self.repo.create_tag(uid, input)?;
        self.repo
            .get_tag(id)?
            .ok_or(ServiceError::InconsistentState(
                "created tag not found in read-back",
            ))
    }

    pub fn get(&self, uid: UserId, id: TagId) -> ServiceResult<Tag> {
        self.find_owned(uid, id)
    }

    /// Looks up one of `uid`'s tags by exact name.
    pub fn get_by_name(&self, uid: UserId, name: &str) -> ServiceResult<Option<Tag>> {
        Ok(self.repo.get_tag_by_name(uid, name)?)
    }

    /// Replaces name and color of a tag owned by `uid`.
    pub fn update(&self, uid: UserId, id: TagId, input: &TagInput) -> ServiceResult<Tag> {
        self.find_owned(uid, id)?;
        validate_tag_input(input)?;
        self.repo.update_tag(id, input)?;
        self.repo
            .get_tag(id)?
            .ok_or(ServiceError::InconsistentState(
                "updated tag not found in read-back",
            ))
    }

    /// Deletes a tag owned by `uid` and returns its last state.
    pub fn delete(&self, uid: UserId, id: TagId) -> ServiceResult<Tag> {
        let tag = self.find_owned(uid, id)?;
        self.repo.delete_tag(id)?;
        Ok(tag)
    }

    fn find_owned(&self, uid: UserId, id: TagId) -> ServiceResult<Tag> {
        let tag = self
            .repo
            .get_tag(id)?
            .ok_or(ServiceError::NotFound { entity: "tag", id })?;
        if tag.user_id != uid {
            return Err(ServiceError::Forbidden { entity: "tag", id });
        }
        Ok(tag)
    }
}
