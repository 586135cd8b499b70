//! Memo use-case service.
//!
//! # Responsibility
//! - Provide list/create/get/update/delete/search for memos.
//! - Apply the visibility rule on reads and the ownership rule on writes.
//!
//! # Invariants
//! - Reads: public memos are readable by anyone, private ones by the owner.
//! - Writes: only the owner may update or delete, public or not.
//! - Attached tags must exist and belong to the memo owner.

use crate::model::memo::{Memo, MemoCreate, MemoId, MemoSearch, MemoUpdate};
use crate::model::page::Page;
use crate::model::tag::TagId;
use crate::model::validation::{validate_memo_create, validate_memo_update};
use crate::model::UserId;
use crate::repo::memo_repo::MemoRepository;
use crate::repo::tag_repo::TagRepository;
use crate::service::{ServiceError, ServiceResult};

/// Memo service facade over memo and tag repositories.
pub struct MemoService<M: MemoRepository, T: TagRepository> {
    memos: M,
    tags: T,
}

impl<M: MemoRepository, T: TagRepository> MemoService<M, T> {
    /// Creates a service; `tags` is used to verify tag ownership on writes.
    pub fn new(memos: M, tags: T) -> Self {
        Self { memos, tags }
    }

    /// Lists memos owned by `uid`.
    pub fn list(&self, uid: UserId, page: Page) -> ServiceResult<Vec<Memo>> {
        Ok(self.memos.list_memos_by_owner(uid, page)?)
    }

    /// Creates a memo owned by `uid`.
    pub fn create(&self, uid: UserId, input: &MemoCreate) -> ServiceResult<Memo> {
        validate_memo_create(input)?;
        self.ensure_tags_owned(uid, &input.tags)?;

        let id = self.memos.create_memo(uid, input)?;
        self.memos
            .get_memo(id)?
            .ok_or(ServiceError::InconsistentState(
                "created memo not found in read-back",
            ))
    }

    /// Gets one memo if it is public or owned by `uid`.
    pub fn get(&self, uid: UserId, id: MemoId) -> ServiceResult<Memo> {
        let memo = self.find(id)?;
        if !memo.is_readable_by(uid) {
            return Err(forbidden(id));
        }
        Ok(memo)
    }

    /// Applies a partial update to a memo owned by `uid`.
    pub fn update(&self, uid: UserId, id: MemoId, input: &MemoUpdate) -> ServiceResult<Memo> {
        let memo = self.find(id)?;
        if !memo.is_owned_by(uid) {
            return Err(forbidden(id));
        }
        validate_memo_update(input)?;
        if let Some(tag_ids) = input.tags.as_deref() {
            self.ensure_tags_owned(uid, tag_ids)?;
        }

        self.memos.update_memo(id, input)?;
        self.memos
            .get_memo(id)?
            .ok_or(ServiceError::InconsistentState(
                "updated memo not found in read-back",
            ))
    }

    /// Deletes a memo owned by `uid` and returns its last state.
    pub fn delete(&self, uid: UserId, id: MemoId) -> ServiceResult<Memo> {
        let memo = self.find(id)?;
        if !memo.is_owned_by(uid) {
            return Err(forbidden(id));
        }
        self.memos.delete_memo(id)?;
        Ok(memo)
    }

    /// Searches memos owned by `uid` by title or content substring.
    pub fn search(&self, uid: UserId, query: &MemoSearch, page: Page) -> ServiceResult<Vec<Memo>> {
        Ok(self.memos.search_memos(uid, query, page)?)
    }

    fn find(&self, id: MemoId) -> ServiceResult<Memo> {
        self.memos
            .get_memo(id)?
            .ok_or(ServiceError::NotFound { entity: "memo", id })
    }

    fn ensure_tags_owned(&self, uid: UserId, tag_ids: &[TagId]) -> ServiceResult<()> {
        for &tag_id in tag_ids {
            let tag = self
                .tags
                .get_tag(tag_id)?
                .ok_or(ServiceError::NotFound {
                    entity: "tag",
                    id: tag_id,
                })?;
            if tag.user_id != uid {
                return Err(ServiceError::Forbidden {
                    entity: "tag",
                    id: tag_id,
                });
            }
        }
        Ok(())
    }
}

fn forbidden(id: MemoId) -> ServiceError {
    ServiceError::Forbidden { entity: "memo", id }
}
