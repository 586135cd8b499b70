//! Memo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist memos and their tag associations.
//! - Resolve associated tags explicitly on every read.
//!
//! # Invariants
//! - Memo rows and their `memo_tags` rows change in one transaction.
//! - List and search results are ordered by `id ASC`.
//! - Every update stamps `updated_at` strictly above `created_at` and the
//!   previous `updated_at`.

use crate::model::memo::{Memo, MemoCreate, MemoId, MemoSearch, MemoUpdate};
use crate::model::page::Page;
use crate::model::tag::{Tag, TagId};
use crate::model::UserId;
use crate::repo::tag_repo::parse_tag_row;
use crate::repo::{bool_to_int, ensure_tables, int_to_bool, RepoError, RepoResult, NOW_MS_SQL};
use rusqlite::{params, Connection, Row};
use std::collections::BTreeSet;

const MEMO_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    is_public,
    user_id,
    created_at,
    updated_at
FROM memos";

/// Repository interface for memo persistence.
pub trait MemoRepository {
    /// Inserts a memo owned by `user_id`, attaching `input.tags`.
    fn create_memo(&self, user_id: UserId, input: &MemoCreate) -> RepoResult<MemoId>;
    fn get_memo(&self, id: MemoId) -> RepoResult<Option<Memo>>;
    fn list_memos_by_owner(&self, user_id: UserId, page: Page) -> RepoResult<Vec<Memo>>;
    /// Case-insensitive substring match over title and content.
    ///
    /// Case folding covers ASCII letters only; other characters must match
    /// exactly, so `"ÉCOLE"` does not find `"école"`.
    fn search_memos(&self, user_id: UserId, query: &MemoSearch, page: Page)
        -> RepoResult<Vec<Memo>>;
    /// Applies present fields only and stamps `updated_at`.
    fn update_memo(&self, id: MemoId, changes: &MemoUpdate) -> RepoResult<()>;
    fn delete_memo(&self, id: MemoId) -> RepoResult<()>;
    fn tags_for_memo(&self, id: MemoId) -> RepoResult<Vec<Tag>>;
    /// Replaces the whole tag set of one memo.
    fn set_memo_tags(&self, id: MemoId, tag_ids: &[TagId]) -> RepoResult<()>;
}

/// SQLite-backed memo repository.
pub struct SqliteMemoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemoRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["memos", "tags", "memo_tags"])?;
        Ok(Self { conn })
    }

    fn query_memos(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Memo>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut memos = Vec::new();
        while let Some(row) = rows.next()? {
            memos.push(self.parse_memo_row(row)?);
        }
        Ok(memos)
    }

    fn parse_memo_row(&self, row: &Row<'_>) -> RepoResult<Memo> {
        let id: MemoId = row.get("id")?;
        Ok(Memo {
            id,
            title: row.get("title")?,
            content: row.get("content")?,
            is_public: int_to_bool(row.get("is_public")?, "memos.is_public")?,
            user_id: row.get("user_id")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
            tags: load_tags_for_memo(self.conn, id)?,
        })
    }
}

impl MemoRepository for SqliteMemoRepository<'_> {
    fn create_memo(&self, user_id: UserId, input: &MemoCreate) -> RepoResult<MemoId> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            &format!(
                "INSERT INTO memos (title, content, is_public, user_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, {NOW_MS_SQL});"
            ),
            params![
                input.title.as_str(),
                input.content.as_str(),
                bool_to_int(input.is_public),
                user_id,
            ],
        )?;
        let id = tx.last_insert_rowid();
        insert_memo_tags(&tx, id, &input.tags)?;
        tx.commit()?;
        Ok(id)
    }

    fn get_memo(&self, id: MemoId) -> RepoResult<Option<Memo>> {
        let mut memos = self.query_memos(&format!("{MEMO_SELECT_SQL} WHERE id = ?1;"), [id])?;
        Ok(memos.pop())
    }

    fn list_memos_by_owner(&self, user_id: UserId, page: Page) -> RepoResult<Vec<Memo>> {
        self.query_memos(
            &format!(
                "{MEMO_SELECT_SQL}
                 WHERE user_id = ?1
                 ORDER BY id ASC
                 LIMIT ?2 OFFSET ?3;"
            ),
            params![user_id, i64::from(page.limit), i64::from(page.skip)],
        )
    }

    fn search_memos(
        &self,
        user_id: UserId,
        query: &MemoSearch,
        page: Page,
    ) -> RepoResult<Vec<Memo>> {
        let pattern = format!("%{}%", escape_like(query.as_str()));
        self.query_memos(
            &format!(
                "{MEMO_SELECT_SQL}
                 WHERE user_id = ?1
                   AND (title LIKE ?2 ESCAPE '\\' OR content LIKE ?2 ESCAPE '\\')
                 ORDER BY id ASC
                 LIMIT ?3 OFFSET ?4;"
            ),
            params![
                user_id,
                pattern,
                i64::from(page.limit),
                i64::from(page.skip)
            ],
        )
    }

    fn update_memo(&self, id: MemoId, changes: &MemoUpdate) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            &format!(
                "UPDATE memos
                 SET
                    title = COALESCE(?2, title),
                    content = COALESCE(?3, content),
                    is_public = COALESCE(?4, is_public),
                    updated_at = MAX({NOW_MS_SQL}, created_at + 1, COALESCE(updated_at, 0) + 1)
                 WHERE id = ?1;"
            ),
            params![
                id,
                changes.title.as_deref(),
                changes.content.as_deref(),
                changes.is_public.map(bool_to_int),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "memo", id });
        }

        if let Some(tag_ids) = changes.tags.as_deref() {
            tx.execute("DELETE FROM memo_tags WHERE memo_id = ?1;", [id])?;
            insert_memo_tags(&tx, id, tag_ids)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn delete_memo(&self, id: MemoId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM memos WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "memo", id });
        }
        Ok(())
    }

    fn tags_for_memo(&self, id: MemoId) -> RepoResult<Vec<Tag>> {
        load_tags_for_memo(self.conn, id)
    }

    fn set_memo_tags(&self, id: MemoId, tag_ids: &[TagId]) -> RepoResult<()> {
        self.update_memo(
            id,
            &MemoUpdate {
                tags: Some(tag_ids.to_vec()),
                ..MemoUpdate::default()
            },
        )
    }
}

fn insert_memo_tags(conn: &Connection, memo_id: MemoId, tag_ids: &[TagId]) -> RepoResult<()> {
    let unique: BTreeSet<TagId> = tag_ids.iter().copied().collect();
    for tag_id in unique {
        conn.execute(
            "INSERT INTO memo_tags (memo_id, tag_id) VALUES (?1, ?2);",
            params![memo_id, tag_id],
        )?;
    }
    Ok(())
}

fn load_tags_for_memo(conn: &Connection, memo_id: MemoId) -> RepoResult<Vec<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT
            t.id AS id,
            t.name AS name,
            t.color AS color,
            t.user_id AS user_id,
            t.created_at AS created_at
         FROM memo_tags mt
         INNER JOIN tags t ON t.id = mt.tag_id
         WHERE mt.memo_id = ?1
         ORDER BY t.name ASC, t.id ASC;",
    )?;
    let mut rows = stmt.query([memo_id])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(parse_tag_row(row)?);
    }
    Ok(tags)
}

/// Escapes LIKE wildcards so the query matches literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
