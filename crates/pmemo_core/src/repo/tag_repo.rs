//! Tag repository contract and SQLite implementation.
//!
//! # Invariants
//! - `(user_id, name)` uniqueness is enforced by storage, not pre-checked.
//! - Deleting a tag drops its `memo_tags` rows through the foreign key.

use crate::model::page::Page;
use crate::model::tag::{Tag, TagId, TagInput};
use crate::model::UserId;
use crate::repo::{ensure_tables, RepoError, RepoResult, NOW_MS_SQL};
use rusqlite::{params, Connection, Row};

const TAG_SELECT_SQL: &str = "SELECT
    id,
    name,
    color,
    user_id,
    created_at
FROM tags";

/// Repository interface for tag persistence.
pub trait TagRepository {
    fn create_tag(&self, user_id: UserId, input: &TagInput) -> RepoResult<TagId>;
    fn get_tag(&self, id: TagId) -> RepoResult<Option<Tag>>;
    fn get_tag_by_name(&self, user_id: UserId, name: &str) -> RepoResult<Option<Tag>>;
    fn list_tags_by_owner(&self, user_id: UserId, page: Page) -> RepoResult<Vec<Tag>>;
    /// Replaces name and color.
    fn update_tag(&self, id: TagId, input: &TagInput) -> RepoResult<()>;
    fn delete_tag(&self, id: TagId) -> RepoResult<()>;
}

/// SQLite-backed tag repository.
pub struct SqliteTagRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTagRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["tags", "memo_tags"])?;
        Ok(Self { conn })
    }

    fn query_tags(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Tag>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(parse_tag_row(row)?);
        }
        Ok(tags)
    }
}

impl TagRepository for SqliteTagRepository<'_> {
    fn create_tag(&self, user_id: UserId, input: &TagInput) -> RepoResult<TagId> {
        self.conn.execute(
            &format!(
                "INSERT INTO tags (name, color, user_id, created_at)
                 VALUES (?1, ?2, ?3, {NOW_MS_SQL});"
            ),
            params![input.name.as_str(), input.effective_color(), user_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_tag(&self, id: TagId) -> RepoResult<Option<Tag>> {
        let mut tags = self.query_tags(&format!("{TAG_SELECT_SQL} WHERE id = ?1;"), [id])?;
        Ok(tags.pop())
    }

    fn get_tag_by_name(&self, user_id: UserId, name: &str) -> RepoResult<Option<Tag>> {
        let mut tags = self.query_tags(
            &format!("{TAG_SELECT_SQL} WHERE user_id = ?1 AND name = ?2;"),
            params![user_id, name],
        )?;
        Ok(tags.pop())
    }

    fn list_tags_by_owner(&self, user_id: UserId, page: Page) -> RepoResult<Vec<Tag>> {
        self.query_tags(
            &format!(
                "{TAG_SELECT_SQL}
                 WHERE user_id = ?1
                 ORDER BY id ASC
                 LIMIT ?2 OFFSET ?3;"
            ),
            params![user_id, i64::from(page.limit), i64::from(page.skip)],
        )
    }

    fn update_tag(&self, id: TagId, input: &TagInput) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tags SET name = ?2, color = ?3 WHERE id = ?1;",
            params![id, input.name.as_str(), input.effective_color()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "tag", id });
        }
        Ok(())
    }

    fn delete_tag(&self, id: TagId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM tags WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "tag", id });
        }
        Ok(())
    }
}

pub(crate) fn parse_tag_row(row: &Row<'_>) -> RepoResult<Tag> {
    Ok(Tag {
        id: row.get("id")?,
        name: row.get("name")?,
        color: row.get("color")?,
        user_id: row.get("user_id")?,
        created_at: row.get("created_at")?,
    })
}
