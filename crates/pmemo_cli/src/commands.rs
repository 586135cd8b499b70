//! Dispatches parsed commands to core services.

use crate::args::{Command, MemoCommand, TagCommand};
use pmemo_core::{
    parse_search_query, MemoCreate, MemoService, MemoUpdate, ServiceResult, SqliteMemoRepository,
    SqliteTagRepository, TagInput, TagService, UserId,
};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;

/// Runs one command for caller `uid`.
///
/// The outer `Result` carries boundary failures (repository setup,
/// serialization); the inner one carries service errors meant for the caller.
pub fn execute(
    conn: &Connection,
    uid: UserId,
    command: Command,
) -> anyhow::Result<ServiceResult<Value>> {
    match command {
        Command::Memo(command) => {
            let service = MemoService::new(
                SqliteMemoRepository::try_new(conn)?,
                SqliteTagRepository::try_new(conn)?,
            );
            execute_memo(&service, uid, command)
        }
        Command::Tag(command) => {
            let service = TagService::new(SqliteTagRepository::try_new(conn)?);
            execute_tag(&service, uid, command)
        }
    }
}

fn execute_memo(
    service: &MemoService<SqliteMemoRepository<'_>, SqliteTagRepository<'_>>,
    uid: UserId,
    command: MemoCommand,
) -> anyhow::Result<ServiceResult<Value>> {
    match command {
        MemoCommand::List { page } => to_json(service.list(uid, page.into())),
        MemoCommand::Create {
            title,
            content,
            public,
            tags,
        } => {
            let input = MemoCreate {
                title,
                content,
                is_public: public,
                tags,
            };
            to_json(service.create(uid, &input))
        }
        MemoCommand::Get { id } => to_json(service.get(uid, id)),
        MemoCommand::Update {
            id,
            title,
            content,
            public,
            tags,
            clear_tags,
        } => {
            let tags = if clear_tags {
                Some(Vec::new())
            } else if tags.is_empty() {
                None
            } else {
                Some(tags)
            };
            let input = MemoUpdate {
                title,
                content,
                is_public: public,
                tags,
            };
            to_json(service.update(uid, id, &input))
        }
        MemoCommand::Delete { id } => to_json(service.delete(uid, id)),
        MemoCommand::Search { query, page } => {
            let result = parse_search_query(&query)
                .and_then(|query| service.search(uid, &query, page.into()));
            to_json(result)
        }
    }
}

fn execute_tag(
    service: &TagService<SqliteTagRepository<'_>>,
    uid: UserId,
    command: TagCommand,
) -> anyhow::Result<ServiceResult<Value>> {
    match command {
        TagCommand::List { page } => to_json(service.list(uid, page.into())),
        TagCommand::Create { name, color } => {
            to_json(service.create(uid, &TagInput { name, color }))
        }
        TagCommand::Get { id } => to_json(service.get(uid, id)),
        TagCommand::Update { id, name, color } => {
            to_json(service.update(uid, id, &TagInput { name, color }))
        }
        TagCommand::Delete { id } => to_json(service.delete(uid, id)),
    }
}

fn to_json<T: Serialize>(result: ServiceResult<T>) -> anyhow::Result<ServiceResult<Value>> {
    match result {
        Ok(value) => Ok(Ok(serde_json::to_value(value)?)),
        Err(err) => Ok(Err(err)),
    }
}
