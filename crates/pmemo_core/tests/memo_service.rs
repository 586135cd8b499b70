use pmemo_core::db::open_db_in_memory;
use pmemo_core::{
    MemoCreate, MemoService, MemoUpdate, Page, ServiceError, SqliteMemoRepository,
    SqliteTagRepository, ValidationError,
};
use rusqlite::Connection;

const ALICE: i64 = 1;
const BOB: i64 = 2;

fn memo_service(conn: &Connection) -> MemoService<SqliteMemoRepository<'_>, SqliteTagRepository<'_>> {
    MemoService::new(
        SqliteMemoRepository::try_new(conn).unwrap(),
        SqliteTagRepository::try_new(conn).unwrap(),
    )
}

#[test]
fn create_assigns_owner_and_timestamps() {
    let conn = open_db_in_memory().unwrap();
    let service = memo_service(&conn);

    let memo = service
        .create(ALICE, &MemoCreate::new("Groceries", "milk, eggs"))
        .unwrap();
    assert!(memo.id > 0);
    assert_eq!(memo.user_id, ALICE);
    assert_eq!(memo.title, "Groceries");
    assert_eq!(memo.content, "milk, eggs");
    assert!(!memo.is_public);
    assert!(memo.created_at > 0);
    assert!(memo.updated_at.is_none());
    assert!(memo.tags.is_empty());
}

#[test]
fn create_allows_duplicate_titles_and_empty_content() {
    let conn = open_db_in_memory().unwrap();
    let service = memo_service(&conn);

    let first = service.create(ALICE, &MemoCreate::new("Same", "")).unwrap();
    let second = service.create(ALICE, &MemoCreate::new("Same", "")).unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(second.content, "");
}

#[test]
fn create_rejects_empty_title() {
    let conn = open_db_in_memory().unwrap();
    let service = memo_service(&conn);

    let err = service
        .create(ALICE, &MemoCreate::new("", "body"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::EmptyTitle)
    ));
    assert!(service.list(ALICE, Page::default()).unwrap().is_empty());
}

#[test]
fn create_keeps_whitespace_only_title() {
    let conn = open_db_in_memory().unwrap();
    let service = memo_service(&conn);

    let memo = service.create(ALICE, &MemoCreate::new("   ", "")).unwrap();
    assert_eq!(memo.title, "   ");
    assert_eq!(service.get(ALICE, memo.id).unwrap().title, "   ");
}

#[test]
fn private_memo_is_forbidden_to_other_users() {
    let conn = open_db_in_memory().unwrap();
    let service = memo_service(&conn);
    let memo = service
        .create(ALICE, &MemoCreate::new("Diary", "secret"))
        .unwrap();

    assert_eq!(service.get(ALICE, memo.id).unwrap(), memo);
    let err = service.get(BOB, memo.id).unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden { entity: "memo", .. }));
}

#[test]
fn public_memo_is_readable_but_not_writable_by_others() {
    let conn = open_db_in_memory().unwrap();
    let service = memo_service(&conn);
    let memo = service
        .create(ALICE, &MemoCreate::new("Recipe", "pancakes").public())
        .unwrap();

    assert_eq!(service.get(BOB, memo.id).unwrap().title, "Recipe");

    let update = MemoUpdate {
        content: Some("waffles".to_string()),
        ..MemoUpdate::default()
    };
    assert!(matches!(
        service.update(BOB, memo.id, &update).unwrap_err(),
        ServiceError::Forbidden { .. }
    ));
    assert!(matches!(
        service.delete(BOB, memo.id).unwrap_err(),
        ServiceError::Forbidden { .. }
    ));

    let unchanged = service.get(ALICE, memo.id).unwrap();
    assert_eq!(unchanged.content, "pancakes");
}

#[test]
fn missing_memo_reports_not_found_for_every_operation() {
    let conn = open_db_in_memory().unwrap();
    let service = memo_service(&conn);

    assert!(matches!(
        service.get(ALICE, 404).unwrap_err(),
        ServiceError::NotFound { entity: "memo", id: 404 }
    ));
    assert!(matches!(
        service
            .update(ALICE, 404, &MemoUpdate::default())
            .unwrap_err(),
        ServiceError::NotFound { .. }
    ));
    assert!(matches!(
        service.delete(ALICE, 404).unwrap_err(),
        ServiceError::NotFound { .. }
    ));
}

#[test]
fn update_is_partial_and_refreshes_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let service = memo_service(&conn);
    let memo = service.create(ALICE, &MemoCreate::new("A", "B")).unwrap();

    let update = MemoUpdate {
        content: Some("C".to_string()),
        ..MemoUpdate::default()
    };
    let updated = service.update(ALICE, memo.id, &update).unwrap();
    assert_eq!(updated.title, "A");
    assert_eq!(updated.content, "C");
    assert!(!updated.is_public);
    assert_eq!(updated.created_at, memo.created_at);
    let first_stamp = updated.updated_at.expect("updated_at should be set");
    assert!(first_stamp > memo.created_at);

    let again = service
        .update(
            ALICE,
            memo.id,
            &MemoUpdate {
                is_public: Some(true),
                ..MemoUpdate::default()
            },
        )
        .unwrap();
    assert!(again.is_public);
    assert_eq!(again.content, "C");
    assert!(again.updated_at.unwrap() > first_stamp);
}

#[test]
fn update_rejects_empty_title_without_applying_other_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = memo_service(&conn);
    let memo = service.create(ALICE, &MemoCreate::new("A", "B")).unwrap();

    let update = MemoUpdate {
        title: Some(String::new()),
        content: Some("changed".to_string()),
        ..MemoUpdate::default()
    };
    assert!(matches!(
        service.update(ALICE, memo.id, &update).unwrap_err(),
        ServiceError::Validation(ValidationError::EmptyTitle)
    ));
    assert_eq!(service.get(ALICE, memo.id).unwrap().content, "B");
}

#[test]
fn delete_returns_snapshot_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = memo_service(&conn);
    let memo = service
        .create(ALICE, &MemoCreate::new("Temp", "to remove"))
        .unwrap();

    let deleted = service.delete(ALICE, memo.id).unwrap();
    assert_eq!(deleted, memo);

    assert!(matches!(
        service.get(ALICE, memo.id).unwrap_err(),
        ServiceError::NotFound { .. }
    ));
    assert!(matches!(
        service.delete(ALICE, memo.id).unwrap_err(),
        ServiceError::NotFound { .. }
    ));
}

#[test]
fn list_returns_only_own_memos_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let service = memo_service(&conn);
    service.create(ALICE, &MemoCreate::new("a1", "")).unwrap();
    service
        .create(BOB, &MemoCreate::new("b1", "").public())
        .unwrap();
    service.create(ALICE, &MemoCreate::new("a2", "")).unwrap();

    let titles: Vec<String> = service
        .list(ALICE, Page::default())
        .unwrap()
        .into_iter()
        .map(|memo| memo.title)
        .collect();
    assert_eq!(titles, vec!["a1".to_string(), "a2".to_string()]);
}

#[test]
fn list_applies_skip_and_limit() {
    let conn = open_db_in_memory().unwrap();
    let service = memo_service(&conn);
    for idx in 1..=10 {
        service
            .create(ALICE, &MemoCreate::new(format!("memo {idx}"), ""))
            .unwrap();
    }

    let page = service.list(ALICE, Page::new(5, 3)).unwrap();
    let titles: Vec<&str> = page.iter().map(|memo| memo.title.as_str()).collect();
    assert_eq!(titles, vec!["memo 6", "memo 7", "memo 8"]);

    assert!(service.list(ALICE, Page::new(20, 5)).unwrap().is_empty());
    assert_eq!(service.list(ALICE, Page::default()).unwrap().len(), 10);
    assert!(service.list(ALICE, Page::new(0, 0)).unwrap().is_empty());
}
