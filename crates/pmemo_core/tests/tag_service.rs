use pmemo_core::db::open_db_in_memory;
use pmemo_core::{
    Page, ServiceError, SqliteTagRepository, TagInput, TagService, ValidationError,
    DEFAULT_TAG_COLOR,
};

const ALICE: i64 = 1;
const BOB: i64 = 2;

#[test]
fn create_defaults_color_and_assigns_owner() {
    let conn = open_db_in_memory().unwrap();
    let service = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());

    let tag = service.create(ALICE, &TagInput::new("work")).unwrap();
    assert_eq!(tag.name, "work");
    assert_eq!(tag.color, DEFAULT_TAG_COLOR);
    assert_eq!(tag.user_id, ALICE);
    assert!(tag.created_at > 0);

    let colored = service
        .create(ALICE, &TagInput::new("home").with_color("#e74c3c"))
        .unwrap();
    assert_eq!(colored.color, "#e74c3c");
}

#[test]
fn same_name_is_allowed_for_different_owners() {
    let conn = open_db_in_memory().unwrap();
    let service = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());

    let alice_tag = service.create(ALICE, &TagInput::new("work")).unwrap();
    let bob_tag = service.create(BOB, &TagInput::new("work")).unwrap();
    assert_ne!(alice_tag.id, bob_tag.id);
}

#[test]
fn duplicate_name_for_same_owner_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let service = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());

    service.create(ALICE, &TagInput::new("work")).unwrap();
    let err = service.create(ALICE, &TagInput::new("work")).unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(service.list(ALICE, Page::default()).unwrap().len(), 1);
}

#[test]
fn create_rejects_empty_name() {
    let conn = open_db_in_memory().unwrap();
    let service = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());

    assert!(matches!(
        service.create(ALICE, &TagInput::new("")).unwrap_err(),
        ServiceError::Validation(ValidationError::EmptyTagName)
    ));
    assert!(service.list(ALICE, Page::default()).unwrap().is_empty());
}

#[test]
fn free_text_color_round_trips_on_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let service = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());

    let tag = service
        .create(ALICE, &TagInput::new("work").with_color("red"))
        .unwrap();
    assert_eq!(tag.color, "red");
    assert_eq!(service.get(ALICE, tag.id).unwrap().color, "red");

    let updated = service
        .update(ALICE, tag.id, &TagInput::new("work").with_color("dark teal"))
        .unwrap();
    assert_eq!(updated.color, "dark teal");
}

#[test]
fn get_is_owner_only() {
    let conn = open_db_in_memory().unwrap();
    let service = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());
    let tag = service.create(ALICE, &TagInput::new("work")).unwrap();

    assert_eq!(service.get(ALICE, tag.id).unwrap(), tag);
    assert!(matches!(
        service.get(BOB, tag.id).unwrap_err(),
        ServiceError::Forbidden { entity: "tag", .. }
    ));
    assert!(matches!(
        service.get(ALICE, 999).unwrap_err(),
        ServiceError::NotFound { entity: "tag", id: 999 }
    ));
}

#[test]
fn get_by_name_is_scoped_to_caller() {
    let conn = open_db_in_memory().unwrap();
    let service = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());
    let tag = service.create(ALICE, &TagInput::new("work")).unwrap();

    assert_eq!(service.get_by_name(ALICE, "work").unwrap(), Some(tag));
    assert_eq!(service.get_by_name(BOB, "work").unwrap(), None);
    assert_eq!(service.get_by_name(ALICE, "play").unwrap(), None);
}

#[test]
fn update_replaces_name_and_color() {
    let conn = open_db_in_memory().unwrap();
    let service = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());
    let tag = service
        .create(ALICE, &TagInput::new("work").with_color("#000000"))
        .unwrap();

    let renamed = service
        .update(ALICE, tag.id, &TagInput::new("office"))
        .unwrap();
    assert_eq!(renamed.id, tag.id);
    assert_eq!(renamed.name, "office");
    assert_eq!(renamed.color, DEFAULT_TAG_COLOR);
    assert_eq!(renamed.created_at, tag.created_at);
}

#[test]
fn update_checks_ownership_and_conflicts() {
    let conn = open_db_in_memory().unwrap();
    let service = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());
    let work = service.create(ALICE, &TagInput::new("work")).unwrap();
    service.create(ALICE, &TagInput::new("home")).unwrap();

    assert!(matches!(
        service
            .update(BOB, work.id, &TagInput::new("stolen"))
            .unwrap_err(),
        ServiceError::Forbidden { .. }
    ));
    assert!(matches!(
        service
            .update(ALICE, work.id, &TagInput::new("home"))
            .unwrap_err(),
        ServiceError::Conflict(_)
    ));
    assert!(matches!(
        service
            .update(ALICE, 999, &TagInput::new("x"))
            .unwrap_err(),
        ServiceError::NotFound { .. }
    ));
    assert_eq!(service.get(ALICE, work.id).unwrap().name, "work");
}

#[test]
fn delete_is_owner_only_and_returns_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let service = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());
    let tag = service.create(ALICE, &TagInput::new("work")).unwrap();

    assert!(matches!(
        service.delete(BOB, tag.id).unwrap_err(),
        ServiceError::Forbidden { .. }
    ));
    assert_eq!(service.delete(ALICE, tag.id).unwrap(), tag);
    assert!(matches!(
        service.delete(ALICE, tag.id).unwrap_err(),
        ServiceError::NotFound { .. }
    ));
}

#[test]
fn list_is_owned_and_paginated() {
    let conn = open_db_in_memory().unwrap();
    let service = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());
    for idx in 1..=4 {
        service
            .create(ALICE, &TagInput::new(format!("tag {idx}")))
            .unwrap();
    }
    service.create(BOB, &TagInput::new("bob only")).unwrap();

    let names: Vec<String> = service
        .list(ALICE, Page::new(1, 2))
        .unwrap()
        .into_iter()
        .map(|tag| tag.name)
        .collect();
    assert_eq!(names, vec!["tag 2".to_string(), "tag 3".to_string()]);
    assert_eq!(service.list(BOB, Page::default()).unwrap().len(), 1);
    assert!(service.list(ALICE, Page::new(10, 5)).unwrap().is_empty());
}
