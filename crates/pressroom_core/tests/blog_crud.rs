use pressroom_core::db::open_db_in_memory;
use pressroom_core::{
    ActorContext, Blog, BlogTable, EmptySchema, FilterSpec, RepoError, ResultSet,
};

#[test]
fn save_with_sentinel_id_inserts_and_stamps_audit_fields() {
    let conn = open_db_in_memory().unwrap();
    let table = BlogTable::try_new(&conn, ActorContext::new(7), &EmptySchema).unwrap();

    let id = table.save_single(&Blog::new("First Post")).unwrap();
    assert!(id > 0);

    let loaded = table.get_single(id).unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.label, "First Post");
    assert_eq!(loaded.created_by, Some(7));
    assert_eq!(loaded.modified_by, Some(7));
    assert!(loaded.created_date.is_some());
    assert_eq!(loaded.created_date, loaded.modified_date);
}

#[test]
fn save_with_existing_id_updates_in_place() {
    let conn = open_db_in_memory().unwrap();
    let table = BlogTable::try_new(&conn, ActorContext::new(7), &EmptySchema).unwrap();

    let id = table.save_single(&Blog::new("Draft")).unwrap();
    let created = table.get_single(id).unwrap();

    // A different actor performs the update.
    let table_as_editor = BlogTable::try_new(&conn, ActorContext::new(9), &EmptySchema).unwrap();
    let updated_id = table_as_editor
        .save_single(&Blog::with_id(id, "Published"))
        .unwrap();
    assert_eq!(updated_id, id);

    let loaded = table.get_single(id).unwrap();
    assert_eq!(loaded.label, "Published");
    assert_eq!(loaded.created_by, Some(7));
    assert_eq!(loaded.created_date, created.created_date);
    assert_eq!(loaded.modified_by, Some(9));
}

#[test]
fn updating_missing_id_fails_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let table = BlogTable::try_new(&conn, ActorContext::new(7), &EmptySchema).unwrap();

    let err = table
        .save_single(&Blog::with_id(999, "Ghost"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::UpdateTargetMissing { entity: "blog", id: 999 }
    ));

    let rows = table
        .fetch_all(false, &FilterSpec::new())
        .unwrap()
        .into_rows()
        .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn get_single_missing_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let table = BlogTable::try_new(&conn, ActorContext::new(7), &EmptySchema).unwrap();

    let err = table.get_single(42).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "blog", id: 42 }));
}

#[test]
fn fetch_all_on_empty_table_returns_empty_results() {
    let conn = open_db_in_memory().unwrap();
    let table = BlogTable::try_new(&conn, ActorContext::new(7), &EmptySchema).unwrap();

    let rows = table
        .fetch_all(false, &FilterSpec::new())
        .unwrap()
        .into_rows()
        .unwrap();
    assert!(rows.is_empty());

    match table.fetch_all(true, &FilterSpec::new()).unwrap() {
        ResultSet::Paged(cursor) => assert_eq!(cursor.total(), 0),
        ResultSet::Eager(_) => panic!("expected paginated result"),
    }
}

#[test]
fn gateway_construction_fails_on_unmigrated_connection() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();

    let result = BlogTable::try_new(&conn, ActorContext::new(7), &EmptySchema);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("blog"))));
}

#[test]
fn gateway_construction_fails_when_audit_columns_are_missing() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE blog (
            blog_id INTEGER PRIMARY KEY AUTOINCREMENT,
            label TEXT NOT NULL
        );",
    )
    .unwrap();

    let result = BlogTable::try_new(&conn, ActorContext::new(7), &EmptySchema);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "blog",
            column: "created_by"
        })
    ));
}
