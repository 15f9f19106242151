use pressroom_core::db::open_db_in_memory;
use pressroom_core::{
    ActorContext, Blog, BlogTable, EmptySchema, EntityId, FilterSpec, RepoError, ResultSet,
};
use std::collections::HashSet;

fn seeded_table<'c>(conn: &'c rusqlite::Connection, labels: &[&str]) -> BlogTable<'c> {
    let table = BlogTable::try_new(conn, ActorContext::new(1), &EmptySchema).unwrap();
    for label in labels {
        table.save_single(&Blog::new(*label)).unwrap();
    }
    table
}

fn labels_of(rows: &[Blog]) -> Vec<String> {
    rows.iter().map(|blog| blog.label.clone()).collect()
}

#[test]
fn like_filter_matches_prefixes_only() {
    let conn = open_db_in_memory().unwrap();
    let table = seeded_table(&conn, &["alpha", "alphabet", "beta", "late alpha"]);

    let filter = FilterSpec::new().with("label-like", "alpha");
    let rows = table.fetch_all(false, &filter).unwrap().into_rows().unwrap();

    let mut labels = labels_of(&rows);
    labels.sort();
    assert_eq!(labels, vec!["alpha", "alphabet"]);
}

#[test]
fn empty_filter_matches_all_rows() {
    let conn = open_db_in_memory().unwrap();
    let table = seeded_table(&conn, &["a", "b", "c"]);

    let rows = table
        .fetch_all(false, &FilterSpec::new())
        .unwrap()
        .into_rows()
        .unwrap();
    assert_eq!(rows.len(), 3);
}

#[test]
fn keys_without_recognized_suffix_are_no_ops() {
    let conn = open_db_in_memory().unwrap();
    let table = seeded_table(&conn, &["alpha", "beta"]);

    // Plain key and unknown suffix: both ignored, neither an error.
    let filter = FilterSpec::new()
        .with("label", "alpha")
        .with("label-exactish", "alpha");
    let rows = table.fetch_all(false, &filter).unwrap().into_rows().unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn malformed_filter_column_fails_the_operation() {
    let conn = open_db_in_memory().unwrap();
    let table = seeded_table(&conn, &["alpha"]);

    let filter = FilterSpec::new().with("label OR 1=1-like", "x");
    let err = table.fetch_all(false, &filter).unwrap_err();
    assert!(matches!(err, RepoError::InvalidIdentifier(_)));
}

#[test]
fn cursor_total_matches_eager_count() {
    let conn = open_db_in_memory().unwrap();
    let table = seeded_table(&conn, &["a1", "a2", "a3", "b1", "b2"]);
    let filter = FilterSpec::new().with("label-like", "a");

    let eager = table.fetch_all(false, &filter).unwrap().into_rows().unwrap();
    let cursor = table.fetch_all(true, &filter).unwrap().into_cursor().unwrap();

    assert_eq!(cursor.total(), eager.len() as u64);
    assert_eq!(cursor.total(), 3);
}

#[test]
fn concatenated_pages_equal_the_eager_result() {
    let conn = open_db_in_memory().unwrap();
    let table = seeded_table(&conn, &["a", "b", "c", "d", "e"]);

    let eager_ids: HashSet<EntityId> = table
        .fetch_all(false, &FilterSpec::new())
        .unwrap()
        .into_rows()
        .unwrap()
        .iter()
        .map(|blog| blog.id)
        .collect();

    let cursor = table
        .fetch_all(true, &FilterSpec::new())
        .unwrap()
        .into_cursor()
        .unwrap();
    assert_eq!(cursor.total(), 5);
    assert_eq!(cursor.page_count(2), 3);

    let mut paged_ids = HashSet::new();
    for page_index in 0..cursor.page_count(2) {
        let page = cursor.page(page_index, 2).unwrap();
        assert!(page.len() <= 2);
        paged_ids.extend(page.iter().map(|blog| blog.id));
    }

    assert_eq!(paged_ids, eager_ids);
}

#[test]
fn page_fetches_are_repeatable() {
    let conn = open_db_in_memory().unwrap();
    let table = seeded_table(&conn, &["a", "b", "c", "d"]);

    let cursor = table
        .fetch_all(true, &FilterSpec::new())
        .unwrap()
        .into_cursor()
        .unwrap();

    let first = labels_of(&cursor.page(1, 2).unwrap());
    let second = labels_of(&cursor.page(1, 2).unwrap());
    assert_eq!(first, second);
}

#[test]
fn page_beyond_the_end_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let table = seeded_table(&conn, &["a", "b"]);

    let cursor = table
        .fetch_all(true, &FilterSpec::new())
        .unwrap()
        .into_cursor()
        .unwrap();
    assert!(cursor.page(5, 2).unwrap().is_empty());
    assert_eq!(cursor.page_count(0), 0);
}

#[test]
fn eager_and_paged_wrappings_are_exclusive() {
    let conn = open_db_in_memory().unwrap();
    let table = seeded_table(&conn, &["a"]);

    match table.fetch_all(false, &FilterSpec::new()).unwrap() {
        ResultSet::Eager(rows) => assert_eq!(rows.len(), 1),
        ResultSet::Paged(_) => panic!("expected eager result"),
    }
    assert!(table
        .fetch_all(false, &FilterSpec::new())
        .unwrap()
        .into_cursor()
        .is_none());
    assert!(table
        .fetch_all(true, &FilterSpec::new())
        .unwrap()
        .into_rows()
        .is_none());
}
