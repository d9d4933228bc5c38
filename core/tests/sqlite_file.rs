//! On-disk behaviour of `SqliteStore`: data and id sequence survive reopen.

use todo_core::{FilterMode, NewTodo, SqliteStore, StoreError, TodoPatch, TodoQuery, TodoStore};

#[test]
fn items_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.sqlite3");

    let created = {
        let store = SqliteStore::open(&path).unwrap();
        let todo = store
            .create(NewTodo::new("Persist me").with_description(""))
            .unwrap();
        store
            .update(todo.id, TodoPatch::default().is_completed(true))
            .unwrap()
    };

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.get(created.id).unwrap(), created);
    assert_eq!(store.list(&TodoQuery::default()).unwrap(), vec![created]);
}

#[test]
fn id_sequence_survives_reopen_after_delete() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.sqlite3");

    let deleted = {
        let store = SqliteStore::open(&path).unwrap();
        let todo = store.create(NewTodo::new("Short lived")).unwrap();
        store.delete(todo.id).unwrap();
        todo.id
    };

    let store = SqliteStore::open(&path).unwrap();
    let next = store.create(NewTodo::new("Next one")).unwrap();
    assert!(next.id > deleted);
    assert_eq!(store.list(&TodoQuery::new(FilterMode::All)).unwrap().len(), 1);
}

#[test]
fn newer_schema_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch("PRAGMA user_version = 7;").unwrap();
    }

    match SqliteStore::open(&path) {
        Err(StoreError::UnsupportedSchema { found, .. }) => assert_eq!(found, 7),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected schema version to be refused"),
    }
}
