//! SQLite-backed store.
//!
//! # Invariants
//! - Migrations are applied before the store is handed out; the applied
//!   version is mirrored to `PRAGMA user_version`.
//! - `AUTOINCREMENT` keeps ids monotonic across deletes.
//! - Writes call the shared validators before any SQL runs.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, error, info};

use crate::error::{StoreError, StoreResult};
use crate::query::TodoQuery;
use crate::store::TodoStore;
use crate::types::{NewTodo, TodoId, TodoItem, TodoPatch};
use crate::validation::{validate_new, validate_patch};

struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("migrations/0001_todos.sql"),
}];

/// Schema version written by the newest migration this build knows.
pub const LATEST_SCHEMA_VERSION: u32 = 1;

const TODO_SELECT_SQL: &str =
    "SELECT id, task_name, task_description, is_completed FROM todos";

/// Store backed by a single SQLite connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database file at `path` and migrates it.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();
        let conn = Connection::open(path).and_then(|conn| {
            conn.busy_timeout(Duration::from_secs(5))?;
            Ok(conn)
        })?;
        let store = Self::bootstrap(conn).inspect_err(|err| {
            error!(path = %path.display(), error = %err, "failed to open todo database");
        })?;
        info!(
            path = %path.display(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "opened todo database"
        );
        Ok(store)
    }

    /// A private database that disappears with the store.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(mut conn: Connection) -> StoreResult<Self> {
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

fn apply_migrations(conn: &mut Connection) -> StoreResult<()> {
    let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;

    if current > LATEST_SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchema {
            found: current,
            supported: LATEST_SCHEMA_VERSION,
        });
    }
    if current == LATEST_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
        debug!(version = migration.version, "applied migration");
    }
    tx.commit()?;
    Ok(())
}

type TodoRow = (i64, String, Option<String>, bool);

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<TodoRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn decode((id, task_name, task_description, is_completed): TodoRow) -> StoreResult<TodoItem> {
    let id = u64::try_from(id).map_err(|_| StoreError::InvalidData(format!("negative id {id}")))?;
    Ok(TodoItem {
        id: TodoId::new(id),
        task_name,
        task_description,
        is_completed,
    })
}

fn sql_id(id: TodoId) -> StoreResult<i64> {
    // Ids outside i64 cannot exist in the table.
    i64::try_from(id.get()).map_err(|_| StoreError::NotFound(id))
}

fn fetch(conn: &Connection, id: TodoId) -> StoreResult<TodoItem> {
    let row = conn
        .query_row(
            &format!("{TODO_SELECT_SQL} WHERE id = ?1"),
            params![sql_id(id)?],
            todo_from_row,
        )
        .optional()?;
    row.ok_or(StoreError::NotFound(id)).and_then(decode)
}

impl TodoStore for SqliteStore {
    fn create(&self, new: NewTodo) -> StoreResult<TodoItem> {
        validate_new(&new)?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO todos (task_name, task_description, is_completed) VALUES (?1, ?2, ?3)",
            params![new.task_name, new.task_description, new.is_completed],
        )?;
        let todo = decode((
            conn.last_insert_rowid(),
            new.task_name,
            new.task_description,
            new.is_completed,
        ))?;
        debug!(todo_id = %todo.id, "created todo");
        Ok(todo)
    }

    fn update(&self, id: TodoId, patch: TodoPatch) -> StoreResult<TodoItem> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let mut todo = fetch(&tx, id)?;
        validate_patch(&patch)?;
        todo.apply(patch);
        tx.execute(
            "UPDATE todos SET task_name = ?1, task_description = ?2, is_completed = ?3 WHERE id = ?4",
            params![
                todo.task_name,
                todo.task_description,
                todo.is_completed,
                sql_id(id)?
            ],
        )?;
        tx.commit()?;
        debug!(todo_id = %id, "updated todo");
        Ok(todo)
    }

    fn delete(&self, id: TodoId) -> StoreResult<()> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM todos WHERE id = ?1", params![sql_id(id)?])?;
        if removed == 0 {
            return Err(StoreError::NotFound(id));
        }
        debug!(todo_id = %id, "deleted todo");
        Ok(())
    }

    fn get(&self, id: TodoId) -> StoreResult<TodoItem> {
        let conn = self.conn()?;
        fetch(&conn, id)
    }

    fn list(&self, query: &TodoQuery) -> StoreResult<Vec<TodoItem>> {
        let conn = self.conn()?;
        let rows = match query.filter.completion() {
            Some(completed) => {
                let mut stmt = conn.prepare_cached(&format!(
                    "{TODO_SELECT_SQL} WHERE is_completed = ?1 ORDER BY id ASC"
                ))?;
                let rows = stmt.query_map(params![completed], todo_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare_cached(&format!("{TODO_SELECT_SQL} ORDER BY id ASC"))?;
                let rows = stmt.query_map([], todo_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        // SQLite's LIKE/lower() only fold ASCII, so the name search runs here.
        let mut todos = Vec::with_capacity(rows.len());
        for row in rows {
            let todo = decode(row)?;
            if query.matches(&todo) {
                todos.push(todo);
            }
        }
        Ok(todos)
    }

    fn count(&self) -> StoreResult<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))?;
        usize::try_from(count).map_err(|_| StoreError::InvalidData(format!("row count {count}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_set_user_version() {
        let store = SqliteStore::open_in_memory().unwrap();
        let conn = store.conn().unwrap();
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, LATEST_SCHEMA_VERSION);
    }

    #[test]
    fn refuses_newer_schema() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA user_version = 99;").unwrap();
        let err = apply_migrations(&mut conn).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnsupportedSchema {
                found: 99,
                supported: LATEST_SCHEMA_VERSION
            }
        ));
    }

    #[test]
    fn migrations_are_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        apply_migrations(&mut conn).unwrap();
    }

    #[test]
    fn empty_description_round_trips_distinct_from_null() {
        let store = SqliteStore::open_in_memory().unwrap();
        let empty = store.create(NewTodo::new("Task").with_description("")).unwrap();
        let absent = store.create(NewTodo::new("Task")).unwrap();
        assert_eq!(store.get(empty.id).unwrap().task_description.as_deref(), Some(""));
        assert_eq!(store.get(absent.id).unwrap().task_description, None);
    }
}
