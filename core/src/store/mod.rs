//! Todo persistence contract and its backends.
//!
//! # Design
//! `TodoStore` is synchronous and takes `&self`: every call is a short,
//! bounded read or write, and backends serialise access internally. Both
//! backends validate with the same rules and order results by id.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, LATEST_SCHEMA_VERSION};

use crate::error::StoreResult;
use crate::query::TodoQuery;
use crate::types::{NewTodo, TodoId, TodoItem, TodoPatch};

/// Persistent storage for todo items.
pub trait TodoStore: Send + Sync {
    /// Validates and stores a new item, returning it with its assigned id.
    fn create(&self, new: NewTodo) -> StoreResult<TodoItem>;

    /// Applies a partial update. Unknown ids are reported before validation.
    fn update(&self, id: TodoId, patch: TodoPatch) -> StoreResult<TodoItem>;

    fn delete(&self, id: TodoId) -> StoreResult<()>;

    fn get(&self, id: TodoId) -> StoreResult<TodoItem>;

    /// Items matching `query`, in creation order.
    fn list(&self, query: &TodoQuery) -> StoreResult<Vec<TodoItem>>;

    fn count(&self) -> StoreResult<usize>;
}
