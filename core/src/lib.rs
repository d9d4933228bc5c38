//! Storage and list-query core for the todo web app.
//!
//! # Overview
//! Owns the todo data model, the field rules applied on every write, the
//! `TodoStore` contract with in-memory and SQLite backends, and the list
//! query (completion filter plus name search). Nothing here knows about
//! HTTP; the server crate calls these types from its handlers.
//!
//! # Design
//! - Validation runs inside the store, so no backend can persist a
//!   `task_name` outside 4..=50 characters.
//! - `TodoQuery::matches` is the single definition of list membership;
//!   backends only decide how rows are fetched.
//! - Results are always in creation (id) order.

pub mod error;
pub mod query;
pub mod store;
pub mod types;
pub mod validation;

pub use error::{StoreError, StoreResult, ValidationError, ValidationErrorKind};
pub use query::{FilterMode, TodoQuery};
pub use store::{MemoryStore, SqliteStore, TodoStore};
pub use types::{NewTodo, TodoId, TodoItem, TodoPatch};
pub use validation::{validate_task_name, TASK_NAME_MAX_CHARS, TASK_NAME_MIN_CHARS};
