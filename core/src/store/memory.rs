use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::query::TodoQuery;
use crate::store::TodoStore;
use crate::types::{NewTodo, TodoId, TodoItem, TodoPatch};
use crate::validation::{validate_new, validate_patch};

#[derive(Debug, Default)]
struct Inner {
    todos: BTreeMap<TodoId, TodoItem>,
    last_id: u64,
}

/// In-process store. Contents live as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

impl TodoStore for MemoryStore {
    fn create(&self, new: NewTodo) -> StoreResult<TodoItem> {
        validate_new(&new)?;

        let mut inner = self.write()?;
        inner.last_id += 1;
        let todo = TodoItem {
            id: TodoId::new(inner.last_id),
            task_name: new.task_name,
            task_description: new.task_description,
            is_completed: new.is_completed,
        };
        inner.todos.insert(todo.id, todo.clone());
        debug!(todo_id = %todo.id, "created todo");
        Ok(todo)
    }

    fn update(&self, id: TodoId, patch: TodoPatch) -> StoreResult<TodoItem> {
        let mut inner = self.write()?;
        let todo = inner.todos.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        validate_patch(&patch)?;
        todo.apply(patch);
        debug!(todo_id = %id, "updated todo");
        Ok(todo.clone())
    }

    fn delete(&self, id: TodoId) -> StoreResult<()> {
        let mut inner = self.write()?;
        inner.todos.remove(&id).ok_or(StoreError::NotFound(id))?;
        debug!(todo_id = %id, "deleted todo");
        Ok(())
    }

    fn get(&self, id: TodoId) -> StoreResult<TodoItem> {
        let inner = self.read()?;
        inner.todos.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn list(&self, query: &TodoQuery) -> StoreResult<Vec<TodoItem>> {
        let inner = self.read()?;
        Ok(inner
            .todos
            .values()
            .filter(|todo| query.matches(todo))
            .cloned()
            .collect())
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.read()?.todos.len())
    }
}
