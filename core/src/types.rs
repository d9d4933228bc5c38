//! Domain types for the todo list.
//!
//! # Design
//! `TodoItem` is the stored record. Writes go through two separate payloads:
//! `NewTodo` carries every field of a fresh item, `TodoPatch` carries only
//! the fields an update touches. `task_description` keeps "absent" (`None`)
//! and "empty" (`Some("")`) apart all the way down to storage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable identity of a stored todo item.
///
/// Assigned by the store in strictly increasing order and never reused, so
/// ordering by id is ordering by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A single stored todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub task_name: String,
    pub task_description: Option<String>,
    pub is_completed: bool,
}

impl TodoItem {
    /// Applies the fields present in `patch`, leaving the rest unchanged.
    pub(crate) fn apply(&mut self, patch: TodoPatch) {
        if let Some(task_name) = patch.task_name {
            self.task_name = task_name;
        }
        if let Some(task_description) = patch.task_description {
            self.task_description = task_description;
        }
        if let Some(is_completed) = patch.is_completed {
            self.is_completed = is_completed;
        }
    }
}

/// Payload for creating a new todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub task_name: String,
    #[serde(default)]
    pub task_description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

impl NewTodo {
    /// A new item with no description that is not yet completed.
    pub fn new(task_name: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            task_description: None,
            is_completed: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.task_description = Some(description.into());
        self
    }

    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }
}

/// Partial update for an existing todo item. Only the fields that are
/// `Some` are applied; `task_description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub task_name: Option<String>,
    pub task_description: Option<Option<String>>,
    pub is_completed: Option<bool>,
}

impl TodoPatch {
    pub fn task_name(mut self, task_name: impl Into<String>) -> Self {
        self.task_name = Some(task_name.into());
        self
    }

    pub fn task_description(mut self, task_description: Option<String>) -> Self {
        self.task_description = Some(task_description);
        self
    }

    pub fn is_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = Some(is_completed);
        self
    }
}
