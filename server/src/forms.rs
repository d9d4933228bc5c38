//! Decoding of the add/edit form.
//!
//! Text inputs are whitespace-stripped. A missing `task_description` stays
//! `None`; a submitted one, even if empty, is kept as `Some`. The checkbox
//! is only false when absent, empty or `"false"`.

use serde::Deserialize;
use todo_core::{NewTodo, TodoPatch};

use crate::templates::FormPage;

/// Raw `application/x-www-form-urlencoded` body of the todo form.
#[derive(Debug, Default, Deserialize)]
pub struct TodoForm {
    pub task_name: Option<String>,
    pub task_description: Option<String>,
    pub is_completed: Option<String>,
}

impl TodoForm {
    pub fn task_name(&self) -> String {
        self.task_name.as_deref().unwrap_or_default().trim().to_string()
    }

    pub fn task_description(&self) -> Option<String> {
        self.task_description
            .as_deref()
            .map(|description| description.trim().to_string())
    }

    pub fn is_completed(&self) -> bool {
        match self.is_completed.as_deref() {
            None | Some("") => false,
            Some(value) => !value.eq_ignore_ascii_case("false"),
        }
    }

    pub fn to_new(&self) -> NewTodo {
        NewTodo {
            task_name: self.task_name(),
            task_description: self.task_description(),
            is_completed: self.is_completed(),
        }
    }

    /// The edit form always submits the whole record.
    pub fn to_patch(&self) -> TodoPatch {
        TodoPatch::default()
            .task_name(self.task_name())
            .task_description(self.task_description())
            .is_completed(self.is_completed())
    }

    /// Re-fills `page` with what the user submitted, alongside `error`.
    pub fn refill(&self, mut page: FormPage, error: String) -> FormPage {
        page.task_name = self.task_name();
        page.task_description = self.task_description().unwrap_or_default();
        page.is_completed = self.is_completed();
        page.error = Some(error);
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(body: &str) -> TodoForm {
        serde_urlencoded::from_str(body).unwrap()
    }

    #[test]
    fn empty_body_decodes_to_defaults() {
        let new = form("").to_new();
        assert_eq!(new.task_name, "");
        assert!(new.task_description.is_none());
        assert!(!new.is_completed);
    }

    #[test]
    fn strips_whitespace() {
        let new = form("task_name=++Walk+dog++&task_description=+park+").to_new();
        assert_eq!(new.task_name, "Walk dog");
        assert_eq!(new.task_description.as_deref(), Some("park"));
    }

    #[test]
    fn submitted_empty_description_is_kept() {
        let new = form("task_name=Task&task_description=").to_new();
        assert_eq!(new.task_description.as_deref(), Some(""));
    }

    #[test]
    fn checkbox_values() {
        assert!(form("is_completed=on").is_completed());
        assert!(form("is_completed=true").is_completed());
        assert!(form("is_completed=1").is_completed());
        assert!(!form("is_completed=").is_completed());
        assert!(!form("is_completed=False").is_completed());
        assert!(!form("task_name=x").is_completed());
    }

    #[test]
    fn patch_covers_every_field() {
        let patch = form("task_name=Walk+cat").to_patch();
        assert_eq!(patch.task_name.as_deref(), Some("Walk cat"));
        assert_eq!(patch.task_description, Some(None));
        assert_eq!(patch.is_completed, Some(false));
    }
}
