//! List-page selection: completion filter plus task-name search.
//!
//! # Design
//! `TodoQuery` is pure data with a `matches` predicate, so every backend
//! applies exactly the same rules and orders results by id. The default
//! filter is `Completed`: a bare list page shows only finished items unless
//! `filter=all` or `filter=not_completed` is asked for.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::TodoItem;

/// Selection over completion status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    Completed,
    NotCompleted,
    All,
}

impl FilterMode {
    /// Maps a request parameter to a mode. Absent means `Completed`;
    /// anything other than the two known values, including `"all"`, means
    /// `All`.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None => FilterMode::Completed,
            Some("completed") => FilterMode::Completed,
            Some("not_completed") => FilterMode::NotCompleted,
            Some(_) => FilterMode::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::Completed => "completed",
            FilterMode::NotCompleted => "not_completed",
            FilterMode::All => "all",
        }
    }

    /// The `is_completed` value this mode requires, if any.
    pub fn completion(self) -> Option<bool> {
        match self {
            FilterMode::Completed => Some(true),
            FilterMode::NotCompleted => Some(false),
            FilterMode::All => None,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A list request: completion filter AND optional name search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoQuery {
    pub filter: FilterMode,
    search: Option<String>,
}

impl TodoQuery {
    pub fn new(filter: FilterMode) -> Self {
        Self {
            filter,
            search: None,
        }
    }

    /// Builds a query from raw list-page parameters.
    pub fn from_params(filter: Option<&str>, search: Option<&str>) -> Self {
        Self::new(FilterMode::from_param(filter)).with_search(search.unwrap_or_default())
    }

    /// Restricts results to names containing `search`, ignoring case. An
    /// empty string removes the restriction.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.is_empty() {
            None
        } else {
            Some(search.to_lowercase())
        };
        self
    }

    /// The lowercased search text, if any.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn matches(&self, todo: &TodoItem) -> bool {
        if let Some(completed) = self.filter.completion() {
            if todo.is_completed != completed {
                return false;
            }
        }
        match &self.search {
            Some(needle) => todo.task_name.to_lowercase().contains(needle.as_str()),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TodoId;

    fn todo(name: &str, completed: bool) -> TodoItem {
        TodoItem {
            id: TodoId::new(1),
            task_name: name.to_string(),
            task_description: None,
            is_completed: completed,
        }
    }

    #[test]
    fn absent_filter_defaults_to_completed() {
        assert_eq!(FilterMode::from_param(None), FilterMode::Completed);
        assert_eq!(FilterMode::default(), FilterMode::Completed);
    }

    #[test]
    fn unrecognized_filter_selects_all() {
        assert_eq!(FilterMode::from_param(Some("all")), FilterMode::All);
        assert_eq!(FilterMode::from_param(Some("bogus")), FilterMode::All);
        assert_eq!(FilterMode::from_param(Some("")), FilterMode::All);
        assert_eq!(FilterMode::from_param(Some("Completed")), FilterMode::All);
        assert_eq!(
            FilterMode::from_param(Some("not_completed")),
            FilterMode::NotCompleted
        );
    }

    #[test]
    fn completion_filter() {
        let done = todo("Completed Task", true);
        let open = todo("Incomplete Task", false);

        let q = TodoQuery::new(FilterMode::Completed);
        assert!(q.matches(&done) && !q.matches(&open));

        let q = TodoQuery::new(FilterMode::NotCompleted);
        assert!(!q.matches(&done) && q.matches(&open));

        let q = TodoQuery::new(FilterMode::All);
        assert!(q.matches(&done) && q.matches(&open));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let q = TodoQuery::new(FilterMode::All).with_search("MILK");
        assert!(q.matches(&todo("Buy milk today", false)));
        assert!(!q.matches(&todo("Buy bread", false)));
    }

    #[test]
    fn empty_search_is_no_restriction() {
        let q = TodoQuery::from_params(Some("all"), Some(""));
        assert!(q.search().is_none());
        assert!(q.matches(&todo("Anything", false)));
    }

    #[test]
    fn search_and_filter_combine_with_and() {
        let q = TodoQuery::from_params(None, Some("task"));
        assert!(q.matches(&todo("Completed Task", true)));
        assert!(!q.matches(&todo("Incomplete Task", false)));
    }
}
