//! HTML pages rendered with Tera.
//!
//! # Design
//! Templates are compiled into the binary with `include_str!` and parsed
//! once at startup, so a broken template fails `AppState::new` instead of a
//! request. Names end in `.html`, which keeps Tera's autoescaping on for
//! every user-supplied value.

use serde::Serialize;
use tera::{Context, Tera};
use todo_core::{FilterMode, TodoItem};

pub const NOT_FOUND_PAGE: &str = include_str!("../templates/not_found.html");

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("list.html", include_str!("../templates/list.html")),
    ("form.html", include_str!("../templates/form.html")),
    (
        "confirm_delete.html",
        include_str!("../templates/confirm_delete.html"),
    ),
];

#[derive(Debug, Serialize)]
struct FilterOption {
    value: &'static str,
    label: &'static str,
}

const FILTER_OPTIONS: [FilterOption; 3] = [
    FilterOption {
        value: "completed",
        label: "Completed",
    },
    FilterOption {
        value: "not_completed",
        label: "Not completed",
    },
    FilterOption {
        value: "all",
        label: "All",
    },
];

/// Values shown in the add/edit form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormPage {
    pub heading: &'static str,
    pub action: String,
    pub task_name: String,
    pub task_description: String,
    pub is_completed: bool,
    pub error: Option<String>,
}

impl FormPage {
    pub fn create() -> Self {
        Self {
            heading: "Add todo",
            action: "/add/".to_string(),
            ..Self::default()
        }
    }

    pub fn edit(todo: &TodoItem) -> Self {
        Self {
            heading: "Edit todo",
            action: format!("/edit/{}/", todo.id),
            task_name: todo.task_name.clone(),
            task_description: todo.task_description.clone().unwrap_or_default(),
            is_completed: todo.is_completed,
            error: None,
        }
    }
}

pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn load() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self { tera })
    }

    pub fn list(
        &self,
        todos: &[TodoItem],
        filter: FilterMode,
        search: &str,
    ) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("todos", todos);
        context.insert("filter", filter.as_str());
        context.insert("filters", &FILTER_OPTIONS);
        context.insert("search", search);
        self.tera.render("list.html", &context)
    }

    pub fn form(&self, page: &FormPage) -> Result<String, tera::Error> {
        self.tera
            .render("form.html", &Context::from_serialize(page)?)
    }

    pub fn confirm_delete(&self, todo: &TodoItem) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("todo", todo);
        self.tera.render("confirm_delete.html", &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::TodoId;

    fn todo(name: &str) -> TodoItem {
        TodoItem {
            id: TodoId::new(3),
            task_name: name.to_string(),
            task_description: None,
            is_completed: true,
        }
    }

    #[test]
    fn templates_parse() {
        assert!(Templates::load().is_ok());
    }

    #[test]
    fn list_marks_selected_filter_and_escapes_names() {
        let templates = Templates::load().unwrap();
        let html = templates
            .list(&[todo("<b>bold</b>")], FilterMode::NotCompleted, "a&b")
            .unwrap();

        assert!(html.contains(r#"<option value="not_completed" selected>"#));
        assert!(html.contains("&lt;b&gt;bold&lt;&#x2F;b&gt;"));
        assert!(html.contains(r#"value="a&amp;b""#));
        assert!(html.contains(r#"href="/edit/3/""#));
    }

    #[test]
    fn empty_list_says_so() {
        let templates = Templates::load().unwrap();
        let html = templates.list(&[], FilterMode::Completed, "").unwrap();
        assert!(html.contains("No todos match."));
    }

    #[test]
    fn form_action_is_not_escaped() {
        let templates = Templates::load().unwrap();
        let html = templates.form(&FormPage::create()).unwrap();
        assert!(html.contains(r#"action="/add/""#));
        assert!(!html.contains("&#x2F;"));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let templates = Templates::load().unwrap();
        let html = templates.form(&FormPage::edit(&todo("Walk dog"))).unwrap();
        assert!(html.contains(r#"action="/edit/3/""#));
        assert!(html.contains(r#"value="Walk dog""#));
        assert!(html.contains(" checked"));
    }
}
