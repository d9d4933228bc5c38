//! One handler per page. Each calls the store directly and either renders a
//! template or redirects back to the list.

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use todo_core::{StoreError, TodoId, TodoQuery};
use tracing::{debug, info};

use crate::error::AppError;
use crate::forms::TodoForm;
use crate::templates::FormPage;
use crate::AppState;

/// Query string of the list page.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub filter: Option<String>,
    pub search: Option<String>,
}

/// The `{id}` segment of the edit and delete routes. A segment that is not
/// a valid id gets the same 404 page as an id with no todo behind it.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub TodoId);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<TodoId>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(IdPath(id)),
            Err(rejection) => {
                debug!(path = %parts.uri.path(), %rejection, "unparseable todo id");
                Err(AppError::NoSuchTodo(parts.uri.path().to_string()))
            }
        }
    }
}

pub async fn list_todos(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, AppError> {
    let query = TodoQuery::from_params(params.filter.as_deref(), params.search.as_deref());
    let todos = state.store.list(&query)?;
    debug!(filter = %query.filter, search = ?query.search(), results = todos.len(), "listed todos");

    let search = params.search.as_deref().unwrap_or_default();
    Ok(Html(state.templates.list(&todos, query.filter, search)?))
}

pub async fn create_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.templates.form(&FormPage::create())?))
}

pub async fn create_todo(
    State(state): State<AppState>,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    match state.store.create(form.to_new()) {
        Ok(todo) => {
            info!(todo_id = %todo.id, "todo created");
            Ok(Redirect::to("/").into_response())
        }
        Err(StoreError::Validation(err)) => {
            debug!(error = %err, "rejected todo form");
            let page = form.refill(FormPage::create(), err.to_string());
            Ok(Html(state.templates.form(&page)?).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Html<String>, AppError> {
    let todo = state.store.get(id)?;
    Ok(Html(state.templates.form(&FormPage::edit(&todo))?))
}

pub async fn update_todo(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    match state.store.update(id, form.to_patch()) {
        Ok(todo) => {
            info!(todo_id = %todo.id, "todo updated");
            Ok(Redirect::to("/").into_response())
        }
        Err(StoreError::Validation(err)) => {
            debug!(todo_id = %id, error = %err, "rejected todo form");
            let current = state.store.get(id)?;
            let page = form.refill(FormPage::edit(&current), err.to_string());
            Ok(Html(state.templates.form(&page)?).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn confirm_delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Html<String>, AppError> {
    let todo = state.store.get(id)?;
    Ok(Html(state.templates.confirm_delete(&todo)?))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Redirect, AppError> {
    state.store.delete(id)?;
    info!(todo_id = %id, "todo deleted");
    Ok(Redirect::to("/"))
}
