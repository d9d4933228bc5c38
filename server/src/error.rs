//! Request-boundary errors and their HTTP responses.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use todo_core::StoreError;
use tracing::error;

use crate::templates::NOT_FOUND_PAGE;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("template rendering failed: {0}")]
    Template(#[from] tera::Error),

    /// The `{id}` segment of this path is not a todo id at all.
    #[error("no todo at {0}")]
    NoSuchTodo(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Store(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            AppError::NoSuchTodo(_) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Store(_) | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match status {
            StatusCode::NOT_FOUND => (status, Html(NOT_FOUND_PAGE)).into_response(),
            StatusCode::UNPROCESSABLE_ENTITY => (status, Html(self.to_string())).into_response(),
            _ => {
                error!(error = %self, "request failed");
                (status, Html("<h1>Server Error</h1>")).into_response()
            }
        }
    }
}
