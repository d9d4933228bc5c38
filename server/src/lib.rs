//! Server-rendered HTML front end for the todo list.
//!
//! # Overview
//! An axum router with one page per operation: the filtered list, the
//! add/edit form, and the delete confirmation. Mutations redirect back to
//! the list with `303 See Other`; form errors re-render the form.
//!
//! # Design
//! - `AppState` holds the store as `Arc<dyn TodoStore>`, so the same router
//!   runs over the in-memory or SQLite backend.
//! - Handlers call the synchronous store inline; every store call is a
//!   short, bounded operation.

pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod logging;
pub mod templates;

use std::sync::Arc;

use axum::{routing::get, Router};
use todo_core::TodoStore;
use tokio::net::TcpListener;

pub use config::Config;
pub use error::AppError;
use templates::Templates;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
    templates: Arc<Templates>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Result<Self, tera::Error> {
        Ok(Self {
            store,
            templates: Arc::new(Templates::load()?),
        })
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_todos))
        .route(
            "/add/",
            get(handlers::create_form).post(handlers::create_todo),
        )
        .route(
            "/edit/{id}/",
            get(handlers::edit_form).post(handlers::update_todo),
        )
        .route(
            "/delete/{id}/",
            get(handlers::confirm_delete).post(handlers::delete_todo),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutting down"),
        Err(err) => {
            tracing::warn!(error = %err, "cannot listen for ctrl-c; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
