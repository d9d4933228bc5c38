//! Command-line and environment configuration.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use todo_core::{MemoryStore, SqliteStore, StoreResult, TodoStore};
use tracing::info;

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", version, about = "Server-rendered todo list")]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "TODO_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite database file. Without it todos are kept in memory only.
    #[arg(long, env = "TODO_DATABASE")]
    pub database: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, env = "TODO_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn open_store(&self) -> StoreResult<Arc<dyn TodoStore>> {
        match &self.database {
            Some(path) => Ok(Arc::new(SqliteStore::open(path)?)),
            None => {
                info!("no database configured, todos will not outlive the process");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}
