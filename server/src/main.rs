use anyhow::{anyhow, Context};
use clap::Parser;
use tokio::net::TcpListener;
use todo_server::{AppState, Config};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    todo_server::logging::init(&config.log_level).map_err(|e| anyhow!(e))?;

    let store = config.open_store().context("opening todo store")?;
    let state = AppState::new(store).context("loading templates")?;

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");
    todo_server::run(listener, state).await?;
    Ok(())
}
