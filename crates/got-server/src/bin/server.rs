//! HTTP server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `GOT_*` environment variables, opens the SQLite store, and serves the JSON
//! API.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use got_api::ApiState;
use got_elastic::ElasticClient;
use got_server::ServerConfig;
use got_store_sqlite::SqliteStore;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(author, version, about = "Character store HTTP server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  got_server::init_tracing();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config).context("failed to load configuration")?;

  let store_path = cfg.store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let index = ElasticClient::new(&cfg.elasticsearch_host, &cfg.elasticsearch_index)
    .context("failed to build search client")?;

  let mut state = ApiState::new(Arc::new(store), Arc::new(index));
  if let Some(timeout) = cfg.request_timeout() {
    state = state.with_request_timeout(timeout);
  }

  let app = got_server::app(state);
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
