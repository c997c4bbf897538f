//! Bulk import binary.
//!
//! Loads a `{"characters": [...]}` document and imports it in a single
//! transaction: every character first, then every relationship. Any failure
//! rolls the whole run back.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use got_core::{Context, import::ImportDocument, store::CharacterStore};
use got_server::ServerConfig;
use got_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Bulk-import characters into the store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// JSON document to import.
  #[arg(default_value = "data/got-characters.json")]
  file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  got_server::init_tracing();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config).context("failed to load configuration")?;

  let raw = tokio::fs::read_to_string(&cli.file)
    .await
    .with_context(|| format!("failed to read {:?}", cli.file))?;
  let doc: ImportDocument = serde_json::from_str(&raw)
    .with_context(|| format!("failed to parse {:?}", cli.file))?;
  tracing::info!(characters = doc.characters.len(), file = ?cli.file, "loaded import document");

  let store_path = cfg.store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let summary = store
    .import(Context::new(), doc.characters)
    .await
    .context("import failed, nothing was committed")?;

  tracing::info!(
    characters = summary.characters,
    relationships = summary.relationships,
    skipped_relationships = summary.skipped_relationships,
    "import committed"
  );
  Ok(())
}
