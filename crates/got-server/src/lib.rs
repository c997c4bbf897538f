//! Process bootstrap shared by the `server` and `import` binaries:
//! configuration, tracing and application assembly.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use axum::Router;
use got_api::{ApiState, api_router};
use got_core::{search::SearchIndex, store::CharacterStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Prefix for environment overrides, e.g. `GOT_PORT=9000`.
pub const ENV_PREFIX: &str = "GOT";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `config.toml` and `GOT_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub store_path:           PathBuf,
  pub elasticsearch_host:   String,
  pub elasticsearch_index:  String,
  /// Zero disables the per-request deadline.
  pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                 "0.0.0.0".to_string(),
      port:                 8080,
      store_path:           PathBuf::from("got.db"),
      elasticsearch_host:   "http://localhost:9200".to_string(),
      elasticsearch_index:  got_elastic::DEFAULT_INDEX.to_string(),
      request_timeout_secs: 30,
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under the environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn request_timeout(&self) -> Option<Duration> {
    (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
  }

  /// The store path with a leading `~` expanded.
  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Bootstrap ───────────────────────────────────────────────────────────────

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the default
/// `INFO` level.
pub fn init_tracing() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();
}

/// The full HTTP application: the API router wrapped in request tracing.
pub fn app<S, I>(state: ApiState<S, I>) -> Router
where
  S: CharacterStore + 'static,
  I: SearchIndex + 'static,
{
  api_router(state).layer(TraceLayer::new_for_http())
}
