//! Error type for `got-elastic`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  Core(#[from] got_core::Error),

  #[error("search request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("search index returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("malformed search response: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
