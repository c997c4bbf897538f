//! The `SearchIndex` trait — free-text search against an external index.

use std::future::Future;

use crate::{Context, character::CharacterEntry};

pub trait SearchIndex: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Characters matching `term`, best match first. Empty when nothing
  /// matches.
  fn search(
    &self,
    ctx: Context,
    term: String,
  ) -> impl Future<Output = Result<Vec<CharacterEntry>, Self::Error>> + Send + '_;
}
