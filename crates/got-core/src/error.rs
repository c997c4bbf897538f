//! Error types for `got-core`.

use thiserror::Error;

/// A boxed error produced by a [`crate::UnitOfWork`] implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed input, rejected before any store access.
  #[error("validation failure: {0}")]
  Validation(String),

  /// A store read or write failed during `step`.
  #[error("{step}: persistence failure: {source}")]
  Persistence {
    step:   String,
    #[source]
    source: BoxError,
  },

  /// The character an update or relationship sync targets does not exist.
  #[error("persistence failure: character not found: {0}")]
  CharacterNotFound(String),

  #[error("operation cancelled")]
  Cancelled,

  #[error("operation deadline exceeded")]
  DeadlineExceeded,
}

impl Error {
  /// Wrap a unit-of-work failure with the step it happened in.
  ///
  /// A cancellation anywhere in the source chain is surfaced as-is so callers
  /// can tell an aborted operation from a failed one.
  pub fn persistence<E>(step: impl Into<String>, source: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    if let Some(cancelled) = cancellation_in(&source) {
      return cancelled;
    }
    Error::Persistence { step: step.into(), source: Box::new(source) }
  }

  /// `true` for cancellation and deadline expiry.
  pub fn is_cancellation(&self) -> bool {
    matches!(self, Self::Cancelled | Self::DeadlineExceeded)
  }
}

fn cancellation_in(err: &(dyn std::error::Error + 'static)) -> Option<Error> {
  let mut current = Some(err);
  while let Some(e) = current {
    match e.downcast_ref::<Error>() {
      Some(Error::Cancelled) => return Some(Error::Cancelled),
      Some(Error::DeadlineExceeded) => return Some(Error::DeadlineExceeded),
      _ => {}
    }
    current = e.source();
  }
  None
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
