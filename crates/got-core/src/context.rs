//! Cancellation and deadline context threaded through every operation.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{Error, Result};

/// A cancellation token plus an optional deadline.
///
/// Cloning is cheap and clones observe the same cancellation.
#[derive(Debug, Clone, Default)]
pub struct Context {
  token:    CancellationToken,
  deadline: Option<Instant>,
}

impl Context {
  /// A context that is never cancelled unless [`Context::cancel`] is called.
  pub fn new() -> Self { Self::default() }

  /// A context whose deadline is `timeout` from now.
  pub fn with_timeout(timeout: Duration) -> Self {
    Self { token: CancellationToken::new(), deadline: Some(Instant::now() + timeout) }
  }

  /// Derive a context cancelled together with `self`. The child keeps the
  /// earlier of the two deadlines.
  pub fn child(&self, timeout: Option<Duration>) -> Self {
    let own = timeout.map(|t| Instant::now() + t);
    let deadline = match (self.deadline, own) {
      (Some(a), Some(b)) => Some(a.min(b)),
      (a, b) => a.or(b),
    };
    Self { token: self.token.child_token(), deadline }
  }

  pub fn token(&self) -> &CancellationToken { &self.token }

  pub fn deadline(&self) -> Option<Instant> { self.deadline }

  pub fn cancel(&self) { self.token.cancel(); }

  /// Fail if the context has been cancelled or its deadline has passed.
  pub fn check(&self) -> Result<()> {
    if self.token.is_cancelled() {
      return Err(Error::Cancelled);
    }
    if self.deadline.is_some_and(|d| Instant::now() >= d) {
      return Err(Error::DeadlineExceeded);
    }
    Ok(())
  }

  /// Resolves with the reason once the context is cancelled or expires.
  pub async fn done(&self) -> Error {
    match self.deadline {
      Some(deadline) => tokio::select! {
        _ = self.token.cancelled() => Error::Cancelled,
        _ = tokio::time::sleep_until(deadline) => Error::DeadlineExceeded,
      },
      None => {
        self.token.cancelled().await;
        Error::Cancelled
      }
    }
  }
}
