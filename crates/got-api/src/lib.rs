//! JSON REST API for the character store.
//!
//! Exposes an axum [`Router`] backed by any [`CharacterStore`] plus a
//! [`SearchIndex`] for free-text search. Transport concerns (listener,
//! tracing layers) are the caller's responsibility.
//!
//! | Method   | Path                 | Notes                                   |
//! |----------|----------------------|-----------------------------------------|
//! | `GET`    | `/ping`              | `pong`                                  |
//! | `GET`    | `/characters`        | `?page=N`, 25 per page                  |
//! | `POST`   | `/characters`        | create + add relationships              |
//! | `GET`    | `/characters/{name}` | 404 if absent                           |
//! | `PUT`    | `/characters/{name}` | update + replace relationships          |
//! | `DELETE` | `/characters/{name}` | `{}` even if nothing matched            |
//! | `GET`    | `/elastic/search`    | `?term=T`, 404 if nothing matches       |

pub mod characters;
pub mod error;
pub mod search;

use std::{sync::Arc, time::Duration};

use axum::{Router, routing::get};
use got_core::{Context, search::SearchIndex, store::CharacterStore};
use tokio_util::sync::DropGuard;

pub use error::ApiError;

/// Shared state for all handlers.
pub struct ApiState<S, I> {
  pub store:           Arc<S>,
  pub index:           Arc<I>,
  /// Deadline applied to each request's store or index work.
  pub request_timeout: Option<Duration>,
}

// Manual impl: `S` and `I` need not be `Clone` themselves.
impl<S, I> Clone for ApiState<S, I> {
  fn clone(&self) -> Self {
    Self {
      store:           self.store.clone(),
      index:           self.index.clone(),
      request_timeout: self.request_timeout,
    }
  }
}

impl<S, I> ApiState<S, I> {
  pub fn new(store: Arc<S>, index: Arc<I>) -> Self {
    Self { store, index, request_timeout: None }
  }

  pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
    self.request_timeout = Some(timeout);
    self
  }

  /// A fresh context for one request. Dropping the guard cancels it, so work
  /// is abandoned when the client disconnects and the handler is dropped.
  pub(crate) fn request_context(&self) -> (Context, DropGuard) {
    let ctx = Context::new().child(self.request_timeout);
    let guard = ctx.token().clone().drop_guard();
    (ctx, guard)
  }
}

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, I>(state: ApiState<S, I>) -> Router<()>
where
  S: CharacterStore + 'static,
  I: SearchIndex + 'static,
{
  Router::new()
    .route("/ping", get(ping))
    // Characters
    .route(
      "/characters",
      get(characters::list::<S, I>).post(characters::create::<S, I>),
    )
    .route(
      "/characters/{name}",
      get(characters::get_one::<S, I>)
        .put(characters::update::<S, I>)
        .delete(characters::delete::<S, I>),
    )
    // Search
    .route("/elastic/search", get(search::handler::<S, I>))
    .with_state(state)
}

/// `GET /ping`
async fn ping() -> &'static str { "pong" }
