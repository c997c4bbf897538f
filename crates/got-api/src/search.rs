//! Handler for `GET /elastic/search`.

use axum::{
  Json,
  extract::{Query, State},
};
use got_core::{character::CharacterEntry, search::SearchIndex, store::CharacterStore};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  /// Free text matched against character names, actor names and siblings.
  #[serde(default)]
  pub term: String,
}

/// `GET /elastic/search?term=T` — 404 when nothing matches.
pub async fn handler<S, I>(
  State(state): State<ApiState<S, I>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CharacterEntry>>, ApiError>
where
  S: CharacterStore,
  I: SearchIndex,
{
  let (ctx, _guard) = state.request_context();
  let entries = state
    .index
    .search(ctx, params.term.clone())
    .await
    .map_err(ApiError::from_source)?;
  if entries.is_empty() {
    return Err(ApiError::NotFound(format!("no matches for {:?}", params.term)));
  }
  Ok(Json(entries))
}
