//! Handlers for `/characters` endpoints.
//!
//! Create and update are two store calls each: the character (with its
//! actor link) first, then its relationships. Both echo the submitted entry.

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
};
use got_core::{character::CharacterEntry, search::SearchIndex, store::CharacterStore};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Kept as text so a malformed value yields a JSON error body.
  pub page: Option<String>,
}

/// Absent or blank means the first page.
fn parse_page(raw: Option<&str>) -> Result<u32, ApiError> {
  match raw.map(str::trim) {
    None | Some("") => Ok(0),
    Some(s) => s
      .parse()
      .map_err(|_| ApiError::BadRequest(format!("invalid page {s:?}: expected a non-negative integer"))),
  }
}

/// `GET /characters[?page=N]`
pub async fn list<S, I>(
  State(state): State<ApiState<S, I>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<CharacterEntry>>, ApiError>
where
  S: CharacterStore,
  I: SearchIndex,
{
  let page = parse_page(params.page.as_deref())?;
  let (ctx, _guard) = state.request_context();
  let entries = state
    .store
    .fetch_page(ctx, page)
    .await
    .map_err(ApiError::from_source)?;
  Ok(Json(entries))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /characters/{name}` — a one-element array, or 404.
pub async fn get_one<S, I>(
  State(state): State<ApiState<S, I>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<CharacterEntry>>, ApiError>
where
  S: CharacterStore,
  I: SearchIndex,
{
  let (ctx, _guard) = state.request_context();
  let entries = state
    .store
    .fetch_by_name(ctx, name.clone())
    .await
    .map_err(ApiError::from_source)?;
  if entries.is_empty() {
    return Err(ApiError::NotFound(format!("character {name:?}")));
  }
  Ok(Json(entries))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /characters`
pub async fn create<S, I>(
  State(state): State<ApiState<S, I>>,
  payload: Result<Json<CharacterEntry>, JsonRejection>,
) -> Result<Json<CharacterEntry>, ApiError>
where
  S: CharacterStore,
  I: SearchIndex,
{
  let Json(entry) = payload?;
  let (ctx, _guard) = state.request_context();

  state
    .store
    .create_character_and_actor(ctx.clone(), entry.clone())
    .await
    .map_err(ApiError::from_source)?;
  let added = state
    .store
    .add_relationships(ctx, entry.clone())
    .await
    .map_err(ApiError::from_source)?;

  info!(
    character = %entry.character_name,
    relationships = added.inserted,
    skipped = added.skipped,
    "character created"
  );
  Ok(Json(entry))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /characters/{name}` — a body without `characterName` targets `name`.
pub async fn update<S, I>(
  State(state): State<ApiState<S, I>>,
  Path(name): Path<String>,
  payload: Result<Json<CharacterEntry>, JsonRejection>,
) -> Result<Json<CharacterEntry>, ApiError>
where
  S: CharacterStore,
  I: SearchIndex,
{
  let Json(mut entry) = payload?;
  if entry.character_name.is_empty() {
    entry.character_name = name.clone();
  }
  let (ctx, _guard) = state.request_context();

  state
    .store
    .update_character_and_actor(ctx.clone(), entry.clone(), name)
    .await
    .map_err(ApiError::from_source)?;
  let added = state
    .store
    .update_relationships(ctx, entry.clone())
    .await
    .map_err(ApiError::from_source)?;

  info!(
    character = %entry.character_name,
    relationships = added.inserted,
    skipped = added.skipped,
    "character updated"
  );
  Ok(Json(entry))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /characters/{name}` — `{}` whether or not a row matched.
pub async fn delete<S, I>(
  State(state): State<ApiState<S, I>>,
  Path(name): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: CharacterStore,
  I: SearchIndex,
{
  let (ctx, _guard) = state.request_context();
  state
    .store
    .delete_by_name(ctx, name)
    .await
    .map_err(ApiError::from_source)?;
  Ok(Json(json!({})))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn page_defaults_to_zero() {
    assert_eq!(parse_page(None).unwrap(), 0);
    assert_eq!(parse_page(Some("3")).unwrap(), 3);
    assert_eq!(parse_page(Some("")).unwrap(), 0);
    assert_eq!(parse_page(Some("  ")).unwrap(), 0);
  }

  #[test]
  fn page_rejects_negative_and_text() {
    assert!(matches!(parse_page(Some("-1")), Err(ApiError::BadRequest(_))));
    assert!(matches!(parse_page(Some("two")), Err(ApiError::BadRequest(_))));
  }
}
