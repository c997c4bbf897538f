//! Character persistence — create, update, fetch and delete character rows,
//! composing with [`crate::actors`] for the actor link.
//!
//! Each function is one unit of work over the supplied [`UnitOfWork`]; no
//! state survives between calls.

use tracing::{debug, info};

use crate::{
  Error, Result, UnitOfWork, actors,
  character::{CharacterEntry, CharacterId, CharacterRecord},
  relationship::RelationshipKind,
  unit_of_work::Selection,
};

/// Rows per page returned by [`fetch_page`].
pub const PAGE_SIZE: u32 = 25;

/// Resolve `name` to a character identity.
pub fn character_id<U: UnitOfWork>(uow: &U, name: &str) -> Result<Option<CharacterId>> {
  uow
    .find_character_id(name)
    .map_err(|e| Error::persistence(format!("get character {name:?}"), e))
}

/// Reject entries that cannot be stored.
pub fn validate(entry: &CharacterEntry) -> Result<()> {
  if entry.character_name.trim().is_empty() {
    return Err(Error::Validation("characterName must not be empty".into()));
  }
  Ok(())
}

/// Create the character (if absent) and link its actor (if named).
///
/// Re-posting an existing name reuses the stored row without touching its
/// fields, but still runs the actor step, replacing any previous link.
pub fn create_character_and_actor<U: UnitOfWork>(
  uow: &U,
  entry: &CharacterEntry,
) -> Result<CharacterId> {
  validate(entry)?;

  let actor_id = entry
    .actor()
    .map(|actor| actors::resolve_or_create_actor(uow, actor))
    .transpose()?;

  let existing = character_id(uow, &entry.character_name)?;
  let character_id = match existing {
    Some(existing) => {
      debug!(character = %entry.character_name, "character exists, reusing");
      existing
    }
    None => {
      let id = uow
        .insert_character(&entry.character_name, &entry.fields())
        .map_err(|e| Error::persistence("create character", e))?;
      info!(character = %entry.character_name, character_id = id.0, "created character");
      id
    }
  };

  if let Some(actor_id) = actor_id {
    // A character holds at most one actor link.
    if existing.is_some() {
      actors::unlink(uow, character_id)?;
    }
    actors::link(uow, actor_id, character_id)?;
  }

  Ok(character_id)
}

/// Overwrite the mutable fields of `existing_name` and replace its actor
/// link. Never creates a character; the name itself is not updatable.
pub fn update_character_and_actor<U: UnitOfWork>(
  uow: &U,
  entry: &CharacterEntry,
  existing_name: &str,
) -> Result<CharacterId> {
  if !entry.character_name.is_empty() && entry.character_name != existing_name {
    return Err(Error::Validation(format!(
      "characterName {:?} does not match {existing_name:?}; renaming is not supported",
      entry.character_name
    )));
  }

  let character_id = character_id(uow, existing_name)?
    .ok_or_else(|| Error::CharacterNotFound(existing_name.to_owned()))?;

  uow
    .update_character_fields(existing_name, &entry.fields())
    .map_err(|e| Error::persistence("update character", e))?
    .ok_or_else(|| Error::CharacterNotFound(existing_name.to_owned()))?;

  actors::unlink(uow, character_id)?;

  if let Some(actor) = entry.actor() {
    let actor_id = actors::resolve_or_create_actor(uow, actor)?;
    actors::link(uow, actor_id, character_id)?;
  }

  info!(character = existing_name, character_id = character_id.0, "updated character");
  Ok(character_id)
}

/// The character named `name` with its relationships denormalised into the
/// named lists. Empty if absent.
pub fn fetch_by_name<U: UnitOfWork>(uow: &U, name: &str) -> Result<Vec<CharacterEntry>> {
  fetch(uow, &Selection::ByName(name.to_owned()))
}

/// Page `page` (zero-based) of [`PAGE_SIZE`] characters.
pub fn fetch_page<U: UnitOfWork>(uow: &U, page: u32) -> Result<Vec<CharacterEntry>> {
  fetch(
    uow,
    &Selection::Page {
      limit:  PAGE_SIZE,
      offset: u64::from(page) * u64::from(PAGE_SIZE),
    },
  )
}

/// Delete the character named `name`. Succeeds when nothing matched.
pub fn delete_by_name<U: UnitOfWork>(uow: &U, name: &str) -> Result<u64> {
  let removed = uow
    .delete_character(name)
    .map_err(|e| Error::persistence("delete character", e))?;
  info!(character = name, removed, "deleted character");
  Ok(removed)
}

fn fetch<U: UnitOfWork>(uow: &U, selection: &Selection) -> Result<Vec<CharacterEntry>> {
  let records = uow
    .select_characters(selection)
    .map_err(|e| Error::persistence("select characters", e))?;
  records.into_iter().map(|record| project(uow, record)).collect()
}

/// Attach relationship names to a stored row. Names repeat in storage when
/// facts were added twice; each list comes back sorted and distinct.
fn project<U: UnitOfWork>(uow: &U, record: CharacterRecord) -> Result<CharacterEntry> {
  let id = record.character_id;
  let mut entry = record.into_entry();

  let related = uow
    .related_names(id)
    .map_err(|e| Error::persistence("select relationships", e))?;
  for fact in related {
    entry.related_mut(fact.kind).push(fact.name);
  }

  entry.killed_by = uow
    .killers_of(id)
    .map_err(|e| Error::persistence("select killers", e))?;

  for kind in RelationshipKind::ALL {
    sort_distinct(entry.related_mut(kind));
  }
  sort_distinct(&mut entry.killed_by);

  Ok(entry)
}

fn sort_distinct(names: &mut Vec<String>) {
  names.sort_unstable();
  names.dedup();
}
