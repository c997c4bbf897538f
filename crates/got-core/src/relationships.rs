//! Relationship synchronization — resolve a character's named relationships
//! to identities and persist them as directional facts.
//!
//! Counterparts that are not (yet) in the store are logged and skipped, so
//! import order between characters does not matter. [`add_all`] appends and
//! is not idempotent; [`update_all`] replaces the whole outgoing set first.

use tracing::{debug, warn};

use crate::{
  Error, Result, UnitOfWork,
  character::{CharacterEntry, CharacterId},
  characters,
  relationship::RelationshipKind,
};

/// Outcome of [`add_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddSummary {
  pub inserted: usize,
  pub skipped:  usize,
}

/// Insert one fact per resolvable name in the entry's four relationship
/// lists. The entry's own character must already exist.
pub fn add_all<U: UnitOfWork>(uow: &U, entry: &CharacterEntry) -> Result<AddSummary> {
  let origin = resolve_origin(uow, &entry.character_name)?;
  let mut summary = AddSummary::default();

  for kind in RelationshipKind::ALL {
    for name in entry.related(kind) {
      let target = match characters::character_id(uow, name) {
        Ok(Some(target)) => target,
        Ok(None) => {
          warn!(character = %entry.character_name, %kind, related = %name, "related character not found, skipping");
          summary.skipped += 1;
          continue;
        }
        Err(e) if kind.lookup_error_is_fatal() || e.is_cancellation() => return Err(e),
        Err(e) => {
          warn!(character = %entry.character_name, %kind, related = %name, error = %e, "related character lookup failed, skipping");
          summary.skipped += 1;
          continue;
        }
      };

      uow
        .insert_relationship(origin, target, kind)
        .map_err(|e| Error::persistence(format!("create {kind} for {:?}", entry.character_name), e))?;
      summary.inserted += 1;
    }
  }

  debug!(
    character = %entry.character_name,
    inserted = summary.inserted,
    skipped = summary.skipped,
    "added relationships"
  );
  Ok(summary)
}

/// Replace every fact originating from the entry's character with the
/// entry's current lists.
pub fn update_all<U: UnitOfWork>(uow: &U, entry: &CharacterEntry) -> Result<AddSummary> {
  let origin = resolve_origin(uow, &entry.character_name)?;
  delete_all(uow, origin)?;
  add_all(uow, entry)
}

/// Delete every fact originating from `origin`. Facts targeting `origin`
/// belong to their own origin and are left alone.
pub fn delete_all<U: UnitOfWork>(uow: &U, origin: CharacterId) -> Result<u64> {
  uow
    .delete_relationships(origin)
    .map_err(|e| Error::persistence("delete relationships", e))
}

/// Resolve `name` and delete its outgoing facts.
pub fn delete_all_by_name<U: UnitOfWork>(uow: &U, name: &str) -> Result<u64> {
  let origin = resolve_origin(uow, name)?;
  delete_all(uow, origin)
}

fn resolve_origin<U: UnitOfWork>(uow: &U, name: &str) -> Result<CharacterId> {
  characters::character_id(uow, name)?
    .ok_or_else(|| Error::CharacterNotFound(name.to_owned()))
}
