//! Actor linkage: get-or-create an actor and (un)link it to a character.
//!
//! Resolve-or-create is not atomic against a concurrent creator of the same
//! name; the store's uniqueness constraint rejects the loser.

use tracing::debug;

use crate::{
  Error, Result, UnitOfWork,
  character::{ActorId, CharacterId, NewActor},
};

/// Look up an actor by exact name, creating it with `actor.link` if absent.
pub fn resolve_or_create_actor<U: UnitOfWork>(
  uow: &U,
  actor: NewActor<'_>,
) -> Result<ActorId> {
  if let Some(id) = uow
    .find_actor_id(actor.name)
    .map_err(|e| Error::persistence("get actor", e))?
  {
    return Ok(id);
  }

  let id = uow
    .insert_actor(actor)
    .map_err(|e| Error::persistence("create actor", e))?;
  debug!(actor = actor.name, actor_id = id.0, "created actor");
  Ok(id)
}

/// Insert the join fact linking `actor_id` to `character_id`.
pub fn link<U: UnitOfWork>(
  uow: &U,
  actor_id: ActorId,
  character_id: CharacterId,
) -> Result<()> {
  uow
    .insert_actor_link(actor_id, character_id)
    .map_err(|e| Error::persistence("link actor to character", e))
}

/// Remove every actor link for `character_id`. Removing nothing is not an
/// error.
pub fn unlink<U: UnitOfWork>(uow: &U, character_id: CharacterId) -> Result<()> {
  let removed = uow
    .delete_actor_links(character_id)
    .map_err(|e| Error::persistence("unlink actor", e))?;
  debug!(character_id = character_id.0, removed, "unlinked actors");
  Ok(())
}
