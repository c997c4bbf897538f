//! The [`UnitOfWork`] capability — statement-level store access.
//!
//! A unit of work is either a plain connection (each primitive independently
//! atomic) or an open transaction (the caller commits or rolls back). The
//! components in [`crate::actors`], [`crate::characters`] and
//! [`crate::relationships`] take a unit of work explicitly rather than
//! switching executors internally.
//!
//! Every primitive is one store round-trip and should fail fast once the
//! implementation's [`crate::Context`] is cancelled.

use crate::{
  character::{
    ActorId, CharacterFields, CharacterId, CharacterRecord, NewActor,
  },
  relationship::RelationshipKind,
};

/// Which character rows a projection reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
  /// The single row with this exact name (zero or one result).
  ByName(String),
  /// A window over all rows in the store's natural order.
  Page { limit: u32, offset: u64 },
}

/// One outgoing relationship fact, resolved to the target's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedName {
  pub kind: RelationshipKind,
  pub name: String,
}

pub trait UnitOfWork {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Actors ────────────────────────────────────────────────────────────

  /// Exact-name lookup. `None` if absent.
  fn find_actor_id(&self, name: &str) -> Result<Option<ActorId>, Self::Error>;

  fn insert_actor(&self, actor: NewActor<'_>) -> Result<ActorId, Self::Error>;

  /// Insert one character-actor join fact.
  fn insert_actor_link(
    &self,
    actor_id: ActorId,
    character_id: CharacterId,
  ) -> Result<(), Self::Error>;

  /// Delete every join fact for `character_id`; returns the rows removed.
  fn delete_actor_links(
    &self,
    character_id: CharacterId,
  ) -> Result<u64, Self::Error>;

  // ── Characters ────────────────────────────────────────────────────────

  /// Exact-name lookup. `None` if absent.
  fn find_character_id(
    &self,
    name: &str,
  ) -> Result<Option<CharacterId>, Self::Error>;

  fn insert_character(
    &self,
    name: &str,
    fields: &CharacterFields,
  ) -> Result<CharacterId, Self::Error>;

  /// Overwrite the mutable columns of the row named `name`. Returns the
  /// row's identity, or `None` if no row matched.
  fn update_character_fields(
    &self,
    name: &str,
    fields: &CharacterFields,
  ) -> Result<Option<CharacterId>, Self::Error>;

  /// Delete the row named `name`; returns the rows removed. Actor links and
  /// relationship facts go with it through the store's cascade rules.
  fn delete_character(&self, name: &str) -> Result<u64, Self::Error>;

  /// Rows joined with their linked actor.
  fn select_characters(
    &self,
    selection: &Selection,
  ) -> Result<Vec<CharacterRecord>, Self::Error>;

  // ── Relationships ─────────────────────────────────────────────────────

  fn insert_relationship(
    &self,
    origin: CharacterId,
    target: CharacterId,
    kind: RelationshipKind,
  ) -> Result<(), Self::Error>;

  /// Delete every fact originating from `origin`; returns the rows removed.
  fn delete_relationships(&self, origin: CharacterId) -> Result<u64, Self::Error>;

  /// Outgoing facts of `origin`, in insertion order, with duplicates.
  fn related_names(
    &self,
    origin: CharacterId,
  ) -> Result<Vec<RelatedName>, Self::Error>;

  /// Names of the characters holding a `killed` fact that targets `target`.
  fn killers_of(&self, target: CharacterId) -> Result<Vec<String>, Self::Error>;
}
