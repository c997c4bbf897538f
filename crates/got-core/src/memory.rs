//! In-memory [`UnitOfWork`] for component tests, with fault injection.

use std::cell::{Cell, RefCell};

use thiserror::Error;

use crate::{
  Error,
  character::{
    Actor, ActorId, CharacterFields, CharacterId, CharacterRecord, NewActor,
  },
  relationship::RelationshipKind,
  unit_of_work::{RelatedName, Selection, UnitOfWork},
};

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("injected failure: {0}")]
  Injected(&'static str),
  #[error("unique constraint violated: {0}")]
  Unique(String),
  #[error("foreign key constraint violated")]
  ForeignKey,
  #[error("{0}")]
  Core(#[from] Error),
}

/// A failure to inject into subsequent calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
  InsertActor,
  DeleteActorLinks,
  InsertRelationship,
  /// Lookups of this character name fail (rather than return `None`).
  FindCharacter(String),
  /// Every primitive reports cancellation.
  Cancelled,
}

#[derive(Default)]
struct State {
  actors:        Vec<Actor>,
  characters:    Vec<(CharacterId, String, CharacterFields)>,
  actor_links:   Vec<(ActorId, CharacterId)>,
  relationships: Vec<(CharacterId, CharacterId, RelationshipKind)>,
  next_id:       i64,
}

#[derive(Default)]
pub struct MemoryUnitOfWork {
  state:         RefCell<State>,
  faults:        RefCell<Vec<Fault>>,
  link_attempts: Cell<usize>,
  writes:        Cell<usize>,
}

impl MemoryUnitOfWork {
  pub fn inject(&self, fault: Fault) { self.faults.borrow_mut().push(fault); }

  fn check(&self, fault: &Fault, what: &'static str) -> Result<(), MemoryError> {
    let faults = self.faults.borrow();
    if faults.contains(&Fault::Cancelled) {
      return Err(Error::Cancelled.into());
    }
    if faults.contains(fault) {
      return Err(MemoryError::Injected(what));
    }
    Ok(())
  }

  fn check_cancel(&self) -> Result<(), MemoryError> {
    if self.faults.borrow().contains(&Fault::Cancelled) {
      return Err(Error::Cancelled.into());
    }
    Ok(())
  }

  fn write(&self) { self.writes.set(self.writes.get() + 1); }

  fn next_id(&self) -> i64 {
    let mut state = self.state.borrow_mut();
    state.next_id += 1;
    state.next_id
  }

  fn name_of(&self, id: CharacterId) -> Option<String> {
    self
      .state
      .borrow()
      .characters
      .iter()
      .find(|(cid, ..)| *cid == id)
      .map(|(_, name, _)| name.clone())
  }

  // ── Inspection ────────────────────────────────────────────────────────

  pub fn actor_count(&self) -> usize { self.state.borrow().actors.len() }

  pub fn character_count(&self) -> usize { self.state.borrow().characters.len() }

  pub fn relationship_count(&self) -> usize { self.state.borrow().relationships.len() }

  pub fn link_attempts(&self) -> usize { self.link_attempts.get() }

  pub fn write_count(&self) -> usize { self.writes.get() }

  pub fn actor_link_of(&self, actor: &str) -> Option<String> {
    self
      .state
      .borrow()
      .actors
      .iter()
      .find(|a| a.name == actor)
      .map(|a| a.link.clone())
  }

  /// Names of the actors linked to `character`.
  pub fn actor_links_of(&self, character: &str) -> Vec<String> {
    let state = self.state.borrow();
    let Some((id, ..)) = state.characters.iter().find(|(_, n, _)| n == character) else {
      return Vec::new();
    };
    state
      .actor_links
      .iter()
      .filter(|(_, c)| c == id)
      .filter_map(|(a, _)| state.actors.iter().find(|x| x.actor_id == *a))
      .map(|a| a.name.clone())
      .collect()
  }

  /// Outgoing facts of `character` as sorted `(kind, target)` pairs.
  pub fn relationships_from(&self, character: &str) -> Vec<(RelationshipKind, String)> {
    let Ok(Some(origin)) = self.find_character_id(character) else {
      return Vec::new();
    };
    let facts = self.state.borrow().relationships.clone();
    let mut out: Vec<_> = facts
      .into_iter()
      .filter(|(o, ..)| *o == origin)
      .filter_map(|(_, t, k)| self.name_of(t).map(|n| (k, n)))
      .collect();
    out.sort_by(|a, b| (a.0.as_str(), &a.1).cmp(&(b.0.as_str(), &b.1)));
    out
  }
}

impl UnitOfWork for MemoryUnitOfWork {
  type Error = MemoryError;

  fn find_actor_id(&self, name: &str) -> Result<Option<ActorId>, MemoryError> {
    self.check_cancel()?;
    Ok(
      self
        .state
        .borrow()
        .actors
        .iter()
        .find(|a| a.name == name)
        .map(|a| a.actor_id),
    )
  }

  fn insert_actor(&self, actor: NewActor<'_>) -> Result<ActorId, MemoryError> {
    self.check(&Fault::InsertActor, "insert actor")?;
    if self.find_actor_id(actor.name)?.is_some() {
      return Err(MemoryError::Unique(actor.name.to_owned()));
    }
    let actor_id = ActorId(self.next_id());
    self.state.borrow_mut().actors.push(Actor {
      actor_id,
      name: actor.name.to_owned(),
      link: actor.link.to_owned(),
    });
    self.write();
    Ok(actor_id)
  }

  fn insert_actor_link(
    &self,
    actor_id: ActorId,
    character_id: CharacterId,
  ) -> Result<(), MemoryError> {
    self.check_cancel()?;
    self.link_attempts.set(self.link_attempts.get() + 1);
    if self.name_of(character_id).is_none() {
      return Err(MemoryError::ForeignKey);
    }
    let mut state = self.state.borrow_mut();
    if state.actor_links.iter().any(|(_, c)| *c == character_id) {
      return Err(MemoryError::Unique(format!("actor link for {}", character_id.0)));
    }
    state.actor_links.push((actor_id, character_id));
    drop(state);
    self.write();
    Ok(())
  }

  fn delete_actor_links(&self, character_id: CharacterId) -> Result<u64, MemoryError> {
    self.check(&Fault::DeleteActorLinks, "delete actor links")?;
    let mut state = self.state.borrow_mut();
    let before = state.actor_links.len();
    state.actor_links.retain(|(_, c)| *c != character_id);
    let removed = (before - state.actor_links.len()) as u64;
    drop(state);
    self.write();
    Ok(removed)
  }

  fn find_character_id(&self, name: &str) -> Result<Option<CharacterId>, MemoryError> {
    self.check(&Fault::FindCharacter(name.to_owned()), "find character")?;
    Ok(
      self
        .state
        .borrow()
        .characters
        .iter()
        .find(|(_, n, _)| n == name)
        .map(|(id, ..)| *id),
    )
  }

  fn insert_character(
    &self,
    name: &str,
    fields: &CharacterFields,
  ) -> Result<CharacterId, MemoryError> {
    self.check_cancel()?;
    if self.find_character_id(name)?.is_some() {
      return Err(MemoryError::Unique(name.to_owned()));
    }
    let id = CharacterId(self.next_id());
    self
      .state
      .borrow_mut()
      .characters
      .push((id, name.to_owned(), fields.clone()));
    self.write();
    Ok(id)
  }

  fn update_character_fields(
    &self,
    name: &str,
    fields: &CharacterFields,
  ) -> Result<Option<CharacterId>, MemoryError> {
    self.check_cancel()?;
    let mut state = self.state.borrow_mut();
    let Some(row) = state.characters.iter_mut().find(|(_, n, _)| n == name) else {
      return Ok(None);
    };
    row.2 = fields.clone();
    let id = row.0;
    drop(state);
    self.write();
    Ok(Some(id))
  }

  fn delete_character(&self, name: &str) -> Result<u64, MemoryError> {
    self.check_cancel()?;
    let Some(id) = self.find_character_id(name)? else {
      return Ok(0);
    };
    let mut state = self.state.borrow_mut();
    state.characters.retain(|(cid, ..)| *cid != id);
    state.actor_links.retain(|(_, c)| *c != id);
    state.relationships.retain(|(o, t, _)| *o != id && *t != id);
    drop(state);
    self.write();
    Ok(1)
  }

  fn select_characters(
    &self,
    selection: &Selection,
  ) -> Result<Vec<CharacterRecord>, MemoryError> {
    self.check_cancel()?;
    let state = self.state.borrow();
    let rows = state.characters.iter().filter(|(_, n, _)| match selection {
      Selection::ByName(name) => n == name,
      Selection::Page { .. } => true,
    });
    let rows: Vec<_> = match selection {
      Selection::ByName(_) => rows.collect(),
      Selection::Page { limit, offset } => rows
        .skip(*offset as usize)
        .take(*limit as usize)
        .collect(),
    };
    Ok(
      rows
        .into_iter()
        .map(|(id, name, fields)| CharacterRecord {
          character_id: *id,
          name:         name.clone(),
          fields:       fields.clone(),
          actor:        state
            .actor_links
            .iter()
            .find(|(_, c)| c == id)
            .and_then(|(a, _)| state.actors.iter().find(|x| x.actor_id == *a))
            .cloned(),
        })
        .collect(),
    )
  }

  fn insert_relationship(
    &self,
    origin: CharacterId,
    target: CharacterId,
    kind: RelationshipKind,
  ) -> Result<(), MemoryError> {
    self.check(&Fault::InsertRelationship, "insert relationship")?;
    if self.name_of(origin).is_none() || self.name_of(target).is_none() {
      return Err(MemoryError::ForeignKey);
    }
    self.state.borrow_mut().relationships.push((origin, target, kind));
    self.write();
    Ok(())
  }

  fn delete_relationships(&self, origin: CharacterId) -> Result<u64, MemoryError> {
    self.check_cancel()?;
    let mut state = self.state.borrow_mut();
    let before = state.relationships.len();
    state.relationships.retain(|(o, ..)| *o != origin);
    let removed = (before - state.relationships.len()) as u64;
    drop(state);
    self.write();
    Ok(removed)
  }

  fn related_names(&self, origin: CharacterId) -> Result<Vec<RelatedName>, MemoryError> {
    self.check_cancel()?;
    let facts = self.state.borrow().relationships.clone();
    Ok(
      facts
        .into_iter()
        .filter(|(o, ..)| *o == origin)
        .filter_map(|(_, t, kind)| self.name_of(t).map(|name| RelatedName { kind, name }))
        .collect(),
    )
  }

  fn killers_of(&self, target: CharacterId) -> Result<Vec<String>, MemoryError> {
    self.check_cancel()?;
    let facts = self.state.borrow().relationships.clone();
    Ok(
      facts
        .into_iter()
        .filter(|(_, t, k)| *t == target && *k == RelationshipKind::Killed)
        .filter_map(|(o, ..)| self.name_of(o))
        .collect(),
    )
  }
}
