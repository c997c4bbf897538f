//! Bulk import. Create every character, then wire every relationship.
//!
//! Characters go in first so relationship resolution sees the whole batch
//! regardless of file order. The caller supplies the unit of work and owns
//! the transaction around it; the first failure aborts the run.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
  Result, UnitOfWork, character::CharacterEntry, characters, relationships,
};

/// The bulk import document: `{"characters": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportDocument {
  pub characters: Vec<CharacterEntry>,
}

/// Totals for a completed import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
  pub characters:            usize,
  pub relationships:         usize,
  pub skipped_relationships: usize,
}

pub fn import_all<U: UnitOfWork>(uow: &U, entries: &[CharacterEntry]) -> Result<ImportSummary> {
  let mut summary = ImportSummary::default();

  for entry in entries {
    info!(character = %entry.character_name, "creating character");
    characters::create_character_and_actor(uow, entry)?;
    summary.characters += 1;
  }

  for entry in entries {
    info!(character = %entry.character_name, "adding relationships");
    let added = relationships::add_all(uow, entry)?;
    summary.relationships += added.inserted;
    summary.skipped_relationships += added.skipped;
  }

  Ok(summary)
}
