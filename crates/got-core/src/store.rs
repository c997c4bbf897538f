//! The `CharacterStore` trait — the async surface over the components.
//!
//! The trait is implemented by storage backends (e.g. `got-store-sqlite`).
//! Higher layers (`got-api`, the importer) depend on this abstraction, not on
//! any concrete backend. Each method is one transaction-scoped unit of work;
//! sequences that must commit together go through [`CharacterStore::import`]
//! or a backend-specific unit-of-work entry point.

use std::future::Future;

use crate::{
  Context,
  character::{CharacterEntry, CharacterId},
  import::ImportSummary,
  relationships::AddSummary,
};

/// Abstraction over a character store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CharacterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Characters ────────────────────────────────────────────────────────

  /// Create the character if absent and link its actor, if named.
  fn create_character_and_actor(
    &self,
    ctx: Context,
    entry: CharacterEntry,
  ) -> impl Future<Output = Result<CharacterId, Self::Error>> + Send + '_;

  /// Overwrite `existing_name`'s mutable fields and replace its actor link.
  fn update_character_and_actor(
    &self,
    ctx: Context,
    entry: CharacterEntry,
    existing_name: String,
  ) -> impl Future<Output = Result<CharacterId, Self::Error>> + Send + '_;

  /// Zero or one entries.
  fn fetch_by_name(
    &self,
    ctx: Context,
    name: String,
  ) -> impl Future<Output = Result<Vec<CharacterEntry>, Self::Error>> + Send + '_;

  /// Zero-based page of [`crate::characters::PAGE_SIZE`] entries.
  fn fetch_page(
    &self,
    ctx: Context,
    page: u32,
  ) -> impl Future<Output = Result<Vec<CharacterEntry>, Self::Error>> + Send + '_;

  /// Returns the number of rows removed; zero is not an error.
  fn delete_by_name(
    &self,
    ctx: Context,
    name: String,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Relationships ─────────────────────────────────────────────────────

  /// Append facts for every resolvable name in the entry.
  fn add_relationships(
    &self,
    ctx: Context,
    entry: CharacterEntry,
  ) -> impl Future<Output = Result<AddSummary, Self::Error>> + Send + '_;

  /// Replace the entry's outgoing facts.
  fn update_relationships(
    &self,
    ctx: Context,
    entry: CharacterEntry,
  ) -> impl Future<Output = Result<AddSummary, Self::Error>> + Send + '_;

  /// Remove every fact originating from `name`; returns the rows removed.
  fn delete_relationships(
    &self,
    ctx: Context,
    name: String,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Bulk ──────────────────────────────────────────────────────────────

  /// Create all entries then add all relationships, committing only if every
  /// step succeeds.
  fn import(
    &self,
    ctx: Context,
    entries: Vec<CharacterEntry>,
  ) -> impl Future<Output = Result<ImportSummary, Self::Error>> + Send + '_;
}
