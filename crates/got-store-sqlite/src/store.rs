//! [`SqliteStore`] — the SQLite implementation of [`CharacterStore`].

use std::path::Path;

use tracing::debug;

use got_core::{
  Context, characters,
  character::{CharacterEntry, CharacterId},
  import::{self, ImportSummary},
  relationships::{self, AddSummary},
  store::CharacterStore,
};

use crate::{Error, Result, SqliteUnitOfWork, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A character store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `work` inside one transaction on the database thread.
  ///
  /// The transaction commits only if `work` returns `Ok`; any error rolls
  /// it back. `ctx` is checked before the call and before every statement,
  /// so cancellation seen at either point fails the call and rolls back.
  /// Once `work` has returned `Ok` the commit outcome is what the caller
  /// gets, even if `ctx` expires while the result is in flight.
  pub async fn unit_of_work<T, F>(&self, ctx: Context, work: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&SqliteUnitOfWork<'_>) -> Result<T> + Send + 'static,
  {
    ctx.check()?;

    let call = self.conn.call(move |conn| {
      let tx = conn.transaction()?;
      let outcome = work(&SqliteUnitOfWork::new(&tx, ctx));
      match outcome {
        Ok(value) => {
          tx.commit()?;
          Ok(Ok(value))
        }
        Err(e) => {
          debug!(error = %e, "rolling back");
          Ok(Err(e))
        }
      }
    });

    call.await?
  }
}

// ─── CharacterStore impl ─────────────────────────────────────────────────────

impl CharacterStore for SqliteStore {
  type Error = Error;

  async fn create_character_and_actor(
    &self,
    ctx: Context,
    entry: CharacterEntry,
  ) -> Result<CharacterId> {
    self
      .unit_of_work(ctx, move |uow| Ok(characters::create_character_and_actor(uow, &entry)?))
      .await
  }

  async fn update_character_and_actor(
    &self,
    ctx: Context,
    entry: CharacterEntry,
    existing_name: String,
  ) -> Result<CharacterId> {
    self
      .unit_of_work(ctx, move |uow| {
        Ok(characters::update_character_and_actor(uow, &entry, &existing_name)?)
      })
      .await
  }

  async fn fetch_by_name(&self, ctx: Context, name: String) -> Result<Vec<CharacterEntry>> {
    self
      .unit_of_work(ctx, move |uow| Ok(characters::fetch_by_name(uow, &name)?))
      .await
  }

  async fn fetch_page(&self, ctx: Context, page: u32) -> Result<Vec<CharacterEntry>> {
    self
      .unit_of_work(ctx, move |uow| Ok(characters::fetch_page(uow, page)?))
      .await
  }

  async fn delete_by_name(&self, ctx: Context, name: String) -> Result<u64> {
    self
      .unit_of_work(ctx, move |uow| Ok(characters::delete_by_name(uow, &name)?))
      .await
  }

  async fn add_relationships(&self, ctx: Context, entry: CharacterEntry) -> Result<AddSummary> {
    self
      .unit_of_work(ctx, move |uow| Ok(relationships::add_all(uow, &entry)?))
      .await
  }

  async fn update_relationships(
    &self,
    ctx: Context,
    entry: CharacterEntry,
  ) -> Result<AddSummary> {
    self
      .unit_of_work(ctx, move |uow| Ok(relationships::update_all(uow, &entry)?))
      .await
  }

  async fn delete_relationships(&self, ctx: Context, name: String) -> Result<u64> {
    self
      .unit_of_work(ctx, move |uow| Ok(relationships::delete_all_by_name(uow, &name)?))
      .await
  }

  async fn import(&self, ctx: Context, entries: Vec<CharacterEntry>) -> Result<ImportSummary> {
    self
      .unit_of_work(ctx, move |uow| Ok(import::import_all(uow, &entries)?))
      .await
  }
}

#[cfg(test)]
impl SqliteStore {
  /// Evaluate a single-integer query; lets tests inspect raw table state.
  pub(crate) async fn count(&self, sql: &'static str) -> i64 {
    self
      .conn
      .call(move |conn| Ok(conn.query_row(sql, [], |r| r.get(0))?))
      .await
      .expect("count query")
  }
}
