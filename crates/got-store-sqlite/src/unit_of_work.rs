//! [`SqliteUnitOfWork`] — statement-level access over a borrowed connection.
//!
//! Constructed over a plain [`rusqlite::Connection`] or an open
//! [`rusqlite::Transaction`] (which derefs to one); the owner of the
//! transaction decides whether to commit.

use rusqlite::{OptionalExtension as _, params};

use got_core::{
  Context, UnitOfWork,
  character::{ActorId, CharacterFields, CharacterId, CharacterRecord, NewActor},
  relationship::RelationshipKind,
  unit_of_work::{RelatedName, Selection},
};

use crate::{
  Result,
  encode::{CHARACTER_COLUMNS, RawCharacter, decode_kind, encode_house_names, encode_kind},
};

pub struct SqliteUnitOfWork<'c> {
  conn: &'c rusqlite::Connection,
  ctx:  Context,
}

impl<'c> SqliteUnitOfWork<'c> {
  pub fn new(conn: &'c rusqlite::Connection, ctx: Context) -> Self { Self { conn, ctx } }
}

impl UnitOfWork for SqliteUnitOfWork<'_> {
  type Error = crate::Error;

  // ── Actors ────────────────────────────────────────────────────────────

  fn find_actor_id(&self, name: &str) -> Result<Option<ActorId>> {
    self.ctx.check()?;
    let id = self
      .conn
      .prepare_cached("SELECT actor_id FROM actors WHERE actor_name = ?1")?
      .query_row(params![name], |r| r.get(0))
      .optional()?;
    Ok(id.map(ActorId))
  }

  fn insert_actor(&self, actor: NewActor<'_>) -> Result<ActorId> {
    self.ctx.check()?;
    self
      .conn
      .prepare_cached("INSERT INTO actors (actor_name, actor_link) VALUES (?1, ?2)")?
      .execute(params![actor.name, actor.link])?;
    Ok(ActorId(self.conn.last_insert_rowid()))
  }

  fn insert_actor_link(&self, actor_id: ActorId, character_id: CharacterId) -> Result<()> {
    self.ctx.check()?;
    self
      .conn
      .prepare_cached("INSERT INTO characters_actors (character_id, actor_id) VALUES (?1, ?2)")?
      .execute(params![character_id.0, actor_id.0])?;
    Ok(())
  }

  fn delete_actor_links(&self, character_id: CharacterId) -> Result<u64> {
    self.ctx.check()?;
    let n = self
      .conn
      .prepare_cached("DELETE FROM characters_actors WHERE character_id = ?1")?
      .execute(params![character_id.0])?;
    Ok(n as u64)
  }

  // ── Characters ────────────────────────────────────────────────────────

  fn find_character_id(&self, name: &str) -> Result<Option<CharacterId>> {
    self.ctx.check()?;
    let id = self
      .conn
      .prepare_cached("SELECT character_id FROM characters WHERE character_name = ?1")?
      .query_row(params![name], |r| r.get(0))
      .optional()?;
    Ok(id.map(CharacterId))
  }

  fn insert_character(&self, name: &str, fields: &CharacterFields) -> Result<CharacterId> {
    self.ctx.check()?;
    let house_name = encode_house_names(&fields.house_names)?;
    self
      .conn
      .prepare_cached(
        "INSERT INTO characters (
           character_name, house_name, character_image_thumb,
           character_image_full, character_link, nickname, royal
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
      )?
      .execute(params![
        name,
        house_name,
        fields.image_thumb,
        fields.image_full,
        fields.link,
        fields.nickname,
        fields.royal,
      ])?;
    Ok(CharacterId(self.conn.last_insert_rowid()))
  }

  fn update_character_fields(
    &self,
    name: &str,
    fields: &CharacterFields,
  ) -> Result<Option<CharacterId>> {
    self.ctx.check()?;
    let house_name = encode_house_names(&fields.house_names)?;
    let id = self
      .conn
      .prepare_cached(
        "UPDATE characters SET
           house_name = ?2, character_image_thumb = ?3, character_image_full = ?4,
           character_link = ?5, nickname = ?6, royal = ?7
         WHERE character_name = ?1
         RETURNING character_id",
      )?
      .query_row(
        params![
          name,
          house_name,
          fields.image_thumb,
          fields.image_full,
          fields.link,
          fields.nickname,
          fields.royal,
        ],
        |r| r.get(0),
      )
      .optional()?;
    Ok(id.map(CharacterId))
  }

  fn delete_character(&self, name: &str) -> Result<u64> {
    self.ctx.check()?;
    let n = self
      .conn
      .prepare_cached("DELETE FROM characters WHERE character_name = ?1")?
      .execute(params![name])?;
    Ok(n as u64)
  }

  fn select_characters(&self, selection: &Selection) -> Result<Vec<CharacterRecord>> {
    self.ctx.check()?;
    let from = "FROM characters c
       LEFT JOIN characters_actors ca ON ca.character_id = c.character_id
       LEFT JOIN actors a ON a.actor_id = ca.actor_id";

    let raws: Vec<RawCharacter> = match selection {
      Selection::ByName(name) => {
        let sql = format!("SELECT {CHARACTER_COLUMNS} {from} WHERE c.character_name = ?1");
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt
          .query_map(params![name], RawCharacter::from_row)?
          .collect::<rusqlite::Result<_>>()?;
        rows
      }
      Selection::Page { limit, offset } => {
        let sql = format!(
          "SELECT {CHARACTER_COLUMNS} {from} ORDER BY c.character_id LIMIT ?1 OFFSET ?2"
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;
        // SQLite integers are signed; clamp absurd offsets rather than wrap.
        let offset = i64::try_from(*offset).unwrap_or(i64::MAX);
        let rows = stmt
          .query_map(params![limit, offset], RawCharacter::from_row)?
          .collect::<rusqlite::Result<_>>()?;
        rows
      }
    };

    raws.into_iter().map(RawCharacter::into_record).collect()
  }

  // ── Relationships ─────────────────────────────────────────────────────

  fn insert_relationship(
    &self,
    origin: CharacterId,
    target: CharacterId,
    kind: RelationshipKind,
  ) -> Result<()> {
    self.ctx.check()?;
    self
      .conn
      .prepare_cached(
        "INSERT INTO relationships (character_id, character_relationship_id, relationship_type)
         VALUES (?1, ?2, ?3)",
      )?
      .execute(params![origin.0, target.0, encode_kind(kind)])?;
    Ok(())
  }

  fn delete_relationships(&self, origin: CharacterId) -> Result<u64> {
    self.ctx.check()?;
    let n = self
      .conn
      .prepare_cached("DELETE FROM relationships WHERE character_id = ?1")?
      .execute(params![origin.0])?;
    Ok(n as u64)
  }

  fn related_names(&self, origin: CharacterId) -> Result<Vec<RelatedName>> {
    self.ctx.check()?;
    let mut stmt = self.conn.prepare_cached(
      "SELECT r.relationship_type, c.character_name
       FROM relationships r
       JOIN characters c ON c.character_id = r.character_relationship_id
       WHERE r.character_id = ?1
       ORDER BY r.relationship_id",
    )?;
    let rows = stmt
      .query_map(params![origin.0], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    rows
      .into_iter()
      .map(|(kind, name)| Ok(RelatedName { kind: decode_kind(&kind)?, name }))
      .collect()
  }

  fn killers_of(&self, target: CharacterId) -> Result<Vec<String>> {
    self.ctx.check()?;
    let mut stmt = self.conn.prepare_cached(
      "SELECT c.character_name
       FROM relationships r
       JOIN characters c ON c.character_id = r.character_id
       WHERE r.character_relationship_id = ?1 AND r.relationship_type = ?2
       ORDER BY r.relationship_id",
    )?;
    let names: Vec<String> = stmt
      .query_map(params![target.0, encode_kind(RelationshipKind::Killed)], |r| r.get(0))?
      .collect::<rusqlite::Result<_>>()?;
    Ok(names)
  }
}
