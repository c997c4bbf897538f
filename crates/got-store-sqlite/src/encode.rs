//! Encoding and decoding helpers between domain types and the plain
//! representations stored in SQLite columns.
//!
//! House names are stored as a compact JSON array. Booleans are stored as
//! `0`/`1`. Relationship kinds are stored as their snake_case name.

use std::str::FromStr as _;

use got_core::{
  character::{Actor, ActorId, CharacterFields, CharacterId, CharacterRecord, HouseNames},
  relationship::RelationshipKind,
};

use crate::{Error, Result};

// ─── HouseNames ──────────────────────────────────────────────────────────────

pub fn encode_house_names(names: &HouseNames) -> Result<String> {
  Ok(serde_json::to_string(names.as_slice())?)
}

pub fn decode_house_names(s: &str) -> Result<HouseNames> {
  Ok(HouseNames(serde_json::from_str(s)?))
}

// ─── RelationshipKind ────────────────────────────────────────────────────────

pub fn encode_kind(kind: RelationshipKind) -> &'static str { kind.as_str() }

pub fn decode_kind(s: &str) -> Result<RelationshipKind> {
  RelationshipKind::from_str(s).map_err(|_| Error::UnknownRelationshipType(s.to_owned()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// The column list matching [`RawCharacter::from_row`].
pub const CHARACTER_COLUMNS: &str = "
  c.character_id, c.character_name, c.house_name,
  c.character_image_thumb, c.character_image_full, c.character_link,
  c.nickname, c.royal,
  a.actor_id, a.actor_name, a.actor_link";

/// Raw values read from a `characters` row left-joined with its actor.
pub struct RawCharacter {
  pub character_id: i64,
  pub name:         String,
  pub house_name:   String,
  pub image_thumb:  String,
  pub image_full:   String,
  pub link:         String,
  pub nickname:     String,
  pub royal:        bool,
  pub actor_id:     Option<i64>,
  pub actor_name:   Option<String>,
  pub actor_link:   Option<String>,
}

impl RawCharacter {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      character_id: row.get(0)?,
      name:         row.get(1)?,
      house_name:   row.get(2)?,
      image_thumb:  row.get(3)?,
      image_full:   row.get(4)?,
      link:         row.get(5)?,
      nickname:     row.get(6)?,
      royal:        row.get(7)?,
      actor_id:     row.get(8)?,
      actor_name:   row.get(9)?,
      actor_link:   row.get(10)?,
    })
  }

  pub fn into_record(self) -> Result<CharacterRecord> {
    let actor = match (self.actor_id, self.actor_name) {
      (Some(id), Some(name)) => Some(Actor {
        actor_id: ActorId(id),
        name,
        link: self.actor_link.unwrap_or_default(),
      }),
      _ => None,
    };

    Ok(CharacterRecord {
      character_id: CharacterId(self.character_id),
      name:         self.name,
      fields:       CharacterFields {
        house_names: decode_house_names(&self.house_name)?,
        image_thumb: self.image_thumb,
        image_full:  self.image_full,
        link:        self.link,
        nickname:    self.nickname,
        royal:       self.royal,
      },
      actor,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn house_names_keep_order_and_commas() {
    let names = HouseNames(vec!["Stark".into(), "Tully, of Riverrun".into()]);
    let encoded = encode_house_names(&names).unwrap();
    assert_eq!(encoded, r#"["Stark","Tully, of Riverrun"]"#);
    assert_eq!(decode_house_names(&encoded).unwrap(), names);
  }

  #[test]
  fn unknown_kind_is_an_error() {
    assert!(matches!(
      decode_kind("killed_by"),
      Err(Error::UnknownRelationshipType(ref s)) if s == "killed_by"
    ));
    assert_eq!(decode_kind(encode_kind(RelationshipKind::Sibling)).unwrap(), RelationshipKind::Sibling);
  }
}
