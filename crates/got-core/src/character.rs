//! Character and actor types — the wire model and its stored counterparts.
//!
//! Characters are addressed by name on every consumer-facing path. The
//! store-assigned [`CharacterId`] is used for all internal wiring (actor
//! links, relationship facts).

use serde::{Deserialize, Serialize};

use crate::relationship::RelationshipKind;

// ─── Identities ──────────────────────────────────────────────────────────────

/// Store-assigned identity of a character row.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CharacterId(pub i64);

/// Store-assigned identity of an actor row.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ActorId(pub i64);

// ─── House names ─────────────────────────────────────────────────────────────

/// Input form of `houseName`: a bare string or an array of strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
  One(String),
  Many(Vec<String>),
}

/// Ordered house names. Accepts a single string or an array on input and
/// always serialises as an array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OneOrMany")]
pub struct HouseNames(pub Vec<String>);

impl From<OneOrMany> for HouseNames {
  fn from(value: OneOrMany) -> Self {
    match value {
      OneOrMany::One(name) => Self(vec![name]),
      OneOrMany::Many(names) => Self(names),
    }
  }
}

impl HouseNames {
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn as_slice(&self) -> &[String] { &self.0 }
}

impl<S: Into<String>> FromIterator<S> for HouseNames {
  fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
    Self(iter.into_iter().map(Into::into).collect())
  }
}

// ─── Wire entry ──────────────────────────────────────────────────────────────

/// A character as accepted and emitted by the HTTP API and bulk importer.
///
/// Relationship lists carry counterpart *names*; they are resolved to
/// identities by [`crate::relationships`]. `killed_by` is emitted on reads but
/// has no write path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterEntry {
  #[serde(rename = "characterID", default, skip_serializing_if = "Option::is_none")]
  pub character_id:          Option<CharacterId>,
  /// May be omitted on update, where the path names the character.
  #[serde(default)]
  pub character_name:        String,
  #[serde(default, skip_serializing_if = "HouseNames::is_empty")]
  pub house_name:            HouseNames,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub character_image_thumb: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub character_image_full:  String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub character_link:        String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub actor_name:            String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub actor_link:            String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub nickname:              String,
  #[serde(default)]
  pub royal:                 bool,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub parents:               Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub siblings:              Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub killed_by:             Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub killed:                Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub married_engaged:       Vec<String>,
}

impl CharacterEntry {
  /// Convenience constructor with every optional field empty.
  pub fn new(name: impl Into<String>) -> Self {
    Self { character_name: name.into(), ..Self::default() }
  }

  /// The counterpart names listed for `kind`.
  pub fn related(&self, kind: RelationshipKind) -> &[String] {
    match kind {
      RelationshipKind::Parent => &self.parents,
      RelationshipKind::Sibling => &self.siblings,
      RelationshipKind::Killed => &self.killed,
      RelationshipKind::MarriedEngaged => &self.married_engaged,
    }
  }

  pub fn related_mut(&mut self, kind: RelationshipKind) -> &mut Vec<String> {
    match kind {
      RelationshipKind::Parent => &mut self.parents,
      RelationshipKind::Sibling => &mut self.siblings,
      RelationshipKind::Killed => &mut self.killed,
      RelationshipKind::MarriedEngaged => &mut self.married_engaged,
    }
  }

  /// The actor named by this entry, if any.
  pub fn actor(&self) -> Option<NewActor<'_>> {
    (!self.actor_name.is_empty())
      .then(|| NewActor { name: &self.actor_name, link: &self.actor_link })
  }

  /// The mutable columns of the character row.
  pub fn fields(&self) -> CharacterFields {
    CharacterFields {
      house_names: self.house_name.clone(),
      image_thumb: self.character_image_thumb.clone(),
      image_full:  self.character_image_full.clone(),
      link:        self.character_link.clone(),
      nickname:    self.nickname.clone(),
      royal:       self.royal,
    }
  }
}

// ─── Stored shapes ───────────────────────────────────────────────────────────

/// The mutable columns of a character row. The name is not among them; a
/// character is never renamed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterFields {
  pub house_names: HouseNames,
  pub image_thumb: String,
  pub image_full:  String,
  pub link:        String,
  pub nickname:    String,
  pub royal:       bool,
}

/// Input to actor resolve-or-create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewActor<'a> {
  pub name: &'a str,
  pub link: &'a str,
}

/// An actor row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
  pub actor_id: ActorId,
  pub name:     String,
  pub link:     String,
}

/// A character row joined with its linked actor, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
  pub character_id: CharacterId,
  pub name:         String,
  pub fields:       CharacterFields,
  pub actor:        Option<Actor>,
}

impl CharacterRecord {
  /// Project the row into a wire entry with empty relationship lists.
  pub fn into_entry(self) -> CharacterEntry {
    let (actor_name, actor_link) = self
      .actor
      .map(|a| (a.name, a.link))
      .unwrap_or_default();
    CharacterEntry {
      character_id: Some(self.character_id),
      character_name: self.name,
      house_name: self.fields.house_names,
      character_image_thumb: self.fields.image_thumb,
      character_image_full: self.fields.image_full,
      character_link: self.fields.link,
      actor_name,
      actor_link,
      nickname: self.fields.nickname,
      royal: self.fields.royal,
      ..CharacterEntry::default()
    }
  }
}

// ─── Index document ──────────────────────────────────────────────────────────

/// A character document as stored in the external search index (snake_case
/// field names).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedCharacter {
  #[serde(default)]
  pub character_id:          Option<i64>,
  #[serde(default)]
  pub character_name:        String,
  #[serde(default)]
  pub house_name:            HouseNames,
  #[serde(default)]
  pub character_image_thumb: String,
  #[serde(default)]
  pub character_image_full:  String,
  #[serde(default)]
  pub character_link:        String,
  #[serde(default)]
  pub actor_name:            String,
  #[serde(default)]
  pub actor_link:            String,
  #[serde(default)]
  pub nickname:              String,
  #[serde(default)]
  pub royal:                 bool,
  #[serde(default)]
  pub parents:               Vec<String>,
  #[serde(default)]
  pub siblings:              Vec<String>,
  #[serde(default)]
  pub killed_by:             Vec<String>,
  #[serde(default)]
  pub killed:                Vec<String>,
  #[serde(default)]
  pub married_engaged:       Vec<String>,
}

impl From<IndexedCharacter> for CharacterEntry {
  fn from(doc: IndexedCharacter) -> Self {
    CharacterEntry {
      character_id:          doc.character_id.filter(|id| *id != 0).map(CharacterId),
      character_name:        doc.character_name,
      house_name:            doc.house_name,
      character_image_thumb: doc.character_image_thumb,
      character_image_full:  doc.character_image_full,
      character_link:        doc.character_link,
      actor_name:            doc.actor_name,
      actor_link:            doc.actor_link,
      nickname:              doc.nickname,
      royal:                 doc.royal,
      parents:               doc.parents,
      siblings:              doc.siblings,
      killed_by:             doc.killed_by,
      killed:                doc.killed,
      married_engaged:       doc.married_engaged,
    }
  }
}
