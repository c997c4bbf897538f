//! Relationship kinds: the tag on a directional character-to-character fact.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// The kind of a relationship fact. The snake_case form is the value stored
/// in the `relationship_type` column.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RelationshipKind {
  Parent,
  Sibling,
  Killed,
  MarriedEngaged,
}

impl RelationshipKind {
  /// Every kind, in the order relationship sync processes them.
  pub const ALL: [RelationshipKind; 4] = [
    RelationshipKind::Sibling,
    RelationshipKind::Parent,
    RelationshipKind::Killed,
    RelationshipKind::MarriedEngaged,
  ];

  /// The value stored in the `relationship_type` column.
  pub fn as_str(self) -> &'static str { self.into() }

  /// Whether a failed lookup of a counterpart aborts relationship sync.
  ///
  /// Parents and married/engaged abort; siblings and killed treat a failed
  /// lookup like a missing character and skip it.
  // TODO: confirm with data owners whether sibling/killed lookup errors
  // should abort as well; both behaviours are pinned by tests.
  pub fn lookup_error_is_fatal(self) -> bool {
    matches!(self, Self::Parent | Self::MarriedEngaged)
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr as _;

  use super::*;

  #[test]
  fn column_values_are_snake_case() {
    assert_eq!(RelationshipKind::MarriedEngaged.as_str(), "married_engaged");
    assert_eq!(RelationshipKind::Parent.to_string(), "parent");
    assert_eq!(
      RelationshipKind::from_str("married_engaged").unwrap(),
      RelationshipKind::MarriedEngaged
    );
    assert!(RelationshipKind::from_str("killed_by").is_err());
  }

  #[test]
  fn only_parent_and_married_lookups_are_fatal() {
    let fatal: Vec<_> = RelationshipKind::ALL
      .into_iter()
      .filter(|k| k.lookup_error_is_fatal())
      .collect();
    assert_eq!(fatal, [RelationshipKind::Parent, RelationshipKind::MarriedEngaged]);
  }
}
