//! SQL schema for the SQLite character store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS characters (
    character_id          INTEGER PRIMARY KEY AUTOINCREMENT,
    character_name        TEXT    NOT NULL UNIQUE,
    house_name            TEXT    NOT NULL DEFAULT '[]',  -- JSON array, ordered
    character_image_thumb TEXT    NOT NULL DEFAULT '',
    character_image_full  TEXT    NOT NULL DEFAULT '',
    character_link        TEXT    NOT NULL DEFAULT '',
    nickname              TEXT    NOT NULL DEFAULT '',
    royal                 INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS actors (
    actor_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    actor_name TEXT    NOT NULL UNIQUE,
    actor_link TEXT    NOT NULL DEFAULT ''
);

-- At most one actor per character.
CREATE TABLE IF NOT EXISTS characters_actors (
    character_id INTEGER NOT NULL UNIQUE
                 REFERENCES characters(character_id) ON DELETE CASCADE,
    actor_id     INTEGER NOT NULL
                 REFERENCES actors(actor_id) ON DELETE CASCADE
);

-- Directional facts owned by their origin. Duplicates are permitted.
CREATE TABLE IF NOT EXISTS relationships (
    relationship_id           INTEGER PRIMARY KEY AUTOINCREMENT,
    character_id              INTEGER NOT NULL
                              REFERENCES characters(character_id) ON DELETE CASCADE,
    character_relationship_id INTEGER NOT NULL
                              REFERENCES characters(character_id) ON DELETE CASCADE,
    relationship_type         TEXT    NOT NULL
                              CHECK (relationship_type IN
                                ('parent', 'sibling', 'killed', 'married_engaged'))
);

CREATE INDEX IF NOT EXISTS relationships_origin_idx ON relationships(character_id);
CREATE INDEX IF NOT EXISTS relationships_target_idx ON relationships(character_relationship_id);
CREATE INDEX IF NOT EXISTS characters_actors_actor_idx ON characters_actors(actor_id);

PRAGMA user_version = 1;
";
