//! Local save-game persistence: a SQLite-backed key-value store of JSON
//! payloads keyed by slot name.
//!
//! Storage trouble must never make the game unplayable. Writes surface their
//! errors so the host can warn, but the load path offers
//! `load_or_fresh`, which collapses "storage broken", "payload corrupt", and
//! "no such slot" into `None`, and the caller starts a fresh case instead.

use std::fmt;
use std::path::Path;

use contracts::SavedGame;
use rusqlite::{params, Connection, OptionalExtension};

#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Serde(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::Serde(err) => write!(f, "serde error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

#[derive(Debug)]
pub struct SqliteSaveStore {
    conn: Connection,
}

impl SqliteSaveStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS saves (
                slot TEXT PRIMARY KEY,
                payload TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Upserts the payload for a slot.
    pub fn save(&mut self, slot: &str, saved: &SavedGame) -> Result<(), StoreError> {
        let payload = serde_json::to_string(saved)?;
        self.conn.execute(
            "INSERT INTO saves (slot, payload) VALUES (?1, ?2)
             ON CONFLICT(slot) DO UPDATE SET payload = excluded.payload",
            params![slot, payload],
        )?;
        Ok(())
    }

    /// Loads a slot, surfacing storage and decode failures to the caller.
    pub fn load(&self, slot: &str) -> Result<Option<SavedGame>, StoreError> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM saves WHERE slot = ?1",
                params![slot],
                |row| row.get(0),
            )
            .optional()?;
        match payload {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Loads a slot, degrading every failure to "no saved game".
    pub fn load_or_fresh(&self, slot: &str) -> Option<SavedGame> {
        self.load(slot).ok().flatten()
    }

    pub fn delete(&mut self, slot: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM saves WHERE slot = ?1", params![slot])?;
        Ok(())
    }

    pub fn list_slots(&self) -> Result<Vec<String>, StoreError> {
        let mut statement = self
            .conn
            .prepare("SELECT slot FROM saves ORDER BY slot ASC")?;
        let slots = statement
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{
        LocationId, Motive, PlayerKnowledge, SuspectId, TimeSlot, Weapon, DEFAULT_SEARCH_TOKENS,
        SCHEMA_VERSION_V1,
    };

    fn sample_save(seed: &str) -> SavedGame {
        SavedGame {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            seed: seed.to_string(),
            case: contracts::Case {
                schema_version: SCHEMA_VERSION_V1.to_string(),
                seed: seed.to_string(),
                suspects: Vec::new(),
                locations: Vec::new(),
                relationships: Vec::new(),
                clues: Vec::new(),
                alibis: Vec::new(),
                victim_id: SuspectId::new("suspect_000"),
                killer_id: SuspectId::new("suspect_001"),
                motive: Motive::Jealousy,
                weapon: Weapon::Rope,
                crime_scene_id: LocationId::new("location_000"),
                time_of_death: TimeSlot::TenPm,
            },
            knowledge: PlayerKnowledge::default(),
            interrogation: None,
            accusation: None,
            result: None,
            mistake_count: 1,
            search_tokens: 2,
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let mut store = SqliteSaveStore::open_in_memory().expect("opens");
        let saved = sample_save("store-round-trip");
        store.save("slot_main", &saved).expect("saves");
        let loaded = store.load("slot_main").expect("loads").expect("present");
        assert_eq!(loaded, saved);
    }

    #[test]
    fn saving_twice_overwrites_the_slot() {
        let mut store = SqliteSaveStore::open_in_memory().expect("opens");
        store
            .save("slot_main", &sample_save("first"))
            .expect("saves");
        store
            .save("slot_main", &sample_save("second"))
            .expect("saves");
        let loaded = store.load("slot_main").expect("loads").expect("present");
        assert_eq!(loaded.seed, "second");
        assert_eq!(store.list_slots().expect("lists"), vec!["slot_main"]);
    }

    #[test]
    fn missing_slot_is_none_not_an_error() {
        let store = SqliteSaveStore::open_in_memory().expect("opens");
        assert!(store.load("slot_absent").expect("loads").is_none());
        assert!(store.load_or_fresh("slot_absent").is_none());
    }

    #[test]
    fn corrupt_payload_degrades_to_no_saved_game() {
        let mut store = SqliteSaveStore::open_in_memory().expect("opens");
        store
            .conn
            .execute(
                "INSERT INTO saves (slot, payload) VALUES ('slot_bad', 'not json')",
                [],
            )
            .expect("inserts");
        assert!(store.load("slot_bad").is_err());
        assert!(store.load_or_fresh("slot_bad").is_none());
    }

    #[test]
    fn old_payload_without_search_tokens_loads_with_the_default() {
        let mut store = SqliteSaveStore::open_in_memory().expect("opens");
        let mut raw = serde_json::to_value(sample_save("legacy")).expect("serializes");
        raw.as_object_mut()
            .expect("object payload")
            .remove("search_tokens");
        store
            .conn
            .execute(
                "INSERT INTO saves (slot, payload) VALUES ('slot_legacy', ?1)",
                params![raw.to_string()],
            )
            .expect("inserts");
        let loaded = store
            .load("slot_legacy")
            .expect("loads")
            .expect("present");
        assert_eq!(loaded.search_tokens, DEFAULT_SEARCH_TOKENS);
    }

    #[test]
    fn delete_removes_the_slot() {
        let mut store = SqliteSaveStore::open_in_memory().expect("opens");
        store
            .save("slot_main", &sample_save("deleted"))
            .expect("saves");
        store.delete("slot_main").expect("deletes");
        assert!(store.load("slot_main").expect("loads").is_none());
        assert!(store.list_slots().expect("lists").is_empty());
    }
}
