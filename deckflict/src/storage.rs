//! Local persistence for the collection and deck set.
//!
//! Values are stored as JSON under logical keys in a small SQLite key-value
//! table. Corrupt entries are dropped and replaced by empty values on load.

use chrono::Utc;
use mtg_common::{Collection, Deck};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const COLLECTION_KEY: &str = "mtg-collection";
pub const DECKS_KEY: &str = "mtg-decks";

/// Opaque key-value store
pub trait Store {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub struct SqliteStore {
    conn: Connection,
}

/// Returns the default database path: <data_dir>/deckflict/deckflict.db
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("deckflict")
        .join("deckflict.db")
}

impl SqliteStore {
    /// Opens (or creates) the store at `path` and initialises the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                log::info!("Created directory: {}", parent.display());
            }
        }
        log::info!("Opened store: {}", path.display());
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key        TEXT NOT NULL PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }
}

impl Store for SqliteStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value      = excluded.value,
                updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Loads and decodes `key`; missing or corrupt values yield `None`.
fn load_json<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Result<Option<T>> {
    let Some(data) = store.load(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&data) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            log::error!("Failed to load {} from store: {}", key, e);
            store.remove(key)?;
            Ok(None)
        }
    }
}

pub fn load_collection(store: &dyn Store) -> Result<Collection> {
    Ok(load_json(store, COLLECTION_KEY)?.unwrap_or_default())
}

pub fn save_collection(store: &dyn Store, collection: &Collection) -> Result<()> {
    store.save(COLLECTION_KEY, &serde_json::to_string(collection)?)
}

pub fn load_decks(store: &dyn Store) -> Result<Vec<Deck>> {
    Ok(load_json(store, DECKS_KEY)?.unwrap_or_default())
}

pub fn save_decks(store: &dyn Store, decks: &[Deck]) -> Result<()> {
    store.save(DECKS_KEY, &serde_json::to_string(decks)?)
}

/// Removes the collection and all decks
pub fn clear_all(store: &dyn Store) -> Result<()> {
    store.remove(COLLECTION_KEY)?;
    store.remove(DECKS_KEY)
}
