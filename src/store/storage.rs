//! Collection store trait with SQLite and in-memory implementations.

use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Trait for durable collection slot stores.
///
/// Payloads are opaque text at this level; whole snapshots are written and
/// read in a single call, never partially.
pub trait CollectionStore: Send + Sync {
  /// Read the payload for a collection, or None if the slot was never written.
  fn read(&self, collection: &str) -> Result<Option<String>>;

  /// Overwrite the payload for a collection.
  fn write(&self, collection: &str, payload: &str) -> Result<()>;
}

/// In-memory store backed by a map. Used in tests.
#[derive(Default)]
pub struct MemoryStore {
  slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl CollectionStore for MemoryStore {
  fn read(&self, collection: &str) -> Result<Option<String>> {
    let slots = self
      .slots
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    Ok(slots.get(collection).cloned())
  }

  fn write(&self, collection: &str, payload: &str) -> Result<()> {
    let mut slots = self
      .slots
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    slots.insert(collection.to_string(), payload.to_string());
    Ok(())
  }
}

/// SQLite-based collection store.
pub struct SqliteStore {
  conn: Mutex<Connection>,
}

impl SqliteStore {
  /// Open or create the store database under `data_dir`.
  pub fn open(data_dir: &Path) -> Result<Self> {
    std::fs::create_dir_all(data_dir)
      .map_err(|e| eyre!("Failed to create data directory: {}", e))?;

    let path = data_dir.join("gallery.db");
    let conn = Connection::open(&path)
      .map_err(|e| eyre!("Failed to open store database at {}: {}", path.display(), e))?;

    Self::from_connection(conn)
  }

  fn from_connection(conn: Connection) -> Result<Self> {
    let store = Self {
      conn: Mutex::new(conn),
    };
    store.run_migrations()?;
    Ok(store)
  }

  /// Run database migrations for the slot table.
  fn run_migrations(&self) -> Result<()> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .execute_batch(SLOTS_SCHEMA)
      .map_err(|e| eyre!("Failed to run store migrations: {}", e))?;

    Ok(())
  }
}

/// Schema for the slot table.
const SLOTS_SCHEMA: &str = r#"
-- One row per collection, holding the whole serialized snapshot
CREATE TABLE IF NOT EXISTS slots (
    collection TEXT PRIMARY KEY,
    payload TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

impl CollectionStore for SqliteStore {
  fn read(&self, collection: &str) -> Result<Option<String>> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .query_row(
        "SELECT payload FROM slots WHERE collection = ?",
        params![collection],
        |row| row.get(0),
      )
      .optional()
      .map_err(|e| eyre!("Failed to read {} slot: {}", collection, e))
  }

  fn write(&self, collection: &str, payload: &str) -> Result<()> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .execute(
        "INSERT OR REPLACE INTO slots (collection, payload, updated_at)
         VALUES (?, ?, datetime('now'))",
        params![collection, payload],
      )
      .map_err(|e| eyre!("Failed to write {} slot: {}", collection, e))?;

    Ok(())
  }
}
