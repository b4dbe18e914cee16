//! Typed snapshot helpers over the raw collection store.

use color_eyre::{eyre::eyre, Result};
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use super::storage::CollectionStore;

/// Load a whole collection snapshot.
///
/// Never fails: an absent slot, an unreadable slot, and an unparseable
/// payload all load as an empty snapshot, so corrupt state is
/// indistinguishable from a first run. Problems are logged at warn level.
pub fn load_snapshot<T: DeserializeOwned>(store: &dyn CollectionStore, collection: &str) -> Vec<T> {
  let payload = match store.read(collection) {
    Ok(Some(payload)) => payload,
    Ok(None) => return Vec::new(),
    Err(e) => {
      warn!("Failed to read {} snapshot: {}", collection, e);
      return Vec::new();
    }
  };

  match serde_json::from_str(&payload) {
    Ok(snapshot) => snapshot,
    Err(e) => {
      warn!("Discarding unparseable {} snapshot: {}", collection, e);
      Vec::new()
    }
  }
}

/// Persist a whole collection snapshot, replacing any previous one.
pub fn save_snapshot<T: Serialize>(
  store: &dyn CollectionStore,
  collection: &str,
  snapshot: &[T],
) -> Result<()> {
  let payload = serde_json::to_string(snapshot)
    .map_err(|e| eyre!("Failed to serialize {} snapshot: {}", collection, e))?;
  store.write(collection, &payload)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::MemoryStore;
  use serde::Deserialize;

  #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
  struct Record {
    id: u64,
    name: String,
  }

  fn test_record(id: u64, name: &str) -> Record {
    Record {
      id,
      name: name.to_string(),
    }
  }

  #[test]
  fn test_absent_slot_loads_empty() {
    let store = MemoryStore::new();
    let snapshot: Vec<Record> = load_snapshot(&store, "categories");
    assert!(snapshot.is_empty());
  }

  #[test]
  fn test_save_then_load_round_trips() {
    let store = MemoryStore::new();
    let records = vec![test_record(1, "Nature"), test_record(2, "Urban")];

    save_snapshot(&store, "categories", &records).unwrap();
    let loaded: Vec<Record> = load_snapshot(&store, "categories");

    assert_eq!(loaded, records);
  }

  #[test]
  fn test_corrupt_payload_loads_empty() {
    let store = MemoryStore::new();
    store.write("categories", "{not json").unwrap();

    let snapshot: Vec<Record> = load_snapshot(&store, "categories");
    assert!(snapshot.is_empty());
  }

  #[test]
  fn test_save_recovers_a_corrupt_slot() {
    let store = MemoryStore::new();
    store.write("categories", "{not json").unwrap();

    save_snapshot(&store, "categories", &[test_record(1, "Nature")]).unwrap();
    let loaded: Vec<Record> = load_snapshot(&store, "categories");

    assert_eq!(loaded, vec![test_record(1, "Nature")]);
  }
}
