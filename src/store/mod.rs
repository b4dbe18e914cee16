//! Durable key-value slot storage for collection snapshots.
//!
//! Each collection name maps to a single text slot holding the whole
//! serialized snapshot. The backend is behind the `CollectionStore` trait so
//! callers hold an injected `Arc<dyn CollectionStore>` handle:
//! - `SqliteStore` for real runs
//! - `MemoryStore` for tests
//!
//! Serialization stays out of the trait; the typed `load_snapshot` /
//! `save_snapshot` helpers layer JSON on top of the raw payloads.

mod snapshot;
mod storage;

pub use snapshot::{load_snapshot, save_snapshot};
pub use storage::{CollectionStore, MemoryStore, SqliteStore};
