//! In-memory resource caching for collection snapshots.
//!
//! This module provides a gallery-agnostic caching mechanism that:
//! - Holds one whole-snapshot slot per collection
//! - Coalesces concurrent cold reads into a single load
//! - Serializes local mutations per collection (single-writer discipline)
//! - Invalidates only after a successful mutation; no TTL

mod layer;

pub use layer::ResourceCache;
