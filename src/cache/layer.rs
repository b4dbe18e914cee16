//! Cache layer that orchestrates snapshot reads, loads, and invalidation.

use color_eyre::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Invalidation-driven cache for one collection's snapshot.
///
/// The slot lock doubles as the collection's write lock: reads hold it across
/// the cold load (so concurrent cold reads coalesce into one fetch) and
/// mutations hold it across their load-modify-save (so local writers never
/// interleave).
pub struct ResourceCache<T> {
  collection: &'static str,
  slot: Arc<Mutex<Option<Vec<T>>>>,
}

impl<T: Clone> ResourceCache<T> {
  /// Create an empty cache for the named collection.
  pub fn new(collection: &'static str) -> Self {
    Self {
      collection,
      slot: Arc::new(Mutex::new(None)),
    }
  }

  /// Fetch the snapshot with a cache-first strategy.
  ///
  /// 1. If a snapshot is cached, return it without touching the loader
  /// 2. Otherwise run `loader`, cache its result, and return it
  ///
  /// A failed load caches nothing; the next read retries.
  pub async fn get_with<F, Fut>(&self, loader: F) -> Result<Vec<T>>
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
  {
    let mut slot = self.slot.lock().await;

    if let Some(cached) = slot.as_ref() {
      return Ok(cached.clone());
    }

    let data = loader().await?;
    debug!("Cached {} {} records", data.len(), self.collection);
    *slot = Some(data.clone());

    Ok(data)
  }

  /// Run a load-modify-save mutation under the collection lock.
  ///
  /// On success the cached snapshot is dropped so the next read observes the
  /// stored state; on failure it is left intact.
  pub async fn mutate<R, F>(&self, f: F) -> Result<R>
  where
    F: FnOnce() -> Result<R>,
  {
    let mut slot = self.slot.lock().await;

    let result = f()?;
    *slot = None;
    debug!("Invalidated {} cache after mutation", self.collection);

    Ok(result)
  }

  /// Drop the cached snapshot so the next read re-runs its loader.
  pub async fn invalidate(&self) {
    let mut slot = self.slot.lock().await;
    *slot = None;
    debug!("Invalidated {} cache", self.collection);
  }
}

impl<T> Clone for ResourceCache<T> {
  fn clone(&self) -> Self {
    Self {
      collection: self.collection,
      slot: Arc::clone(&self.slot),
    }
  }
}
