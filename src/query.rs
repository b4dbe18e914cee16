//! Async query and mutation abstractions for the UI.
//!
//! Inspired by TanStack Query, this module provides a `Query<T>` type that
//! encapsulates async data fetching, loading states, and error handling,
//! plus a single-shot `Mutation<T>` counterpart for write operations.
//!
//! # Example
//!
//! ```ignore
//! let gallery = gallery.clone();
//! let mut query = Query::new(move || {
//!     let gallery = gallery.clone();
//!     async move { gallery.list_images().await.map_err(|e| e.to_string()) }
//! });
//! query.fetch();
//!
//! // Each tick, poll() reports whether the state advanced; render reads
//! // state() to choose between a loading title, rows, and an error line.
//! ```

use std::future::Future;
use std::pin::Pin;
use tokio::sync::mpsc;

/// The state of a query or mutation
#[derive(Debug, Clone)]
pub enum QueryState<T> {
  /// Not started
  Idle,
  /// Currently in flight
  Loading,
  /// Completed successfully
  Success(T),
  /// Failed with an error
  Error(String),
}

impl<T> QueryState<T> {
  pub fn data(&self) -> Option<&T> {
    if let QueryState::Success(data) = self {
      Some(data)
    } else {
      None
    }
  }

  pub fn is_loading(&self) -> bool {
    matches!(self, QueryState::Loading)
  }

  pub fn is_success(&self) -> bool {
    matches!(self, QueryState::Success(_))
  }

  pub fn is_error(&self) -> bool {
    matches!(self, QueryState::Error(_))
  }
}

/// Boxed fetch future; errors arrive already rendered as display strings.
type BoxFuture<T> = Pin<Box<dyn Future<Output = Result<T, String>> + Send>>;

/// Fetcher factory; every fetch() manufactures a fresh future from it.
type FetcherFn<T> = Box<dyn Fn() -> BoxFuture<T> + Send + Sync>;

/// Async query for data fetching with state management.
///
/// Query<T> encapsulates:
/// - The fetching logic (via a closure)
/// - Loading/success/error states
/// - Async result handling via channels
///
/// There is no staleness tracking; the data layer invalidates its caches
/// after mutations, so `refetch()` is the only way data changes.
pub struct Query<T> {
  state: QueryState<T>,
  fetcher: FetcherFn<T>,
  receiver: Option<mpsc::UnboundedReceiver<Result<T, String>>>,
}

impl<T: Send + 'static> Query<T> {
  /// Create a new query with the given fetcher function.
  ///
  /// The fetcher is a closure that returns a future. It will be called
  /// each time `fetch()` or `refetch()` is invoked.
  pub fn new<F, Fut>(fetcher: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, String>> + Send + 'static,
  {
    Self {
      state: QueryState::Idle,
      fetcher: Box::new(move || Box::pin(fetcher())),
      receiver: None,
    }
  }

  /// Current state, borrowed for rendering.
  pub fn state(&self) -> &QueryState<T> {
    &self.state
  }

  /// Successful payload, if any.
  pub fn data(&self) -> Option<&T> {
    self.state.data()
  }

  pub fn is_loading(&self) -> bool {
    self.state.is_loading()
  }

  pub fn is_success(&self) -> bool {
    self.state.is_success()
  }

  pub fn is_error(&self) -> bool {
    self.state.is_error()
  }

  /// Start fetching unless a fetch is already in flight.
  pub fn fetch(&mut self) {
    if self.state.is_loading() {
      return;
    }
    self.start_fetch();
  }

  /// Drop any in-flight fetch and start over. Views call this after a
  /// mutation invalidated the cache, so the next snapshot is fresh.
  pub fn refetch(&mut self) {
    self.receiver = None;
    self.start_fetch();
  }

  /// Poll for a completed fetch; `true` when the state advanced.
  ///
  /// Views call this from their `tick`.
  pub fn poll(&mut self) -> bool {
    poll_receiver(&mut self.receiver, &mut self.state)
  }

  fn start_fetch(&mut self) {
    let (tx, rx) = mpsc::unbounded_channel();
    self.receiver = Some(rx);
    self.state = QueryState::Loading;

    let future = (self.fetcher)();
    tokio::spawn(async move {
      let result = future.await;
      // The owning view may have been popped; a dropped receiver is fine
      let _ = tx.send(result);
    });
  }
}

// Not Clone: the receiver half is owned. Each view owns its queries
// outright, so sharing never comes up.

impl<T: std::fmt::Debug> std::fmt::Debug for Query<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Query")
      .field("state", &self.state)
      .finish_non_exhaustive()
  }
}

/// Async mutation with single-shot state tracking.
///
/// Unlike `Query` there is no stored fetcher: each invocation passes its own
/// future to `run()`. The state machine is Idle -> Loading -> Success/Error
/// with no automatic retry; call `reset()` once the outcome has been
/// surfaced to return to Idle.
pub struct Mutation<T> {
  state: QueryState<T>,
  receiver: Option<mpsc::UnboundedReceiver<Result<T, String>>>,
}

impl<T: Send + 'static> Mutation<T> {
  pub fn new() -> Self {
    Self {
      state: QueryState::Idle,
      receiver: None,
    }
  }

  /// Start the mutation if one is not already in flight.
  pub fn run<Fut>(&mut self, future: Fut)
  where
    Fut: Future<Output = Result<T, String>> + Send + 'static,
  {
    if self.state.is_loading() {
      return;
    }

    let (tx, rx) = mpsc::unbounded_channel();
    self.receiver = Some(rx);
    self.state = QueryState::Loading;

    tokio::spawn(async move {
      let result = future.await;
      // Ignore send errors - receiver may have been dropped
      let _ = tx.send(result);
    });
  }

  /// Poll for the mutation outcome; true if the state changed.
  pub fn poll(&mut self) -> bool {
    poll_receiver(&mut self.receiver, &mut self.state)
  }

  pub fn state(&self) -> &QueryState<T> {
    &self.state
  }

  pub fn is_loading(&self) -> bool {
    self.state.is_loading()
  }

  /// Return to Idle once the outcome has been handled.
  pub fn reset(&mut self) {
    self.state = QueryState::Idle;
    self.receiver = None;
  }
}

impl<T: Send + 'static> Default for Mutation<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Mutation<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Mutation")
      .field("state", &self.state)
      .finish_non_exhaustive()
  }
}

/// Drain a result channel into a query state; true if the state changed.
fn poll_receiver<T>(
  receiver: &mut Option<mpsc::UnboundedReceiver<Result<T, String>>>,
  state: &mut QueryState<T>,
) -> bool {
  let rx = match receiver {
    Some(rx) => rx,
    None => return false,
  };

  // Try to receive without blocking
  match rx.try_recv() {
    Ok(Ok(data)) => {
      *state = QueryState::Success(data);
      *receiver = None;
      true
    }
    Ok(Err(error)) => {
      *state = QueryState::Error(error);
      *receiver = None;
      true
    }
    Err(mpsc::error::TryRecvError::Empty) => false,
    Err(mpsc::error::TryRecvError::Disconnected) => {
      // Sender dropped without sending - treat as error
      *state = QueryState::Error("Operation was cancelled".to_string());
      *receiver = None;
      true
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::Duration;

  #[tokio::test]
  async fn test_query_success() {
    let mut query =
      Query::new(|| async { Ok::<_, String>(vec!["Nature".to_string(), "Urban".to_string()]) });

    assert!(matches!(query.state(), QueryState::Idle));

    query.fetch();
    assert!(query.is_loading());

    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(query.poll());
    assert!(query.is_success());
    assert_eq!(query.data().map(Vec::len), Some(2));
  }

  #[tokio::test]
  async fn test_query_error() {
    let mut query: Query<i32> = Query::new(|| async { Err("fetch failed: 503".to_string()) });

    query.fetch();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(query.poll());
    assert!(query.is_error());
    assert!(matches!(query.state(), QueryState::Error(e) if e == "fetch failed: 503"));
  }

  #[tokio::test]
  async fn test_fetch_while_loading_is_noop() {
    let mut query = Query::new(|| async {
      tokio::time::sleep(Duration::from_millis(100)).await;
      Ok::<_, String>(42)
    });

    query.fetch();
    assert!(query.is_loading());

    // A second call must not restart the fetch
    query.fetch();
    assert!(query.is_loading());
  }

  #[tokio::test]
  async fn test_refetch_cancels_pending() {
    use std::sync::atomic::{AtomicU32, Ordering};

    let runs = std::sync::Arc::new(AtomicU32::new(0));
    let fetcher_runs = runs.clone();

    let mut query = Query::new(move || {
      let runs = fetcher_runs.clone();
      async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok::<_, String>(runs.fetch_add(1, Ordering::SeqCst))
      }
    });

    query.fetch();
    tokio::time::sleep(Duration::from_millis(10)).await;

    query.refetch();
    tokio::time::sleep(Duration::from_millis(100)).await;

    query.poll();
    // The first fetch's receiver was dropped; only the second lands
    assert_eq!(query.data(), Some(&1));
  }

  #[tokio::test]
  async fn test_mutation_success_then_reset() {
    let mut mutation: Mutation<u64> = Mutation::new();
    assert!(matches!(mutation.state(), QueryState::Idle));

    mutation.run(async { Ok(7) });
    assert!(mutation.is_loading());

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(mutation.poll());
    assert_eq!(mutation.state().data(), Some(&7));

    mutation.reset();
    assert!(matches!(mutation.state(), QueryState::Idle));
  }

  #[tokio::test]
  async fn test_mutation_error() {
    let mut mutation: Mutation<()> = Mutation::new();

    mutation.run(async { Err("Failed to upload image.".to_string()) });
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(mutation.poll());
    assert!(matches!(mutation.state(), QueryState::Error(e) if e == "Failed to upload image."));
  }

  #[tokio::test]
  async fn test_mutation_run_while_loading_is_noop() {
    let mut mutation: Mutation<u64> = Mutation::new();

    mutation.run(async {
      tokio::time::sleep(Duration::from_millis(100)).await;
      Ok(1)
    });
    mutation.run(async { Ok(2) });

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(mutation.poll());
    assert_eq!(mutation.state().data(), Some(&1));
  }
}
