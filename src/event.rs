use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Application events
#[derive(Debug)]
pub enum Event {
  /// Terminal key press
  Key(KeyEvent),
  /// Periodic tick for UI refresh and query/mutation polling
  Tick,
}

/// Event handler that produces events from terminal input and a tick timer.
///
/// A tick is emitted whenever no key arrives within the tick rate, so the
/// UI keeps polling its queries while idle.
pub struct EventHandler {
  rx: mpsc::UnboundedReceiver<Event>,
  reader: JoinHandle<()>,
}

impl EventHandler {
  pub fn new(tick_rate: Duration) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();

    let reader = tokio::spawn(async move {
      loop {
        if event::poll(tick_rate).unwrap_or(false) {
          if let Ok(CrosstermEvent::Key(key)) = event::read() {
            if tx.send(Event::Key(key)).is_err() {
              break;
            }
          }
        } else if tx.send(Event::Tick).is_err() {
          break;
        }
      }
    });

    Self { rx, reader }
  }

  /// Receive the next event; `None` once the reader task is gone.
  pub async fn next(&mut self) -> Option<Event> {
    self.rx.recv().await
  }
}

impl Drop for EventHandler {
  fn drop(&mut self) {
    // The reader blocks in event::poll, so it cannot notice the closed
    // channel until the next key; abort instead of waiting for one.
    self.reader.abort();
  }
}
