use crossterm::event::KeyEvent;
use ratatui::prelude::*;

/// Actions that a view can request in response to user input
pub enum ViewAction {
  /// No action needed
  None,
  /// Push a new view onto the stack
  Push(Box<dyn View>),
  /// Pop current view from stack (go back)
  Pop,
  /// Show a transient message in the footer
  Notice(String),
}

/// Trait for view behavior
///
/// Views handle their own input modes (search, forms, etc.) and return
/// actions for the App to execute. This creates a clean delegation chain:
/// App → View → Components
///
/// Views that load data asynchronously should use Query<T> internally and
/// poll it in the tick() method. Background mutations are polled the same
/// way; tick() returns an action so a finished mutation can surface as a
/// footer notice.
pub trait View {
  /// React to a key press; the returned action is App's to execute
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction;

  /// Draw the view into its area
  fn render(&mut self, frame: &mut Frame, area: Rect);

  /// Label shown for this view in the footer breadcrumb
  fn breadcrumb_label(&self) -> String;

  /// Whether a modal component (form, search, confirm) currently owns the
  /// keyboard. While true, global keys like ':' stay with the view.
  fn owns_keyboard(&self) -> bool {
    false
  }

  /// Called on each tick to allow views to poll async queries
  fn tick(&mut self) -> ViewAction {
    ViewAction::None
  }
}
