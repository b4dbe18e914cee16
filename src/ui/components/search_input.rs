use super::input::{InputResult, TextInput};
use super::KeyResult;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Events emitted by the name filter that the owning view applies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
  /// Query text changed; an empty string means the filter was cleared
  Changed(String),
  /// Overlay closed with the query left in force
  Submitted,
}

/// Live name filter with activation/deactivation.
///
/// The query is applied on every keystroke rather than on submit, so the
/// list narrows as the user types. Enter closes the overlay and keeps the
/// filter; Esc closes it and clears the filter.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
  input: TextInput,
  active: bool,
}

impl SearchInput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  pub fn query(&self) -> &str {
    self.input.value()
  }

  /// Open the overlay. A previous query stays in the buffer so it can be
  /// refined instead of retyped.
  pub fn activate(&mut self) {
    self.active = true;
  }

  /// Handle a key event; when inactive this only watches for `/`.
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<SearchEvent> {
    if !self.active {
      return match key.code {
        KeyCode::Char('/') => {
          self.activate();
          KeyResult::Handled
        }
        _ => KeyResult::NotHandled,
      };
    }

    match self.input.handle_key(key) {
      // Hot path: every edit re-applies the filter immediately
      InputResult::Consumed => {
        KeyResult::Event(SearchEvent::Changed(self.input.value().to_string()))
      }
      InputResult::Submitted(_) => {
        self.active = false;
        KeyResult::Event(SearchEvent::Submitted)
      }
      InputResult::Cancelled => {
        self.active = false;
        self.input.clear();
        KeyResult::Event(SearchEvent::Changed(String::new()))
      }
      InputResult::NotHandled => KeyResult::NotHandled,
    }
  }

  /// Draw the filter prompt when it is open.
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    if !self.active {
      return;
    }

    let width = (area.width * 60 / 100).clamp(30, 60);
    let overlay = Rect::new(area.x + 1, area.y + 1, width, 3).intersection(area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Yellow))
      .title(" Filter by name ");
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    frame.render_widget(Paragraph::new(self.input.prompt_line('/')), inner);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::KeyModifiers;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  #[test]
  fn test_slash_activates() {
    let mut search = SearchInput::new();
    assert!(!search.is_active());

    let result = search.handle_key(key(KeyCode::Char('/')));
    assert_eq!(result, KeyResult::Handled);
    assert!(search.is_active());
  }

  #[test]
  fn test_typing_emits_changed_per_keystroke() {
    let mut search = SearchInput::new();
    search.handle_key(key(KeyCode::Char('/')));

    let result = search.handle_key(key(KeyCode::Char('c')));
    assert_eq!(result, KeyResult::Event(SearchEvent::Changed("c".to_string())));

    let result = search.handle_key(key(KeyCode::Char('a')));
    assert_eq!(
      result,
      KeyResult::Event(SearchEvent::Changed("ca".to_string()))
    );
  }

  #[test]
  fn test_enter_submits_and_keeps_query() {
    let mut search = SearchInput::new();
    search.handle_key(key(KeyCode::Char('/')));
    search.handle_key(key(KeyCode::Char('x')));

    let result = search.handle_key(key(KeyCode::Enter));
    assert_eq!(result, KeyResult::Event(SearchEvent::Submitted));
    assert!(!search.is_active());
    assert_eq!(search.query(), "x");
  }

  #[test]
  fn test_reopen_keeps_query_for_refinement() {
    let mut search = SearchInput::new();
    search.handle_key(key(KeyCode::Char('/')));
    search.handle_key(key(KeyCode::Char('x')));
    search.handle_key(key(KeyCode::Enter));

    search.handle_key(key(KeyCode::Char('/')));
    assert!(search.is_active());
    assert_eq!(search.query(), "x");
  }

  #[test]
  fn test_esc_clears_query() {
    let mut search = SearchInput::new();
    search.handle_key(key(KeyCode::Char('/')));
    search.handle_key(key(KeyCode::Char('x')));

    let result = search.handle_key(key(KeyCode::Esc));
    assert_eq!(
      result,
      KeyResult::Event(SearchEvent::Changed(String::new()))
    );
    assert!(!search.is_active());
    assert_eq!(search.query(), "");
  }

  #[test]
  fn test_inactive_passes_keys_through() {
    let mut search = SearchInput::new();
    let result = search.handle_key(key(KeyCode::Char('j')));
    assert_eq!(result, KeyResult::NotHandled);
  }
}
