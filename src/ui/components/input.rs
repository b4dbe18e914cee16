use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

/// Result of handling a key event in an input component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
  /// Consumed by the input; editing continues
  Consumed,
  /// Enter finished the edit with this value
  Submitted(String),
  /// Esc abandoned the edit
  Cancelled,
  /// Not an editing key; the caller routes it
  NotHandled,
}

/// Reusable single-line text input with Emacs-style bindings.
///
/// The cursor is tracked in characters, not bytes, so editing names like
/// "Café" never splits a code point.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
  buffer: String,
  cursor: usize,
}

impl TextInput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Create an input prefilled with a value, cursor at the end.
  /// Used by edit forms to show the current field value.
  pub fn with_value(value: &str) -> Self {
    Self {
      buffer: value.to_string(),
      cursor: value.chars().count(),
    }
  }

  pub fn value(&self) -> &str {
    &self.buffer
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  /// Empty the buffer and park the cursor at the start.
  pub fn clear(&mut self) {
    self.buffer.clear();
    self.cursor = 0;
  }

  fn char_count(&self) -> usize {
    self.buffer.chars().count()
  }

  /// Byte offset of the cursor into the buffer
  fn byte_offset(&self) -> usize {
    self
      .buffer
      .char_indices()
      .nth(self.cursor)
      .map(|(offset, _)| offset)
      .unwrap_or(self.buffer.len())
  }

  /// Handle a key event, returning the result
  pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
    match key.code {
      KeyCode::Esc => InputResult::Cancelled,
      KeyCode::Enter => InputResult::Submitted(self.buffer.clone()),
      KeyCode::Backspace => {
        if self.cursor > 0 {
          self.cursor -= 1;
          self.buffer.remove(self.byte_offset());
        }
        InputResult::Consumed
      }
      KeyCode::Delete => {
        if self.cursor < self.char_count() {
          self.buffer.remove(self.byte_offset());
        }
        InputResult::Consumed
      }
      KeyCode::Left => {
        if self.cursor > 0 {
          self.cursor -= 1;
        }
        InputResult::Consumed
      }
      KeyCode::Right => {
        if self.cursor < self.char_count() {
          self.cursor += 1;
        }
        InputResult::Consumed
      }
      KeyCode::Home => {
        self.cursor = 0;
        InputResult::Consumed
      }
      KeyCode::End => {
        self.cursor = self.char_count();
        InputResult::Consumed
      }
      KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.cursor = 0;
        InputResult::Consumed
      }
      KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.cursor = self.char_count();
        InputResult::Consumed
      }
      KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        // Clear line before cursor
        self.buffer = self.buffer[self.byte_offset()..].to_string();
        self.cursor = 0;
        InputResult::Consumed
      }
      KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        // Delete word before cursor
        if self.cursor > 0 {
          let cut = self.byte_offset();
          let keep = self.buffer[..cut]
            .trim_end()
            .rfind(' ')
            .map(|i| i + 1)
            .unwrap_or(0);
          self.cursor = self.buffer[..keep].chars().count();
          self.buffer = format!("{}{}", &self.buffer[..keep], &self.buffer[cut..]);
        }
        InputResult::Consumed
      }
      KeyCode::Char(c) => {
        let at = self.byte_offset();
        self.buffer.insert(at, c);
        self.cursor += 1;
        InputResult::Consumed
      }
      _ => InputResult::NotHandled,
    }
  }

  /// Cursor position in characters, for rendering
  pub fn cursor_position(&self) -> usize {
    self.cursor
  }

  /// Render the value as a one-line prompt with the cursor highlighted at
  /// its real position
  pub fn prompt_line(&self, prefix: char) -> Line<'static> {
    let before: String = self.buffer.chars().take(self.cursor).collect();
    let mut under: String = self.buffer.chars().skip(self.cursor).take(1).collect();
    if under.is_empty() {
      under.push(' ');
    }
    let after: String = self.buffer.chars().skip(self.cursor + 1).collect();

    Line::from(vec![
      Span::styled(prefix.to_string(), Style::default().fg(Color::Yellow)),
      Span::raw(before),
      Span::styled(under, Style::default().bg(Color::Yellow).fg(Color::Black)),
      Span::raw(after),
    ])
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn ctrl(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::CONTROL)
  }

  fn type_str(input: &mut TextInput, s: &str) {
    for c in s.chars() {
      input.handle_key(press(KeyCode::Char(c)));
    }
  }

  #[test]
  fn test_typing_appends() {
    let mut input = TextInput::new();
    assert!(input.is_empty());

    type_str(&mut input, "Art");
    assert_eq!(input.value(), "Art");
    assert_eq!(input.cursor_position(), 3);
  }

  #[test]
  fn test_enter_submits_value() {
    let mut input = TextInput::new();
    type_str(&mut input, "Sunset");

    let result = input.handle_key(press(KeyCode::Enter));
    assert_eq!(result, InputResult::Submitted("Sunset".to_string()));
  }

  #[test]
  fn test_esc_cancels() {
    let mut input = TextInput::new();
    type_str(&mut input, "Urb");

    let result = input.handle_key(press(KeyCode::Esc));
    assert_eq!(result, InputResult::Cancelled);
  }

  #[test]
  fn test_backspace_removes_last_char() {
    let mut input = TextInput::new();
    type_str(&mut input, "Urban");
    input.handle_key(press(KeyCode::Backspace));
    assert_eq!(input.value(), "Urba");
  }

  #[test]
  fn test_ctrl_a_then_insert_at_start() {
    let mut input = TextInput::new();
    type_str(&mut input, "ature");
    input.handle_key(ctrl(KeyCode::Char('a')));
    input.handle_key(press(KeyCode::Char('N')));
    assert_eq!(input.value(), "Nature");
  }

  #[test]
  fn test_home_and_end_jump_unmodified() {
    let mut input = TextInput::new();
    type_str(&mut input, "ature");
    input.handle_key(press(KeyCode::Home));
    input.handle_key(press(KeyCode::Char('N')));
    assert_eq!(input.value(), "Nature");

    input.handle_key(press(KeyCode::End));
    input.handle_key(press(KeyCode::Char('s')));
    assert_eq!(input.value(), "Natures");
  }

  #[test]
  fn test_with_value_appends_at_end() {
    let mut input = TextInput::with_value("Natur");
    input.handle_key(press(KeyCode::Char('e')));
    assert_eq!(input.value(), "Nature");
  }

  #[test]
  fn test_multibyte_backspace_removes_whole_char() {
    let mut input = TextInput::with_value("Café");
    input.handle_key(press(KeyCode::Backspace));
    assert_eq!(input.value(), "Caf");
  }

  #[test]
  fn test_multibyte_insert_mid_word() {
    let mut input = TextInput::with_value("naïve");
    for _ in 0..3 {
      input.handle_key(press(KeyCode::Left));
    }
    input.handle_key(press(KeyCode::Char('x')));
    assert_eq!(input.value(), "naxïve");
  }

  #[test]
  fn test_ctrl_u_clears_before_cursor() {
    let mut input = TextInput::new();
    type_str(&mut input, "mountain lake");
    for _ in 0..4 {
      input.handle_key(press(KeyCode::Left));
    }
    input.handle_key(ctrl(KeyCode::Char('u')));
    assert_eq!(input.value(), "lake");
  }

  #[test]
  fn test_ctrl_w_deletes_word() {
    let mut input = TextInput::with_value("two words");
    input.handle_key(ctrl(KeyCode::Char('w')));
    assert_eq!(input.value(), "two ");
    assert_eq!(input.cursor_position(), 4);
  }
}
