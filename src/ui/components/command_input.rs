use super::input::{InputResult, TextInput};
use super::KeyResult;
use crate::commands::{self, Command};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Events emitted by command input that parent needs to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEvent {
  /// Command submitted
  Submitted(String),
  /// Command cancelled
  Cancelled,
}

const MAX_SUGGESTIONS: usize = 8;

/// The ':' command palette. Inactive it only watches for the activation
/// key; active it owns the keyboard until Enter or Esc.
#[derive(Debug, Clone, Default)]
pub struct CommandInput {
  input: TextInput,
  active: bool,
  selected: usize,
}

impl CommandInput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  /// Get autocomplete suggestions for current input
  pub fn suggestions(&self) -> Vec<&'static Command> {
    commands::get_suggestions(self.input.value())
  }

  fn reset(&mut self) {
    self.active = false;
    self.input.clear();
    self.selected = 0;
  }

  /// Handle a key event
  /// Call this regardless of active state - it handles activation too
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<CommandEvent> {
    if !self.active {
      return match key.code {
        KeyCode::Char(':') => {
          self.active = true;
          KeyResult::Handled
        }
        _ => KeyResult::NotHandled,
      };
    }

    match key.code {
      KeyCode::Esc => {
        self.reset();
        KeyResult::Event(CommandEvent::Cancelled)
      }
      KeyCode::Enter => {
        let cmd = self.resolve_command();
        self.reset();
        KeyResult::Event(CommandEvent::Submitted(cmd))
      }
      KeyCode::Tab | KeyCode::Down => {
        self.cycle(1);
        KeyResult::Handled
      }
      KeyCode::BackTab | KeyCode::Up => {
        self.cycle(-1);
        KeyResult::Handled
      }
      _ => match self.input.handle_key(key) {
        InputResult::NotHandled => KeyResult::NotHandled,
        _ => {
          // Typing invalidates the cycled choice
          self.selected = 0;
          KeyResult::Handled
        }
      },
    }
  }

  fn cycle(&mut self, step: isize) {
    let count = self.suggestions().len() as isize;
    if count == 0 {
      return;
    }
    self.selected = (self.selected as isize + step).rem_euclid(count) as usize;
  }

  /// The command to run: the highlighted suggestion when there is one,
  /// otherwise whatever was typed.
  fn resolve_command(&self) -> String {
    match self.suggestions().get(self.selected) {
      Some(cmd) => cmd.name.to_string(),
      None => self.input.value().trim().to_lowercase(),
    }
  }

  /// Render the command overlay if active
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    if !self.active {
      return;
    }

    let suggestions = self.suggestions();
    let shown = suggestions.len().min(MAX_SUGGESTIONS);

    let width = (area.width * 60 / 100).clamp(30, 60);
    let height = 3 + shown as u16;
    let overlay = Rect::new(area.x + 1, area.y + 1, width, height).intersection(area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Yellow))
      .title(" Command ");
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let mut lines = Vec::with_capacity(shown + 1);
    lines.push(self.input.prompt_line(':'));

    for (i, cmd) in suggestions.iter().take(shown).enumerate() {
      let name_style = if i == self.selected {
        Style::default().fg(Color::Black).bg(Color::Cyan)
      } else {
        Style::default().fg(Color::Cyan)
      };
      lines.push(Line::from(vec![
        Span::styled(format!(" {:<12}", cmd.name), name_style),
        Span::styled(cmd.description, Style::default().fg(Color::DarkGray)),
      ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::KeyModifiers;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn type_str(command: &mut CommandInput, s: &str) {
    for c in s.chars() {
      command.handle_key(key(KeyCode::Char(c)));
    }
  }

  #[test]
  fn test_colon_activates() {
    let mut command = CommandInput::new();
    assert!(!command.is_active());

    let result = command.handle_key(key(KeyCode::Char(':')));
    assert_eq!(result, KeyResult::Handled);
    assert!(command.is_active());
  }

  #[test]
  fn test_enter_submits_top_suggestion() {
    let mut command = CommandInput::new();
    command.handle_key(key(KeyCode::Char(':')));
    type_str(&mut command, "im");

    let result = command.handle_key(key(KeyCode::Enter));
    assert_eq!(
      result,
      KeyResult::Event(CommandEvent::Submitted("images".to_string()))
    );
    assert!(!command.is_active());
  }

  #[test]
  fn test_tab_cycles_suggestions() {
    let mut command = CommandInput::new();
    command.handle_key(key(KeyCode::Char(':')));

    let first = command.suggestions()[0].name;
    command.handle_key(key(KeyCode::Tab));
    let second = command.suggestions()[1].name;

    let result = command.handle_key(key(KeyCode::Enter));
    assert_eq!(
      result,
      KeyResult::Event(CommandEvent::Submitted(second.to_string()))
    );
    assert_ne!(first, second);
  }

  #[test]
  fn test_backtab_wraps_to_last_suggestion() {
    let mut command = CommandInput::new();
    command.handle_key(key(KeyCode::Char(':')));
    command.handle_key(key(KeyCode::BackTab));

    let last = commands::COMMANDS[commands::COMMANDS.len() - 1].name;
    let result = command.handle_key(key(KeyCode::Enter));
    assert_eq!(
      result,
      KeyResult::Event(CommandEvent::Submitted(last.to_string()))
    );
  }

  #[test]
  fn test_unknown_input_passes_through_verbatim() {
    let mut command = CommandInput::new();
    command.handle_key(key(KeyCode::Char(':')));
    type_str(&mut command, "zzz");

    let result = command.handle_key(key(KeyCode::Enter));
    assert_eq!(
      result,
      KeyResult::Event(CommandEvent::Submitted("zzz".to_string()))
    );
  }

  #[test]
  fn test_esc_cancels_and_clears() {
    let mut command = CommandInput::new();
    command.handle_key(key(KeyCode::Char(':')));
    type_str(&mut command, "cat");

    let result = command.handle_key(key(KeyCode::Esc));
    assert_eq!(result, KeyResult::Event(CommandEvent::Cancelled));
    assert!(!command.is_active());

    // Reopening starts fresh
    command.handle_key(key(KeyCode::Char(':')));
    let result = command.handle_key(key(KeyCode::Enter));
    assert_eq!(
      result,
      KeyResult::Event(CommandEvent::Submitted("categories".to_string()))
    );
  }
}
