use super::input::{InputResult, TextInput};
use super::KeyResult;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Events emitted by the size range input that parent needs to handle
#[derive(Debug, Clone, PartialEq)]
pub enum SizeRangeEvent {
  /// New bounds applied; None clears the size filter
  Applied(Option<(f64, f64)>),
  /// Input cancelled, previous bounds stay in effect
  Cancelled,
}

/// Overlay for entering a file size range in megabytes.
///
/// Expects "min max" (two numbers); an empty submit clears the filter.
/// Unlike the name search this is not applied live, because a half-typed
/// bound is meaningless.
#[derive(Debug, Clone, Default)]
pub struct SizeRangeInput {
  input: TextInput,
  active: bool,
  error: Option<String>,
}

impl SizeRangeInput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Check if the input is currently active
  pub fn is_active(&self) -> bool {
    self.active
  }

  /// Open the overlay, prefilled with the bounds currently in effect
  pub fn show(&mut self, current: Option<(f64, f64)>) {
    self.active = true;
    self.error = None;
    self.input = match current {
      Some((lo, hi)) => TextInput::with_value(&format!("{} {}", lo, hi)),
      None => TextInput::new(),
    };
  }

  /// Handle a key event
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<SizeRangeEvent> {
    if !self.active {
      return KeyResult::NotHandled;
    }

    match self.input.handle_key(key) {
      InputResult::Submitted(value) => match parse_bounds(&value) {
        Ok(bounds) => {
          self.active = false;
          KeyResult::Event(SizeRangeEvent::Applied(bounds))
        }
        Err(msg) => {
          self.error = Some(msg);
          KeyResult::Handled
        }
      },
      InputResult::Cancelled => {
        self.active = false;
        KeyResult::Event(SizeRangeEvent::Cancelled)
      }
      InputResult::Consumed => {
        self.error = None;
        KeyResult::Handled
      }
      // Swallow everything else too; the overlay is modal
      InputResult::NotHandled => KeyResult::Handled,
    }
  }

  /// Render the overlay if active
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    if !self.active {
      return;
    }

    let width = (area.width * 60 / 100).clamp(30, 60);
    // Input line + hint/error line with borders
    let overlay = Rect::new(area.x + 1, area.y + 1, width, 4).intersection(area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Yellow))
      .title(" Size range (MB) ");
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let second_line = match &self.error {
      Some(error) => Line::from(Span::styled(
        error.clone(),
        Style::default().fg(Color::Red),
      )),
      None => Line::from(Span::styled(
        "min max, e.g. \"1 5\"; empty clears",
        Style::default().fg(Color::DarkGray),
      )),
    };

    let lines = vec![self.input.prompt_line('>'), second_line];
    frame.render_widget(Paragraph::new(lines), inner);
  }
}

/// Parse "min max" in megabytes. Empty input clears the filter.
fn parse_bounds(value: &str) -> Result<Option<(f64, f64)>, String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Ok(None);
  }

  let parts: Vec<&str> = trimmed.split_whitespace().collect();
  let bounds = match parts.as_slice() {
    [lo, hi] => (lo.parse::<f64>(), hi.parse::<f64>()),
    _ => return Err("Enter two numbers: min max".to_string()),
  };

  match bounds {
    (Ok(lo), Ok(hi)) if lo <= hi => Ok(Some((lo, hi))),
    (Ok(_), Ok(_)) => Err("Min must not exceed max".to_string()),
    _ => Err("Bounds must be numbers (MB)".to_string()),
  }
}
