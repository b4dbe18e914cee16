use super::input::{InputResult, TextInput};
use super::KeyResult;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::path::PathBuf;

/// Events emitted by the upload form that parent needs to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageFormEvent {
  /// Form submitted with valid data
  Submitted(ImageFormData),
  /// Form cancelled
  Cancelled,
}

/// Validated form output for an image upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFormData {
  pub name: String,
  pub category_id: u64,
  pub file: PathBuf,
}

/// Upload form for images: display name, target category, local file path.
///
/// The category field is a selector over the categories known at open time
/// (Left/Right cycles); the other two fields are free text. All three are
/// required.
#[derive(Debug, Clone, Default)]
pub struct ImageForm {
  active: bool,
  name: TextInput,
  file: TextInput,
  categories: Vec<(u64, String)>,
  category_idx: usize,
  focus: usize, // 0 = name, 1 = category, 2 = file
  error: Option<String>,
}

impl ImageForm {
  pub fn new() -> Self {
    Self::default()
  }

  /// Check if the form is currently active
  pub fn is_active(&self) -> bool {
    self.active
  }

  /// Open the form. `preselect` picks the initial category by id (e.g. the
  /// category the list is currently filtered to).
  pub fn show(&mut self, categories: Vec<(u64, String)>, preselect: Option<u64>) {
    self.active = true;
    self.name = TextInput::new();
    self.file = TextInput::new();
    self.category_idx = preselect
      .and_then(|id| categories.iter().position(|(cid, _)| *cid == id))
      .unwrap_or(0);
    self.categories = categories;
    self.focus = 0;
    self.error = None;
  }

  /// Hide the form
  pub fn hide(&mut self) {
    self.active = false;
    self.error = None;
  }

  /// Handle a key event
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<ImageFormEvent> {
    if !self.active {
      return KeyResult::NotHandled;
    }

    match key.code {
      KeyCode::Esc => {
        self.hide();
        return KeyResult::Event(ImageFormEvent::Cancelled);
      }
      KeyCode::Enter => return self.submit(),
      KeyCode::Tab | KeyCode::Down => {
        self.focus = (self.focus + 1) % 3;
        return KeyResult::Handled;
      }
      KeyCode::BackTab | KeyCode::Up => {
        self.focus = if self.focus == 0 { 2 } else { self.focus - 1 };
        return KeyResult::Handled;
      }
      _ => {}
    }

    // Category field cycles instead of taking text
    if self.focus == 1 {
      match key.code {
        KeyCode::Left => self.cycle_category(-1),
        KeyCode::Right => self.cycle_category(1),
        _ => {}
      }
      return KeyResult::Handled;
    }

    let input = if self.focus == 0 {
      &mut self.name
    } else {
      &mut self.file
    };
    if input.handle_key(key) == InputResult::Consumed {
      self.error = None;
    }
    // Swallow everything else too; the form is modal
    KeyResult::Handled
  }

  fn cycle_category(&mut self, direction: i32) {
    if self.categories.is_empty() {
      return;
    }
    let len = self.categories.len();
    self.category_idx = if direction > 0 {
      (self.category_idx + 1) % len
    } else if self.category_idx == 0 {
      len - 1
    } else {
      self.category_idx - 1
    };
  }

  fn submit(&mut self) -> KeyResult<ImageFormEvent> {
    let name = self.name.value().trim().to_string();
    let file = self.file.value().trim().to_string();

    if name.is_empty() {
      self.error = Some("Name is required".to_string());
      return KeyResult::Handled;
    }
    let Some(&(category_id, _)) = self.categories.get(self.category_idx) else {
      self.error = Some("No categories available".to_string());
      return KeyResult::Handled;
    };
    if file.is_empty() {
      self.error = Some("File path is required".to_string());
      return KeyResult::Handled;
    }

    let data = ImageFormData {
      name,
      category_id,
      file: PathBuf::from(file),
    };
    self.hide();
    KeyResult::Event(ImageFormEvent::Submitted(data))
  }

  /// Render the form overlay if active
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    if !self.active {
      return;
    }

    let width = (area.width * 60 / 100).clamp(40, 64);
    let height = 7; // 3 fields + error line + hint line + borders

    // Center the overlay
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    let overlay_area = Rect::new(x, y, width, height).intersection(area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Yellow))
      .title(" Upload Image ");

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    if inner.height == 0 {
      return;
    }

    let category_label = self
      .categories
      .get(self.category_idx)
      .map(|(_, name)| name.as_str())
      .unwrap_or("(none)");

    let mut lines = Vec::new();
    lines.push(self.text_field_line("Name", self.name.value(), 0));
    lines.push(self.selector_field_line("Category", category_label));
    lines.push(self.text_field_line("File path", self.file.value(), 2));

    match &self.error {
      Some(error) => lines.push(Line::from(Span::styled(
        error.clone(),
        Style::default().fg(Color::Red),
      ))),
      None => lines.push(Line::from("")),
    }

    lines.push(Line::from(Span::styled(
      "Tab: next field   ←/→: category   Enter: upload   Esc: cancel",
      Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
  }

  fn text_field_line(&self, label: &str, value: &str, field: usize) -> Line<'static> {
    let focused = self.focus == field;
    let mut spans = vec![
      Span::styled(format!("{:<13}", label), self.label_style(focused)),
      Span::raw(value.to_string()),
    ];
    if focused {
      spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
  }

  fn selector_field_line(&self, label: &str, value: &str) -> Line<'static> {
    let focused = self.focus == 1;
    let value_style = if focused {
      Style::default().fg(Color::Cyan)
    } else {
      Style::default()
    };
    Line::from(vec![
      Span::styled(format!("{:<13}", label), self.label_style(focused)),
      Span::styled(format!("< {} >", value), value_style),
    ])
  }

  fn label_style(&self, focused: bool) -> Style {
    if focused {
      Style::default().fg(Color::Cyan).bold()
    } else {
      Style::default().fg(Color::Gray)
    }
  }
}
