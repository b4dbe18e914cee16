use super::input::{InputResult, TextInput};
use super::KeyResult;
use crate::gallery::Category;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

const FIELD_LABELS: [&str; 3] = ["Name", "Description", "Image URL"];

/// Events emitted by the category form that parent needs to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFormEvent {
  /// Form submitted with valid data
  Submitted(CategoryFormData),
  /// Form cancelled
  Cancelled,
}

/// Validated form output. Name and image are required; an empty
/// description field means "no description".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFormData {
  pub name: String,
  pub description: Option<String>,
  pub image: String,
}

/// Create/edit form for categories.
///
/// One instance lives in the view; `show_create`/`show_edit` activate it.
/// While active it swallows all keys, so list navigation underneath stays
/// frozen until the form closes.
#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
  active: bool,
  title: String,
  inputs: [TextInput; 3],
  focus: usize,
  error: Option<String>,
}

impl CategoryForm {
  pub fn new() -> Self {
    Self::default()
  }

  /// Check if the form is currently active
  pub fn is_active(&self) -> bool {
    self.active
  }

  /// Open the form empty, for creating a category
  pub fn show_create(&mut self) {
    self.active = true;
    self.title = " New Category ".to_string();
    self.inputs = [TextInput::new(), TextInput::new(), TextInput::new()];
    self.focus = 0;
    self.error = None;
  }

  /// Open the form prefilled with an existing category's fields
  pub fn show_edit(&mut self, category: &Category) {
    self.active = true;
    self.title = " Edit Category ".to_string();
    self.inputs = [
      TextInput::with_value(&category.name),
      TextInput::with_value(category.description.as_deref().unwrap_or("")),
      TextInput::with_value(&category.image),
    ];
    self.focus = 0;
    self.error = None;
  }

  /// Hide the form
  pub fn hide(&mut self) {
    self.active = false;
    self.error = None;
  }

  /// Handle a key event
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<CategoryFormEvent> {
    if !self.active {
      return KeyResult::NotHandled;
    }

    match key.code {
      KeyCode::Esc => {
        self.hide();
        return KeyResult::Event(CategoryFormEvent::Cancelled);
      }
      KeyCode::Enter => return self.submit(),
      KeyCode::Tab | KeyCode::Down => {
        self.focus = (self.focus + 1) % self.inputs.len();
        return KeyResult::Handled;
      }
      KeyCode::BackTab | KeyCode::Up => {
        self.focus = if self.focus == 0 {
          self.inputs.len() - 1
        } else {
          self.focus - 1
        };
        return KeyResult::Handled;
      }
      _ => {}
    }

    if self.inputs[self.focus].handle_key(key) == InputResult::Consumed {
      self.error = None;
    }
    // Swallow everything else too; the form is modal
    KeyResult::Handled
  }

  fn submit(&mut self) -> KeyResult<CategoryFormEvent> {
    let name = self.inputs[0].value().trim().to_string();
    let description = self.inputs[1].value().trim().to_string();
    let image = self.inputs[2].value().trim().to_string();

    if name.is_empty() {
      self.error = Some("Name is required".to_string());
      return KeyResult::Handled;
    }
    if image.is_empty() {
      self.error = Some("Image URL is required".to_string());
      return KeyResult::Handled;
    }

    let data = CategoryFormData {
      name,
      description: if description.is_empty() {
        None
      } else {
        Some(description)
      },
      image,
    };
    self.hide();
    KeyResult::Event(CategoryFormEvent::Submitted(data))
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
      .title(self.title.clone());

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    if inner.height == 0 {
      return;
    }

    let mut lines = Vec::new();
    for (i, label) in FIELD_LABELS.iter().enumerate() {
      let focused = i == self.focus;
      let label_style = if focused {
        Style::default().fg(Color::Cyan).bold()
      } else {
        Style::default().fg(Color::Gray)
      };
      let mut spans = vec![
        Span::styled(format!("{:<13}", label), label_style),
        Span::raw(self.inputs[i].value().to_string()),
      ];
      if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
      }
      lines.push(Line::from(spans));
    }

    match &self.error {
      Some(error) => lines.push(Line::from(Span::styled(
        error.clone(),
        Style::default().fg(Color::Red),
      ))),
      None => lines.push(Line::from("")),
    }

    lines.push(Line::from(Span::styled(
      "Tab: next field   Enter: save   Esc: cancel",
      Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::KeyModifiers;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn type_str(form: &mut CategoryForm, s: &str) {
    for c in s.chars() {
      form.handle_key(key(KeyCode::Char(c)));
    }
  }

  #[test]
  fn test_submit_requires_name() {
    let mut form = CategoryForm::new();
    form.show_create();

    let result = form.handle_key(key(KeyCode::Enter));
    assert_eq!(result, KeyResult::Handled);
    assert!(form.is_active());
    assert_eq!(form.error.as_deref(), Some("Name is required"));
  }

  #[test]
  fn test_submit_requires_image() {
    let mut form = CategoryForm::new();
    form.show_create();
    type_str(&mut form, "Nature");

    let result = form.handle_key(key(KeyCode::Enter));
    assert_eq!(result, KeyResult::Handled);
    assert_eq!(form.error.as_deref(), Some("Image URL is required"));
  }

  #[test]
  fn test_submit_with_required_fields() {
    let mut form = CategoryForm::new();
    form.show_create();
    type_str(&mut form, "Nature");
    form.handle_key(key(KeyCode::Tab));
    form.handle_key(key(KeyCode::Tab));
    type_str(&mut form, "https://example.com/nature.jpg");

    let result = form.handle_key(key(KeyCode::Enter));
    assert_eq!(
      result,
      KeyResult::Event(CategoryFormEvent::Submitted(CategoryFormData {
        name: "Nature".to_string(),
        description: None,
        image: "https://example.com/nature.jpg".to_string(),
      }))
    );
    assert!(!form.is_active());
  }

  #[test]
  fn test_empty_description_becomes_none() {
    let mut form = CategoryForm::new();
    form.show_create();
    type_str(&mut form, "Urban");
    form.handle_key(key(KeyCode::Tab));
    type_str(&mut form, "   ");
    form.handle_key(key(KeyCode::Tab));
    type_str(&mut form, "u.png");

    match form.handle_key(key(KeyCode::Enter)) {
      KeyResult::Event(CategoryFormEvent::Submitted(data)) => {
        assert_eq!(data.description, None);
      }
      other => panic!("expected submit, got {:?}", other),
    }
  }

  #[test]
  fn test_edit_prefills_fields() {
    let category = Category {
      id: 3,
      name: "Nature".to_string(),
      description: Some("Outdoor shots".to_string()),
      image: "n.png".to_string(),
    };
    let mut form = CategoryForm::new();
    form.show_edit(&category);

    let result = form.handle_key(key(KeyCode::Enter));
    assert_eq!(
      result,
      KeyResult::Event(CategoryFormEvent::Submitted(CategoryFormData {
        name: "Nature".to_string(),
        description: Some("Outdoor shots".to_string()),
        image: "n.png".to_string(),
      }))
    );
  }

  #[test]
  fn test_esc_cancels() {
    let mut form = CategoryForm::new();
    form.show_create();
    type_str(&mut form, "half-typed");

    let result = form.handle_key(key(KeyCode::Esc));
    assert_eq!(result, KeyResult::Event(CategoryFormEvent::Cancelled));
    assert!(!form.is_active());
  }
}
