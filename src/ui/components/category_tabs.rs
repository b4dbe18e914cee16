use crate::ui::truncate;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Tab strip for filtering the image list by category.
///
/// Tab 0 is always "All"; the rest map one-to-one onto the categories
/// passed in. Navigation wraps. The owning view maps its cycle keys onto
/// `cycle()`, so this component does no key handling of its own.
#[derive(Debug, Clone, Default)]
pub struct CategoryTabs {
  categories: Vec<(u64, String)>,
  selected: usize, // 0 = All, 1+ = index into categories
}

impl CategoryTabs {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replace the tab set, keeping the current selection when its category
  /// id survives the refresh
  pub fn set_categories(&mut self, categories: Vec<(u64, String)>) {
    let keep = self.selected_id();
    self.categories = categories;
    self.selected = match keep {
      Some(id) => self
        .categories
        .iter()
        .position(|(cid, _)| *cid == id)
        .map(|idx| idx + 1)
        .unwrap_or(0),
      None => 0,
    };
  }

  /// Select the tab for the given category id, if present
  pub fn select_id(&mut self, id: u64) {
    if let Some(idx) = self.categories.iter().position(|(cid, _)| *cid == id) {
      self.selected = idx + 1;
    }
  }

  /// The selected category id, or None when "All" is selected
  pub fn selected_id(&self) -> Option<u64> {
    if self.selected == 0 {
      None
    } else {
      self.categories.get(self.selected - 1).map(|(id, _)| *id)
    }
  }

  /// Move the selection with wrapping
  pub fn cycle(&mut self, direction: i32) {
    let total_tabs = self.categories.len() + 1;
    self.selected = if direction > 0 {
      (self.selected + 1) % total_tabs
    } else if self.selected == 0 {
      total_tabs - 1
    } else {
      self.selected - 1
    };
  }

  /// Render the tab strip
  pub fn render(&self, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();

    spans.push(Span::styled(
      "[Category] ",
      Style::default().fg(Color::Yellow),
    ));

    // "All" tab (index 0)
    let all_style = if self.selected == 0 {
      Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::styled(" All ", all_style));

    // Individual category tabs
    for (idx, (_, name)) in self.categories.iter().enumerate() {
      spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
      let is_selected = self.selected == idx + 1;
      let style = if is_selected {
        Style::default().fg(Color::Black).bg(Color::Cyan)
      } else {
        Style::default().fg(Color::Gray)
      };
      spans.push(Span::styled(format!(" {} ", truncate(name, 15)), style));
    }

    let line = Line::from(spans);
    let paragraph = Paragraph::new(line);
    frame.render_widget(paragraph, area);
  }
}
