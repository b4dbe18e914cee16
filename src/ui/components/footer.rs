use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Footer bar: view breadcrumb on the left, transient notice on the right.
pub fn draw_footer(frame: &mut Frame, area: Rect, breadcrumb: &[String], notice: Option<&str>) {
  let mut spans = vec![Span::raw(" ")];
  let last = breadcrumb.len().saturating_sub(1);

  for (i, part) in breadcrumb.iter().enumerate() {
    if i > 0 {
      spans.push(Span::styled(" > ", Style::default().fg(Color::DarkGray)));
    }
    let style = if i == last {
      Style::default().fg(Color::Cyan).bold()
    } else {
      Style::default().fg(Color::White)
    };
    spans.push(Span::styled(part.clone(), style));
  }

  let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
  frame.render_widget(bar, area);

  // The notice overdraws the breadcrumb tail on narrow terminals; it only
  // lives a few seconds, so it wins the space while present
  if let Some(text) = notice {
    let span = Span::styled(text.to_string(), Style::default().fg(Color::Yellow));
    let width = (span.width() + 1).min(area.width as usize) as u16;
    let right = Rect::new(area.x + area.width - width, area.y, width, 1).intersection(area);
    let toast = Paragraph::new(span).style(Style::default().bg(Color::Black));
    frame.render_widget(toast, right);
  }
}
