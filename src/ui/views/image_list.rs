use crate::gallery::{Category, Gallery, Image, ImageFilter, NewImage};
use crate::query::{Mutation, Query, QueryState};
use crate::ui::components::{
  CategoryTabs, ConfirmDialog, ConfirmEvent, ImageForm, ImageFormData, ImageFormEvent, KeyResult,
  SearchEvent, SearchInput, SizeRangeEvent, SizeRangeInput,
};
use crate::ui::view::{View, ViewAction};
use crate::ui::{ensure_valid_selection, truncate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

/// View for browsing the image gallery with client-side filters.
///
/// Images and categories load through separate queries; category names are
/// joined in at render time, with a placeholder for images whose category
/// id no longer resolves.
pub struct ImageListView {
  gallery: Gallery,
  images_query: Query<Vec<Image>>,
  categories_query: Query<Vec<Category>>,
  list_state: ListState,
  search: SearchInput,
  size_input: SizeRangeInput,
  tabs: CategoryTabs,
  filter: ImageFilter,
  form: ImageForm,
  confirm: ConfirmDialog,
  mutation: Mutation<String>,
  pending_delete: Option<u64>,
  // Tab to select once categories first load (set when arriving from the
  // category list)
  initial_category: Option<u64>,
}

impl ImageListView {
  pub fn new(gallery: Gallery, initial_category: Option<u64>) -> Self {
    let gallery_for_images = gallery.clone();
    let mut images_query = Query::new(move || {
      let gallery = gallery_for_images.clone();
      async move { gallery.list_images().await.map_err(|e| e.to_string()) }
    });

    let gallery_for_categories = gallery.clone();
    let mut categories_query = Query::new(move || {
      let gallery = gallery_for_categories.clone();
      async move { gallery.list_categories().await.map_err(|e| e.to_string()) }
    });

    // Start fetching immediately
    images_query.fetch();
    categories_query.fetch();

    // The id filter applies even before the tab strip has categories to show
    let filter = ImageFilter {
      category: initial_category,
      ..Default::default()
    };

    Self {
      gallery,
      images_query,
      categories_query,
      list_state: ListState::default(),
      search: SearchInput::new(),
      size_input: SizeRangeInput::new(),
      tabs: CategoryTabs::new(),
      filter,
      form: ImageForm::new(),
      confirm: ConfirmDialog::new(),
      mutation: Mutation::new(),
      pending_delete: None,
      initial_category,
    }
  }

  fn images(&self) -> &[Image] {
    self.images_query.data().map(|v| v.as_slice()).unwrap_or(&[])
  }

  fn categories(&self) -> &[Category] {
    self
      .categories_query
      .data()
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  fn filtered_images(&self) -> Vec<&Image> {
    self.filter.apply(self.images())
  }

  fn selected_image(&self) -> Option<&Image> {
    let filtered = self.filtered_images();
    self
      .list_state
      .selected()
      .and_then(|idx| filtered.get(idx).copied())
  }

  fn category_name(&self, id: u64) -> Option<&str> {
    self
      .categories()
      .iter()
      .find(|c| c.id == id)
      .map(|c| c.name.as_str())
  }

  fn is_loading(&self) -> bool {
    self.images_query.is_loading()
  }

  fn category_choices(&self) -> Vec<(u64, String)> {
    self
      .categories()
      .iter()
      .map(|c| (c.id, c.name.clone()))
      .collect()
  }

  fn render_list(&mut self, frame: &mut Frame, area: Rect) {
    let total = self.images().len();
    // Collect lines first (they own their strings) to avoid borrow
    // conflicts with list_state
    let lines: Vec<Line> = self
      .filtered_images()
      .into_iter()
      .map(|image| {
        let category = match self.category_name(image.category_id) {
          Some(name) => Span::styled(name.to_string(), Style::default().fg(Color::Cyan)),
          None => Span::styled(
            format!("unknown ({})", image.category_id),
            Style::default().fg(Color::Red),
          ),
        };
        Line::from(vec![
          Span::raw(format!("{:<26}", truncate(&image.name, 24))),
          Span::styled(
            format!("{:<12}", image.upload_date),
            Style::default().fg(Color::DarkGray),
          ),
          Span::styled(
            format!("{:>8}  ", image.metadata.size),
            Style::default().fg(Color::Yellow),
          ),
          Span::styled(
            format!("{:<11}", image.metadata.resolution),
            Style::default().fg(Color::Gray),
          ),
          category,
        ])
      })
      .collect();

    let shown = lines.len();
    ensure_valid_selection(&mut self.list_state, shown);

    let title = match self.images_query.state() {
      QueryState::Loading => " Images (loading...) ".to_string(),
      QueryState::Error(e) => format!(" Images (error: {}) ", e),
      _ if self.filter.is_active() => format!(" Images ({}/{}) ", shown, total),
      _ => format!(" Images ({}) ", total),
    };

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    if shown == 0 && !self.is_loading() {
      let content = if self.images_query.is_error() {
        "Failed to load images. Press 'r' to retry."
      } else if self.filter.is_active() {
        "No images match the current filters."
      } else {
        "No images found."
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let items: Vec<ListItem> = lines.into_iter().map(ListItem::new).collect();

    let list = List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::DarkGray)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut self.list_state);
  }

  fn render_filter_line(&self, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();

    if let Some(name) = &self.filter.name {
      spans.push(Span::styled("[Name] ", Style::default().fg(Color::Yellow)));
      spans.push(Span::styled(
        format!("{} ", name),
        Style::default().fg(Color::Gray),
      ));
    }
    if let Some((lo, hi)) = self.filter.size_mb {
      spans.push(Span::styled("[Size] ", Style::default().fg(Color::Yellow)));
      spans.push(Span::styled(
        format!("{}-{} MB ", lo, hi),
        Style::default().fg(Color::Gray),
      ));
    }

    if !spans.is_empty() {
      let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
      frame.render_widget(paragraph, area);
    }
  }

  // Key handling helpers for or_else chain pattern
  fn handle_overlays(&mut self, key: KeyEvent) -> Option<ViewAction> {
    match self.form.handle_key(key) {
      KeyResult::Handled => return Some(ViewAction::None),
      KeyResult::Event(ImageFormEvent::Submitted(data)) => {
        self.submit_upload(data);
        return Some(ViewAction::None);
      }
      KeyResult::Event(ImageFormEvent::Cancelled) => return Some(ViewAction::None),
      KeyResult::NotHandled => {}
    }

    match self.confirm.handle_key(key) {
      KeyResult::Handled => return Some(ViewAction::None),
      KeyResult::Event(ConfirmEvent::Confirmed) => {
        self.delete_confirmed();
        return Some(ViewAction::None);
      }
      KeyResult::Event(ConfirmEvent::Cancelled) => {
        self.pending_delete = None;
        return Some(ViewAction::None);
      }
      KeyResult::NotHandled => {}
    }

    match self.size_input.handle_key(key) {
      KeyResult::Handled => return Some(ViewAction::None),
      KeyResult::Event(SizeRangeEvent::Applied(bounds)) => {
        self.filter.size_mb = bounds;
        return Some(ViewAction::None);
      }
      KeyResult::Event(SizeRangeEvent::Cancelled) => return Some(ViewAction::None),
      KeyResult::NotHandled => {}
    }

    match self.search.handle_key(key) {
      KeyResult::Handled => Some(ViewAction::None),
      KeyResult::Event(SearchEvent::Changed(query)) => {
        self.filter.name = if query.is_empty() { None } else { Some(query) };
        Some(ViewAction::None)
      }
      KeyResult::Event(SearchEvent::Submitted) => Some(ViewAction::None),
      KeyResult::NotHandled => None,
    }
  }

  fn handle_navigation(&mut self, key: KeyEvent) -> Option<ViewAction> {
    match key.code {
      KeyCode::Char('j') | KeyCode::Down => {
        self.list_state.select_next();
        Some(ViewAction::None)
      }
      KeyCode::Char('k') | KeyCode::Up => {
        self.list_state.select_previous();
        Some(ViewAction::None)
      }
      _ => None,
    }
  }

  fn handle_actions(&mut self, key: KeyEvent) -> Option<ViewAction> {
    match key.code {
      KeyCode::Char('c') => {
        self.tabs.cycle(1);
        self.filter.category = self.tabs.selected_id();
        Some(ViewAction::None)
      }
      KeyCode::Char('C') => {
        self.tabs.cycle(-1);
        self.filter.category = self.tabs.selected_id();
        Some(ViewAction::None)
      }
      KeyCode::Char('s') => {
        self.size_input.show(self.filter.size_mb);
        Some(ViewAction::None)
      }
      KeyCode::Char('u') => {
        let choices = self.category_choices();
        let preselect = self.tabs.selected_id();
        self.form.show(choices, preselect);
        Some(ViewAction::None)
      }
      KeyCode::Char('d') => {
        let selected = self.selected_image().map(|i| (i.id, i.name.clone()));
        if let Some((id, name)) = selected {
          self.pending_delete = Some(id);
          self
            .confirm
            .show(format!("Are you sure you want to delete {}?", name));
        }
        Some(ViewAction::None)
      }
      KeyCode::Char('r') => {
        self.images_query.refetch();
        self.categories_query.refetch();
        Some(ViewAction::None)
      }
      KeyCode::Char('q') | KeyCode::Esc => Some(ViewAction::Pop),
      _ => None,
    }
  }

  fn submit_upload(&mut self, data: ImageFormData) {
    let gallery = self.gallery.clone();
    let new = NewImage {
      name: data.name.clone(),
      category_id: data.category_id,
      file: data.file,
    };
    self.mutation.run(async move {
      gallery
        .upload_image(new)
        .await
        .map(|_| format!("Uploaded {}", data.name))
        .map_err(|e| e.to_string())
    });
  }

  fn delete_confirmed(&mut self) {
    let Some(id) = self.pending_delete.take() else {
      return;
    };
    let gallery = self.gallery.clone();
    self.mutation.run(async move {
      gallery
        .delete_image(id)
        .await
        .map(|_| "Image deleted".to_string())
        .map_err(|e| e.to_string())
    });
  }
}

impl View for ImageListView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    self
      .handle_overlays(key)
      .or_else(|| self.handle_navigation(key))
      .or_else(|| self.handle_actions(key))
      .unwrap_or(ViewAction::None)
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(1), // Category tabs + filter summary
        Constraint::Min(1),    // Image list
      ])
      .split(area);

    self.tabs.render(frame, chunks[0]);
    self.render_filter_line(frame, chunks[0]);
    self.render_list(frame, chunks[1]);

    // Let overlay components render on top
    self.form.render_overlay(frame, area);
    self.confirm.render_overlay(frame, area);
    self.size_input.render_overlay(frame, area);
    self.search.render_overlay(frame, area);
  }

  fn breadcrumb_label(&self) -> String {
    "Images".to_string()
  }

  fn owns_keyboard(&self) -> bool {
    self.form.is_active()
      || self.confirm.is_active()
      || self.size_input.is_active()
      || self.search.is_active()
  }

  fn tick(&mut self) -> ViewAction {
    self.images_query.poll();

    if self.categories_query.poll() && self.categories_query.is_success() {
      let choices = self.category_choices();
      self.tabs.set_categories(choices);
      if let Some(id) = self.initial_category.take() {
        self.tabs.select_id(id);
      }
      self.filter.category = self.tabs.selected_id();
    }

    if self.mutation.poll() {
      let outcome = match self.mutation.state() {
        QueryState::Success(msg) => {
          // The image cache was invalidated by the mutation; refetch
          self.images_query.refetch();
          Some(msg.clone())
        }
        QueryState::Error(e) => Some(format!("Error: {}", e)),
        _ => None,
      };
      if let Some(msg) = outcome {
        self.mutation.reset();
        return ViewAction::Notice(msg);
      }
    }

    ViewAction::None
  }
}
