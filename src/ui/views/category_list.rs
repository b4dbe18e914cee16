use crate::gallery::{Category, CategoryPatch, Gallery, NewCategory};
use crate::query::{Mutation, Query, QueryState};
use crate::ui::components::{
  CategoryForm, CategoryFormData, CategoryFormEvent, ConfirmDialog, ConfirmEvent, KeyResult,
};
use crate::ui::view::{View, ViewAction};
use crate::ui::views::ImageListView;
use crate::ui::{ensure_valid_selection, truncate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

/// View for browsing and editing categories
pub struct CategoryListView {
  gallery: Gallery,
  query: Query<Vec<Category>>,
  list_state: ListState,
  form: CategoryForm,
  confirm: ConfirmDialog,
  mutation: Mutation<String>,
  editing: Option<u64>,
  pending_delete: Option<u64>,
}

impl CategoryListView {
  pub fn new(gallery: Gallery) -> Self {
    let gallery_for_query = gallery.clone();
    let mut query = Query::new(move || {
      let gallery = gallery_for_query.clone();
      async move { gallery.list_categories().await.map_err(|e| e.to_string()) }
    });

    // Start fetching immediately
    query.fetch();

    Self {
      gallery,
      query,
      list_state: ListState::default(),
      form: CategoryForm::new(),
      confirm: ConfirmDialog::new(),
      mutation: Mutation::new(),
      editing: None,
      pending_delete: None,
    }
  }

  fn categories(&self) -> &[Category] {
    self.query.data().map(|v| v.as_slice()).unwrap_or(&[])
  }

  fn selected_category(&self) -> Option<&Category> {
    self
      .list_state
      .selected()
      .and_then(|idx| self.categories().get(idx))
  }

  fn is_loading(&self) -> bool {
    self.query.is_loading()
  }

  fn render_list(&mut self, frame: &mut Frame, area: Rect) {
    let len = self.categories().len();
    ensure_valid_selection(&mut self.list_state, len);

    let title = match self.query.state() {
      QueryState::Loading => " Categories (loading...) ".to_string(),
      QueryState::Error(e) => format!(" Categories (error: {}) ", e),
      _ => format!(" Categories ({}) ", len),
    };

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    if self.categories().is_empty() && !self.is_loading() {
      let content = if self.query.is_error() {
        "Failed to load categories. Press 'r' to retry."
      } else {
        "No categories found. Press 'a' to add one."
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    // Collect items first to avoid borrow conflicts with list_state
    let items: Vec<ListItem> = self
      .categories()
      .iter()
      .map(|category| {
        let description = category.description.as_deref().unwrap_or("");
        let line = Line::from(vec![
          Span::styled(
            format!("{:<6}", category.id),
            Style::default().fg(Color::Cyan),
          ),
          Span::raw(format!("{:<24}", truncate(&category.name, 22))),
          Span::styled(
            format!("{:<36}", truncate(description, 34)),
            Style::default().fg(Color::Gray),
          ),
          Span::styled(
            truncate(&category.image, 32),
            Style::default().fg(Color::DarkGray),
          ),
        ]);
        ListItem::new(line)
      })
      .collect();

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

  // Key handling helpers for or_else chain pattern
  fn handle_overlays(&mut self, key: KeyEvent) -> Option<ViewAction> {
    match self.form.handle_key(key) {
      KeyResult::Handled => return Some(ViewAction::None),
      KeyResult::Event(CategoryFormEvent::Submitted(data)) => {
        self.submit_form(data);
        return Some(ViewAction::None);
      }
      KeyResult::Event(CategoryFormEvent::Cancelled) => {
        self.editing = None;
        return Some(ViewAction::None);
      }
      KeyResult::NotHandled => {}
    }

    match self.confirm.handle_key(key) {
      KeyResult::Handled => Some(ViewAction::None),
      KeyResult::Event(ConfirmEvent::Confirmed) => {
        self.delete_confirmed();
        Some(ViewAction::None)
      }
      KeyResult::Event(ConfirmEvent::Cancelled) => {
        self.pending_delete = None;
        Some(ViewAction::None)
      }
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
      KeyCode::Char('a') => {
        self.editing = None;
        self.form.show_create();
        Some(ViewAction::None)
      }
      KeyCode::Char('e') => {
        if let Some(category) = self.selected_category().cloned() {
          self.editing = Some(category.id);
          self.form.show_edit(&category);
        }
        Some(ViewAction::None)
      }
      KeyCode::Char('d') => {
        let selected = self.selected_category().map(|c| (c.id, c.name.clone()));
        if let Some((id, name)) = selected {
          self.pending_delete = Some(id);
          self
            .confirm
            .show(format!("Are you sure you want to delete {}?", name));
        }
        Some(ViewAction::None)
      }
      KeyCode::Char('r') => {
        self.query.refetch();
        Some(ViewAction::None)
      }
      KeyCode::Enter => {
        let selected = self.selected_category().map(|c| c.id);
        selected.map(|id| {
          ViewAction::Push(Box::new(ImageListView::new(self.gallery.clone(), Some(id))))
        })
      }
      KeyCode::Char('q') | KeyCode::Esc => Some(ViewAction::Pop),
      _ => None,
    }
  }

  fn submit_form(&mut self, data: CategoryFormData) {
    let gallery = self.gallery.clone();
    match self.editing.take() {
      Some(id) => {
        let patch = CategoryPatch {
          name: Some(data.name),
          description: Some(data.description),
          image: Some(data.image),
        };
        self.mutation.run(async move {
          match gallery.update_category(id, patch).await {
            Ok(Some(updated)) => Ok(format!("Updated category {}", updated.name)),
            Ok(None) => Ok(format!("Category {} no longer exists", id)),
            Err(e) => Err(e.to_string()),
          }
        });
      }
      None => {
        let new = NewCategory {
          name: data.name,
          description: data.description,
          image: data.image,
        };
        self.mutation.run(async move {
          gallery
            .create_category(new)
            .await
            .map(|created| format!("Created category {}", created.name))
            .map_err(|e| e.to_string())
        });
      }
    }
  }

  fn delete_confirmed(&mut self) {
    let Some(id) = self.pending_delete.take() else {
      return;
    };
    let gallery = self.gallery.clone();
    self.mutation.run(async move {
      match gallery.delete_category(id).await {
        Ok(true) => Ok("Category deleted".to_string()),
        Ok(false) => Ok(format!("Category {} no longer exists", id)),
        Err(e) => Err(e.to_string()),
      }
    });
  }
}

impl View for CategoryListView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    self
      .handle_overlays(key)
      .or_else(|| self.handle_navigation(key))
      .or_else(|| self.handle_actions(key))
      .unwrap_or(ViewAction::None)
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    self.render_list(frame, area);
    // Let overlay components render on top
    self.form.render_overlay(frame, area);
    self.confirm.render_overlay(frame, area);
  }

  fn breadcrumb_label(&self) -> String {
    "Categories".to_string()
  }

  fn owns_keyboard(&self) -> bool {
    self.form.is_active() || self.confirm.is_active()
  }

  fn tick(&mut self) -> ViewAction {
    self.query.poll();

    if self.mutation.poll() {
      let outcome = match self.mutation.state() {
        QueryState::Success(msg) => {
          // The store changed underneath the query; pick up the new snapshot
          self.query.refetch();
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
