use crate::event::{Event, EventHandler};
use crate::gallery::Gallery;
use crate::ui::components::{draw_footer, CommandEvent, CommandInput, KeyResult};
use crate::ui::view::{View, ViewAction};
use crate::ui::views::{CategoryListView, ImageListView};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::{Duration, Instant};
use tracing::info;

/// How long a footer notice stays visible
const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Main application: owns the terminal, the view stack and the global
/// command input. Everything else is delegated to the top view.
pub struct App {
  gallery: Gallery,
  view_stack: Vec<Box<dyn View>>,
  command: CommandInput,
  notice: Option<(String, Instant)>,
  should_quit: bool,
}

impl App {
  pub fn new(gallery: Gallery) -> Self {
    let root = CategoryListView::new(gallery.clone());
    Self {
      gallery,
      view_stack: vec![Box::new(root)],
      command: CommandInput::new(),
      notice: None,
      should_quit: false,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut events = EventHandler::new(Duration::from_millis(250));

    while !self.should_quit {
      terminal.draw(|frame| self.draw(frame))?;

      if let Some(event) = events.next().await {
        self.handle_event(event);
      }
    }

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
  }

  fn draw(&mut self, frame: &mut Frame) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Min(1),    // Main content
        Constraint::Length(1), // Footer
      ])
      .split(frame.area());

    if let Some(view) = self.view_stack.last_mut() {
      view.render(frame, chunks[0]);
    }

    // Command overlay draws over whatever the view rendered
    self.command.render_overlay(frame, chunks[0]);

    let breadcrumb: Vec<String> = self
      .view_stack
      .iter()
      .map(|view| view.breadcrumb_label())
      .collect();
    let notice = self.notice.as_ref().map(|(msg, _)| msg.as_str());
    draw_footer(frame, chunks[1], &breadcrumb, notice);
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Tick => self.handle_tick(),
    }
  }

  fn handle_key(&mut self, key: KeyEvent) {
    // Ctrl-C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    // The global command input sees keys first, unless the top view has a
    // modal component open (a form typing ':' must not open command mode)
    let view_owns_keyboard = self
      .view_stack
      .last()
      .map(|view| view.owns_keyboard())
      .unwrap_or(false);

    if !view_owns_keyboard {
      match self.command.handle_key(key) {
        KeyResult::Handled => return,
        KeyResult::Event(CommandEvent::Submitted(cmd)) => {
          self.execute_command(&cmd);
          return;
        }
        KeyResult::Event(CommandEvent::Cancelled) => return,
        KeyResult::NotHandled => {}
      }
      // An open palette swallows keys it has no binding for
      if self.command.is_active() {
        return;
      }
    }

    let Some(view) = self.view_stack.last_mut() else {
      return;
    };
    let action = view.handle_key(key);
    self.apply_action(action);
  }

  fn handle_tick(&mut self) {
    // Expire the footer notice
    if let Some((_, shown_at)) = &self.notice {
      if shown_at.elapsed() > NOTICE_TTL {
        self.notice = None;
      }
    }

    if let Some(view) = self.view_stack.last_mut() {
      let action = view.tick();
      self.apply_action(action);
    }
  }

  fn execute_command(&mut self, cmd: &str) {
    info!("Executing command: {}", cmd);
    match cmd {
      "categories" => {
        self.view_stack = vec![Box::new(CategoryListView::new(self.gallery.clone()))];
      }
      "images" => {
        self.view_stack = vec![Box::new(ImageListView::new(self.gallery.clone(), None))];
      }
      "quit" => self.should_quit = true,
      "" => {}
      unknown => self.set_notice(format!("Unknown command: {}", unknown)),
    }
  }

  fn apply_action(&mut self, action: ViewAction) {
    match action {
      ViewAction::None => {}
      ViewAction::Push(view) => self.view_stack.push(view),
      ViewAction::Pop => {
        // Popping the root view quits, like q in k9s
        if self.view_stack.len() > 1 {
          self.view_stack.pop();
        } else {
          self.should_quit = true;
        }
      }
      ViewAction::Notice(msg) => self.set_notice(msg),
    }
  }

  fn set_notice(&mut self, msg: String) {
    self.notice = Some((msg, Instant::now()));
  }
}
