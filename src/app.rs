use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ratatui::text::Line;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::command::{self, Command, CommandBar};
use crate::config::Config;
use crate::event::{InputMode, PendingKey};
use crate::navigator::Navigator;
use crate::preview::is_markdown;
use crate::status::{StatusInput, StatusLine};
use crate::theme::Theme;
use crate::ui::help::help_lines;
use crate::viewport::Viewport;
use crate::worker::{Completion, Mutation, Request, RequestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  Primary,
  Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Uninitialized,
  Ready,
}

pub struct App {
  pub navigator: Navigator,
  pub primary: Viewport,
  pub secondary: Viewport,
  pub command: CommandBar,
  pub focus: Focus,
  pub pending_key: PendingKey,
  pub current_dir: PathBuf,
  pub previous_dir: Option<PathBuf>,
  pub home_dir: PathBuf,
  pub show_hidden: bool,
  pub status_message: Option<String>,
  pub phase: Phase,
  pub should_quit: bool,
  pub theme: Theme,
  show_icons: bool,
  pretty_markdown: bool,
  status_ticks: u32,
  status_age: u32,
  help: Vec<Line<'static>>,
  next_id: RequestId,
  latest_listing: Option<RequestId>,
  latest_read: Option<RequestId>,
  initial_listing: Option<RequestId>,
  requests: Vec<Request>,
}

impl App {
  pub fn new(start_dir: PathBuf, home_dir: PathBuf, config: &Config) -> Self {
    Self {
      navigator: Navigator::default(),
      primary: Viewport::new(0, 0),
      secondary: Viewport::new(0, 0),
      command: CommandBar::default(),
      focus: Focus::Primary,
      pending_key: PendingKey::default(),
      current_dir: start_dir,
      previous_dir: None,
      home_dir,
      show_hidden: false,
      status_message: None,
      phase: Phase::Uninitialized,
      should_quit: false,
      theme: config.theme.clone(),
      show_icons: config.show_icons,
      pretty_markdown: config.pretty_markdown,
      status_ticks: config.status_ticks,
      status_age: 0,
      help: help_lines(config),
      next_id: 0,
      latest_listing: None,
      latest_read: None,
      initial_listing: None,
      requests: Vec::new(),
    }
  }

  pub fn input_mode(&self) -> InputMode {
    if self.command.is_active() { InputMode::Command } else { InputMode::Normal }
  }

  pub fn update(&mut self, action: Action) -> Result<()> {
    match action {
      Action::Quit => self.should_quit = true,
      Action::Resize(w, h) => self.resize(w, h),
      Action::Tick => self.tick(),
      Action::None => {}
      _ if self.phase == Phase::Uninitialized => {}
      Action::CommandInput(c) if self.command.is_active() => self.command.push(c),
      Action::CommandBackspace if self.command.is_active() => self.command.backspace(),
      Action::CommandSubmit if self.command.is_active() => self.submit_command(),
      Action::CommandInput(_) | Action::CommandBackspace | Action::CommandSubmit => {}
      Action::Cancel => self.cancel(),
      Action::CommandStart => {
        self.command.activate();
        self.pending_key.clear();
      }
      Action::MoveDown => match self.focus {
        Focus::Primary => self.step_cursor(Navigator::move_down),
        Focus::Secondary => self.secondary.line_down(),
      },
      Action::MoveUp => match self.focus {
        Focus::Primary => self.step_cursor(Navigator::move_up),
        Focus::Secondary => self.secondary.line_up(),
      },
      Action::GoToTop => match self.focus {
        Focus::Primary => {
          self.navigator.goto_top();
          self.primary.goto_top();
          self.refresh_primary();
        }
        Focus::Secondary => self.secondary.goto_top(),
      },
      Action::GoToBottom => match self.focus {
        Focus::Primary => {
          self.navigator.goto_bottom();
          self.primary.goto_bottom();
          self.refresh_primary();
        }
        Focus::Secondary => self.secondary.goto_bottom(),
      },
      Action::MoveRight => self.open_selected(),
      Action::MoveLeft => match self.focus {
        Focus::Secondary => self.set_focus(Focus::Primary),
        Focus::Primary => {
          if let Some(parent) = self.current_dir.parent().map(Path::to_path_buf) {
            self.request_listing(parent);
          }
        }
      },
      Action::GoBack => {
        if let Some(prev) = self.previous_dir.clone() {
          self.request_listing(prev);
        }
      }
      Action::GoHome => {
        self.request_listing(self.home_dir.clone());
      }
      Action::ToggleHidden => {
        self.show_hidden = !self.show_hidden;
        self.request_listing(self.current_dir.clone());
      }
      Action::SwitchPane => {
        let next = match self.focus {
          Focus::Primary => Focus::Secondary,
          Focus::Secondary => Focus::Primary,
        };
        self.set_focus(next);
      }
    }
    Ok(())
  }

  /// Applies a worker result. Fails only when the very first listing could
  /// not be read, which ends the session.
  pub fn handle_completion(&mut self, completion: Completion) -> Result<()> {
    match completion {
      Completion::DirectoryLoaded { id, dir, entries } => {
        if self.latest_listing != Some(id) {
          debug!(id, "discarding stale listing");
          return Ok(());
        }
        if dir != self.current_dir {
          info!(dir = %dir.display(), "changed directory");
          self.previous_dir = Some(std::mem::replace(&mut self.current_dir, dir));
        }
        self.navigator.replace(entries);
        self.primary.goto_top();
        self.refresh_primary();
        self.show_help();
        self.set_focus(Focus::Primary);
        self.latest_read = None;
        self.initial_listing = None;
      }
      Completion::FileLoaded { id, path, lines } => {
        if self.latest_read != Some(id) {
          debug!(id, "discarding stale file content");
          return Ok(());
        }
        debug!(path = %path.display(), lines = lines.len(), "file loaded");
        self.secondary.set_content(lines);
        self.secondary.goto_top();
        self.set_focus(Focus::Secondary);
      }
      Completion::Failed { id, op, error } => {
        if self.initial_listing == Some(id) {
          return Err(error).with_context(|| format!("cannot open {}", self.current_dir.display()));
        }
        if self.latest_listing != Some(id) && self.latest_read != Some(id) {
          debug!(id, op, "discarding stale failure");
          return Ok(());
        }
        warn!(op, %error, "request failed");
        self.set_status(format!("{op} failed: {error}"));
      }
    }
    Ok(())
  }

  /// Takes the requests issued since the last call, oldest first.
  pub fn drain_requests(&mut self) -> Vec<Request> {
    std::mem::take(&mut self.requests)
  }

  pub fn status_line(&self) -> StatusLine {
    StatusLine::derive(StatusInput {
      selected: self.navigator.selected(),
      current_dir: &self.current_dir,
      command: &self.command,
      message: self.status_message.as_deref(),
      cursor: self.navigator.cursor(),
      total: self.navigator.len(),
      show_icons: self.show_icons,
    })
  }

  pub fn set_status(&mut self, message: impl Into<String>) {
    self.status_message = Some(message.into());
    self.status_age = 0;
  }

  fn resize(&mut self, width: u16, height: u16) {
    let pane_height = height.saturating_sub(1).saturating_sub(2);
    let left = width / 2;
    let right = width - left;
    self.primary.set_size(left.saturating_sub(2), pane_height);
    self.secondary.set_size(right.saturating_sub(2), pane_height);

    match self.phase {
      Phase::Uninitialized => {
        self.show_help();
        self.set_focus(Focus::Primary);
        let id = self.request_listing(self.current_dir.clone());
        self.initial_listing = Some(id);
        self.phase = Phase::Ready;
        info!(dir = %self.current_dir.display(), width, height, "session ready");
      }
      Phase::Ready => {
        if let Ok(row) = usize::try_from(self.navigator.cursor()) {
          self.primary.ensure_visible(row);
        }
      }
    }
  }

  fn tick(&mut self) {
    if self.status_message.is_none() || self.status_ticks == 0 {
      return;
    }
    self.status_age += 1;
    if self.status_age >= self.status_ticks {
      self.status_message = None;
    }
  }

  fn cancel(&mut self) {
    self.command.reset();
    self.show_help();
    self.set_focus(Focus::Primary);
    self.status_message = None;
  }

  /// One cursor step on the primary pane, then the window follows it by at
  /// most one line, wrapping at either end.
  fn step_cursor(&mut self, step: fn(&mut Navigator)) {
    if self.navigator.is_empty() {
      return;
    }
    step(&mut self.navigator);

    let len = self.navigator.len() as isize;
    let cursor = self.navigator.cursor();
    let top = self.primary.y_offset() as isize;
    let bottom = self.primary.height() as isize + top - 1;

    if cursor < top {
      self.primary.line_up();
    } else if cursor > bottom {
      self.primary.line_down();
    }

    if cursor > len - 1 {
      self.navigator.goto_top();
      self.primary.goto_top();
    } else if cursor < self.primary.y_offset() as isize {
      self.navigator.goto_bottom();
      self.primary.goto_bottom();
    }

    self.refresh_primary();
  }

  fn open_selected(&mut self) {
    if self.focus != Focus::Primary {
      return;
    }
    let Some(entry) = self.navigator.selected() else {
      return;
    };
    let path = entry.path.clone();
    if entry.is_dir {
      self.request_listing(path);
    } else {
      self.request_read(path);
    }
  }

  fn submit_command(&mut self) {
    let text = self.command.take();
    let Some(cmd) = command::parse(&text) else {
      return;
    };
    debug!(?cmd, "command submitted");

    let missing_arg = matches!(
      &cmd,
      Command::Mkdir(arg) | Command::Touch(arg) | Command::Mv(arg) | Command::Cp(arg) if arg.is_empty()
    );
    if missing_arg {
      self.set_status(format!("{}: missing argument", cmd.verb()));
      return;
    }

    let selected = self.navigator.selected().map(|e| (e.path.clone(), e.is_dir));
    let mutation = match cmd {
      Command::Mkdir(arg) => Mutation::CreateDir(self.current_dir.join(arg)),
      Command::Touch(arg) => Mutation::CreateFile(self.current_dir.join(arg)),
      Command::Unknown(verb) => {
        self.set_status(format!("unknown command: {verb}"));
        return;
      }
      other => {
        let Some((from, is_dir)) = selected else {
          self.set_status(format!("{}: nothing selected", other.verb()));
          return;
        };
        match other {
          Command::Mv(arg) => Mutation::Rename { from, to: self.current_dir.join(arg) },
          Command::Cp(arg) if is_dir => Mutation::MoveDir { from, to: self.current_dir.join(arg) },
          Command::Cp(arg) => Mutation::MoveFile { from, to: self.current_dir.join(arg) },
          _ if is_dir => Mutation::DeleteDir(from),
          _ => Mutation::DeleteFile(from),
        }
      }
    };
    self.request_mutation(mutation);
  }

  fn next_request_id(&mut self) -> RequestId {
    self.next_id += 1;
    self.next_id
  }

  fn request_listing(&mut self, dir: PathBuf) -> RequestId {
    let id = self.next_request_id();
    self.latest_listing = Some(id);
    self.requests.push(Request::ListDirectory { id, dir, show_hidden: self.show_hidden });
    id
  }

  fn request_read(&mut self, path: PathBuf) {
    let id = self.next_request_id();
    self.latest_read = Some(id);
    let markdown = self.pretty_markdown && is_markdown(&path);
    let width = self.secondary.width();
    let theme = self.theme.clone();
    self.requests.push(Request::ReadFile { id, path, markdown, width, theme });
  }

  fn request_mutation(&mut self, op: Mutation) {
    let id = self.next_request_id();
    self.latest_listing = Some(id);
    self.requests.push(Request::Mutate {
      id,
      op,
      dir: self.current_dir.clone(),
      show_hidden: self.show_hidden,
    });
  }

  fn refresh_primary(&mut self) {
    let lines = self.navigator.lines(self.show_icons, &self.theme);
    self.primary.set_content(lines);
  }

  fn show_help(&mut self) {
    self.secondary.set_content(self.help.clone());
    self.secondary.goto_top();
  }

  fn set_focus(&mut self, focus: Focus) {
    self.focus = focus;
    self.primary.active = focus == Focus::Primary;
    self.secondary.active = focus == Focus::Secondary;
  }
}
