use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::thread;

use ratatui::text::Line;
use tracing::debug;

use crate::error::{Error, Result};
use crate::event::Event;
use crate::fs::{self, Entry};
use crate::preview::{self, text::SyntaxHighlighter};
use crate::theme::Theme;

pub type RequestId = u64;

/// A filesystem change requested from the command bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
  CreateDir(PathBuf),
  CreateFile(PathBuf),
  Rename { from: PathBuf, to: PathBuf },
  MoveFile { from: PathBuf, to: PathBuf },
  MoveDir { from: PathBuf, to: PathBuf },
  DeleteFile(PathBuf),
  DeleteDir(PathBuf),
}

impl Mutation {
  pub fn verb(&self) -> &'static str {
    match self {
      Mutation::CreateDir(_) => "mkdir",
      Mutation::CreateFile(_) => "touch",
      Mutation::Rename { .. } => "mv",
      Mutation::MoveFile { .. } | Mutation::MoveDir { .. } => "cp",
      Mutation::DeleteFile(_) | Mutation::DeleteDir(_) => "rm",
    }
  }

  fn apply(&self) -> Result<()> {
    match self {
      Mutation::CreateDir(path) => fs::create_directory(path),
      Mutation::CreateFile(path) => fs::create_file(path),
      Mutation::Rename { from, to } => fs::rename_path(from, to),
      Mutation::MoveFile { from, to } => fs::copy_file(from, to, true),
      Mutation::MoveDir { from, to } => fs::copy_dir_recursive(from, to, true),
      Mutation::DeleteFile(path) => fs::delete_file(path),
      Mutation::DeleteDir(path) => fs::delete_dir_recursive(path),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
  ListDirectory { id: RequestId, dir: PathBuf, show_hidden: bool },
  ReadFile { id: RequestId, path: PathBuf, markdown: bool, width: u16, theme: Theme },
  /// Applies `op`, then reloads `dir`.
  Mutate { id: RequestId, op: Mutation, dir: PathBuf, show_hidden: bool },
}

impl Request {
  pub fn id(&self) -> RequestId {
    match self {
      Request::ListDirectory { id, .. } | Request::ReadFile { id, .. } | Request::Mutate { id, .. } => *id,
    }
  }
}

#[derive(Debug)]
pub enum Completion {
  DirectoryLoaded { id: RequestId, dir: PathBuf, entries: Vec<Entry> },
  FileLoaded { id: RequestId, path: PathBuf, lines: Vec<Line<'static>> },
  Failed { id: RequestId, op: &'static str, error: Error },
}

impl Completion {
  pub fn id(&self) -> RequestId {
    match self {
      Completion::DirectoryLoaded { id, .. } | Completion::FileLoaded { id, .. } | Completion::Failed { id, .. } => *id,
    }
  }
}

/// Runs one request to completion on the calling thread.
pub fn execute(request: Request, highlighter: &SyntaxHighlighter) -> Completion {
  match request {
    Request::ListDirectory { id, dir, show_hidden } => list(id, dir, show_hidden),
    Request::ReadFile { id, path, markdown, width, theme } => {
      match preview::load_file(&path, markdown, width, &theme, highlighter) {
        Ok(lines) => Completion::FileLoaded { id, path, lines },
        Err(error) => Completion::Failed { id, op: "read", error },
      }
    }
    Request::Mutate { id, op, dir, show_hidden } => match op.apply() {
      Ok(()) => list(id, dir, show_hidden),
      Err(error) => Completion::Failed { id, op: op.verb(), error },
    },
  }
}

fn list(id: RequestId, dir: PathBuf, show_hidden: bool) -> Completion {
  match fs::list_directory(&dir, show_hidden) {
    Ok(entries) => Completion::DirectoryLoaded { id, dir, entries },
    Err(error) => Completion::Failed { id, op: "list", error },
  }
}

/// Runs requests on short-lived background threads; each posts exactly one
/// `Event::Completed` back into the event queue.
pub struct Worker {
  tx: mpsc::Sender<Event>,
  highlighter: Arc<SyntaxHighlighter>,
}

impl Worker {
  pub fn new(tx: mpsc::Sender<Event>) -> Self {
    Self { tx, highlighter: Arc::new(SyntaxHighlighter::new()) }
  }

  pub fn dispatch(&self, request: Request) {
    debug!(id = request.id(), "dispatching request");
    let tx = self.tx.clone();
    let highlighter = Arc::clone(&self.highlighter);

    thread::spawn(move || {
      let completion = execute(request, &highlighter);
      debug!(id = completion.id(), "request finished");
      let _ = tx.send(Event::Completed(completion));
    });
  }
}
