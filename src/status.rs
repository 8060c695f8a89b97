use std::path::Path;

use crate::command::CommandBar;
use crate::fs::{Entry, format_size};
use crate::icons::DIR_GLYPH;

/// Text shown in the one-row status bar, recomputed on every draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
  pub name: String,
  pub info: String,
  pub counter: String,
  pub logo: String,
  /// The info segment holds a message or command echo rather than file details.
  pub emphasized: bool,
}

pub struct StatusInput<'a> {
  pub selected: Option<&'a Entry>,
  pub current_dir: &'a Path,
  pub command: &'a CommandBar,
  pub message: Option<&'a str>,
  pub cursor: isize,
  pub total: usize,
  pub show_icons: bool,
}

impl StatusLine {
  pub fn derive(input: StatusInput<'_>) -> Self {
    let name = input
      .selected
      .map(|e| e.name.clone())
      .unwrap_or_else(|| "empty".to_string());

    let (info, emphasized) = if input.command.is_active() {
      (input.command.echo(), true)
    } else if let Some(message) = input.message {
      (message.to_string(), true)
    } else if let Some(entry) = input.selected {
      let details = format!(
        "{} {} {}",
        format_size(entry.size),
        entry.mode_string(),
        input.current_dir.display()
      );
      (details, false)
    } else {
      (input.current_dir.display().to_string(), false)
    };

    let counter = if input.total == 0 {
      "0/0".to_string()
    } else {
      format!("{}/{}", input.cursor + 1, input.total)
    };

    let logo = if input.show_icons { format!("{DIR_GLYPH} FM") } else { "FM".to_string() };

    Self { name, info, counter, logo, emphasized }
  }
}
