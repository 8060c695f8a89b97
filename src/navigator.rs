use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::fs::Entry;
use crate::icons::file_icon;
use crate::theme::Theme;

/// Cursor over the current directory listing.
///
/// The cursor is signed: a single step may leave it at `-1` or `len` until
/// the caller's scroll sync wraps it back into range.
#[derive(Debug, Default)]
pub struct Navigator {
  entries: Vec<Entry>,
  cursor: isize,
}

impl Navigator {
  /// Installs a freshly loaded listing and puts the cursor back on the first entry.
  pub fn replace(&mut self, entries: Vec<Entry>) {
    self.entries = entries;
    self.cursor = 0;
  }

  #[cfg(test)]
  pub fn entries(&self) -> &[Entry] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn cursor(&self) -> isize {
    self.cursor
  }

  pub fn move_down(&mut self) {
    self.cursor += 1;
  }

  pub fn move_up(&mut self) {
    self.cursor -= 1;
  }

  pub fn goto_top(&mut self) {
    self.cursor = 0;
  }

  pub fn goto_bottom(&mut self) {
    self.cursor = self.entries.len() as isize - 1;
  }

  pub fn selected(&self) -> Option<&Entry> {
    usize::try_from(self.cursor).ok().and_then(|i| self.entries.get(i))
  }

  /// One styled line per entry, the entry under the cursor highlighted.
  pub fn lines(&self, show_icons: bool, theme: &Theme) -> Vec<Line<'static>> {
    self
      .entries
      .iter()
      .enumerate()
      .map(|(i, entry)| {
        let selected = i as isize == self.cursor;
        let icon = file_icon(&entry.name, entry.is_dir, entry.is_symlink());
        let name_style = if selected {
          Style::default()
            .fg(theme.selected_fg)
            .bg(theme.selected_bg)
            .add_modifier(Modifier::BOLD)
        } else if entry.is_dir {
          Style::default().fg(theme.accent)
        } else {
          Style::default().fg(theme.text)
        };

        let mut spans = Vec::with_capacity(2);
        if show_icons {
          let icon_style = if selected { name_style } else { Style::default().fg(icon.color) };
          spans.push(Span::styled(format!("{} ", icon.glyph), icon_style));
        }
        spans.push(Span::styled(entry.name.clone(), name_style));
        Line::from(spans)
      })
      .collect()
  }
}
