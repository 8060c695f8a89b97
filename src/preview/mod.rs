pub mod markdown;
pub mod text;

use std::path::Path;

use ratatui::text::Line;

use self::text::SyntaxHighlighter;
use crate::error::Result;
use crate::fs::read_file_content;
use crate::theme::Theme;

/// Whether `path` gets the rendered markdown treatment.
pub fn is_markdown(path: &Path) -> bool {
  path
    .extension()
    .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Reads `path` and turns it into display lines for the secondary pane.
pub fn load_file(
  path: &Path,
  markdown: bool,
  width: u16,
  theme: &Theme,
  highlighter: &SyntaxHighlighter,
) -> Result<Vec<Line<'static>>> {
  let content = read_file_content(path)?;
  if markdown {
    markdown::render_markdown(&content, width, theme, highlighter)
  } else {
    Ok(text::plain_lines(&content))
  }
}
