use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use unicode_width::UnicodeWidthChar;

use crate::error::{Error, Result};
use crate::theme::Theme;

const TAB: &str = "    ";

pub struct SyntaxHighlighter {
  syntax_set: SyntaxSet,
  theme_set: ThemeSet,
}

impl Default for SyntaxHighlighter {
  fn default() -> Self {
    Self::new()
  }
}

impl SyntaxHighlighter {
  pub fn new() -> Self {
    Self {
      syntax_set: SyntaxSet::load_defaults_newlines(),
      theme_set: ThemeSet::load_defaults(),
    }
  }

  /// Highlights a code fragment. `lang` is a fence token or extension;
  /// unknown languages fall back to plain text.
  pub fn highlight(&self, content: &str, lang: &str, theme: &Theme) -> Result<Vec<Line<'static>>> {
    let syntax = self
      .syntax_set
      .find_syntax_by_token(lang)
      .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
    let theme = self
      .theme_set
      .themes
      .get(theme.syntax_theme)
      .ok_or_else(|| Error::Render(format!("missing theme {}", theme.syntax_theme)))?;

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();

    for line in LinesWithEndings::from(content) {
      let ranges = highlighter
        .highlight_line(line, &self.syntax_set)
        .map_err(|e| Error::Render(e.to_string()))?;

      let spans = ranges
        .into_iter()
        .map(|(style, text)| {
          let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);
          let mut ratatui_style = Style::default().fg(fg);
          if style.font_style.contains(FontStyle::BOLD) {
            ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
          }
          if style.font_style.contains(FontStyle::ITALIC) {
            ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
          }
          Span::styled(expand_tabs(text.trim_end_matches('\n')), ratatui_style)
        })
        .collect::<Vec<_>>();

      lines.push(Line::from(spans));
    }

    Ok(lines)
  }
}

pub fn expand_tabs(s: &str) -> String {
  s.replace('\t', TAB)
}

/// Raw file content as unstyled lines, tabs expanded to four spaces.
pub fn plain_lines(content: &str) -> Vec<Line<'static>> {
  content
    .lines()
    .map(|line| Line::from(expand_tabs(line)))
    .collect()
}

/// Hard-wraps styled lines so none is wider than `width` cells.
pub fn wrap_lines(lines: Vec<Line<'static>>, width: u16) -> Vec<Line<'static>> {
  let width = width as usize;
  if width == 0 {
    return lines;
  }

  let mut wrapped = Vec::with_capacity(lines.len());
  for line in lines {
    if line.width() <= width {
      wrapped.push(line);
      continue;
    }

    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    for span in line.spans {
      let mut chunk = String::new();
      for c in span.content.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width && used > 0 {
          if !chunk.is_empty() {
            current.push(Span::styled(std::mem::take(&mut chunk), span.style));
          }
          wrapped.push(Line::from(std::mem::take(&mut current)));
          used = 0;
        }
        chunk.push(c);
        used += w;
      }
      if !chunk.is_empty() {
        current.push(Span::styled(chunk, span.style));
      }
    }
    if !current.is_empty() {
      wrapped.push(Line::from(current));
    }
  }
  wrapped
}

#[cfg(test)]
mod tests {
  use super::*;

  fn text_of(line: &Line) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
  }

  #[test]
  fn test_highlighter_creates() {
    let h = SyntaxHighlighter::new();
    assert!(!h.syntax_set.syntaxes().is_empty());
  }

  #[test]
  fn test_highlight_rust() {
    let h = SyntaxHighlighter::new();
    let lines = h.highlight("fn main() {}\nlet x = 1;\n", "rust", &Theme::dark()).unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(text_of(&lines[0]), "fn main() {}");
  }

  #[test]
  fn test_highlight_unknown_language_is_plain() {
    let h = SyntaxHighlighter::new();
    let lines = h.highlight("hello\n", "no-such-lang", &Theme::dark()).unwrap();
    assert_eq!(text_of(&lines[0]), "hello");
  }

  #[test]
  fn test_highlight_follows_syntax_theme() {
    let h = SyntaxHighlighter::new();
    let code = "fn main() {}\n";
    let dark = h.highlight(code, "rust", &Theme::dark()).unwrap();
    let light = h.highlight(code, "rust", &Theme::light()).unwrap();
    assert_eq!(text_of(&dark[0]), text_of(&light[0]));
    assert_ne!(dark[0].spans[0].style.fg, light[0].spans[0].style.fg);
  }

  #[test]
  fn test_plain_lines_expand_tabs() {
    let lines = plain_lines("a\tb\n\tindented\n");
    assert_eq!(lines.len(), 2);
    assert_eq!(text_of(&lines[0]), "a    b");
    assert_eq!(text_of(&lines[1]), "    indented");
  }

  #[test]
  fn test_wrap_lines_splits_long_lines() {
    let lines = wrap_lines(vec![Line::from("abcdefghij"), Line::from("ab")], 4);
    let texts: Vec<String> = lines.iter().map(text_of).collect();
    assert_eq!(texts, vec!["abcd", "efgh", "ij", "ab"]);
  }

  #[test]
  fn test_wrap_lines_keeps_span_styles() {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let line = Line::from(vec![Span::raw("abc"), Span::styled("defg", bold)]);
    let lines = wrap_lines(vec![line], 5);
    assert_eq!(lines.len(), 2);
    assert_eq!(text_of(&lines[0]), "abcde");
    assert_eq!(lines[1].spans[0].content, "fg");
    assert_eq!(lines[1].spans[0].style, bold);
  }

  #[test]
  fn test_wrap_lines_wide_chars() {
    let lines = wrap_lines(vec![Line::from("日本語")], 4);
    assert_eq!(lines.len(), 2);
    assert_eq!(text_of(&lines[0]), "日本");
  }
}
