use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::text::{SyntaxHighlighter, expand_tabs, wrap_lines};
use crate::error::Result;
use crate::theme::Theme;

/// Renders markdown content to styled terminal lines no wider than `width`,
/// coloured from `theme`.
pub fn render_markdown(
  content: &str,
  width: u16,
  theme: &Theme,
  highlighter: &SyntaxHighlighter,
) -> Result<Vec<Line<'static>>> {
  let parser = Parser::new_ext(content, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
  let mut lines: Vec<Line<'static>> = Vec::new();
  let mut current: Vec<Span<'static>> = Vec::new();
  let mut styles: Vec<Style> = vec![Style::default()];
  let mut lists: Vec<Option<u64>> = Vec::new();
  let mut code: Option<(String, String)> = None;
  let mut heading: Option<HeadingLevel> = None;
  let mut link_url: Option<String> = None;
  let mut quote_depth = 0usize;
  let dim = Style::default().fg(theme.dim);

  for event in parser {
    match event {
      Event::Start(tag) => match tag {
        Tag::Heading { level, .. } => {
          flush(&mut current, &mut lines);
          blank_line(&mut lines);
          heading = Some(level);
          let style = heading_style(level, theme);
          styles.push(style);
          current.push(Span::styled(format!("{} ", "#".repeat(level as usize)), style));
        }
        Tag::Paragraph => {
          if lists.is_empty() {
            blank_line(&mut lines);
          }
        }
        Tag::CodeBlock(kind) => {
          flush(&mut current, &mut lines);
          blank_line(&mut lines);
          let lang = match kind {
            CodeBlockKind::Fenced(lang) => lang.to_string(),
            CodeBlockKind::Indented => String::new(),
          };
          code = Some((lang, String::new()));
        }
        Tag::List(start) => {
          flush(&mut current, &mut lines);
          if lists.is_empty() {
            blank_line(&mut lines);
          }
          lists.push(start);
        }
        Tag::Item => {
          flush(&mut current, &mut lines);
          let indent = "  ".repeat(lists.len().saturating_sub(1));
          let bullet = match lists.last_mut() {
            Some(Some(n)) => {
              let bullet = format!("{indent}{n}. ");
              *n += 1;
              bullet
            }
            _ => format!("{indent}• "),
          };
          current.push(Span::styled(bullet, Style::default().fg(theme.link)));
        }
        Tag::Emphasis => push_style(&mut styles, |s| s.add_modifier(Modifier::ITALIC)),
        Tag::Strong => push_style(&mut styles, |s| s.add_modifier(Modifier::BOLD)),
        Tag::Strikethrough => push_style(&mut styles, |s| s.add_modifier(Modifier::CROSSED_OUT)),
        Tag::Link { dest_url, .. } => {
          push_style(&mut styles, |s| s.fg(theme.link).add_modifier(Modifier::UNDERLINED));
          link_url = Some(dest_url.to_string());
        }
        Tag::BlockQuote(_) => {
          flush(&mut current, &mut lines);
          quote_depth += 1;
          push_style(&mut styles, |s| s.add_modifier(Modifier::ITALIC));
        }
        _ => {}
      },
      Event::End(tag) => match tag {
        TagEnd::Heading(_) => {
          styles.pop();
          heading = None;
          flush(&mut current, &mut lines);
        }
        TagEnd::Paragraph | TagEnd::Item | TagEnd::TableHead | TagEnd::TableRow => {
          flush(&mut current, &mut lines)
        }
        TagEnd::TableCell => current.push(Span::styled(" │ ", dim)),
        TagEnd::CodeBlock => {
          if let Some((lang, body)) = code.take() {
            lines.push(Line::from(Span::styled(format!("```{lang}"), dim)));
            for line in highlighter.highlight(&body, &lang, theme)? {
              let mut spans = vec![Span::raw("  ")];
              spans.extend(line.spans);
              lines.push(Line::from(spans));
            }
            lines.push(Line::from(Span::styled("```", dim)));
          }
        }
        TagEnd::List(_) => {
          lists.pop();
        }
        TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
          styles.pop();
        }
        TagEnd::Link => {
          styles.pop();
          if let Some(url) = link_url.take().filter(|u| !u.is_empty()) {
            current.push(Span::styled(format!(" ({url})"), dim));
          }
        }
        TagEnd::BlockQuote(_) => {
          flush(&mut current, &mut lines);
          styles.pop();
          quote_depth = quote_depth.saturating_sub(1);
        }
        _ => {}
      },
      Event::Text(text) => {
        if let Some((_, body)) = code.as_mut() {
          body.push_str(&text);
          continue;
        }
        let style = *styles.last().unwrap_or(&Style::default());
        if quote_depth > 0 && current.is_empty() {
          current.push(Span::styled("│ ".repeat(quote_depth), dim));
        }
        current.push(Span::styled(expand_tabs(&text), style));
      }
      Event::Code(inline) => {
        current.push(Span::styled(
          format!("`{inline}`"),
          Style::default().fg(theme.code_fg).bg(theme.code_bg),
        ));
      }
      Event::SoftBreak => {
        if heading.is_none() {
          current.push(Span::raw(" "));
        }
      }
      Event::HardBreak => flush(&mut current, &mut lines),
      Event::Rule => {
        flush(&mut current, &mut lines);
        blank_line(&mut lines);
        let len = (width as usize).max(3);
        lines.push(Line::from(Span::styled("─".repeat(len), dim)));
      }
      _ => {}
    }
  }

  flush(&mut current, &mut lines);
  Ok(wrap_lines(lines, width))
}

fn push_style(styles: &mut Vec<Style>, f: impl FnOnce(Style) -> Style) {
  let current = *styles.last().unwrap_or(&Style::default());
  styles.push(f(current));
}

fn flush(spans: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>) {
  if !spans.is_empty() {
    lines.push(Line::from(std::mem::take(spans)));
  }
}

/// Separates blocks with a single empty line, never at the very top.
fn blank_line(lines: &mut Vec<Line<'static>>) {
  if lines.last().is_some_and(|l| l.width() > 0) {
    lines.push(Line::default());
  }
}

fn heading_style(level: HeadingLevel, theme: &Theme) -> Style {
  let color = match level {
    HeadingLevel::H1 => theme.accent,
    HeadingLevel::H2 => theme.heading,
    HeadingLevel::H3 => theme.message,
    HeadingLevel::H4 => theme.text,
    HeadingLevel::H5 | HeadingLevel::H6 => theme.dim,
  };
  Style::default().fg(color).add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn render(content: &str) -> Vec<Line<'static>> {
    render_markdown(content, 80, &Theme::dark(), &SyntaxHighlighter::new()).unwrap()
  }

  fn all_text(lines: &[Line]) -> String {
    lines
      .iter()
      .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
      .collect::<Vec<_>>()
      .join("\n")
  }

  #[test]
  fn test_heading_renders_with_style() {
    let lines = render("# Hello World");
    assert_eq!(all_text(&lines), "# Hello World");
    assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
  }

  #[test]
  fn test_h2_renders_differently_from_h1() {
    let h1 = render("# H1");
    let h2 = render("## H2");
    assert_ne!(h1[0].spans[0].style.fg, h2[0].spans[0].style.fg);
    assert!(all_text(&h2).starts_with("## "));
  }

  #[test]
  fn test_colours_follow_theme() {
    let h = SyntaxHighlighter::new();
    let content = "# Title\n\n```rust\nfn main() {}\n```";
    let dark = render_markdown(content, 80, &Theme::dark(), &h).unwrap();
    let light = render_markdown(content, 80, &Theme::light(), &h).unwrap();
    assert_eq!(all_text(&dark), all_text(&light));
    assert_eq!(dark[0].spans[0].style.fg, Some(Theme::dark().accent));
    assert_eq!(light[0].spans[0].style.fg, Some(Theme::light().accent));

    let code_fg = |lines: &[Line]| {
      lines
        .iter()
        .find(|l| l.spans.len() > 1 && l.spans[0].content == "  ")
        .and_then(|l| l.spans[1].style.fg)
    };
    assert!(code_fg(&dark).is_some());
    assert_ne!(code_fg(&dark), code_fg(&light));
  }

  #[test]
  fn test_paragraphs_separated_by_blank_line() {
    let lines = render("first\n\nsecond");
    assert_eq!(all_text(&lines), "first\n\nsecond");
  }

  #[test]
  fn test_soft_break_joins_lines() {
    let lines = render("one\ntwo");
    assert_eq!(all_text(&lines), "one two");
  }

  #[test]
  fn test_code_block_fenced() {
    let lines = render("```rust\nfn main() {}\n```");
    let text = all_text(&lines);
    assert!(text.starts_with("```rust"));
    assert!(text.contains("  fn main() {}"));
    assert!(text.ends_with("```"));
  }

  #[test]
  fn test_lists() {
    let text = all_text(&render("- a\n- b\n\n1. x\n2. y"));
    assert!(text.contains("• a\n• b"));
    assert!(text.contains("1. x\n2. y"));
  }

  #[test]
  fn test_nested_list_indented() {
    let text = all_text(&render("- outer\n  - inner"));
    assert!(text.contains("• outer\n  • inner"));
  }

  #[test]
  fn test_inline_styles() {
    let lines = render("*it* **bold** `code`");
    let spans: Vec<_> = lines.iter().flat_map(|l| l.spans.iter()).collect();
    assert!(spans.iter().any(|s| s.style.add_modifier.contains(Modifier::ITALIC)));
    assert!(spans.iter().any(|s| s.style.add_modifier.contains(Modifier::BOLD)));
    assert!(spans.iter().any(|s| s.content == "`code`"));
  }

  #[test]
  fn test_link_shows_url() {
    let text = all_text(&render("[Rust](https://rust-lang.org)"));
    assert_eq!(text, "Rust (https://rust-lang.org)");
  }

  #[test]
  fn test_table_rows_on_separate_lines() {
    let text = all_text(&render("| a | b |\n|---|---|\n| 1 | 2 |"));
    assert_eq!(text, "a │ b │ \n1 │ 2 │ ");
  }

  #[test]
  fn test_blockquote_prefixed() {
    let text = all_text(&render("> quoted"));
    assert_eq!(text, "│ quoted");
  }

  #[test]
  fn test_rule_spans_width() {
    let lines = render_markdown("a\n\n---\n\nb", 10, &Theme::dark(), &SyntaxHighlighter::new()).unwrap();
    assert!(lines.iter().any(|l| l.spans.iter().any(|s| s.content == "─".repeat(10))));
  }

  #[test]
  fn test_wraps_to_width() {
    let lines = render_markdown("abcdefghijkl", 5, &Theme::dark(), &SyntaxHighlighter::new()).unwrap();
    assert_eq!(all_text(&lines), "abcde\nfghij\nkl");
  }
}
