use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use unicode_width::UnicodeWidthChar;

use crate::status::StatusLine;
use crate::theme::Theme;

/// Cuts `s` so it fits in `max` cells, marking the cut with an ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
  let mut width = 0;
  let mut out = String::new();
  let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
  if total <= max {
    return s.to_string();
  }
  if max == 0 {
    return out;
  }
  for c in s.chars() {
    let w = c.width().unwrap_or(0);
    if width + w + 1 > max {
      break;
    }
    out.push(c);
    width += w;
  }
  out.push('…');
  out
}

fn cell_width(s: &str) -> usize {
  s.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Name, info, counter and logo segments, left to right. Info absorbs
/// whatever width the other three leave.
pub fn render_status_bar(status: &StatusLine, theme: &Theme, area: Rect, buf: &mut Buffer) {
  let total = area.width as usize;
  let name = format!(" {} ", truncate(&status.name, total / 4));
  let counter = format!(" {} ", status.counter);
  let logo = format!(" {} ", status.logo);

  let fixed = cell_width(&name) + cell_width(&counter) + cell_width(&logo);
  let info_width = total.saturating_sub(fixed);
  let info = truncate(&format!(" {}", status.info), info_width);
  let pad = info_width.saturating_sub(cell_width(&info));

  let info_style = if status.emphasized {
    Style::default().fg(theme.message).bg(theme.bar_bg).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(theme.bar_fg).bg(theme.bar_bg)
  };

  let line = Line::from(vec![
    Span::styled(name, Style::default().fg(theme.selected_fg).bg(theme.selected_bg).add_modifier(Modifier::BOLD)),
    Span::styled(info, info_style),
    Span::styled(" ".repeat(pad), Style::default().bg(theme.bar_bg)),
    Span::styled(counter, Style::default().fg(theme.bar_fg).bg(theme.counter_bg)),
    Span::styled(logo, Style::default().fg(theme.bar_fg).bg(theme.logo_bg).add_modifier(Modifier::BOLD)),
  ]);

  Paragraph::new(line)
    .style(Style::default().bg(theme.bar_bg))
    .render(area, buf);
}
