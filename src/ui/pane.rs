use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use crate::theme::Theme;
use crate::viewport::Viewport;

/// Draws one bordered pane showing the viewport's visible window. The
/// border takes the active color while the pane has focus.
pub fn render_pane(viewport: &Viewport, rounded: bool, theme: &Theme, area: Rect, buf: &mut Buffer) {
  let border_color = if viewport.active { theme.border_active } else { theme.border_inactive };
  let border_type = if rounded { BorderType::Rounded } else { BorderType::Plain };

  let block = Block::default()
    .borders(Borders::ALL)
    .border_type(border_type)
    .border_style(Style::default().fg(border_color));

  Paragraph::new(viewport.visible_lines().to_vec())
    .style(Style::default().fg(theme.text))
    .block(block)
    .render(area, buf);
}
