pub mod help;
pub mod pane;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::App;
use crate::config::Config;

/// Splits `area` into the primary pane, the secondary pane and the status
/// row. The primary pane takes the left half, rounded down.
pub fn layout(area: Rect) -> (Rect, Rect, Rect) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(0), Constraint::Length(1)])
    .split(area);

  let panes = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Length(area.width / 2), Constraint::Min(0)])
    .split(rows[0]);

  (panes[0], panes[1], rows[1])
}

pub fn draw(frame: &mut Frame, app: &App, config: &Config) {
  let (left, right, bar) = layout(frame.area());
  let buf = frame.buffer_mut();

  pane::render_pane(&app.primary, config.rounded_panes, &app.theme, left, buf);
  pane::render_pane(&app.secondary, config.rounded_panes, &app.theme, right, buf);
  status_bar::render_status_bar(&app.status_line(), &app.theme, bar, buf);
}
