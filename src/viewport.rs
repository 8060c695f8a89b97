use ratatui::text::Line;

/// A scrollable window over pre-rendered lines.
///
/// `height` is the number of content rows that fit inside the pane border.
/// The offset is kept in `0..=max_offset()` by every mutation.
#[derive(Debug, Default)]
pub struct Viewport {
  width: u16,
  height: u16,
  y_offset: usize,
  lines: Vec<Line<'static>>,
  pub active: bool,
}

impl Viewport {
  pub fn new(width: u16, height: u16) -> Self {
    Self { width, height, ..Self::default() }
  }

  pub fn width(&self) -> u16 {
    self.width
  }

  pub fn height(&self) -> u16 {
    self.height
  }

  pub fn y_offset(&self) -> usize {
    self.y_offset
  }

  #[cfg(test)]
  pub fn lines(&self) -> &[Line<'static>] {
    &self.lines
  }

  pub fn set_content(&mut self, lines: Vec<Line<'static>>) {
    self.lines = lines;
    self.clamp_offset();
  }

  pub fn set_size(&mut self, width: u16, height: u16) {
    self.width = width;
    self.height = height;
    self.clamp_offset();
  }

  pub fn max_offset(&self) -> usize {
    self.lines.len().saturating_sub(self.height as usize)
  }

  pub fn line_up(&mut self) {
    self.y_offset = self.y_offset.saturating_sub(1);
  }

  pub fn line_down(&mut self) {
    self.y_offset = (self.y_offset + 1).min(self.max_offset());
  }

  pub fn goto_top(&mut self) {
    self.y_offset = 0;
  }

  pub fn goto_bottom(&mut self) {
    self.y_offset = self.max_offset();
  }

  /// Shifts the window the least amount needed for `row` to be visible.
  pub fn ensure_visible(&mut self, row: usize) {
    let height = self.height as usize;
    if height == 0 {
      return;
    }
    if row < self.y_offset {
      self.y_offset = row;
    } else if row >= self.y_offset + height {
      self.y_offset = row + 1 - height;
    }
    self.clamp_offset();
  }

  pub fn visible_lines(&self) -> &[Line<'static>] {
    let start = self.y_offset.min(self.lines.len());
    let end = (start + self.height as usize).min(self.lines.len());
    &self.lines[start..end]
  }

  fn clamp_offset(&mut self) {
    self.y_offset = self.y_offset.min(self.max_offset());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn numbered(n: usize) -> Vec<Line<'static>> {
    (0..n).map(|i| Line::from(format!("line {i}"))).collect()
  }

  #[test]
  fn test_line_down_stops_at_max_offset() {
    let mut vp = Viewport::new(20, 3);
    vp.set_content(numbered(5));
    for _ in 0..10 {
      vp.line_down();
    }
    assert_eq!(vp.y_offset(), 2);
    assert_eq!(vp.visible_lines()[0].spans[0].content, "line 2");
  }

  #[test]
  fn test_line_up_stops_at_zero() {
    let mut vp = Viewport::new(20, 3);
    vp.set_content(numbered(5));
    vp.line_up();
    assert_eq!(vp.y_offset(), 0);
  }

  #[test]
  fn test_short_content_never_scrolls() {
    let mut vp = Viewport::new(20, 10);
    vp.set_content(numbered(3));
    vp.goto_bottom();
    assert_eq!(vp.y_offset(), 0);
    assert_eq!(vp.visible_lines().len(), 3);
  }

  #[test]
  fn test_shrinking_content_clamps_offset() {
    let mut vp = Viewport::new(20, 2);
    vp.set_content(numbered(10));
    vp.goto_bottom();
    assert_eq!(vp.y_offset(), 8);
    vp.set_content(numbered(4));
    assert_eq!(vp.y_offset(), 2);
  }

  #[test]
  fn test_growing_height_clamps_offset() {
    let mut vp = Viewport::new(20, 2);
    vp.set_content(numbered(6));
    vp.goto_bottom();
    vp.set_size(20, 5);
    assert_eq!(vp.y_offset(), 1);
    assert_eq!(vp.visible_lines().len(), 5);
  }

  #[test]
  fn test_ensure_visible() {
    let mut vp = Viewport::new(20, 3);
    vp.set_content(numbered(10));
    vp.ensure_visible(7);
    assert_eq!(vp.y_offset(), 5);
    vp.ensure_visible(6);
    assert_eq!(vp.y_offset(), 5);
    vp.ensure_visible(1);
    assert_eq!(vp.y_offset(), 1);
  }

  #[test]
  fn test_zero_height() {
    let mut vp = Viewport::new(0, 0);
    vp.set_content(numbered(2));
    vp.line_down();
    vp.ensure_visible(1);
    assert!(vp.visible_lines().is_empty());
  }
}
