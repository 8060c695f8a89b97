use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
  pub accent: Color,
  pub text: Color,
  pub border_active: Color,
  pub border_inactive: Color,
  pub selected_fg: Color,
  pub selected_bg: Color,
  pub bar_fg: Color,
  pub bar_bg: Color,
  pub counter_bg: Color,
  pub logo_bg: Color,
  pub message: Color,
  pub heading: Color,
  pub dim: Color,
  pub link: Color,
  pub code_fg: Color,
  pub code_bg: Color,
  /// syntect theme for code in the secondary pane
  pub syntax_theme: &'static str,
}

impl Theme {
  pub fn dark() -> Self {
    Self {
      accent: Color::Indexed(75),
      text: Color::Indexed(252),
      border_active: Color::Indexed(75),
      border_inactive: Color::Indexed(240),
      selected_fg: Color::Indexed(234),
      selected_bg: Color::Indexed(75),
      bar_fg: Color::Indexed(252),
      bar_bg: Color::Indexed(236),
      counter_bg: Color::Indexed(60),
      logo_bg: Color::Indexed(97),
      message: Color::Indexed(214),
      heading: Color::Indexed(114),
      dim: Color::Indexed(240),
      link: Color::Indexed(75),
      code_fg: Color::Indexed(214),
      code_bg: Color::Indexed(236),
      syntax_theme: "base16-ocean.dark",
    }
  }

  pub fn light() -> Self {
    Self {
      accent: Color::Indexed(27),
      text: Color::Indexed(235),
      border_active: Color::Indexed(27),
      border_inactive: Color::Indexed(250),
      selected_fg: Color::Indexed(255),
      selected_bg: Color::Indexed(27),
      bar_fg: Color::Indexed(235),
      bar_bg: Color::Indexed(253),
      counter_bg: Color::Indexed(153),
      logo_bg: Color::Indexed(183),
      message: Color::Indexed(166),
      heading: Color::Indexed(28),
      dim: Color::Indexed(245),
      link: Color::Indexed(25),
      code_fg: Color::Indexed(124),
      code_bg: Color::Indexed(254),
      syntax_theme: "InspiredGitHub",
    }
  }

  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "dark" => Some(Self::dark()),
      "light" => Some(Self::light()),
      _ => None,
    }
  }
}

impl Default for Theme {
  fn default() -> Self {
    Self::dark()
  }
}
