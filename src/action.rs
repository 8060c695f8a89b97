#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
  Quit,
  MoveUp,
  MoveDown,
  MoveLeft,
  MoveRight,
  GoToTop,
  GoToBottom,
  ToggleHidden,
  GoHome,
  GoBack,
  SwitchPane,
  CommandStart,
  CommandInput(char),
  CommandBackspace,
  CommandSubmit,
  Cancel,
  Resize(u16, u16),
  Tick,
  None,
}

impl Action {
  pub fn from_name(name: &str) -> Option<Action> {
    match name {
      "quit" => Some(Action::Quit),
      "move_up" => Some(Action::MoveUp),
      "move_down" => Some(Action::MoveDown),
      "move_left" => Some(Action::MoveLeft),
      "move_right" => Some(Action::MoveRight),
      "go_to_top" => Some(Action::GoToTop),
      "go_to_bottom" => Some(Action::GoToBottom),
      "toggle_hidden" => Some(Action::ToggleHidden),
      "go_home" => Some(Action::GoHome),
      "go_back" => Some(Action::GoBack),
      "switch_pane" => Some(Action::SwitchPane),
      "command_start" => Some(Action::CommandStart),
      "command_backspace" => Some(Action::CommandBackspace),
      "command_submit" => Some(Action::CommandSubmit),
      "cancel" => Some(Action::Cancel),
      "none" => Some(Action::None),
      _ => None,
    }
  }

  /// Short description used by the help pane.
  pub fn description(&self) -> &'static str {
    match self {
      Action::Quit => "quit",
      Action::MoveUp => "move up",
      Action::MoveDown => "move down",
      Action::MoveLeft => "parent directory / back to list",
      Action::MoveRight => "open directory or file",
      Action::GoToTop => "go to top",
      Action::GoToBottom => "go to bottom",
      Action::ToggleHidden => "toggle hidden files",
      Action::GoHome => "go to home directory",
      Action::GoBack => "go to previous directory",
      Action::SwitchPane => "switch pane",
      Action::CommandStart => "open command bar",
      Action::CommandBackspace => "delete last character",
      Action::CommandSubmit => "run command",
      Action::Cancel => "cancel / back to help",
      Action::CommandInput(_) | Action::Resize(..) | Action::Tick | Action::None => "",
    }
  }
}
