pub const PLACEHOLDER: &str = "enter command";

/// Single-line modal input shown in the status bar while active.
#[derive(Debug)]
pub struct CommandBar {
  visible: bool,
  focused: bool,
  text: String,
  placeholder: &'static str,
}

impl Default for CommandBar {
  fn default() -> Self {
    Self { visible: false, focused: false, text: String::new(), placeholder: PLACEHOLDER }
  }
}

impl CommandBar {
  pub fn activate(&mut self) {
    self.visible = true;
    self.focused = true;
    self.text.clear();
  }

  /// Hides the bar and drops whatever was typed.
  pub fn reset(&mut self) {
    self.visible = false;
    self.focused = false;
    self.text.clear();
  }

  pub fn is_active(&self) -> bool {
    self.visible && self.focused
  }

  #[cfg(test)]
  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn push(&mut self, c: char) {
    self.text.push(c);
  }

  pub fn backspace(&mut self) {
    self.text.pop();
  }

  /// Returns the typed text and returns the bar to its inactive state.
  pub fn take(&mut self) -> String {
    let text = std::mem::take(&mut self.text);
    self.reset();
    text
  }

  /// What the status line shows while the bar is open.
  pub fn echo(&self) -> String {
    if self.text.is_empty() {
      self.placeholder.to_string()
    } else {
      format!(":{}", self.text)
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  Mkdir(String),
  Touch(String),
  Mv(String),
  Cp(String),
  Rm,
  Unknown(String),
}

impl Command {
  pub fn verb(&self) -> &str {
    match self {
      Command::Mkdir(_) => "mkdir",
      Command::Touch(_) => "touch",
      Command::Mv(_) => "mv",
      Command::Cp(_) => "cp",
      Command::Rm => "rm",
      Command::Unknown(verb) => verb,
    }
  }
}

/// Splits `input` on its first whitespace run into a verb and a single
/// argument. Returns `None` when there is no verb at all.
pub fn parse(input: &str) -> Option<Command> {
  let input = input.trim();
  if input.is_empty() {
    return None;
  }

  let (verb, arg) = match input.split_once(char::is_whitespace) {
    Some((verb, rest)) => (verb, rest.trim_start().to_string()),
    None => (input, String::new()),
  };

  let command = match verb {
    "mkdir" => Command::Mkdir(arg),
    "touch" => Command::Touch(arg),
    "mv" => Command::Mv(arg),
    "cp" => Command::Cp(arg),
    "rm" => Command::Rm,
    other => Command::Unknown(other.to_string()),
  };
  Some(command)
}
