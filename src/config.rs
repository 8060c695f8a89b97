use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::action::Action;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
  pub code: KeyCode,
  pub modifiers: KeyModifiers,
}

impl KeyBinding {
  fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
    Self { code, modifiers }
  }

  /// Label shown on the help page, e.g. `Ctrl+c`, `Space`, `Enter`.
  pub fn display_key(&self) -> String {
    let key = match self.code {
      KeyCode::Char(' ') => "Space".to_string(),
      KeyCode::Char(c) => c.to_string(),
      code => format!("{code:?}"),
    };
    let prefix: String = [
      (KeyModifiers::CONTROL, "Ctrl+"),
      (KeyModifiers::ALT, "Alt+"),
      (KeyModifiers::SHIFT, "Shift+"),
    ]
    .into_iter()
    .filter(|(m, _)| self.modifiers.contains(*m))
    .map(|(_, label)| label)
    .collect();
    format!("{prefix}{key}")
  }
}

pub struct Config {
  pub pretty_markdown: bool,
  pub show_icons: bool,
  pub rounded_panes: bool,
  pub theme: Theme,
  pub tick_rate_ms: u64,
  pub status_ticks: u32,
  pub sequence_timeout_ms: u64,
  pub normal_keys: HashMap<KeyBinding, Action>,
  pub command_keys: HashMap<KeyBinding, Action>,
  pub double_keys: HashMap<KeyBinding, Action>,
}

#[derive(Deserialize, Default)]
struct TomlConfig {
  settings: Option<SettingsConfig>,
  keys: Option<KeysConfig>,
}

#[derive(Deserialize, Default)]
struct SettingsConfig {
  pretty_markdown: Option<bool>,
  show_icons: Option<bool>,
  rounded_panes: Option<bool>,
  theme: Option<String>,
  tick_rate_ms: Option<u64>,
  status_ticks: Option<u32>,
  sequence_timeout_ms: Option<u64>,
}

#[derive(Deserialize, Default)]
struct KeysConfig {
  normal: Option<HashMap<String, String>>,
  command: Option<HashMap<String, String>>,
  double: Option<HashMap<String, String>>,
}

/// Parses `j`, `enter`, `ctrl+c` or `shift+g`. A shifted character is stored
/// as its upper-case form without a modifier, which is what terminals send.
fn parse_key_binding(s: &str) -> Option<KeyBinding> {
  let Some((modifier, key)) = s.split_once('+').filter(|(_, key)| !key.is_empty()) else {
    return key_code(s).map(|code| KeyBinding::new(code, KeyModifiers::NONE));
  };
  let code = key_code(key)?;
  match (modifier.to_lowercase().as_str(), code) {
    ("shift", KeyCode::Char(c)) => {
      Some(KeyBinding::new(KeyCode::Char(c.to_ascii_uppercase()), KeyModifiers::NONE))
    }
    ("shift", code) => Some(KeyBinding::new(code, KeyModifiers::SHIFT)),
    ("ctrl", code) => Some(KeyBinding::new(code, KeyModifiers::CONTROL)),
    ("alt", code) => Some(KeyBinding::new(code, KeyModifiers::ALT)),
    _ => None,
  }
}

fn key_code(s: &str) -> Option<KeyCode> {
  let mut chars = s.chars();
  if let (Some(c), None) = (chars.next(), chars.next()) {
    return Some(KeyCode::Char(c));
  }
  match s.to_lowercase().as_str() {
    "enter" => Some(KeyCode::Enter),
    "space" => Some(KeyCode::Char(' ')),
    "esc" => Some(KeyCode::Esc),
    "tab" => Some(KeyCode::Tab),
    "backspace" => Some(KeyCode::Backspace),
    "up" => Some(KeyCode::Up),
    "down" => Some(KeyCode::Down),
    "left" => Some(KeyCode::Left),
    "right" => Some(KeyCode::Right),
    _ => None,
  }
}

/// Drops SHIFT from character keys: the terminal already folded it into
/// the character (`G`, `:`, `~`).
pub fn normalize_key_event(key: KeyEvent) -> KeyBinding {
  let mut modifiers = key.modifiers;
  if let KeyCode::Char(_) = key.code {
    modifiers.remove(KeyModifiers::SHIFT);
  }
  KeyBinding { code: key.code, modifiers }
}

impl Default for Config {
  fn default() -> Self {
    let mut config = Config::empty();
    let mut errors = Vec::new();
    config.apply_toml_str(Config::default_toml(), &mut errors);
    config
  }
}

fn bind_table(
  table: &HashMap<String, String>,
  target: &mut HashMap<KeyBinding, Action>,
  errors: &mut Vec<String>,
) {
  target.clear();
  for (key_str, action_str) in table {
    let Some(kb) = parse_key_binding(key_str) else {
      errors.push(format!("invalid key binding: {key_str:?}"));
      continue;
    };
    let Some(action) = Action::from_name(action_str) else {
      errors.push(format!("invalid action: {action_str:?}"));
      continue;
    };
    target.insert(kb, action);
  }
}

impl Config {
  fn empty() -> Self {
    Config {
      pretty_markdown: true,
      show_icons: true,
      rounded_panes: false,
      theme: Theme::dark(),
      tick_rate_ms: 100,
      status_ticks: 30,
      sequence_timeout_ms: 1000,
      normal_keys: HashMap::new(),
      command_keys: HashMap::new(),
      double_keys: HashMap::new(),
    }
  }

  fn apply_toml_str(&mut self, s: &str, errors: &mut Vec<String>) {
    let toml_config: TomlConfig = match toml::from_str(s) {
      Ok(c) => c,
      Err(e) => {
        errors.push(format!("failed to parse config.toml: {e}"));
        return;
      }
    };

    if let Some(settings) = toml_config.settings {
      if let Some(v) = settings.pretty_markdown {
        self.pretty_markdown = v;
      }
      if let Some(v) = settings.show_icons {
        self.show_icons = v;
      }
      if let Some(v) = settings.rounded_panes {
        self.rounded_panes = v;
      }
      if let Some(name) = settings.theme {
        match Theme::from_name(&name) {
          Some(theme) => self.theme = theme,
          None => errors.push(format!("unknown theme: {name:?}")),
        }
      }
      if let Some(tick) = settings.tick_rate_ms {
        self.tick_rate_ms = tick.max(1);
      }
      if let Some(v) = settings.status_ticks {
        self.status_ticks = v;
      }
      if let Some(v) = settings.sequence_timeout_ms {
        self.sequence_timeout_ms = v;
      }
    }

    if let Some(keys) = toml_config.keys {
      if let Some(normal) = keys.normal {
        bind_table(&normal, &mut self.normal_keys, errors);
      }
      if let Some(command) = keys.command {
        bind_table(&command, &mut self.command_keys, errors);
      }
      if let Some(double) = keys.double {
        bind_table(&double, &mut self.double_keys, errors);
      }
    }
  }

  pub fn default_toml() -> &'static str {
    r#"[settings]
pretty_markdown = true     # render .md files instead of showing raw text
show_icons = true          # file type glyphs (needs a Nerd Font)
rounded_panes = false
theme = "dark"             # dark | light
tick_rate_ms = 100         # event loop tick rate in ms
status_ticks = 30          # ticks before a status message is cleared
sequence_timeout_ms = 1000 # max gap between the two presses of a double key, 0 = no limit

[keys.normal]
j = "move_down"
k = "move_up"
h = "move_left"
l = "move_right"
down = "move_down"
up = "move_up"
left = "move_left"
right = "move_right"
"shift+g" = "go_to_bottom"
"~" = "go_home"
"." = "toggle_hidden"
"-" = "go_back"
":" = "command_start"
tab = "switch_pane"
esc = "cancel"
q = "quit"
"ctrl+c" = "quit"

[keys.command]
enter = "command_submit"
backspace = "command_backspace"
esc = "cancel"
"ctrl+c" = "quit"

[keys.double]
g = "go_to_top"
"#
  }

  pub fn reverse_lookup(&self) -> HashMap<Action, Vec<String>> {
    let mut map: HashMap<Action, Vec<String>> = HashMap::new();
    for (kb, action) in &self.normal_keys {
      map.entry(action.clone()).or_default().push(kb.display_key());
    }
    for (kb, action) in &self.double_keys {
      let key = kb.display_key();
      map.entry(action.clone()).or_default().push(format!("{key}{key}"));
    }
    for keys in map.values_mut() {
      keys.sort();
    }
    map
  }

  pub fn config_path() -> Result<std::path::PathBuf, String> {
    dirs::config_dir()
      .map(|d| d.join("fm").join("config.toml"))
      .ok_or_else(|| "could not determine config directory".to_string())
  }

  pub fn load() -> (Config, Vec<String>) {
    let mut errors = Vec::new();

    let content = Self::config_path()
      .ok()
      .and_then(|p| std::fs::read_to_string(p).ok());

    let config = match content {
      Some(s) => Self::load_from_str_with_errors(&s, &mut errors),
      None => Config::default(),
    };

    (config, errors)
  }

  #[cfg(test)]
  pub fn load_from_str(s: &str) -> Config {
    let mut errors = Vec::new();
    Self::load_from_str_with_errors(s, &mut errors)
  }

  fn load_from_str_with_errors(s: &str, errors: &mut Vec<String>) -> Config {
    let mut config = Config::default();
    config.apply_toml_str(s, errors);
    config
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

  fn kb(c: char) -> KeyBinding {
    KeyBinding { code: KeyCode::Char(c), modifiers: KeyModifiers::NONE }
  }

  #[test]
  fn test_parse_single_char() {
    let kb = parse_key_binding("j").unwrap();
    assert_eq!(kb.code, KeyCode::Char('j'));
    assert_eq!(kb.modifiers, KeyModifiers::NONE);
  }

  #[test]
  fn test_parse_shift_modifier() {
    let kb = parse_key_binding("shift+g").unwrap();
    assert_eq!(kb.code, KeyCode::Char('G'));
    assert_eq!(kb.modifiers, KeyModifiers::NONE);
    assert_eq!(kb, parse_key_binding("G").unwrap());
  }

  #[test]
  fn test_parse_ctrl_modifier() {
    let kb = parse_key_binding("ctrl+c").unwrap();
    assert_eq!(kb.code, KeyCode::Char('c'));
    assert_eq!(kb.modifiers, KeyModifiers::CONTROL);
  }

  #[test]
  fn test_parse_named_keys() {
    assert_eq!(parse_key_binding("enter").unwrap().code, KeyCode::Enter);
    assert_eq!(parse_key_binding("esc").unwrap().code, KeyCode::Esc);
    assert_eq!(parse_key_binding("tab").unwrap().code, KeyCode::Tab);
    assert_eq!(parse_key_binding("Backspace").unwrap().code, KeyCode::Backspace);
    assert_eq!(parse_key_binding("space").unwrap(), kb(' '));
  }

  #[test]
  fn test_parse_punctuation() {
    assert_eq!(parse_key_binding(":").unwrap(), kb(':'));
    assert_eq!(parse_key_binding("~").unwrap(), kb('~'));
    assert_eq!(parse_key_binding("-").unwrap(), kb('-'));
    assert_eq!(parse_key_binding("+").unwrap(), kb('+'));
    let ctrl_plus = parse_key_binding("ctrl++").unwrap();
    assert_eq!(ctrl_plus, KeyBinding::new(KeyCode::Char('+'), KeyModifiers::CONTROL));
  }

  #[test]
  fn test_parse_shift_on_named_key_keeps_modifier() {
    let kb = parse_key_binding("shift+tab").unwrap();
    assert_eq!(kb, KeyBinding::new(KeyCode::Tab, KeyModifiers::SHIFT));
  }

  #[test]
  fn test_parse_invalid() {
    assert!(parse_key_binding("").is_none());
    assert!(parse_key_binding("foobar").is_none());
    assert!(parse_key_binding("meta+x").is_none());
    assert!(parse_key_binding("ctrl+pageup").is_none());
  }

  fn key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
      code,
      modifiers,
      kind: KeyEventKind::Press,
      state: KeyEventState::NONE,
    }
  }

  #[test]
  fn test_normalize_uppercase_strips_shift() {
    let kb = normalize_key_event(key_event(KeyCode::Char('G'), KeyModifiers::SHIFT));
    assert_eq!(kb.code, KeyCode::Char('G'));
    assert_eq!(kb.modifiers, KeyModifiers::NONE);
  }

  #[test]
  fn test_normalize_shifted_symbol() {
    let kb = normalize_key_event(key_event(KeyCode::Char(':'), KeyModifiers::SHIFT));
    assert_eq!(kb.modifiers, KeyModifiers::NONE);
  }

  #[test]
  fn test_normalize_ctrl_preserves_modifier() {
    let kb = normalize_key_event(key_event(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(kb.modifiers, KeyModifiers::CONTROL);
  }

  #[test]
  fn test_normalize_keeps_shift_on_named_keys() {
    let kb = normalize_key_event(key_event(KeyCode::Tab, KeyModifiers::SHIFT));
    assert_eq!(kb.modifiers, KeyModifiers::SHIFT);
  }

  #[test]
  fn test_default_settings() {
    let config = Config::default();
    assert!(config.pretty_markdown);
    assert!(config.show_icons);
    assert!(!config.rounded_panes);
    assert_eq!(config.tick_rate_ms, 100);
    assert_eq!(config.status_ticks, 30);
    assert_eq!(config.sequence_timeout_ms, 1000);
  }

  #[test]
  fn test_default_has_all_normal_bindings() {
    let config = Config::default();
    let n = KeyModifiers::NONE;

    let expected = vec![
      (KeyCode::Char('q'), n, Action::Quit),
      (KeyCode::Char('c'), KeyModifiers::CONTROL, Action::Quit),
      (KeyCode::Char('j'), n, Action::MoveDown),
      (KeyCode::Down, n, Action::MoveDown),
      (KeyCode::Char('k'), n, Action::MoveUp),
      (KeyCode::Up, n, Action::MoveUp),
      (KeyCode::Char('h'), n, Action::MoveLeft),
      (KeyCode::Left, n, Action::MoveLeft),
      (KeyCode::Char('l'), n, Action::MoveRight),
      (KeyCode::Right, n, Action::MoveRight),
      (KeyCode::Char('G'), n, Action::GoToBottom),
      (KeyCode::Char('~'), n, Action::GoHome),
      (KeyCode::Char('.'), n, Action::ToggleHidden),
      (KeyCode::Char('-'), n, Action::GoBack),
      (KeyCode::Char(':'), n, Action::CommandStart),
      (KeyCode::Tab, n, Action::SwitchPane),
      (KeyCode::Esc, n, Action::Cancel),
    ];

    for (code, mods, action) in expected {
      let kb = KeyBinding { code, modifiers: mods };
      assert_eq!(
        config.normal_keys.get(&kb),
        Some(&action),
        "missing binding for {code:?} with {mods:?}"
      );
    }
  }

  #[test]
  fn test_default_command_and_double_bindings() {
    let config = Config::default();
    let enter = KeyBinding { code: KeyCode::Enter, modifiers: KeyModifiers::NONE };
    assert_eq!(config.command_keys.get(&enter), Some(&Action::CommandSubmit));
    assert_eq!(config.command_keys.get(&kb('q')), None);
    assert_eq!(config.double_keys.get(&kb('g')), Some(&Action::GoToTop));
  }

  #[test]
  fn test_load_settings_overrides() {
    let toml = r#"
[settings]
pretty_markdown = false
show_icons = false
theme = "light"
tick_rate_ms = 250
status_ticks = 5
sequence_timeout_ms = 0
"#;
    let config = Config::load_from_str(toml);
    assert!(!config.pretty_markdown);
    assert!(!config.show_icons);
    assert_eq!(config.theme.accent, Theme::light().accent);
    assert_eq!(config.tick_rate_ms, 250);
    assert_eq!(config.status_ticks, 5);
    assert_eq!(config.sequence_timeout_ms, 0);
  }

  #[test]
  fn test_unknown_theme_is_reported() {
    let mut errors = Vec::new();
    let config = Config::load_from_str_with_errors("[settings]\ntheme = \"neon\"\n", &mut errors);
    assert_eq!(config.theme.accent, Theme::dark().accent);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("neon"));
  }

  #[test]
  fn test_keys_table_replaces_its_defaults() {
    let toml = r#"
[keys.normal]
j = "move_up"
"#;
    let config = Config::load_from_str(toml);
    assert_eq!(config.normal_keys.get(&kb('j')), Some(&Action::MoveUp));
    assert_eq!(config.normal_keys.len(), 1);
    assert_eq!(config.normal_keys.get(&kb('k')), None);
    assert_eq!(config.double_keys.get(&kb('g')), Some(&Action::GoToTop));
  }

  #[test]
  fn test_load_invalid_entries_collected() {
    let toml = r#"
[keys.normal]
j = "invalid_action"
"" = "quit"
k = "quit"
"#;
    let mut errors = Vec::new();
    let config = Config::load_from_str_with_errors(toml, &mut errors);
    assert_eq!(config.normal_keys.get(&kb('j')), None);
    assert_eq!(config.normal_keys.get(&kb('k')), Some(&Action::Quit));
    assert_eq!(config.normal_keys.len(), 1);
    assert_eq!(errors.len(), 2);
  }

  #[test]
  fn test_load_double_override() {
    let toml = r#"
[keys.double]
t = "go_to_top"
"#;
    let config = Config::load_from_str(toml);
    assert_eq!(config.double_keys.get(&kb('t')), Some(&Action::GoToTop));
    assert_eq!(config.double_keys.get(&kb('g')), None);
  }

  #[test]
  fn test_load_malformed_toml_returns_default() {
    let mut errors = Vec::new();
    let config = Config::load_from_str_with_errors("this is not [valid toml", &mut errors);
    assert_eq!(config.tick_rate_ms, 100);
    assert!(!config.normal_keys.is_empty());
    assert!(errors[0].starts_with("failed to parse config.toml"));
  }

  #[test]
  fn test_default_toml_is_valid_toml() {
    let result: Result<TomlConfig, _> = toml::from_str(Config::default_toml());
    assert!(result.is_ok(), "default_toml() is not valid TOML: {:?}", result.err());
  }

  #[test]
  fn test_empty_config_has_no_bindings() {
    let empty = Config::empty();
    let default = Config::default();
    assert!(empty.normal_keys.is_empty());
    assert!(empty.command_keys.is_empty());
    assert!(empty.double_keys.is_empty());
    assert!(!default.normal_keys.is_empty());
    assert!(!default.command_keys.is_empty());
    assert!(!default.double_keys.is_empty());
  }

  #[test]
  fn test_display_key() {
    assert_eq!(kb('j').display_key(), "j");
    assert_eq!(kb(' ').display_key(), "Space");
    let ctrl_c = KeyBinding { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
    assert_eq!(ctrl_c.display_key(), "Ctrl+c");
    let tab = KeyBinding { code: KeyCode::Tab, modifiers: KeyModifiers::NONE };
    assert_eq!(tab.display_key(), "Tab");
    let alt_enter = KeyBinding::new(KeyCode::Enter, KeyModifiers::ALT);
    assert_eq!(alt_enter.display_key(), "Alt+Enter");
  }

  #[test]
  fn test_reverse_lookup() {
    let lookup = Config::default().reverse_lookup();
    let quit_keys = lookup.get(&Action::Quit).expect("Quit should have keys");
    assert_eq!(quit_keys, &vec!["Ctrl+c".to_string(), "q".to_string()]);
    let top_keys = lookup.get(&Action::GoToTop).expect("GoToTop should have keys");
    assert_eq!(top_keys, &vec!["gg".to_string()]);
    assert!(!lookup.contains_key(&Action::CommandSubmit));
  }
}
