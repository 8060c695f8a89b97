use std::collections::HashMap;

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::action::Action;
use crate::config::Config;

const COMMANDS: &[(&str, &str)] = &[
  ("mkdir <dir>", "create directory"),
  ("touch <file>", "create empty file"),
  ("mv <name>", "rename selection"),
  ("cp <name>", "move selection to <name>"),
  ("rm", "delete selection"),
];

fn section_line(title: &str, style: Style) -> Line<'static> {
  Line::from(Span::styled(format!(" {title}"), style.add_modifier(Modifier::BOLD)))
}

fn entry_line(keys: &str, desc: &str, key_style: Style, desc_style: Style) -> Line<'static> {
  Line::from(vec![
    Span::styled(format!("  {keys:<16}"), key_style.add_modifier(Modifier::BOLD)),
    Span::styled(desc.to_string(), desc_style),
  ])
}

fn action_line(lookup: &HashMap<Action, Vec<String>>, action: Action, key_style: Style, desc_style: Style) -> Option<Line<'static>> {
  let keys = lookup.get(&action)?.join(" / ");
  Some(entry_line(&keys, action.description(), key_style, desc_style))
}

/// Default secondary pane content: the active key bindings and command verbs.
pub fn help_lines(config: &Config) -> Vec<Line<'static>> {
  let theme = &config.theme;
  let lookup = config.reverse_lookup();
  let key_style = Style::default().fg(theme.accent);
  let desc_style = Style::default().fg(theme.text);
  let section_style = Style::default().fg(theme.heading);

  let navigation = [
    Action::MoveDown,
    Action::MoveUp,
    Action::MoveRight,
    Action::MoveLeft,
    Action::GoToTop,
    Action::GoToBottom,
    Action::GoHome,
    Action::GoBack,
    Action::SwitchPane,
  ];
  let other = [Action::ToggleHidden, Action::CommandStart, Action::Cancel, Action::Quit];

  let mut lines = vec![section_line("Navigation", section_style)];
  lines.extend(
    navigation
      .into_iter()
      .filter_map(|a| action_line(&lookup, a, key_style, desc_style)),
  );
  lines.push(Line::default());
  lines.push(section_line("General", section_style));
  lines.extend(
    other
      .into_iter()
      .filter_map(|a| action_line(&lookup, a, key_style, desc_style)),
  );
  lines.push(Line::default());
  lines.push(section_line("Commands", section_style));
  for (usage, desc) in COMMANDS {
    lines.push(entry_line(usage, desc, key_style, desc_style));
  }
  lines
}
