mod action;
mod app;
mod command;
mod config;
mod error;
mod event;
mod fs;
mod icons;
mod navigator;
mod preview;
mod status;
mod theme;
mod ui;
mod viewport;
mod worker;

use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
  EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::action::Action;
use crate::app::App;
use crate::config::Config;
use crate::event::{Event, EventLoop, map_key};
use crate::worker::Worker;

fn main() -> Result<()> {
  let mut path_arg: Option<String> = None;

  for arg in std::env::args().skip(1) {
    match arg.as_str() {
      "--help" | "-h" => {
        println!(concat!(
          "fm - dual-pane terminal file manager\n",
          "\n",
          "Usage: fm [options] [path]\n",
          "\n",
          "Options:\n",
          "  -h, --help               Print this help message\n",
          "  -V, --version            Print version\n",
          "\n",
          "If no path is given, opens the current directory.",
        ));
        return Ok(());
      }
      "--version" | "-V" => {
        println!("fm {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
      }
      a if !a.starts_with('-') => path_arg = Some(a.to_string()),
      _ => {
        eprintln!("fm: unknown option '{arg}'");
        std::process::exit(1);
      }
    }
  }

  init_logging();

  let (config, config_errors) = Config::load();
  let home = fs::home_dir()?;

  let root = match path_arg {
    Some(p) => PathBuf::from(p),
    None => std::env::current_dir().context("cannot determine working directory")?,
  };
  let root = std::fs::canonicalize(&root).with_context(|| format!("cannot open {}", root.display()))?;

  let mut app = App::new(root, home, &config);
  if !config_errors.is_empty() {
    app.set_status(format!("config: {}", config_errors.join("; ")));
  }

  // Install panic hook that restores terminal
  let original_hook = panic::take_hook();
  panic::set_hook(Box::new(move |info| {
    let _ = restore_terminal();
    original_hook(info);
  }));

  setup_terminal()?;
  let result = run(&mut app, &config);
  restore_terminal()?;

  if result.is_ok() {
    info!("session ended");
  }
  result
}

fn run(app: &mut App, config: &Config) -> Result<()> {
  let backend = CrosstermBackend::new(io::stdout());
  let mut terminal = Terminal::new(backend)?;

  let events = EventLoop::new(Duration::from_millis(config.tick_rate_ms));
  let worker = Worker::new(events.sender());

  // The first resize sizes the panes and issues the initial listing
  let size = terminal.size()?;
  app.update(Action::Resize(size.width, size.height))?;

  loop {
    for request in app.drain_requests() {
      worker.dispatch(request);
    }

    terminal.draw(|frame| ui::draw(frame, app, config))?;

    match events.next()? {
      Event::Key(key) => {
        let mode = app.input_mode();
        let action = map_key(key, mode, &mut app.pending_key, config);
        app.update(action)?;
      }
      Event::Resize(w, h) => app.update(Action::Resize(w, h))?,
      Event::Tick => app.update(Action::Tick)?,
      Event::Completed(completion) => app.handle_completion(completion)?,
    }

    if app.should_quit {
      break;
    }
  }

  Ok(())
}

/// Logs go to `<cache dir>/fm/fm.log`; the terminal belongs to the UI.
/// Without a writable log file tracing stays uninstalled.
fn init_logging() {
  let Some(dir) = dirs::cache_dir().map(|d| d.join("fm")) else {
    return;
  };
  if std::fs::create_dir_all(&dir).is_err() {
    return;
  }
  let Ok(file) = std::fs::OpenOptions::new()
    .create(true)
    .append(true)
    .open(dir.join("fm.log"))
  else {
    return;
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .try_init();
}

fn setup_terminal() -> Result<()> {
  enable_raw_mode()?;
  execute!(io::stdout(), EnterAlternateScreen)?;
  Ok(())
}

fn restore_terminal() -> Result<()> {
  disable_raw_mode()?;
  execute!(io::stdout(), LeaveAlternateScreen)?;
  Ok(())
}
