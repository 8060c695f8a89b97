use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::action::Action;
use crate::config::{Config, KeyBinding, normalize_key_event};
use crate::worker::Completion;

pub enum Event {
  Key(KeyEvent),
  Resize(u16, u16),
  Tick,
  Completed(Completion),
}

pub struct EventLoop {
  tx: mpsc::Sender<Event>,
  rx: mpsc::Receiver<Event>,
}

impl EventLoop {
  pub fn new(tick_rate: Duration) -> Self {
    let (tx, rx) = mpsc::channel();
    let input_tx = tx.clone();

    thread::spawn(move || loop {
      if event::poll(tick_rate).unwrap_or(false) {
        match event::read() {
          Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
            if input_tx.send(Event::Key(key)).is_err() {
              break;
            }
          }
          Ok(CrosstermEvent::Resize(w, h)) => {
            if input_tx.send(Event::Resize(w, h)).is_err() {
              break;
            }
          }
          _ => {}
        }
      } else if input_tx.send(Event::Tick).is_err() {
        break;
      }
    });

    Self { tx, rx }
  }

  /// Handle for background workers to post completions into the same queue.
  pub fn sender(&self) -> mpsc::Sender<Event> {
    self.tx.clone()
  }

  pub fn next(&self) -> Result<Event> {
    Ok(self.rx.recv()?)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
  Normal,
  Command,
}

/// The previous normal-mode key, kept so a second press of a double key
/// can complete the sequence.
#[derive(Debug, Default)]
pub struct PendingKey {
  last: Option<(KeyBinding, Instant)>,
}

impl PendingKey {
  pub fn clear(&mut self) {
    self.last = None;
  }

  #[cfg(test)]
  pub fn is_empty(&self) -> bool {
    self.last.is_none()
  }

  fn completes(&self, kb: KeyBinding, now: Instant, timeout: Option<Duration>) -> bool {
    match self.last {
      Some((prev, at)) if prev == kb => {
        timeout.is_none_or(|limit| now.saturating_duration_since(at) <= limit)
      }
      _ => false,
    }
  }
}

pub fn map_key(key: KeyEvent, mode: InputMode, pending: &mut PendingKey, config: &Config) -> Action {
  map_key_at(key, mode, pending, config, Instant::now())
}

fn map_key_at(
  key: KeyEvent,
  mode: InputMode,
  pending: &mut PendingKey,
  config: &Config,
  now: Instant,
) -> Action {
  let kb = normalize_key_event(key);
  match mode {
    InputMode::Command => {
      pending.clear();
      if let Some(action) = config.command_keys.get(&kb) {
        return action.clone();
      }
      match key.code {
        KeyCode::Char(c) if !kb.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
          Action::CommandInput(c)
        }
        _ => Action::None,
      }
    }
    InputMode::Normal => {
      let timeout = (config.sequence_timeout_ms > 0)
        .then(|| Duration::from_millis(config.sequence_timeout_ms));
      if pending.completes(kb, now, timeout)
        && let Some(action) = config.double_keys.get(&kb)
      {
        pending.clear();
        return action.clone();
      }
      pending.last = Some((kb, now));
      config.normal_keys.get(&kb).cloned().unwrap_or(Action::None)
    }
  }
}
