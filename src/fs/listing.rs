use std::path::Path;

use super::entry::Entry;
use crate::error::{Error, Result};

/// Reads `dir` into a fresh entry sequence sorted by file name.
/// Dot-prefixed entries are dropped unless `include_hidden` is set.
pub fn list_directory(dir: &Path, include_hidden: bool) -> Result<Vec<Entry>> {
  let read_dir = std::fs::read_dir(dir).map_err(|e| Error::io("list", dir, e))?;

  let mut entries = Vec::new();
  for item in read_dir {
    let item = item.map_err(|e| Error::io("list", dir, e))?;
    let entry = Entry::from_path(item.path());
    if !include_hidden && entry.is_hidden() {
      continue;
    }
    entries.push(entry);
  }

  entries.sort_by(|a, b| a.name.cmp(&b.name));
  Ok(entries)
}
