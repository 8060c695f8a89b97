use std::fs::Metadata;
use std::path::PathBuf;
use std::time::SystemTime;

const S_IFMT: u32 = 0o170000;
const S_IFDIR: u32 = 0o040000;
const S_IFLNK: u32 = 0o120000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
  pub path: PathBuf,
  pub name: String,
  pub is_dir: bool,
  pub size: u64,
  pub mode: u32,
  pub modified: Option<SystemTime>,
}

impl Entry {
  pub fn from_path(path: PathBuf) -> Self {
    let link_meta = path.symlink_metadata().ok();
    // Follow symlinks for the kind so a link to a directory can be entered.
    let meta = path.metadata().ok().or_else(|| link_meta.clone());
    let is_dir = meta.as_ref().is_some_and(|m| m.is_dir());
    let size = meta.as_ref().map_or(0, |m| m.len());
    let modified = meta.as_ref().and_then(|m| m.modified().ok());
    let mode = link_meta.as_ref().map_or(0, raw_mode);
    let name = path
      .file_name()
      .map(|n| n.to_string_lossy().to_string())
      .unwrap_or_default();

    Self { path, name, is_dir, size, mode, modified }
  }

  pub fn is_hidden(&self) -> bool {
    self.name.starts_with('.')
  }

  pub fn is_symlink(&self) -> bool {
    self.mode & S_IFMT == S_IFLNK
  }

  /// `ls`-style mode string, e.g. `drwxr-xr-x`.
  pub fn mode_string(&self) -> String {
    format_mode(self.mode, self.is_dir)
  }
}

#[cfg(unix)]
fn raw_mode(meta: &Metadata) -> u32 {
  use std::os::unix::fs::MetadataExt;
  meta.mode()
}

#[cfg(not(unix))]
fn raw_mode(meta: &Metadata) -> u32 {
  let base = if meta.is_dir() { S_IFDIR | 0o755 } else { 0o644 };
  if meta.permissions().readonly() { base & !0o222 } else { base }
}

pub fn format_mode(mode: u32, is_dir: bool) -> String {
  let kind = match mode & S_IFMT {
    S_IFDIR => 'd',
    S_IFLNK => 'l',
    _ if is_dir => 'd',
    _ => '-',
  };
  let mut result = String::with_capacity(10);
  result.push(kind);
  result.push_str(&format_permissions(mode));
  result
}

pub fn format_permissions(mode: u32) -> String {
  let mut result = String::with_capacity(9);

  result.push(if mode & 0o400 != 0 { 'r' } else { '-' });
  result.push(if mode & 0o200 != 0 { 'w' } else { '-' });
  result.push(if mode & 0o100 != 0 { 'x' } else { '-' });

  result.push(if mode & 0o040 != 0 { 'r' } else { '-' });
  result.push(if mode & 0o020 != 0 { 'w' } else { '-' });
  result.push(if mode & 0o010 != 0 { 'x' } else { '-' });

  result.push(if mode & 0o004 != 0 { 'r' } else { '-' });
  result.push(if mode & 0o002 != 0 { 'w' } else { '-' });
  result.push(if mode & 0o001 != 0 { 'x' } else { '-' });

  result
}

/// Human readable size in SI units (1 kB = 1000 B).
pub fn format_size(bytes: u64) -> String {
  const UNIT: u64 = 1000;
  if bytes < UNIT {
    return format!("{bytes} B");
  }

  let mut div = UNIT;
  let mut exp = 0;
  let mut n = bytes / UNIT;
  while n >= UNIT {
    div *= UNIT;
    exp += 1;
    n /= UNIT;
  }

  let prefix = ['k', 'M', 'G', 'T', 'P', 'E'][exp];
  format!("{:.1} {prefix}B", bytes as f64 / div as f64)
}
