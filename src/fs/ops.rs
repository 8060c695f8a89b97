use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub fn home_dir() -> Result<PathBuf> {
  dirs::home_dir().ok_or(Error::HomeDirUnavailable)
}

pub fn read_file_content(path: &Path) -> Result<String> {
  let bytes = fs::read(path).map_err(|e| Error::io("read", path, e))?;
  Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Creates `path` and any missing parents. An existing directory is left alone.
pub fn create_directory(path: &Path) -> Result<()> {
  if path.exists() {
    return Ok(());
  }
  fs::create_dir_all(path).map_err(|e| Error::io("mkdir", path, e))
}

/// Creates an empty file, leaving an existing one untouched.
pub fn create_file(path: &Path) -> Result<()> {
  OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .map(drop)
    .map_err(|e| Error::io("touch", path, e))
}

pub fn rename_path(from: &Path, to: &Path) -> Result<()> {
  fs::rename(from, to).map_err(|e| Error::io("rename", from, e))
}

/// Copies file content and permissions from `src` to `dst`, then removes
/// `src` when `remove_source` is set. `dst` must not resolve to `src`.
pub fn copy_file(src: &Path, dst: &Path, remove_source: bool) -> Result<()> {
  let mut input = fs::File::open(src).map_err(|e| Error::io("copy", src, e))?;
  let real_src = fs::canonicalize(src).map_err(|e| Error::io("copy", src, e))?;
  if fs::canonicalize(dst).is_ok_and(|real_dst| real_dst == real_src) {
    return Err(Error::SameFile(dst.to_path_buf()));
  }
  let mut output = fs::File::create(dst).map_err(|e| Error::io("copy", dst, e))?;
  io::copy(&mut input, &mut output).map_err(|e| Error::io("copy", dst, e))?;
  output.sync_all().map_err(|e| Error::io("copy", dst, e))?;

  let permissions = fs::metadata(src)
    .map_err(|e| Error::io("copy", src, e))?
    .permissions();
  fs::set_permissions(dst, permissions).map_err(|e| Error::io("copy", dst, e))?;

  if remove_source {
    fs::remove_file(src).map_err(|e| Error::io("remove", src, e))?;
  }
  Ok(())
}

/// Recursively copies the directory `src` to `dst`, which must not exist yet.
/// Symlinks inside the tree are skipped.
pub fn copy_dir_recursive(src: &Path, dst: &Path, remove_source: bool) -> Result<()> {
  let meta = fs::metadata(src).map_err(|e| Error::io("copy", src, e))?;
  if !meta.is_dir() {
    return Err(Error::NotADirectory(src.to_path_buf()));
  }
  match fs::symlink_metadata(dst) {
    Ok(_) => return Err(Error::DestinationExists(dst.to_path_buf())),
    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
    Err(e) => return Err(Error::io("copy", dst, e)),
  }
  let real_src = fs::canonicalize(src).map_err(|e| Error::io("copy", src, e))?;
  if resolve_new_path(dst).starts_with(&real_src) {
    return Err(Error::DestinationInsideSource(dst.to_path_buf()));
  }

  fs::create_dir_all(dst).map_err(|e| Error::io("copy", dst, e))?;

  for item in fs::read_dir(src).map_err(|e| Error::io("copy", src, e))? {
    let item = item.map_err(|e| Error::io("copy", src, e))?;
    let src_path = item.path();
    let dst_path = dst.join(item.file_name());
    let file_type = item.file_type().map_err(|e| Error::io("copy", &src_path, e))?;

    if file_type.is_symlink() {
      continue;
    }
    if file_type.is_dir() {
      copy_dir_recursive(&src_path, &dst_path, false)?;
    } else {
      copy_file(&src_path, &dst_path, false)?;
    }
  }

  // Applied last so a read-only source still gets its contents copied.
  fs::set_permissions(dst, meta.permissions()).map_err(|e| Error::io("copy", dst, e))?;

  if remove_source {
    fs::remove_dir_all(src).map_err(|e| Error::io("remove", src, e))?;
  }
  Ok(())
}

/// Canonical form of a path that may not exist yet: the deepest existing
/// ancestor is resolved and the missing components are appended as given.
fn resolve_new_path(path: &Path) -> PathBuf {
  let mut missing = Vec::new();
  let mut current = path;
  loop {
    if let Ok(base) = fs::canonicalize(current) {
      return missing.iter().rev().fold(base, |acc, name| acc.join(name));
    }
    match (current.parent(), current.file_name()) {
      (Some(parent), Some(name)) => {
        missing.push(name.to_os_string());
        current = parent;
      }
      _ => return path.to_path_buf(),
    }
  }
}

pub fn delete_file(path: &Path) -> Result<()> {
  fs::remove_file(path).map_err(|e| Error::io("delete", path, e))
}

pub fn delete_dir_recursive(path: &Path) -> Result<()> {
  fs::remove_dir_all(path).map_err(|e| Error::io("delete", path, e))
}
