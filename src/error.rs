use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by the filesystem and rendering collaborators.
#[derive(Debug, Error)]
pub enum Error {
  #[error("{}: {source}", .path.display())]
  Io {
    op: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("destination already exists: {}", .0.display())]
  DestinationExists(PathBuf),

  #[error("source is not a directory: {}", .0.display())]
  NotADirectory(PathBuf),

  #[error("cannot copy a directory into itself: {}", .0.display())]
  DestinationInsideSource(PathBuf),

  #[error("source and destination are the same file: {}", .0.display())]
  SameFile(PathBuf),

  #[error("could not determine home directory")]
  HomeDirUnavailable,

  #[error("render failed: {0}")]
  Render(String),
}

impl Error {
  pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
    Error::Io { op, path: path.into(), source }
  }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_io_error_display_includes_path() {
    let err = Error::io(
      "read",
      "/tmp/missing.txt",
      io::Error::new(io::ErrorKind::NotFound, "not found"),
    );
    assert_eq!(err.to_string(), "/tmp/missing.txt: not found");
  }

  #[test]
  fn test_destination_exists_display() {
    let err = Error::DestinationExists(PathBuf::from("/a/b"));
    assert_eq!(err.to_string(), "destination already exists: /a/b");
  }
}
