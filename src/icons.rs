use ratatui::style::Color;

pub const DIR_GLYPH: &str = "\u{f114}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileIcon {
  pub glyph: &'static str,
  pub color: Color,
}

const LINK: FileIcon = FileIcon { glyph: "\u{f0c1}", color: Color::Indexed(176) };
const DIR: FileIcon = FileIcon { glyph: DIR_GLYPH, color: Color::Indexed(75) };
const FILE: FileIcon = FileIcon { glyph: "\u{f016}", color: Color::Indexed(252) };

// (extensions, glyph, 256-color index)
const BY_EXTENSION: &[(&[&str], &str, u8)] = &[
  (&["rs"], "\u{e7a8}", 208),
  (&["go"], "\u{e627}", 74),
  (&["md", "markdown", "mdx"], "\u{e73e}", 74),
  (&["txt", "log"], "\u{f0f6}", 252),
  (&["toml", "yaml", "yml", "ini", "cfg", "conf"], "\u{e615}", 150),
  (&["json", "jsonc"], "\u{e60b}", 185),
  (&["py", "pyi"], "\u{e73c}", 114),
  (&["js", "mjs", "cjs", "ts", "tsx", "jsx"], "\u{e74e}", 185),
  (&["sh", "bash", "zsh", "fish"], "\u{e795}", 114),
  (&["html", "htm", "css", "scss"], "\u{e736}", 208),
  (&["c", "h", "cpp", "hpp", "cc"], "\u{e61e}", 74),
  (&["png", "jpg", "jpeg", "gif", "webp", "svg", "bmp"], "\u{f1c5}", 139),
  (&["zip", "tar", "gz", "xz", "bz2", "7z", "zst"], "\u{f1c6}", 185),
  (&["pdf"], "\u{f1c1}", 167),
  (&["lock"], "\u{f023}", 248),
];

pub fn file_icon(name: &str, is_dir: bool, is_symlink: bool) -> FileIcon {
  if is_symlink {
    return LINK;
  }
  if is_dir {
    return DIR;
  }

  let Some((_, ext)) = name.rsplit_once('.') else {
    return FILE;
  };
  let ext = ext.to_lowercase();
  BY_EXTENSION
    .iter()
    .find(|(exts, _, _)| exts.contains(&ext.as_str()))
    .map(|&(_, glyph, color)| FileIcon { glyph, color: Color::Indexed(color) })
    .unwrap_or(FILE)
}
