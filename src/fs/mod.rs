pub mod entry;
pub mod listing;
pub mod ops;

pub use entry::{Entry, format_size};
pub use listing::list_directory;
pub use ops::{
  copy_dir_recursive, copy_file, create_directory, create_file, delete_dir_recursive, delete_file,
  home_dir, read_file_content, rename_path,
};
