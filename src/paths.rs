use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default chart output directory, relative to the working directory.
pub const PLOTS_DIR: &str = "plots";

/// Get the default plots directory path.
pub fn plots_dir() -> PathBuf {
    PathBuf::from(PLOTS_DIR)
}

/// Create the output directory if it doesn't exist. Idempotent.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

/// Get a path in the plots directory.
pub fn plots_file(dir: &Path, filename: &str) -> PathBuf {
    dir.join(filename)
}
