//! File helpers available to step implementations
//!
//! Existence checks are total and never fail. Reads and writes are UTF-8 and
//! blocking; errors go straight back to the caller.

use crate::error::{StepError, StepResult};
use std::fs;
use std::path::Path;

/// Check whether any filesystem entry (file, directory, symlink target) exists at `path`
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Check whether `path` exists and is a directory
pub fn directory_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_dir()
}

/// Read a UTF-8 text file as lines, without line terminators
pub fn read_file(path: impl AsRef<Path>) -> StepResult<Vec<String>> {
    let path = path.as_ref();
    if !file_exists(path) {
        return Err(StepError::FileNotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path).map_err(|e| StepError::io(path, e))?;
    Ok(contents.lines().map(str::to_string).collect())
}

/// Write `lines` to `path`, each terminated by `\n`.
///
/// Fails with [`StepError::AlreadyExists`] when something is already at `path` and
/// `overwrite` is false; otherwise creates or truncates the file.
pub fn write_file<S: AsRef<str>>(
    path: impl AsRef<Path>,
    lines: &[S],
    overwrite: bool,
) -> StepResult<()> {
    let path = path.as_ref();
    if file_exists(path) && !overwrite {
        return Err(StepError::AlreadyExists(path.to_path_buf()));
    }

    let mut contents = String::new();
    for line in lines {
        contents.push_str(line.as_ref());
        contents.push('\n');
    }

    fs::write(path, contents).map_err(|e| StepError::io(path, e))
}
