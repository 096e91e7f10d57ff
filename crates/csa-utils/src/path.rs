//! Checks that a project directory can be created safely.

use csa_core::{Error, Result};
use std::fs;
use std::path::Path;

/// Entries that may already exist in the target directory.
pub const HARMLESS_FILES: [&str; 7] = [
    ".DS_Store",
    ".git",
    ".idea",
    ".vscode",
    "LICENSE",
    "README.md",
    "Thumbs.db",
];

/// Verifies `path` is absent, or a directory holding only harmless files.
///
/// # Errors
/// Returns [`Error::InvalidProjectPath`] listing every conflict, or an IO
/// error if the directory cannot be read.
pub fn check_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    if !path.is_dir() {
        return Err(Error::InvalidProjectPath {
            path: path.display().to_string(),
            problems: vec!["a file with this name already exists".to_string()],
        });
    }

    let mut conflicts = fs::read_dir(path)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<Vec<_>>>()?;
    conflicts.retain(|name| !HARMLESS_FILES.contains(&name.as_str()));
    conflicts.sort();

    if conflicts.is_empty() {
        return Ok(());
    }

    Err(Error::InvalidProjectPath {
        path: path.display().to_string(),
        problems: conflicts
            .into_iter()
            .map(|name| format!("\"{name}\" already exists and could conflict"))
            .collect(),
    })
}
