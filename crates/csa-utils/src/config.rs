//! Backend `Shuttle.toml` handling.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the backend's Shuttle.toml file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuttleConfig {
    /// Deployment name, unique across the platform.
    pub name: String,
}

impl ShuttleConfig {
    /// Creates a configuration for the given deployment name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Saves configuration to a Shuttle.toml file, replacing its contents.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize Shuttle.toml")?;

        fs::write(path.as_ref(), contents)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))
    }
}
