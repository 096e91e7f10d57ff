//! `package.json` patching and package manager detection.

use csa_core::{Error, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Scripts written into the frontend manifest, in order.
pub const SCRIPTS: [(&str, &str); 6] = [
    (
        "build",
        "next build && next export -o ./backend/static && cargo build --manifest-path ./backend/Cargo.toml",
    ),
    (
        "shuttle-login",
        "cargo shuttle login --working-directory ./backend/",
    ),
    (
        "start",
        "cargo shuttle project start --working-directory ./backend/",
    ),
    (
        "deploy",
        "npm run build && cargo shuttle deploy --working-directory ./backend/ --allow-dirty",
    ),
    (
        "dev",
        "npm run build && concurrently --names \"next, shuttle\" --kill-others \"next dev\" \"cargo shuttle run --working-directory ./backend/\"",
    ),
    (
        "stop",
        "cargo shuttle project stop --working-directory ./backend/",
    ),
];

/// The one dev dependency the scripts need.
pub const DEV_DEPENDENCY: &str = "concurrently";

/// The package manager that launched us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManager {
    /// Detects the package manager from an `npm_config_user_agent` value.
    #[must_use]
    pub fn detect(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(agent) if agent.starts_with("yarn") => Self::Yarn,
            Some(agent) if agent.starts_with("pnpm") => Self::Pnpm,
            _ => Self::Npm,
        }
    }

    /// Detects the package manager from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::detect(std::env::var("npm_config_user_agent").ok().as_deref())
    }

    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
        }
    }

    /// Arguments installing `package` as a dev dependency.
    #[must_use]
    pub fn add_dev_args(self, package: &str) -> Vec<String> {
        let verb: &[&str] = match self {
            Self::Yarn => &["add", "--dev"],
            Self::Npm | Self::Pnpm => &["install", "--save-dev"],
        };
        verb.iter()
            .copied()
            .chain([package])
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// A parsed `package.json`.
///
/// Key order is preserved, so only the patched entries change on save.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    value: Value,
}

impl Manifest {
    /// Loads a manifest from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a JSON object.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = fs::read_to_string(&path)?;
        Self::parse(path, &contents)
    }

    /// Parses manifest text read from `path`.
    ///
    /// # Errors
    /// Returns an error if the text is not a JSON object.
    pub fn parse(path: impl Into<PathBuf>, contents: &str) -> Result<Self> {
        let path = path.into();
        let value: Value =
            serde_json::from_str(contents).map_err(|e| manifest_error(&path, e))?;
        if !value.is_object() {
            return Err(manifest_error(&path, "expected a JSON object"));
        }
        Ok(Self { path, value })
    }

    /// Writes the fixed development and deployment scripts.
    ///
    /// # Errors
    /// Returns an error if `scripts` exists but is not an object.
    pub fn set_scripts(&mut self) -> Result<()> {
        let root = self
            .value
            .as_object_mut()
            .ok_or_else(|| manifest_error(&self.path, "expected a JSON object"))?;

        let scripts = root
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| manifest_error(&self.path, "\"scripts\" is not an object"))?;

        for (name, command) in SCRIPTS {
            scripts.insert(name.to_string(), Value::String(command.to_string()));
        }
        Ok(())
    }

    /// Serializes the manifest with 4-space indentation.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        self.value
            .serialize(&mut serializer)
            .map_err(|e| manifest_error(&self.path, e))?;

        let mut text = String::from_utf8(buffer).map_err(|e| manifest_error(&self.path, e))?;
        text.push('\n');
        Ok(text)
    }

    /// Writes the manifest back to where it was loaded from.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, self.to_pretty_string()?)?;
        Ok(())
    }
}

fn manifest_error(path: &Path, cause: impl fmt::Display) -> Error {
    Error::Manifest {
        path: path.display().to_string(),
        cause: cause.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_package_manager() {
        assert_eq!(PackageManager::detect(None), PackageManager::Npm);
        assert_eq!(
            PackageManager::detect(Some("yarn/1.22.19 npm/? node/v18.12.0 linux x64")),
            PackageManager::Yarn
        );
        assert_eq!(
            PackageManager::detect(Some("pnpm/7.14.0 npm/? node/v18.12.0 darwin arm64")),
            PackageManager::Pnpm
        );
        assert_eq!(
            PackageManager::detect(Some("npm/8.19.2 node/v18.12.0 linux x64")),
            PackageManager::Npm
        );
        assert_eq!(PackageManager::detect(Some("bun/1.0.0")), PackageManager::Npm);
    }

    #[test]
    fn test_add_dev_args() {
        assert_eq!(
            PackageManager::Yarn.add_dev_args(DEV_DEPENDENCY),
            ["add", "--dev", "concurrently"]
        );
        assert_eq!(
            PackageManager::Pnpm.add_dev_args(DEV_DEPENDENCY),
            ["install", "--save-dev", "concurrently"]
        );
    }

    #[test]
    fn test_non_object_manifest_is_rejected() {
        let err = Manifest::parse("package.json", "[]").unwrap_err();
        assert_eq!(err.to_string(), "Failed to patch package.json");
        assert_eq!(err.problems(), vec!["expected a JSON object".to_string()]);
    }
}
