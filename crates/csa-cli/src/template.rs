//! Downloads template repositories and unpacks them.
//!
//! A template URL names a repository and, optionally, a directory inside
//! it: `https://github.com/<org>/<repo>/<sub/path>`. The repository's
//! default branch is fetched as a ZIP snapshot and only the requested
//! directory is extracted.

use csa_core::{Error, Result};
use reqwest::StatusCode;
use std::fs::{self, File};
use std::io::{self, Cursor};
use std::path::{Component, Path, PathBuf};
use zip::ZipArchive;

/// Source of archive bytes.
pub trait Fetch {
    /// Downloads the whole body at `url`.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-200 response.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetches over HTTPS with a blocking client.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Creates a fetcher without a request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("create-shuttle-app/", env!("CARGO_PKG_VERSION")))
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let request_error = |cause: reqwest::Error| Error::Request {
            url: url.to_string(),
            cause: cause.to_string(),
        };

        let response = self.client.get(url).send().map_err(request_error)?;
        check_status(url, response.status())?;

        let body = response.bytes().map_err(request_error)?;
        tracing::debug!(url, bytes = body.len(), "downloaded archive");
        Ok(body.to_vec())
    }
}

/// Only a plain 200 counts as success.
///
/// # Errors
/// Returns [`Error::Download`] carrying the status text otherwise.
pub fn check_status(url: &str, status: StatusCode) -> Result<()> {
    if status == StatusCode::OK {
        return Ok(());
    }
    Err(Error::Download {
        url: url.to_string(),
        status: status.to_string(),
    })
}

/// Where to download a template from and what to take out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLocation {
    pub archive_url: String,
    /// Directory or file inside the repository, without surrounding slashes.
    pub sub_path: Option<String>,
}

impl TemplateLocation {
    /// Splits a template URL into the repository archive and sub-path.
    ///
    /// # Examples
    /// ```
    /// use csa_cli::template::TemplateLocation;
    ///
    /// let location = TemplateLocation::parse("https://github.com/shuttle-hq/examples/axum/hello-world");
    /// assert_eq!(location.archive_url, "https://github.com/shuttle-hq/examples/archive/refs/heads/main.zip");
    /// assert_eq!(location.sub_path.as_deref(), Some("axum/hello-world"));
    /// ```
    #[must_use]
    pub fn parse(url: &str) -> Self {
        let parts: Vec<&str> = url.split('/').collect();
        let split = parts.len().min(5);

        let repository = parts[..split].join("/");
        let repository = repository.strip_suffix(".git").unwrap_or(&repository);

        let sub_path = parts[split..].join("/");
        let sub_path = sub_path.trim_matches('/');

        Self {
            archive_url: format!("{repository}/archive/refs/heads/main.zip"),
            sub_path: (!sub_path.is_empty()).then(|| sub_path.to_string()),
        }
    }
}

/// Downloads the template at `url` into `destination`.
///
/// Nothing is written if the download fails.
///
/// # Errors
/// Returns an error if the download, lookup or extraction fails.
pub fn clone_example(url: &str, destination: &Path, fetcher: &dyn Fetch) -> Result<()> {
    let location = TemplateLocation::parse(url);
    let archive = fetcher.fetch(&location.archive_url)?;

    extract_archive(&archive, location.sub_path.as_deref(), destination)?;
    normalize_layout(destination).map_err(Error::extract)
}

/// Extracts `sub_path` (or everything) from a repository snapshot.
///
/// Entries are matched after stripping the archive's root directory. A
/// matching directory is extracted recursively with its contents placed
/// directly in `destination`; a matching file is placed there by name.
/// Existing files are overwritten.
///
/// # Errors
/// Returns [`Error::TemplateNotFound`] if `sub_path` is not in the
/// archive and [`Error::Extract`] for any other failure.
pub fn extract_archive(bytes: &[u8], sub_path: Option<&str>, destination: &Path) -> Result<()> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(Error::extract)?;

    let names = (0..archive.len())
        .map(|i| archive.by_index(i).map(|entry| entry.name().to_string()))
        .collect::<zip::result::ZipResult<Vec<_>>>()
        .map_err(Error::extract)?;

    let root = names
        .first()
        .and_then(|name| name.split('/').next())
        .ok_or_else(|| Error::extract("template archive is empty"))?;

    let prefix = match sub_path {
        Some(sub_path) => {
            let file = format!("{root}/{sub_path}");
            if names.contains(&file) {
                return extract_file(&mut archive, &file, destination);
            }
            format!("{file}/")
        }
        None => format!("{root}/"),
    };

    if !names.iter().any(|name| name.starts_with(&prefix) && name.len() > prefix.len()) {
        return Err(Error::TemplateNotFound {
            path: sub_path.unwrap_or_default().to_string(),
        });
    }

    fs::create_dir_all(destination).map_err(Error::extract)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(Error::extract)?;
        let Some(relative) = entry.name().strip_prefix(prefix.as_str()) else {
            continue;
        };
        if relative.is_empty() {
            continue;
        }

        let target = destination.join(safe_relative_path(relative)?);
        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(Error::extract)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(Error::extract)?;
        }
        let mut file = File::create(&target).map_err(Error::extract)?;
        io::copy(&mut entry, &mut file).map_err(Error::extract)?;
        set_mode(&target, entry.unix_mode())?;
    }

    tracing::debug!(prefix = %prefix, destination = %destination.display(), "extracted template");
    Ok(())
}

fn extract_file(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
    destination: &Path,
) -> Result<()> {
    let mut entry = archive.by_name(name).map_err(Error::extract)?;
    let file_name = name.rsplit('/').next().unwrap_or(name);

    fs::create_dir_all(destination).map_err(Error::extract)?;
    let target = destination.join(safe_relative_path(file_name)?);
    let mut file = File::create(&target).map_err(Error::extract)?;
    io::copy(&mut entry, &mut file).map_err(Error::extract)?;
    set_mode(&target, entry.unix_mode())
}

/// Rejects entry names that would escape the destination.
fn safe_relative_path(name: &str) -> Result<PathBuf> {
    let path = Path::new(name);
    if path.components().all(|c| matches!(c, Component::Normal(_))) {
        Ok(path.to_path_buf())
    } else {
        Err(Error::extract(format!("unsafe path in archive: {name}")))
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = mode {
        fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o777))
            .map_err(Error::extract)?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}

/// Files that belong in `src/` when a template ships them at its root.
const SOURCE_FILES: [&str; 2] = ["main.rs", "lib.rs"];

/// Tidies an extracted backend into a regular cargo project layout.
///
/// A lone wrapper directory around the project is flattened away, and a
/// crate root left beside `Cargo.toml` is moved into `src/`.
///
/// # Errors
/// Returns an error if the directory cannot be read or rearranged.
pub fn normalize_layout(destination: &Path) -> io::Result<()> {
    hoist_wrapper(destination)?;

    for file in SOURCE_FILES {
        let stray = destination.join(file);
        let target = destination.join("src").join(file);
        if stray.is_file() && !target.exists() {
            fs::create_dir_all(destination.join("src"))?;
            fs::rename(&stray, &target)?;
            tracing::debug!(file, "moved crate root into src/");
        }
    }
    Ok(())
}

fn hoist_wrapper(destination: &Path) -> io::Result<()> {
    if destination.join("Cargo.toml").exists() {
        return Ok(());
    }

    let entries = fs::read_dir(destination)?.collect::<io::Result<Vec<_>>>()?;
    let [only] = entries.as_slice() else {
        return Ok(());
    };
    let wrapper = only.path();
    if !wrapper.is_dir() || !wrapper.join("Cargo.toml").exists() {
        return Ok(());
    }

    for entry in fs::read_dir(&wrapper)? {
        let entry = entry?;
        fs::rename(entry.path(), destination.join(entry.file_name()))?;
    }
    fs::remove_dir(&wrapper)?;
    tracing::debug!(wrapper = %wrapper.display(), "flattened wrapper directory");
    Ok(())
}
