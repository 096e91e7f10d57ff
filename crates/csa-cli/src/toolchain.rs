//! Native dependency checks and installers.
//!
//! Installation is decided by a capability table: [`strategy`] maps a
//! dependency and a [`Host`] to one [`Strategy`], which is then executed.
//! The table is pure so every platform branch can be tested anywhere.

use crate::process::{self, RunOptions};
use crate::template::Fetch;
use csa_core::{Error, Result};
use csa_utils::constants::{
    PROTOC_DOCS_URL, PROTOC_DOWNLOAD_URL, PROTOC_RELEASE, PROTOC_VERSION,
    PROTOC_WINDOWS_DOCS_URL, RUST_DOCS_URL, RUSTC_TOOLCHAIN, RUSTC_VERSION, RUSTUP_INIT_URL,
    RUSTUP_SCRIPT_URL, SHUTTLE_DOCS_URL, SHUTTLE_DOWNLOAD_URL, SHUTTLE_LINUX_TARGET,
    SHUTTLE_MAC_TARGET, SHUTTLE_VERSION, SHUTTLE_VERSION_REQ, SHUTTLE_WINDOWS_TARGET,
};
use semver::{Version, VersionReq};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use which::which;

/// A native tool the generated project needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    Rust,
    Protoc,
    Shuttle,
}

impl Dependency {
    /// Checked in this order; cargo-shuttle may need cargo to install.
    pub const ALL: [Self; 3] = [Self::Rust, Self::Protoc, Self::Shuttle];

    /// The executable probed on the search path.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Rust => "rustc",
            Self::Protoc => "protoc",
            Self::Shuttle => "cargo-shuttle",
        }
    }

    #[must_use]
    pub const fn version_req(self) -> &'static str {
        match self {
            Self::Rust => RUSTC_VERSION,
            Self::Protoc => PROTOC_VERSION,
            Self::Shuttle => SHUTTLE_VERSION_REQ,
        }
    }

    /// Version offered to the user when asking to install.
    #[must_use]
    pub const fn install_version(self) -> &'static str {
        match self {
            Self::Rust => RUSTC_TOOLCHAIN,
            Self::Protoc => "3.21.9",
            Self::Shuttle => SHUTTLE_VERSION,
        }
    }

    /// Manual installation instructions.
    #[must_use]
    pub const fn docs(self) -> &'static str {
        match self {
            Self::Rust => RUST_DOCS_URL,
            Self::Protoc => PROTOC_DOCS_URL,
            Self::Shuttle => SHUTTLE_DOCS_URL,
        }
    }

    /// The error raised when the user declines the install.
    #[must_use]
    pub fn required_error(self) -> Error {
        let tool = match self {
            Self::Rust => "rustup",
            Self::Protoc => "protoc",
            Self::Shuttle => "cargo-shuttle",
        };
        Error::Required(format!("{tool} is required"))
    }

    /// Returns true if the tool is on the search path at a suitable version.
    #[must_use]
    pub fn is_installed(self) -> bool {
        is_installed(self.command(), self.version_req())
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rust => "Rust",
            Self::Protoc => "protoc",
            Self::Shuttle => "cargo-shuttle",
        })
    }
}

/// Checks that `command` exists and reports a version within `requirement`.
///
/// A missing command, a failing `--version` call or unparsable output all
/// count as not installed.
pub fn is_installed(command: &str, requirement: &str) -> bool {
    if which(command).is_err() {
        tracing::debug!(command, "not found on PATH");
        return false;
    }

    let output = match process::run(command, &["--version"], &RunOptions::new()) {
        Ok(output) => output,
        Err(err) => {
            tracing::debug!(command, error = %err, "version check failed");
            return false;
        }
    };

    let output = String::from_utf8_lossy(&output);
    let Some(token) = output.split(' ').nth(1) else {
        return false;
    };

    let version = normalize_version(command, token.trim());
    let installed = satisfies(&version, requirement);
    tracing::debug!(command, version = %version, requirement, installed, "checked version");
    installed
}

/// Fixes up version tokens some tools print in a shortened form.
///
/// `protoc --version` prints `libprotoc 22.2` for releases after 3.21,
/// which drop the leading major version.
#[must_use]
pub fn normalize_version(command: &str, token: &str) -> String {
    if command == "protoc" && token.matches('.').count() != 2 {
        format!("3.{token}")
    } else {
        token.to_string()
    }
}

/// Evaluates `version` against a semver range such as `>=1.65.0`.
#[must_use]
pub fn satisfies(version: &str, requirement: &str) -> bool {
    match (Version::parse(version), VersionReq::parse(requirement)) {
        (Ok(version), Ok(requirement)) => requirement.matches(&version),
        _ => false,
    }
}

/// Operating systems the installers know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Os {
    Linux,
    MacOs,
    Windows,
    Other(String),
}

impl Os {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "linux" => Self::Linux,
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => f.write_str("linux"),
            Self::MacOs => f.write_str("macos"),
            Self::Windows => f.write_str("windows"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// CPU architectures the installers know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arch {
    X86_64,
    Aarch64,
    Other(String),
}

impl Arch {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "x86_64" => Self::X86_64,
            "aarch64" => Self::Aarch64,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X86_64 => f.write_str("x86_64"),
            Self::Aarch64 => f.write_str("aarch64"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Everything about the machine the installers depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub os: Os,
    pub arch: Arch,
    pub home: Option<PathBuf>,
    /// `CARGO_HOME`, if set.
    pub cargo_home: Option<PathBuf>,
    /// Whether `mv` and `rm` are on the search path.
    pub coreutils: bool,
}

impl Host {
    /// Inspects the current machine.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            os: Os::from_name(std::env::consts::OS),
            arch: Arch::from_name(std::env::consts::ARCH),
            home: dirs::home_dir(),
            cargo_home: std::env::var_os("CARGO_HOME").map(PathBuf::from),
            coreutils: which("mv").is_ok() && which("rm").is_ok(),
        }
    }

    /// Directory cargo installs binaries into.
    ///
    /// # Errors
    /// Returns [`Error::CargoHomeNotFound`] if neither `CARGO_HOME` nor a
    /// home directory is known.
    pub fn cargo_bin_dir(&self) -> Result<PathBuf> {
        self.cargo_home
            .clone()
            .or_else(|| self.home.as_ref().map(|home| home.join(".cargo")))
            .map(|cargo_home| cargo_home.join("bin"))
            .ok_or(Error::CargoHomeNotFound)
    }
}

/// How one dependency gets installed on one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// A shell script run as-is.
    Script(String),

    /// A program run with arguments.
    Program { program: String, args: Vec<String> },

    /// An installer downloaded into a temporary directory and run there.
    Installer {
        url: String,
        file_name: String,
        args: Vec<String>,
    },
}

impl Strategy {
    /// Runs the installation, streaming its output to the terminal.
    ///
    /// # Errors
    /// Returns an error if downloading or running the installer fails.
    pub fn execute(&self, fetcher: &dyn Fetch) -> Result<()> {
        let options = RunOptions::new().inherit_stdout();

        match self {
            Self::Script(script) => {
                process::run_script(script, &options)?;
            }
            Self::Program { program, args } => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                process::run(program, &args, &options)?;
            }
            Self::Installer {
                url,
                file_name,
                args,
            } => {
                let dir = tempfile::tempdir()?;
                let installer = dir.path().join(file_name);
                fs::write(&installer, fetcher.fetch(url)?)?;

                let installer = installer.to_string_lossy();
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                process::run(&installer, &args, &options)?;
            }
        }
        Ok(())
    }
}

/// Looks up how to install `dependency` on `host`.
///
/// # Errors
/// Returns [`Error::UnsupportedPlatform`] when there is no automatic
/// installer, or [`Error::CargoHomeNotFound`] when cargo-shuttle has
/// nowhere to go.
pub fn strategy(dependency: Dependency, host: &Host) -> Result<Strategy> {
    match dependency {
        Dependency::Rust => rust_strategy(host),
        Dependency::Protoc => protoc_strategy(host),
        Dependency::Shuttle => shuttle_strategy(host),
    }
}

/// Installs `dependency` on `host`.
///
/// # Errors
/// Returns an error if there is no installer for the host or it fails.
pub fn install(dependency: Dependency, host: &Host, fetcher: &dyn Fetch) -> Result<()> {
    let strategy = strategy(dependency, host)?;
    tracing::debug!(%dependency, ?strategy, "installing");
    strategy.execute(fetcher)
}

fn unsupported(dependency: Dependency, platform: impl fmt::Display, docs: &str) -> Error {
    Error::UnsupportedPlatform {
        dependency: dependency.to_string(),
        platform: platform.to_string(),
        docs: docs.to_string(),
    }
}

fn rust_strategy(host: &Host) -> Result<Strategy> {
    let rustup = |tls: &str| {
        Strategy::Script(format!(
            "curl --proto '=https' --tlsv1.{tls} {RUSTUP_SCRIPT_URL} -sSf | bash -s -- -y --default-toolchain {RUSTC_TOOLCHAIN}"
        ))
    };

    match &host.os {
        Os::Linux => Ok(rustup("3")),
        Os::MacOs => Ok(rustup("2")),
        Os::Windows => Ok(Strategy::Installer {
            url: RUSTUP_INIT_URL.to_string(),
            file_name: "rustup-init.exe".to_string(),
            args: vec!["--default-toolchain".to_string(), RUSTC_TOOLCHAIN.to_string()],
        }),
        other => Err(unsupported(Dependency::Rust, other, RUST_DOCS_URL)),
    }
}

fn protoc_strategy(host: &Host) -> Result<Strategy> {
    let arch = match &host.arch {
        Arch::Aarch64 => "aarch_64",
        Arch::X86_64 => "x86_64",
        other => return Err(unsupported(Dependency::Protoc, other, PROTOC_DOCS_URL)),
    };

    let os = match &host.os {
        Os::Linux => "linux",
        Os::MacOs => "osx",
        Os::Windows => {
            return Err(unsupported(Dependency::Protoc, &host.os, PROTOC_WINDOWS_DOCS_URL));
        }
        other => return Err(unsupported(Dependency::Protoc, other, PROTOC_DOCS_URL)),
    };

    let archive = format!("protoc-{PROTOC_RELEASE}-{os}-{arch}.zip");
    Ok(Strategy::Script(format!(
        "curl -OL {PROTOC_DOWNLOAD_URL}{archive} && \
         sudo unzip -o {archive} -d /usr/local bin/protoc && \
         sudo unzip -o {archive} -d /usr/local 'include/*' && \
         rm -f {archive}"
    )))
}

fn shuttle_strategy(host: &Host) -> Result<Strategy> {
    match &host.os {
        Os::Linux => shuttle_release(host, SHUTTLE_LINUX_TARGET, ""),
        Os::MacOs => shuttle_release(host, SHUTTLE_MAC_TARGET, ""),
        Os::Windows if host.coreutils => shuttle_release(host, SHUTTLE_WINDOWS_TARGET, ".exe"),
        Os::Windows => Ok(Strategy::Program {
            program: "cargo".to_string(),
            args: ["install", "cargo-shuttle", "--version", SHUTTLE_VERSION]
                .map(str::to_string)
                .to_vec(),
        }),
        other => Err(unsupported(Dependency::Shuttle, other, SHUTTLE_DOCS_URL)),
    }
}

/// Downloads a cargo-shuttle release binary into the cargo bin directory.
fn shuttle_release(host: &Host, target: &str, suffix: &str) -> Result<Strategy> {
    let cargo_bin = host.cargo_bin_dir()?;
    let tag = format!("v{SHUTTLE_VERSION}");
    let archive = format!("cargo-shuttle-{tag}-{target}.tar.gz");
    let dir = format!("cargo-shuttle-{target}-{tag}");
    let binary = format!("cargo-shuttle{suffix}");
    let destination = cargo_bin.join(&binary);

    Ok(Strategy::Script(format!(
        "curl -s -OL {SHUTTLE_DOWNLOAD_URL}{archive} && \
         tar -xzf {archive} {dir}/{binary} && \
         mv {dir}/{binary} \"{}\" && \
         rm -rf {archive} {dir}",
        destination.display()
    )))
}
