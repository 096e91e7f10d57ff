//! Runs external commands through the system shell.

use csa_core::{Error, Result};
use std::borrow::Cow;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Exit status a shell reports when it cannot find the command.
#[cfg(unix)]
const NOT_FOUND_STATUS: i32 = 127;
#[cfg(windows)]
const NOT_FOUND_STATUS: i32 = 9009;

/// How a command is spawned. stdin is always inherited and stderr is
/// always captured so failures can be reported.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub cwd: Option<PathBuf>,
    /// Let the command write to our stdout instead of capturing it.
    pub inherit_stdout: bool,
}

impl RunOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    #[must_use]
    pub fn inherit_stdout(mut self) -> Self {
        self.inherit_stdout = true;
        self
    }
}

/// Runs `command` with `args` and returns its captured stdout.
///
/// # Errors
/// Returns [`Error::CommandNotFound`] if the command does not exist,
/// [`Error::CommandFailed`] carrying stderr on a non-zero exit, and
/// [`Error::Spawn`] for any other spawn failure.
pub fn run(command: &str, args: &[&str], options: &RunOptions) -> Result<Vec<u8>> {
    let line = std::iter::once(command)
        .chain(args.iter().copied())
        .map(quote)
        .collect::<Result<Vec<_>>>()?
        .join(" ");
    execute(command, &line, options)
}

/// Runs a shell script such as `curl ... | bash` verbatim.
///
/// # Errors
/// Same as [`run`], with the script's first word as the command name.
pub fn run_script(script: &str, options: &RunOptions) -> Result<Vec<u8>> {
    let command = script.split_whitespace().next().unwrap_or(script);
    execute(command, script, options)
}

fn execute(command: &str, line: &str, options: &RunOptions) -> Result<Vec<u8>> {
    tracing::debug!(command = line, cwd = ?options.cwd, "running command");

    let mut shell = shell(line);
    shell
        .stdin(Stdio::inherit())
        .stdout(if options.inherit_stdout {
            Stdio::inherit()
        } else {
            Stdio::piped()
        })
        .stderr(Stdio::piped());
    if let Some(cwd) = &options.cwd {
        shell.current_dir(cwd);
    }

    let output = shell.output().map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => Error::CommandNotFound {
            command: command.to_string(),
        },
        _ => Error::Spawn {
            command: command.to_string(),
            source,
        },
    })?;

    if output.status.success() {
        return Ok(output.stdout);
    }

    if output.status.code() == Some(NOT_FOUND_STATUS) {
        return Err(Error::CommandNotFound {
            command: command.to_string(),
        });
    }

    Err(Error::CommandFailed {
        command: command.to_string(),
        stderr: Some(String::from_utf8_lossy(&output.stderr).into_owned()),
    })
}

#[cfg(unix)]
fn shell(line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(line);
    command
}

#[cfg(windows)]
fn shell(line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(line);
    command
}

/// Quotes a word for the shell when it contains special characters.
///
/// # Errors
/// Returns [`Error::Spawn`] if the word contains a nul byte.
#[cfg(unix)]
pub fn quote(word: &str) -> Result<String> {
    shlex::try_quote(word)
        .map(Cow::into_owned)
        .map_err(|err| Error::Spawn {
            command: word.to_string(),
            source: io::Error::new(io::ErrorKind::InvalidInput, err),
        })
}

/// Quotes a word for `cmd` when it contains special characters.
///
/// # Errors
/// Never fails; the signature matches the unix variant.
#[cfg(windows)]
pub fn quote(word: &str) -> Result<String> {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./_-\\".contains(c));
    if plain {
        Ok(word.to_string())
    } else {
        Ok(format!("\"{word}\""))
    }
}
