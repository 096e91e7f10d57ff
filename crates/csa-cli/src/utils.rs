//! Terminal output shared across the CLI.

use colored::Colorize;
use std::io::{self, Write};

/// Prints a right-aligned status word followed by a message.
pub fn print_status(status: &str, message: &str) {
    println!("{} {message}", format!("{status:>12}").green().bold());
}

/// Renders an error as a bold red headline followed by its problems.
#[must_use]
pub fn format_error(error: &anyhow::Error) -> String {
    let problems = match error.downcast_ref::<csa_core::Error>() {
        Some(err) => err.problems(),
        None => error.chain().skip(1).map(ToString::to_string).collect(),
    };

    let mut text = format!("{}", error.to_string().red().bold());
    for problem in problems {
        for line in problem.lines() {
            text.push_str("\n  ");
            text.push_str(line);
        }
    }
    text
}

/// Prints an error to stdout, where the rest of the run's output goes.
pub fn print_error(error: &anyhow::Error) {
    let mut stdout = io::stdout().lock();
    if let Err(err) = write_error(&mut stdout, error) {
        tracing::debug!(error = %err, "failed to print error");
    }
}

/// Writes an error preceded by a blank line.
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn write_error(out: &mut impl Write, error: &anyhow::Error) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", format_error(error))
}

/// Restores the terminal cursor a prompt may have hidden.
pub fn show_cursor() {
    let term = dialoguer::console::Term::stdout();
    if let Err(err) = term.show_cursor() {
        tracing::debug!(error = %err, "failed to restore cursor");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_lists_problems() {
        colored::control::set_override(false);
        let error = anyhow::Error::new(csa_core::Error::CommandFailed {
            command: "npx".to_string(),
            stderr: Some("npm ERR! one\nnpm ERR! two\n".to_string()),
        });

        assert_eq!(
            format_error(&error),
            "Failed to execute command \"npx\"\n  npm ERR! one\n  npm ERR! two"
        );
    }

    #[test]
    fn test_write_error_starts_with_blank_line() {
        colored::control::set_override(false);
        let error = anyhow::Error::new(csa_core::Error::Required(
            "protoc is required".to_string(),
        ));

        let mut out = Vec::new();
        write_error(&mut out, &error).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\nprotoc is required\n");
    }

    #[test]
    fn test_format_error_uses_context_chain() {
        colored::control::set_override(false);
        let error = anyhow::anyhow!("disk full").context("Failed to write package.json");
        assert_eq!(format_error(&error), "Failed to write package.json\n  disk full");
    }
}
