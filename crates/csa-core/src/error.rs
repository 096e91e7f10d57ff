//! Error types and result aliases for create-shuttle-app.

use crate::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main error type for create-shuttle-app.
///
/// Every variant renders its primary message through `Display`. Any
/// itemized detail (captured stderr, HTTP status text, validation
/// problems) is available from [`Error::problems`].
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lexer error: {0}")]
    #[diagnostic(code(csa::lexer))]
    Lexer(String, #[label("here")] Span),

    #[error("Parser error: {0}")]
    #[diagnostic(code(csa::parser))]
    Parser(String, #[label("here")] Span),

    #[error("Could not find command \"{command}\"")]
    CommandNotFound { command: String },

    #[error("Failed to execute command \"{command}\"")]
    CommandFailed {
        command: String,
        stderr: Option<String>,
    },

    #[error("Failed to spawn command \"{command}\": {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("create-shuttle-app can't install {dependency} automatically on: {platform}")]
    #[diagnostic(help("see {docs}"))]
    UnsupportedPlatform {
        dependency: String,
        platform: String,
        docs: String,
    },

    #[error("Failed to find the cargo home directory")]
    CargoHomeNotFound,

    #[error("Failed to clone shuttle example from \"{url}\"")]
    Request { url: String, cause: String },

    #[error("Failed to download template from \"{url}\"")]
    Download { url: String, status: String },

    #[error("Could not find \"{path}\" in specified template archive")]
    TemplateNotFound { path: String },

    #[error("Failed to extract template")]
    Extract { cause: String },

    #[error("Failed to patch {path}")]
    Manifest { path: String, cause: String },

    #[error("Cannot create project at path {path}")]
    InvalidProjectPath { path: String, problems: Vec<String> },

    #[error("Invalid project name \"{name}\"")]
    InvalidProjectName { name: String, problems: Vec<String> },

    #[error("{0}")]
    Required(String),
}

impl Error {
    /// Wraps any displayable failure raised while unpacking a template.
    pub fn extract(cause: impl std::fmt::Display) -> Self {
        Self::Extract {
            cause: cause.to_string(),
        }
    }

    /// Returns the itemized sub-problems attached to this error.
    #[must_use]
    pub fn problems(&self) -> Vec<String> {
        match self {
            Self::CommandFailed { stderr, .. } => stderr
                .iter()
                .map(|s| s.trim_end().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Self::UnsupportedPlatform {
                dependency, docs, ..
            } => vec![format!(
                "Refer to \"{docs}\" for instructions on installing {dependency} manually. \
                 After installing {dependency}, please run create-shuttle-app again"
            )],
            Self::Request { cause, .. } => vec![cause.clone()],
            Self::Download { status, .. } => vec![status.clone()],
            Self::Extract { cause } | Self::Manifest { cause, .. } => vec![cause.clone()],
            Self::InvalidProjectPath { problems, .. } | Self::InvalidProjectName { problems, .. } => {
                problems.clone()
            }
            _ => Vec::new(),
        }
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from(span.start..span.end)
    }
}

/// Result type alias using the create-shuttle-app Error type.
pub type Result<T> = std::result::Result<T, Error>;
