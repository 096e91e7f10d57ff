//! Config patching pipeline stages.
//!
//! Pipeline: Source → Lexer → Parser → AST → Transform → CodeGen → Source

use anyhow::{Context, Result};
use csa_codegen::generate;
use csa_core::Span;
use csa_lexer::{Token, tokenize};
use csa_parser::{Program, parse};
use csa_transform::{NextConfigPass, Transformer};
use csa_utils::constants::{NEXT_CONFIG_FILE, NEXT_CONFIG_FILES};
use miette::NamedSource;
use std::fs;
use std::path::{Path, PathBuf};

/// Runs lexical analysis on config source.
///
/// # Errors
/// Returns an error if lexical analysis fails.
pub fn lex(source: &str, file_name: &str) -> Result<Vec<(Token, Span)>> {
    tokenize(source).map_err(|e| {
        let report = miette::Report::new(e)
            .with_source_code(NamedSource::new(file_name, source.to_string()));
        eprintln!("{report:?}");
        anyhow::anyhow!("Failed to read {file_name}")
    })
}

/// Parses tokens into a config module AST.
///
/// # Errors
/// Returns an error if parsing fails.
pub fn parse_tokens(tokens: &[(Token, Span)], source: &str, file_name: &str) -> Result<Program> {
    parse(tokens, source).map_err(|e| {
        let report = miette::Report::new(e)
            .with_source_code(NamedSource::new(file_name, source.to_string()));
        eprintln!("{report:?}");
        anyhow::anyhow!("Failed to parse {file_name}")
    })
}

/// Runs the complete patching pipeline on config source text.
///
/// Returns the patched source and whether anything changed.
///
/// # Errors
/// Returns an error if the source cannot be lexed or parsed.
pub fn patch_pipeline(source: &str, file_name: &str) -> Result<(String, bool)> {
    let tokens = lex(source, file_name)?;
    let mut program = parse_tokens(&tokens, source, file_name)?;
    let changed = Transformer::new().transform(&mut program);
    Ok((generate(&program), changed))
}

/// Source of the config written when a project has none.
#[must_use]
pub fn default_config() -> String {
    generate(&NextConfigPass::new().default_program())
}

/// Finds the project's Next.js config file, if there is one.
#[must_use]
pub fn find_next_config(project: &Path) -> Option<PathBuf> {
    NEXT_CONFIG_FILES
        .iter()
        .map(|name| project.join(name))
        .find(|path| path.is_file())
}

/// Patches the project's Next.js config for a static export, creating
/// `next.config.js` if the project has no config.
///
/// Returns the path of the written file.
///
/// # Errors
/// Returns an error if the config cannot be read, parsed or written.
pub fn patch_next_config(project: &Path) -> Result<PathBuf> {
    let Some(path) = find_next_config(project) else {
        let path = project.join(NEXT_CONFIG_FILE);
        fs::write(&path, default_config())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        return Ok(path);
    };

    let source = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map_or_else(|| NEXT_CONFIG_FILE.into(), |name| name.to_string_lossy());

    let (patched, changed) = patch_pipeline(&source, &file_name)?;
    if changed {
        fs::write(&path, patched).with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        tracing::debug!(path = %path.display(), "config already patched");
    }
    Ok(path)
}
