//! Code generation for config modules.
//!
//! This crate prints a parsed (and possibly patched) config module back
//! to JavaScript/TypeScript source text.

mod printer;

pub use printer::CodeGenerator;

use csa_parser::Program;

/// Generates source text from a config module AST.
///
/// # Examples
/// ```
/// use csa_codegen::generate;
/// use csa_parser::parse_source;
///
/// let program = parse_source("module.exports = { trailingSlash: true }").unwrap();
/// assert_eq!(generate(&program), "module.exports = { trailingSlash: true }\n");
/// ```
#[must_use]
pub fn generate(program: &Program) -> String {
    let mut generator = CodeGenerator::new();
    generator.generate(program)
}
