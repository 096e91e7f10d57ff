//! Parser for JavaScript/TypeScript config modules.
//!
//! This crate parses a token stream into a [`Program`]. The tree only
//! models what config patching needs: variable declarations, module
//! exports and object literals. Everything else is preserved as raw
//! source text.

pub mod ast;
mod parsing;

pub use ast::{
    Comment, DeclarationKind, Declarator, Expression, ObjectLiteral, Program, Property,
    PropertyKey, PropertyKind, Statement, StatementKind,
};
pub use parsing::Parser;

use csa_core::{Result, Span};
use csa_lexer::Token;

/// Parses a slice of tokens into a config module AST.
///
/// # Arguments
/// * `tokens` - The token stream to parse
/// * `source` - The source text the tokens were produced from
///
/// # Errors
/// Returns an error if the token stream has unbalanced brackets
///
/// # Examples
/// ```
/// use csa_lexer::tokenize;
/// use csa_parser::parse;
///
/// let source = "const nextConfig = { reactStrictMode: true }";
/// let tokens = tokenize(source).unwrap();
/// let program = parse(&tokens, source).unwrap();
/// assert_eq!(program.statements.len(), 1);
/// ```
pub fn parse(tokens: &[(Token, Span)], source: &str) -> Result<Program> {
    let mut parser = Parser::new(tokens, source);
    parser.parse_program()
}

/// Tokenizes and parses config source text in one step.
///
/// # Errors
/// Returns an error if lexing or parsing fails
pub fn parse_source(source: &str) -> Result<Program> {
    let tokens = csa_lexer::tokenize(source)?;
    parse(&tokens, source)
}
