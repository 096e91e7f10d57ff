//! Lexical analysis for JavaScript/TypeScript config modules.
//!
//! This crate turns a config source file into a stream of tokens. Comments
//! are kept as tokens and each token records how many line breaks preceded
//! it, so later stages can re-emit comments and blank lines.

mod token;

pub use token::{Token, TokenKind};

use csa_core::{Error, Result, Span};
use logos::Logos;

/// Tokenizes config source code into a vector of tokens.
///
/// # Errors
/// Returns an error if the source contains a character sequence that is
/// not a valid token, such as an unterminated string.
///
/// # Examples
/// ```
/// use csa_lexer::tokenize;
///
/// let source = "const nextConfig = {}";
/// let tokens = tokenize(source).unwrap();
/// assert_eq!(tokens.len(), 5);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>> {
    let mut tokens: Vec<(Token, Span)> = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut previous_end = 0;
    let mut previous_kind: Option<TokenKind> = None;

    while let Some(result) = lexer.next() {
        let mut kind = result.map_err(|()| {
            let range = lexer.span();
            Error::Lexer(
                format!("Invalid token '{}'", lexer.slice()),
                Span::new(range.start, range.end),
            )
        })?;

        let regex_allowed = previous_kind.as_ref().is_none_or(TokenKind::allows_regex);
        if kind == TokenKind::Operator && lexer.slice() == "/" && regex_allowed {
            let start = lexer.span().start;
            if let Some(end) = regex_end(source, start) {
                lexer.bump(end - lexer.span().end);
                kind = TokenKind::Regex;
            }
        }

        let range = lexer.span();
        let span = Span::new(range.start, range.end);

        let line_breaks = source[previous_end..range.start]
            .bytes()
            .filter(|&b| b == b'\n')
            .count();
        previous_end = range.end;

        if !kind.is_comment() {
            previous_kind = Some(kind.clone());
        }

        tokens.push((
            Token {
                kind,
                text: lexer.slice().to_string(),
                line_breaks,
            },
            span,
        ));
    }

    Ok(tokens)
}

/// Finds the end of a regular expression literal starting at `start`,
/// including its flags.
///
/// Returns `None` if the line ends before the closing `/`.
fn regex_end(source: &str, start: usize) -> Option<usize> {
    let mut chars = source[start + 1..].char_indices();
    let mut in_class = false;

    let close = loop {
        let (offset, c) = chars.next()?;
        match c {
            '\\' => {
                let (_, escaped) = chars.next()?;
                if escaped == '\n' {
                    return None;
                }
            }
            '\n' => return None,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => break start + 1 + offset,
            _ => {}
        }
    };

    let flags = source[close + 1..]
        .bytes()
        .take_while(u8::is_ascii_alphabetic)
        .count();
    Some(close + 1 + flags)
}
