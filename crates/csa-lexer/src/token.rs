//! Token definitions for JavaScript/TypeScript config sources.

use logos::Logos;
use std::fmt;

/// A token together with its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Number of line breaks between the previous token and this one.
    pub line_breaks: usize,
}

impl Token {
    /// Returns true if this token starts a new line.
    #[must_use]
    pub fn on_new_line(&self) -> bool {
        self.line_breaks > 0
    }
}

/// The token kinds needed to understand a config module.
///
/// Multi-character operators are lexed as runs of single-character
/// `Operator` tokens; the parser only needs bracket depth and a handful
/// of punctuation to find the config object.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f\u{FEFF}]+")]
pub enum TokenKind {
    // Comments are kept so they can be re-emitted
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // Keywords
    #[token("const")]
    Const,

    #[token("let")]
    Let,

    #[token("var")]
    Var,

    #[token("export")]
    Export,

    #[token("default")]
    Default,

    #[token("import")]
    Import,

    #[token("true")]
    True,

    #[token("false")]
    False,

    // Identifiers and literals
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Identifier,

    #[regex(r"[0-9][0-9a-zA-Z_]*(\.[0-9][0-9a-zA-Z_]*)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    String,

    #[regex(r"`([^`\\]|\\.)*`")]
    Template,

    /// Produced by `tokenize` for a `/` that starts a regular expression.
    Regex,

    // Punctuation
    #[token("{")]
    LeftBrace,

    #[token("}")]
    RightBrace,

    #[token("[")]
    LeftBracket,

    #[token("]")]
    RightBracket,

    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,

    #[token("=")]
    Equal,

    #[regex(r"[-+*/%&|^!~<>?@#\\]")]
    Operator,
}

/// Consumes a block comment up to its closing `*/`.
fn block_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

impl TokenKind {
    /// Returns true for line and block comments.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    /// Returns true for tokens usable as a bare property key.
    #[must_use]
    pub fn is_word(&self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::Const
                | Self::Let
                | Self::Var
                | Self::Export
                | Self::Default
                | Self::Import
                | Self::True
                | Self::False
        )
    }

    /// Returns true if a `/` following this token starts a regular
    /// expression rather than a division.
    #[must_use]
    pub fn allows_regex(&self) -> bool {
        matches!(
            self,
            Self::Colon
                | Self::Equal
                | Self::LeftParen
                | Self::LeftBracket
                | Self::LeftBrace
                | Self::Comma
                | Self::Semicolon
                | Self::Operator
        )
    }

    /// Returns true for tokens that open a bracketed group.
    #[must_use]
    pub fn opens_group(&self) -> bool {
        matches!(self, Self::LeftBrace | Self::LeftBracket | Self::LeftParen)
    }

    /// Returns true for tokens that close a bracketed group.
    #[must_use]
    pub fn closes_group(&self) -> bool {
        matches!(
            self,
            Self::RightBrace | Self::RightBracket | Self::RightParen
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::LineComment => "line comment",
            Self::BlockComment => "block comment",
            Self::Const => "const",
            Self::Let => "let",
            Self::Var => "var",
            Self::Export => "export",
            Self::Default => "default",
            Self::Import => "import",
            Self::True => "true",
            Self::False => "false",
            Self::Identifier => "identifier",
            Self::Number => "number",
            Self::String => "string",
            Self::Template => "template literal",
            Self::Regex => "regular expression",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Dot => ".",
            Self::Equal => "=",
            Self::Operator => "operator",
        };
        write!(f, "{s}")
    }
}
