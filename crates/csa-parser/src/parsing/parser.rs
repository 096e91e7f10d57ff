//! Core parser structure and helper methods.

use crate::ast::{Comment, Program};
use csa_core::{Error, Result, Span};
use csa_lexer::{Token, TokenKind};

/// Parser for config modules.
///
/// Comment tokens are invisible to `peek`, `check` and `advance`; they
/// are collected explicitly with `take_comments` and
/// `take_trailing_comment` where the AST has room for them.
pub struct Parser<'a> {
    tokens: &'a [(Token, Span)],
    source: &'a str,
    current: usize,
    last_consumed: Option<usize>,
    /// Indices of comment tokens stepped over by `advance`.
    stray: Vec<usize>,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given token stream and its source text.
    pub fn new(tokens: &'a [(Token, Span)], source: &'a str) -> Self {
        Self {
            tokens,
            source,
            current: 0,
            last_consumed: None,
            stray: Vec::new(),
        }
    }

    /// Parses a complete module.
    ///
    /// # Errors
    /// Returns an error if the module has unbalanced brackets or a
    /// statement that cannot be delimited.
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut statements = Vec::new();

        loop {
            let comments = self.take_comments();

            if self.is_at_end() {
                return Ok(Program {
                    statements,
                    trailing_comments: comments,
                });
            }

            let blank_line_before = self.blank_line_ahead();
            let mut statement = self.parse_statement()?;
            statement.blank_line_before = blank_line_before;
            statement.leading_comments = comments;
            statement.leading_comments.extend(self.take_stray());
            statements.push(statement);
        }
    }

    // ==================== Helper Methods ====================

    pub(crate) fn significant_index(&self, from: usize) -> usize {
        let mut index = from;
        while index < self.tokens.len() && self.tokens[index].0.kind.is_comment() {
            index += 1;
        }
        index
    }

    pub(crate) fn position(&self) -> usize {
        self.current
    }

    pub(crate) fn rewind(&mut self, position: usize) {
        self.current = position;
        self.stray.retain(|&i| i < position);
        self.last_consumed = position
            .checked_sub(1)
            .filter(|&i| !self.tokens[i].0.kind.is_comment());
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.significant_index(self.current) >= self.tokens.len()
    }

    pub(crate) fn peek(&self) -> Option<&'a (Token, Span)> {
        self.peek_nth(0)
    }

    pub(crate) fn peek_nth(&self, n: usize) -> Option<&'a (Token, Span)> {
        let mut index = self.significant_index(self.current);
        for _ in 0..n {
            index = self.significant_index(index + 1);
        }
        self.tokens.get(index)
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.check_nth(0, kind)
    }

    pub(crate) fn check_nth(&self, n: usize, kind: &TokenKind) -> bool {
        self.peek_nth(n).is_some_and(|t| &t.0.kind == kind)
    }

    /// Checks for an identifier with the given text.
    pub(crate) fn check_word(&self, n: usize, word: &str) -> bool {
        self.peek_nth(n)
            .is_some_and(|t| t.0.kind == TokenKind::Identifier && t.0.text == word)
    }

    pub(crate) fn advance(&mut self) -> Option<&'a (Token, Span)> {
        let index = self.significant_index(self.current);
        self.stray.extend(self.current..index.min(self.tokens.len()));
        if index < self.tokens.len() {
            self.current = index + 1;
            self.last_consumed = Some(index);
            Some(&self.tokens[index])
        } else {
            self.current = self.tokens.len();
            None
        }
    }

    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Result<Span> {
        if self.check(kind) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(Error::Parser(
                format!("Expected '{kind}', found {}", self.describe_current()),
                self.current_span(),
            ))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String> {
        if self.check(&TokenKind::Identifier) {
            let name = self.peek().map(|t| t.0.text.clone()).unwrap_or_default();
            self.advance();
            Ok(name)
        } else {
            Err(Error::Parser(
                format!("Expected identifier, found {}", self.describe_current()),
                self.current_span(),
            ))
        }
    }

    pub(crate) fn describe_current(&self) -> String {
        self.peek()
            .map_or_else(|| "end of file".to_string(), |t| format!("'{}'", t.0.text))
    }

    pub(crate) fn current_span(&self) -> Span {
        self.peek()
            .map_or_else(|| Span::new(self.source.len(), self.source.len()), |t| t.1)
    }

    /// Returns the span of the last significant token consumed.
    pub(crate) fn previous_span(&self) -> Span {
        self.last_consumed
            .map_or_else(|| self.current_span(), |i| self.tokens[i].1)
    }

    pub(crate) fn previous_kind(&self) -> Option<&'a TokenKind> {
        self.last_consumed.map(|i| &self.tokens[i].0.kind)
    }

    pub(crate) fn slice(&self, span: Span) -> &'a str {
        span.slice(self.source)
    }

    /// Returns true if the next token, comment or not, follows a blank line.
    pub(crate) fn blank_line_ahead(&self) -> bool {
        self.tokens
            .get(self.current)
            .is_some_and(|t| t.0.line_breaks >= 2)
    }

    /// Collects the comments between the current position and the next
    /// significant token.
    pub(crate) fn take_comments(&mut self) -> Vec<Comment> {
        let mut comments = Vec::new();
        while let Some((token, _)) = self.tokens.get(self.current) {
            if !token.kind.is_comment() {
                break;
            }
            comments.push(Comment {
                text: token.text.clone(),
                blank_line_before: token.line_breaks >= 2,
            });
            self.current += 1;
        }
        comments
    }

    /// Takes the comments `advance` stepped over since the last call.
    pub(crate) fn take_stray(&mut self) -> Vec<Comment> {
        self.stray
            .drain(..)
            .map(|i| Comment::new(self.tokens[i].0.text.clone()))
            .collect()
    }

    /// Drops comments in `from..to` from the stray list; a verbatim
    /// capture of that range already contains them.
    pub(crate) fn claim_comments(&mut self, from: usize, to: usize) {
        self.stray.retain(|&i| i < from || i >= to);
    }

    /// Takes a comment that sits on the same line as the previous token.
    pub(crate) fn take_trailing_comment(&mut self) -> Option<String> {
        let (token, _) = self.tokens.get(self.current)?;
        if token.kind.is_comment() && !token.on_new_line() {
            self.current += 1;
            Some(token.text.clone())
        } else {
            None
        }
    }

    /// Returns true if any token in `from..to` starts a new line.
    pub(crate) fn spans_lines(&self, from: usize, to: usize) -> bool {
        self.tokens[from..to.min(self.tokens.len())]
            .iter()
            .any(|t| t.0.on_new_line())
    }
}
