//! Verbatim capture of source the patcher does not need to understand.

use super::parser::Parser;
use csa_core::{Error, Result, Span};
use csa_lexer::{Token, TokenKind};

/// Where a raw capture is taking place, which decides where it stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context {
    /// A property or property value inside an object literal.
    Property,
    /// An initializer or exported value at statement level.
    Expression,
    /// A whole statement.
    Statement,
    /// A TypeScript type annotation on a declarator.
    Annotation,
}

impl Context {
    fn stops_at(self, kind: &TokenKind) -> bool {
        match self {
            Self::Property => matches!(kind, TokenKind::Comma | TokenKind::RightBrace),
            Self::Expression => matches!(kind, TokenKind::Comma | TokenKind::Semicolon),
            Self::Statement => matches!(kind, TokenKind::Semicolon),
            Self::Annotation => matches!(
                kind,
                TokenKind::Equal | TokenKind::Comma | TokenKind::Semicolon
            ),
        }
    }

    fn uses_line_breaks(self) -> bool {
        !matches!(self, Self::Property)
    }
}

impl<'a> Parser<'a> {
    /// Consumes tokens up to the end of the construct described by
    /// `context`, tracking bracket depth, and returns the covered source.
    ///
    /// # Errors
    /// Returns an error if nothing could be captured or a bracket is left
    /// unclosed at the end of the file.
    pub(crate) fn capture_raw(&mut self, context: Context) -> Result<(String, Span)> {
        let mut depth = 0usize;
        let mut covered: Option<Span> = None;
        let first = self.significant_index(self.position());

        while let Some((token, span)) = self.peek() {
            if depth == 0 {
                if context.stops_at(&token.kind) || token.kind.closes_group() {
                    break;
                }
                if covered.is_some() && self.ends_statement(context, token) {
                    break;
                }
            }

            if token.kind.opens_group() {
                depth += 1;
            } else if token.kind.closes_group() {
                depth -= 1;
            }

            covered = Some(covered.map_or(*span, |c| c.merge(*span)));
            self.advance();
        }

        let Some(covered) = covered else {
            return Err(Error::Parser(
                format!("Expected expression, found {}", self.describe_current()),
                self.current_span(),
            ));
        };

        if depth > 0 {
            return Err(Error::Parser(
                "Unexpected end of file, unclosed bracket".to_string(),
                covered,
            ));
        }

        // Leading comments stay stray; interior ones are part of the text.
        self.claim_comments(first + 1, self.position());

        Ok((self.slice(covered).to_string(), covered))
    }

    /// Returns true if the next significant token ends an expression
    /// parsed in `context`.
    pub(crate) fn at_expression_end(&self, context: Context) -> bool {
        match self.peek() {
            None => true,
            Some((token, _)) => {
                context.stops_at(&token.kind)
                    || token.kind.closes_group()
                    || self.ends_statement(context, token)
            }
        }
    }

    /// Applies automatic semicolon insertion: a token on a new line ends
    /// the statement unless either side of the break continues it.
    fn ends_statement(&self, context: Context, next: &Token) -> bool {
        context.uses_line_breaks() && next.on_new_line() && !self.continues_statement(next)
    }

    fn continues_statement(&self, next: &Token) -> bool {
        let dangling = matches!(
            self.previous_kind(),
            Some(
                TokenKind::Operator
                    | TokenKind::Equal
                    | TokenKind::Dot
                    | TokenKind::Comma
                    | TokenKind::Colon
            )
        );
        dangling
            || matches!(
                next.kind,
                TokenKind::Dot | TokenKind::Operator | TokenKind::Equal | TokenKind::Colon
            )
    }
}
