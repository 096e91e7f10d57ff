//! Statement parsing.

use super::parser::Parser;
use super::raw::Context;
use crate::ast::{DeclarationKind, Declarator, Statement, StatementKind};
use csa_core::{Error, Result};
use csa_lexer::TokenKind;

impl<'a> Parser<'a> {
    /// Parses a top-level statement.
    ///
    /// Declarations and exports are parsed structurally. When that fails,
    /// or for any other statement, the statement is kept verbatim.
    pub(crate) fn parse_statement(&mut self) -> Result<Statement> {
        let start = self.position();
        let start_span = self.current_span();

        let structured = if self.check(&TokenKind::Const)
            || self.check(&TokenKind::Let)
            || self.check(&TokenKind::Var)
        {
            Some(self.parse_variable())
        } else if self.is_module_exports() {
            Some(self.parse_module_exports())
        } else if self.check(&TokenKind::Export) && self.check_nth(1, &TokenKind::Default) {
            Some(self.parse_export_default())
        } else {
            None
        };

        let kind = match structured {
            Some(Ok(kind)) => kind,
            Some(Err(_)) => {
                self.rewind(start);
                self.parse_raw_statement()?
            }
            None => self.parse_raw_statement()?,
        };

        let span = start_span.merge(self.previous_span());
        let mut statement = Statement::new(kind);
        statement.span = span;
        statement.trailing_comment = self.take_trailing_comment();
        Ok(statement)
    }

    /// Parses a variable declaration: `const a[: T] = expr, b = expr`
    fn parse_variable(&mut self) -> Result<StatementKind> {
        let kind = match self.advance().map(|(token, _)| &token.kind) {
            Some(TokenKind::Let) => DeclarationKind::Let,
            Some(TokenKind::Var) => DeclarationKind::Var,
            _ => DeclarationKind::Const,
        };

        let mut declarators = Vec::new();
        loop {
            let name = self.expect_identifier()?;

            let type_annotation = if self.match_token(&TokenKind::Colon) {
                Some(self.capture_raw(Context::Annotation)?.0)
            } else {
                None
            };

            let init = if self.match_token(&TokenKind::Equal) {
                Some(self.parse_expression(Context::Expression)?)
            } else {
                None
            };

            declarators.push(Declarator {
                name,
                type_annotation,
                init,
            });

            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        let semicolon = self.finish_statement()?;
        Ok(StatementKind::Variable {
            kind,
            declarators,
            semicolon,
        })
    }

    fn is_module_exports(&self) -> bool {
        self.check_word(0, "module")
            && self.check_nth(1, &TokenKind::Dot)
            && self.check_word(2, "exports")
            && self.check_nth(3, &TokenKind::Equal)
    }

    /// Parses a CommonJS export: `module.exports = expr`
    fn parse_module_exports(&mut self) -> Result<StatementKind> {
        for _ in 0..4 {
            self.advance();
        }
        let value = self.parse_expression(Context::Expression)?;
        let semicolon = self.finish_statement()?;
        Ok(StatementKind::ModuleExports { value, semicolon })
    }

    /// Parses an ES module export: `export default expr`
    fn parse_export_default(&mut self) -> Result<StatementKind> {
        self.advance();
        self.advance();
        let value = self.parse_expression(Context::Expression)?;
        let semicolon = self.finish_statement()?;
        Ok(StatementKind::ExportDefault { value, semicolon })
    }

    /// Parses any statement verbatim, including its semicolon.
    fn parse_raw_statement(&mut self) -> Result<StatementKind> {
        let (mut text, covered) = self.capture_raw(Context::Statement)?;
        if self.check(&TokenKind::Semicolon) {
            let semicolon = self.current_span();
            self.advance();
            text = self.slice(covered.merge(semicolon)).to_string();
        }
        Ok(StatementKind::Raw(text))
    }

    /// Consumes an optional semicolon and checks that the statement ends.
    fn finish_statement(&mut self) -> Result<bool> {
        if self.match_token(&TokenKind::Semicolon) {
            return Ok(true);
        }
        let line_ends = self.peek().is_none_or(|(token, _)| token.on_new_line());
        if line_ends && self.at_expression_end(Context::Statement) {
            Ok(false)
        } else {
            Err(Error::Parser(
                format!("Expected ';' or line break, found {}", self.describe_current()),
                self.current_span(),
            ))
        }
    }
}
