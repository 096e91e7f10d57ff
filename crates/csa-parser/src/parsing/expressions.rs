//! Expression and object literal parsing.

use super::parser::Parser;
use super::raw::Context;
use crate::ast::{Expression, ObjectLiteral, Property, PropertyKey, PropertyKind};
use csa_core::{Error, Result, Span};
use csa_lexer::TokenKind;

impl<'a> Parser<'a> {
    /// Parses an expression.
    ///
    /// Object literals, booleans and lone identifiers are parsed
    /// structurally; anything else, including an object literal that
    /// fails to parse, is captured verbatim.
    pub(crate) fn parse_expression(&mut self, context: Context) -> Result<Expression> {
        let start = self.position();

        if self.check(&TokenKind::LeftBrace) {
            match self.parse_object(context) {
                Ok(object) => return Ok(Expression::Object(object)),
                Err(_) => self.rewind(start),
            }
        }

        let simple = self.peek().and_then(|(token, _)| match token.kind {
            TokenKind::True => Some(Expression::Boolean(true)),
            TokenKind::False => Some(Expression::Boolean(false)),
            TokenKind::Identifier => Some(Expression::Identifier(token.text.clone())),
            _ => None,
        });

        if let Some(expression) = simple {
            self.advance();
            if self.at_expression_end(context) {
                return Ok(expression);
            }
            self.rewind(start);
        }

        let (text, _) = self.capture_raw(context)?;
        Ok(Expression::Raw(text))
    }

    /// Parses an object literal: `{ key: value, ... }`
    pub(crate) fn parse_object(&mut self, context: Context) -> Result<ObjectLiteral> {
        let open = self.expect(&TokenKind::LeftBrace)?;
        let leading_comments = self
            .take_stray()
            .into_iter()
            .map(|comment| comment.text)
            .collect();
        let first_inner = self.position();
        let mut properties = Vec::new();

        let trailing_comments = loop {
            let comments = self.take_comments();

            if self.check(&TokenKind::RightBrace) {
                break comments;
            }
            if self.is_at_end() {
                return Err(Error::Parser(
                    "Unexpected end of file in object literal".to_string(),
                    open,
                ));
            }

            let blank_line_before = self.blank_line_ahead();
            let mut property = self.parse_property()?;
            property.blank_line_before = blank_line_before;
            property.leading_comments = comments;
            property.leading_comments.extend(self.take_stray());

            let mut trailing_comment = self.take_trailing_comment();
            let has_comma = self.match_token(&TokenKind::Comma);
            if trailing_comment.is_none() {
                trailing_comment = self.take_trailing_comment();
            }
            property.trailing_comment = trailing_comment;
            properties.push(property);

            if !has_comma && !self.check(&TokenKind::RightBrace) {
                return Err(Error::Parser(
                    format!("Expected ',' or '}}', found {}", self.describe_current()),
                    self.current_span(),
                ));
            }
        };

        let close = self.expect(&TokenKind::RightBrace)?;
        let multiline = self.spans_lines(first_inner, self.position());

        let suffix = if self.at_expression_end(context) {
            None
        } else {
            let (_, covered) = self.capture_raw(context)?;
            Some(self.slice(Span::new(close.end, covered.end)).to_string())
        };

        Ok(ObjectLiteral {
            leading_comments,
            properties,
            trailing_comments,
            multiline,
            suffix,
            span: open.merge(close),
        })
    }

    /// Parses a single property inside an object literal.
    fn parse_property(&mut self) -> Result<Property> {
        let key = self.peek().and_then(|(token, _)| match token.kind {
            ref kind if kind.is_word() => Some(PropertyKey::Identifier(token.text.clone())),
            TokenKind::String => Some(PropertyKey::String(token.text.clone())),
            TokenKind::Number => Some(PropertyKey::Number(token.text.clone())),
            _ => None,
        });

        let kind = match key {
            Some(key) if self.check_nth(1, &TokenKind::Colon) => {
                self.advance();
                self.advance();
                let value = self.parse_expression(Context::Property)?;
                PropertyKind::KeyValue { key, value }
            }
            _ => {
                let (text, _) = self.capture_raw(Context::Property)?;
                PropertyKind::Raw(text)
            }
        };

        Ok(Property {
            kind,
            leading_comments: Vec::new(),
            blank_line_before: false,
            trailing_comment: None,
        })
    }
}
