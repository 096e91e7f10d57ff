//! Abstract Syntax Tree (AST) definitions for config modules.
//!
//! Only the shapes needed to find and patch a config object are modelled
//! structurally. Everything else is kept as `Raw` source text so it can
//! be written back unchanged.

use csa_core::Span;

/// A complete config module.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
    /// Comments after the last statement.
    pub trailing_comments: Vec<Comment>,
}

/// A comment attached to the node that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text: String,
    pub blank_line_before: bool,
}

impl Comment {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            blank_line_before: false,
        }
    }
}

/// A top-level statement with its surrounding trivia.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub leading_comments: Vec<Comment>,
    pub blank_line_before: bool,
    /// A comment on the same line after the statement.
    pub trailing_comment: Option<String>,
    pub span: Span,
}

impl Statement {
    /// Creates a statement without trivia.
    #[must_use]
    pub fn new(kind: StatementKind) -> Self {
        Self {
            kind,
            leading_comments: Vec::new(),
            blank_line_before: false,
            trailing_comment: None,
            span: Span::default(),
        }
    }

    /// Returns true if this statement exports a value from the module.
    #[must_use]
    pub fn is_export(&self) -> bool {
        match &self.kind {
            StatementKind::ModuleExports { .. } | StatementKind::ExportDefault { .. } => true,
            StatementKind::Raw(text) => {
                text.starts_with("export ") || text.starts_with("module.exports")
            }
            StatementKind::Variable { .. } => false,
        }
    }
}

/// Statements the patcher understands.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// Variable declaration: `const a = expr, b = expr`
    Variable {
        kind: DeclarationKind,
        declarators: Vec<Declarator>,
        semicolon: bool,
    },

    /// CommonJS export: `module.exports = expr`
    ModuleExports { value: Expression, semicolon: bool },

    /// ES module export: `export default expr`
    ExportDefault { value: Expression, semicolon: bool },

    /// Any other statement, kept verbatim.
    Raw(String),
}

/// The keyword introducing a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Const,
    Let,
    Var,
}

impl DeclarationKind {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Const => "const",
            Self::Let => "let",
            Self::Var => "var",
        }
    }
}

/// A single `name[: Type] [= init]` binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: String,
    /// TypeScript annotation text, without the leading colon.
    pub type_annotation: Option<String>,
    pub init: Option<Expression>,
}

/// Expressions in a config module.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Object literal: `{ key: value, ... }`
    Object(ObjectLiteral),

    /// Boolean literal
    Boolean(bool),

    /// Variable reference
    Identifier(String),

    /// Any other expression, kept verbatim.
    Raw(String),
}

impl Expression {
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectLiteral> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object_mut(&mut self) -> Option<&mut ObjectLiteral> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// Object literal expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLiteral {
    /// Comments between the preceding token and the opening brace.
    pub leading_comments: Vec<String>,
    pub properties: Vec<Property>,
    /// Comments between the last property and the closing brace.
    pub trailing_comments: Vec<Comment>,
    /// Whether the source spread the object over several lines.
    pub multiline: bool,
    /// Text following the closing brace, e.g. ` satisfies NextConfig`.
    pub suffix: Option<String>,
    pub span: Span,
}

impl ObjectLiteral {
    /// Creates an empty multi-line object literal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            leading_comments: Vec::new(),
            properties: Vec::new(),
            trailing_comments: Vec::new(),
            multiline: true,
            suffix: None,
            span: Span::default(),
        }
    }

    /// Adds a `key: value` property and returns the object.
    #[must_use]
    pub fn with(mut self, key: &str, value: Expression) -> Self {
        self.properties.push(Property::key_value(key, value));
        self
    }

    /// Finds the value of the first property with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Expression> {
        self.properties.iter().find_map(|p| match &p.kind {
            PropertyKind::KeyValue { key: k, value } if k.name() == Some(key) => Some(value),
            _ => None,
        })
    }
}

impl Default for ObjectLiteral {
    fn default() -> Self {
        Self::new()
    }
}

/// A property inside an object literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub kind: PropertyKind,
    pub leading_comments: Vec<Comment>,
    pub blank_line_before: bool,
    pub trailing_comment: Option<String>,
}

impl Property {
    /// Creates a `key: value` property with an identifier key.
    #[must_use]
    pub fn key_value(key: &str, value: Expression) -> Self {
        Self {
            kind: PropertyKind::KeyValue {
                key: PropertyKey::Identifier(key.to_string()),
                value,
            },
            leading_comments: Vec::new(),
            blank_line_before: false,
            trailing_comment: None,
        }
    }

    /// Returns the key name for `key: value` properties.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            PropertyKind::KeyValue { key, .. } => key.name(),
            PropertyKind::Raw(_) => None,
        }
    }
}

/// Property shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    /// `key: value`
    KeyValue { key: PropertyKey, value: Expression },

    /// Spread, shorthand, method or computed property, kept verbatim.
    Raw(String),
}

/// The key of a `key: value` property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Identifier(String),
    /// Quoted key, stored with its quotes.
    String(String),
    Number(String),
}

impl PropertyKey {
    /// Returns the property name this key binds, if it is a plain name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) => Some(name),
            Self::String(quoted) if quoted.len() >= 2 => Some(&quoted[1..quoted.len() - 1]),
            Self::String(_) | Self::Number(_) => None,
        }
    }

    /// Returns the key as written in source.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Identifier(text) | Self::String(text) | Self::Number(text) => text,
        }
    }
}
