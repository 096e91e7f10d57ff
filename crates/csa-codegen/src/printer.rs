//! Source printer for config module ASTs.

use csa_parser::{
    Comment, Declarator, Expression, ObjectLiteral, Program, Property, PropertyKind, Statement,
    StatementKind,
};

const INDENT: &str = "  ";

/// Prints a config module back to source text.
///
/// Multi-line objects get one property per line with a trailing comma.
/// Objects written on a single line stay on a single line unless they
/// carry comments. Raw nodes are emitted exactly as they were parsed.
#[derive(Debug, Default)]
pub struct CodeGenerator {
    output: String,
}

impl CodeGenerator {
    /// Creates a new code generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates source text for a whole module.
    pub fn generate(&mut self, program: &Program) -> String {
        self.output.clear();

        for statement in &program.statements {
            self.statement(statement);
        }
        for comment in &program.trailing_comments {
            self.comment(comment, 0);
        }

        std::mem::take(&mut self.output)
    }

    fn blank_line(&mut self, wanted: bool) {
        if wanted && !self.output.is_empty() {
            self.output.push('\n');
        }
    }

    fn comment(&mut self, comment: &Comment, level: usize) {
        self.blank_line(comment.blank_line_before);
        self.output.push_str(&INDENT.repeat(level));
        self.output.push_str(&comment.text);
        self.output.push('\n');
    }

    fn statement(&mut self, statement: &Statement) {
        for comment in &statement.leading_comments {
            self.comment(comment, 0);
        }
        self.blank_line(statement.blank_line_before);

        let text = match &statement.kind {
            StatementKind::Variable {
                kind,
                declarators,
                semicolon,
            } => {
                let declarators = declarators
                    .iter()
                    .map(declarator)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} {declarators}{}", kind.keyword(), terminator(*semicolon))
            }
            StatementKind::ModuleExports { value, semicolon } => {
                format!("module.exports = {}{}", expression(value, 0), terminator(*semicolon))
            }
            StatementKind::ExportDefault { value, semicolon } => {
                format!("export default {}{}", expression(value, 0), terminator(*semicolon))
            }
            StatementKind::Raw(text) => text.clone(),
        };

        self.output.push_str(&text);
        if let Some(comment) = &statement.trailing_comment {
            self.output.push(' ');
            self.output.push_str(comment);
        }
        self.output.push('\n');
    }
}

fn terminator(semicolon: bool) -> &'static str {
    if semicolon { ";" } else { "" }
}

fn declarator(declarator: &Declarator) -> String {
    let mut text = declarator.name.clone();
    if let Some(annotation) = &declarator.type_annotation {
        text.push_str(": ");
        text.push_str(annotation);
    }
    if let Some(init) = &declarator.init {
        text.push_str(" = ");
        text.push_str(&expression(init, 0));
    }
    text
}

/// Prints an expression whose first line sits at indentation `level`.
pub(crate) fn expression(expression: &Expression, level: usize) -> String {
    match expression {
        Expression::Object(object) => self::object(object, level),
        Expression::Boolean(value) => value.to_string(),
        Expression::Identifier(name) => name.clone(),
        Expression::Raw(text) => text.clone(),
    }
}

fn object(object: &ObjectLiteral, level: usize) -> String {
    let mut text = String::new();
    for comment in &object.leading_comments {
        text.push_str(comment);
        if comment.starts_with("//") {
            text.push('\n');
            text.push_str(&INDENT.repeat(level));
        } else {
            text.push(' ');
        }
    }
    text.push_str(&body(object, level));
    text
}

fn body(object: &ObjectLiteral, level: usize) -> String {
    let suffix = object.suffix.as_deref().unwrap_or_default();

    if object.properties.is_empty() && object.trailing_comments.is_empty() {
        return format!("{{}}{suffix}");
    }

    if !object.multiline && !has_comments(object) {
        let properties = object
            .properties
            .iter()
            .map(|p| property(p, level))
            .collect::<Vec<_>>()
            .join(", ");
        return format!("{{ {properties} }}{suffix}");
    }

    let inner = INDENT.repeat(level + 1);
    let mut text = String::from("{\n");

    for (index, property) in object.properties.iter().enumerate() {
        for (position, comment) in property.leading_comments.iter().enumerate() {
            if comment.blank_line_before && (index > 0 || position > 0) {
                text.push('\n');
            }
            text.push_str(&inner);
            text.push_str(&comment.text);
            text.push('\n');
        }
        let first_line = index == 0 && property.leading_comments.is_empty();
        if property.blank_line_before && !first_line {
            text.push('\n');
        }

        text.push_str(&inner);
        text.push_str(&self::property(property, level + 1));
        text.push(',');
        if let Some(comment) = &property.trailing_comment {
            text.push(' ');
            text.push_str(comment);
        }
        text.push('\n');
    }

    for (position, comment) in object.trailing_comments.iter().enumerate() {
        if comment.blank_line_before && (position > 0 || !object.properties.is_empty()) {
            text.push('\n');
        }
        text.push_str(&inner);
        text.push_str(&comment.text);
        text.push('\n');
    }

    text.push_str(&INDENT.repeat(level));
    text.push('}');
    text.push_str(suffix);
    text
}

fn property(property: &Property, level: usize) -> String {
    match &property.kind {
        PropertyKind::KeyValue { key, value } => {
            format!("{}: {}", key.text(), expression(value, level))
        }
        PropertyKind::Raw(text) => text.clone(),
    }
}

fn has_comments(object: &ObjectLiteral) -> bool {
    !object.trailing_comments.is_empty()
        || object
            .properties
            .iter()
            .any(|p| !p.leading_comments.is_empty() || p.trailing_comment.is_some())
}
