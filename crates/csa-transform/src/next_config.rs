//! Next.js config patching pass.
//!
//! Ensures the exported config object statically exports correctly for a
//! Shuttle backend:
//!
//! ```js
//! const nextConfig = {
//!   images: {
//!     unoptimized: true,
//!   },
//!   trailingSlash: true,
//! }
//! ```
//!
//! Existing values are overwritten, missing ones are appended, and running
//! the pass on already patched output changes nothing.

use std::collections::HashSet;

use csa_parser::{
    Comment, DeclarationKind, Declarator, Expression, ObjectLiteral, Program, Property,
    PropertyKind, Statement, StatementKind,
};

use crate::Pass;
use crate::visit::{Visitor, walk_declarator, walk_object, walk_property, walk_statement};

/// Name of the variable conventionally holding the config object.
pub const NEXT_CONFIG_IDENTIFIER: &str = "nextConfig";

/// Type annotation comment emitted above a synthesized config.
pub const NEXT_CONFIG_TYPE_COMMENT: &str = "/** @type {import('next').NextConfig} */";

/// A boolean setting that must be present in the config object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub path: Vec<String>,
    pub value: bool,
}

impl Requirement {
    /// Creates a requirement from a dotted path such as `images.unoptimized`.
    #[must_use]
    pub fn new(path: &str, value: bool) -> Self {
        Self {
            path: path.split('.').map(str::to_string).collect(),
            value,
        }
    }
}

/// Patches `nextConfig` so the frontend can be served from the backend.
pub struct NextConfigPass {
    requirements: Vec<Requirement>,
}

impl NextConfigPass {
    /// Creates the pass with the settings required for a static export.
    #[must_use]
    pub fn new() -> Self {
        Self {
            requirements: vec![
                Requirement::new("images.unoptimized", true),
                Requirement::new("trailingSlash", true),
            ],
        }
    }

    /// Returns the object literal holding every required setting.
    #[must_use]
    pub fn default_object(&self) -> ObjectLiteral {
        let mut object = ObjectLiteral::new();
        for requirement in &self.requirements {
            insert_path(&mut object, &requirement.path, requirement.value);
        }
        object
    }

    /// Returns a complete module declaring and exporting the default config.
    #[must_use]
    pub fn default_program(&self) -> Program {
        let mut program = Program::default();
        append_declaration(&mut program, self.default_object());
        program
    }

    fn required_value(&self, path: &[String]) -> Option<bool> {
        self.requirements
            .iter()
            .find(|r| r.path == path)
            .map(|r| r.value)
    }

    fn is_branch(&self, path: &[String]) -> bool {
        self.requirements
            .iter()
            .any(|r| r.path.len() > path.len() && r.path.starts_with(path))
    }
}

impl Default for NextConfigPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for NextConfigPass {
    fn name(&self) -> &str {
        "NextConfig"
    }

    fn run(&self, program: &mut Program) -> bool {
        let before = program.clone();

        let mut patcher = ConfigPatcher::new(self);
        *program = patcher.visit_program(std::mem::take(program));

        if !patcher.found_config {
            if program.statements.iter().any(Statement::is_export) {
                tracing::warn!(
                    identifier = NEXT_CONFIG_IDENTIFIER,
                    "config module exports something other than a config object, leaving it unchanged"
                );
            } else {
                tracing::debug!("no config object found, appending a default one");
                append_declaration(program, self.default_object());
            }
        }

        *program != before
    }
}

/// Visitor state for one run of [`NextConfigPass`].
struct ConfigPatcher<'p> {
    pass: &'p NextConfigPass,
    /// Property names from the config root to the object being visited.
    path: Vec<String>,
    /// Dotted paths of the required properties found in the source.
    seen: HashSet<String>,
    in_config: bool,
    found_config: bool,
}

impl<'p> ConfigPatcher<'p> {
    fn new(pass: &'p NextConfigPass) -> Self {
        Self {
            pass,
            path: Vec::new(),
            seen: HashSet::new(),
            in_config: false,
            found_config: false,
        }
    }

    fn enter_config<T>(&mut self, node: T, walk: impl FnOnce(&mut Self, T) -> T) -> T {
        self.in_config = true;
        let node = walk(self, node);
        self.in_config = false;
        node
    }

    /// Appends every required property missing below the current path.
    fn append_missing(&self, object: &mut ObjectLiteral) {
        let depth = self.path.len();

        for requirement in &self.pass.requirements {
            if requirement.path.len() <= depth || !requirement.path.starts_with(&self.path) {
                continue;
            }

            let next = requirement.path[..=depth].join(".");
            if self.seen.contains(&next) {
                continue;
            }

            tracing::debug!(property = %requirement.path.join("."), "adding missing config property");
            insert_path(object, &requirement.path[depth..], requirement.value);
        }
    }
}

impl Visitor for ConfigPatcher<'_> {
    fn visit_statement(&mut self, statement: Statement) -> Statement {
        let exports_object = match &statement.kind {
            StatementKind::ModuleExports { value, .. }
            | StatementKind::ExportDefault { value, .. } => value.as_object().is_some(),
            _ => false,
        };

        if exports_object {
            self.enter_config(statement, walk_statement)
        } else {
            walk_statement(self, statement)
        }
    }

    fn visit_declarator(&mut self, declarator: Declarator) -> Declarator {
        let is_config = declarator.name == NEXT_CONFIG_IDENTIFIER
            && declarator.init.as_ref().is_some_and(|e| e.as_object().is_some());

        if is_config {
            self.enter_config(declarator, walk_declarator)
        } else {
            declarator
        }
    }

    fn visit_expression(&mut self, expression: Expression) -> Expression {
        match expression {
            Expression::Object(object) if self.in_config => {
                Expression::Object(self.visit_object(object))
            }
            other => other,
        }
    }

    fn visit_object(&mut self, object: ObjectLiteral) -> ObjectLiteral {
        let root = self.path.is_empty();
        if root {
            self.found_config = true;
            self.seen.clear();
        }

        // An empty `{}` config is expanded rather than filled inline.
        let was_empty = object.properties.is_empty();
        let mut object = walk_object(self, object);
        if root && was_empty {
            object.multiline = true;
        }
        self.append_missing(&mut object);
        object
    }

    fn visit_property(&mut self, mut property: Property) -> Property {
        let Some(name) = property.name().map(str::to_string) else {
            return property;
        };

        let mut path = self.path.clone();
        path.push(name);
        let dotted = path.join(".");

        if let Some(required) = self.pass.required_value(&path) {
            self.seen.insert(dotted);
            if let PropertyKind::KeyValue { value, .. } = &mut property.kind {
                *value = Expression::Boolean(required);
            }
            return property;
        }

        if !self.pass.is_branch(&path) {
            return property;
        }

        self.seen.insert(dotted.clone());
        let is_object = matches!(
            &property.kind,
            PropertyKind::KeyValue { value: Expression::Object(_), .. }
        );
        if !is_object {
            tracing::warn!(property = %dotted, "config property is not an object literal, leaving it unchanged");
            return property;
        }

        self.path = path;
        let property = walk_property(self, property);
        self.path.pop();
        property
    }
}

/// Sets `path` to `value` inside `object`, creating intermediate objects.
fn insert_path(object: &mut ObjectLiteral, path: &[String], value: bool) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };

    if rest.is_empty() {
        object
            .properties
            .push(Property::key_value(first, Expression::Boolean(value)));
        return;
    }

    let existing = object.properties.iter_mut().find_map(|p| match &mut p.kind {
        PropertyKind::KeyValue {
            key,
            value: Expression::Object(nested),
        } if key.name() == Some(first.as_str()) => Some(nested),
        _ => None,
    });

    match existing {
        Some(nested) => insert_path(nested, rest, value),
        None => {
            let mut nested = ObjectLiteral::new();
            nested.multiline = object.multiline;
            insert_path(&mut nested, rest, value);
            object
                .properties
                .push(Property::key_value(first, Expression::Object(nested)));
        }
    }
}

/// Appends `const nextConfig = <object>` and `module.exports = nextConfig`.
///
/// Comments trailing the module move onto the new declaration so a header
/// comment stays above the code.
fn append_declaration(program: &mut Program, object: ObjectLiteral) {
    let identifier = NEXT_CONFIG_IDENTIFIER;
    let mut comments = std::mem::take(&mut program.trailing_comments);
    let separated = !program.statements.is_empty() || !comments.is_empty();

    let mut declaration = Statement::new(StatementKind::Variable {
        kind: DeclarationKind::Const,
        declarators: vec![Declarator {
            name: identifier.to_string(),
            type_annotation: None,
            init: Some(Expression::Object(object)),
        }],
        semicolon: false,
    });
    let mut type_comment = Comment::new(NEXT_CONFIG_TYPE_COMMENT);
    type_comment.blank_line_before = separated;
    comments.push(type_comment);
    declaration.leading_comments = comments;

    let mut export = Statement::new(StatementKind::ModuleExports {
        value: Expression::Identifier(identifier.to_string()),
        semicolon: false,
    });
    export.blank_line_before = true;

    program.statements.push(declaration);
    program.statements.push(export);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_object_shape() {
        let object = NextConfigPass::new().default_object();
        let images = object.get("images").and_then(Expression::as_object).unwrap();
        assert_eq!(images.get("unoptimized"), Some(&Expression::Boolean(true)));
        assert_eq!(object.get("trailingSlash"), Some(&Expression::Boolean(true)));
        assert_eq!(object.properties.len(), 2);
    }

    #[test]
    fn test_requirements_sharing_a_branch_merge() {
        let mut pass = NextConfigPass::new();
        pass.requirements
            .push(Requirement::new("images.disableStaticImages", true));
        let object = pass.default_object();
        let images = object.get("images").and_then(Expression::as_object).unwrap();
        assert_eq!(images.properties.len(), 2);
    }

    #[test]
    fn test_branch_detection() {
        let pass = NextConfigPass::new();
        assert!(pass.is_branch(&["images".to_string()]));
        assert!(!pass.is_branch(&["trailingSlash".to_string()]));
        assert_eq!(pass.required_value(&["trailingSlash".to_string()]), Some(true));
    }
}
