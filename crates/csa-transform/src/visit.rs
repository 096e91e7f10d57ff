//! Tree walking over config module ASTs.
//!
//! Every `visit_*` method takes a node by value and returns its
//! replacement. The default implementations rebuild the node from its
//! visited children via the matching `walk_*` function, so an
//! implementation only overrides the cases it cares about.

use csa_parser::{
    Declarator, Expression, ObjectLiteral, Program, Property, PropertyKind, Statement,
    StatementKind,
};

/// A rewriting visitor over a config module.
pub trait Visitor {
    fn visit_program(&mut self, program: Program) -> Program {
        walk_program(self, program)
    }

    fn visit_statement(&mut self, statement: Statement) -> Statement {
        walk_statement(self, statement)
    }

    fn visit_declarator(&mut self, declarator: Declarator) -> Declarator {
        walk_declarator(self, declarator)
    }

    fn visit_expression(&mut self, expression: Expression) -> Expression {
        walk_expression(self, expression)
    }

    fn visit_object(&mut self, object: ObjectLiteral) -> ObjectLiteral {
        walk_object(self, object)
    }

    fn visit_property(&mut self, property: Property) -> Property {
        walk_property(self, property)
    }
}

pub fn walk_program<V: Visitor + ?Sized>(visitor: &mut V, mut program: Program) -> Program {
    program.statements = program
        .statements
        .into_iter()
        .map(|statement| visitor.visit_statement(statement))
        .collect();
    program
}

pub fn walk_statement<V: Visitor + ?Sized>(visitor: &mut V, mut statement: Statement) -> Statement {
    statement.kind = match statement.kind {
        StatementKind::Variable {
            kind,
            declarators,
            semicolon,
        } => StatementKind::Variable {
            kind,
            declarators: declarators
                .into_iter()
                .map(|declarator| visitor.visit_declarator(declarator))
                .collect(),
            semicolon,
        },
        StatementKind::ModuleExports { value, semicolon } => StatementKind::ModuleExports {
            value: visitor.visit_expression(value),
            semicolon,
        },
        StatementKind::ExportDefault { value, semicolon } => StatementKind::ExportDefault {
            value: visitor.visit_expression(value),
            semicolon,
        },
        StatementKind::Raw(text) => StatementKind::Raw(text),
    };
    statement
}

pub fn walk_declarator<V: Visitor + ?Sized>(
    visitor: &mut V,
    mut declarator: Declarator,
) -> Declarator {
    declarator.init = declarator
        .init
        .map(|expression| visitor.visit_expression(expression));
    declarator
}

pub fn walk_expression<V: Visitor + ?Sized>(visitor: &mut V, expression: Expression) -> Expression {
    match expression {
        Expression::Object(object) => Expression::Object(visitor.visit_object(object)),
        other => other,
    }
}

pub fn walk_object<V: Visitor + ?Sized>(visitor: &mut V, mut object: ObjectLiteral) -> ObjectLiteral {
    object.properties = object
        .properties
        .into_iter()
        .map(|property| visitor.visit_property(property))
        .collect();
    object
}

pub fn walk_property<V: Visitor + ?Sized>(visitor: &mut V, mut property: Property) -> Property {
    property.kind = match property.kind {
        PropertyKind::KeyValue { key, value } => PropertyKind::KeyValue {
            key,
            value: visitor.visit_expression(value),
        },
        PropertyKind::Raw(text) => PropertyKind::Raw(text),
    };
    property
}
