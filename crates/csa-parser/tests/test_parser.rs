//! Tests for the config parser.

use csa_parser::{
    DeclarationKind, Expression, ObjectLiteral, PropertyKind, StatementKind, parse_source,
};

/// Helper returning the object literal bound to the first declarator.
fn first_object(source: &str) -> ObjectLiteral {
    let program = parse_source(source).unwrap();
    let StatementKind::Variable { declarators, .. } = &program.statements[0].kind else {
        panic!("Expected variable declaration")
    };
    match &declarators[0].init {
        Some(Expression::Object(object)) => object.clone(),
        other => panic!("Expected object literal, found {other:?}"),
    }
}

#[test]
fn test_parse_generated_config() {
    let source = r#"/** @type {import('next').NextConfig} */
const nextConfig = {
  reactStrictMode: true,
  swcMinify: true,
}

module.exports = nextConfig
"#;
    let program = parse_source(source).unwrap();
    assert_eq!(program.statements.len(), 2);

    let first = &program.statements[0];
    assert_eq!(first.leading_comments.len(), 1);
    assert!(first.leading_comments[0].text.starts_with("/** @type"));

    let StatementKind::Variable {
        kind,
        declarators,
        semicolon,
    } = &first.kind
    else {
        panic!("Expected variable declaration")
    };
    assert_eq!(*kind, DeclarationKind::Const);
    assert!(!semicolon);
    assert_eq!(declarators[0].name, "nextConfig");

    let second = &program.statements[1];
    assert!(second.blank_line_before);
    assert_eq!(
        second.kind,
        StatementKind::ModuleExports {
            value: Expression::Identifier("nextConfig".to_string()),
            semicolon: false,
        }
    );
}

#[test]
fn test_parse_nested_object() {
    let object = first_object("const c = { images: { unoptimized: false, domains: ['a.com'] } }");
    let Some(Expression::Object(images)) = object.get("images") else {
        panic!("Expected images object")
    };
    assert_eq!(images.get("unoptimized"), Some(&Expression::Boolean(false)));
    assert_eq!(
        images.get("domains"),
        Some(&Expression::Raw("['a.com']".to_string()))
    );
    assert!(!object.multiline);
}

#[test]
fn test_parse_quoted_key() {
    let object = first_object(r#"const c = { "trailingSlash": false }"#);
    assert_eq!(object.get("trailingSlash"), Some(&Expression::Boolean(false)));
}

#[test]
fn test_raw_properties_are_preserved() {
    let source = "const c = {\n  ...base,\n  env,\n  async redirects() {\n    return []\n  },\n}";
    let object = first_object(source);
    assert_eq!(object.properties.len(), 3);
    assert_eq!(object.properties[0].kind, PropertyKind::Raw("...base".to_string()));
    assert_eq!(object.properties[1].kind, PropertyKind::Raw("env".to_string()));
    assert_eq!(
        object.properties[2].kind,
        PropertyKind::Raw("async redirects() {\n    return []\n  }".to_string())
    );
    assert!(object.multiline);
}

#[test]
fn test_raw_value_with_arrow_function() {
    let object = first_object("const c = { webpack: (config) => ({ ...config }), b: true }");
    assert_eq!(
        object.get("webpack"),
        Some(&Expression::Raw("(config) => ({ ...config })".to_string()))
    );
    assert_eq!(object.get("b"), Some(&Expression::Boolean(true)));
}

#[test]
fn test_trailing_comments() {
    let source = "const c = {\n  a: true, // keep\n  b: false\n  // last\n}";
    let object = first_object(source);
    assert_eq!(
        object.properties[0].trailing_comment.as_deref(),
        Some("// keep")
    );
    assert_eq!(object.trailing_comments.len(), 1);
    assert_eq!(object.trailing_comments[0].text, "// last");
}

#[test]
fn test_type_annotation_and_suffix() {
    let source = "const nextConfig: NextConfig = { output: 'export' } satisfies NextConfig;";
    let program = parse_source(source).unwrap();
    let StatementKind::Variable {
        declarators,
        semicolon,
        ..
    } = &program.statements[0].kind
    else {
        panic!("Expected variable declaration")
    };
    assert!(semicolon);
    assert_eq!(declarators[0].type_annotation.as_deref(), Some("NextConfig"));
    let Some(Expression::Object(object)) = &declarators[0].init else {
        panic!("Expected object literal")
    };
    assert_eq!(object.suffix.as_deref(), Some(" satisfies NextConfig"));
}

#[test]
fn test_export_default_object() {
    let program = parse_source("export default {\n  output: 'export',\n};\n").unwrap();
    let StatementKind::ExportDefault { value, semicolon } = &program.statements[0].kind else {
        panic!("Expected export default")
    };
    assert!(semicolon);
    assert!(value.as_object().is_some());
    assert!(program.statements[0].is_export());
}

#[test]
fn test_unknown_statements_are_raw() {
    let source = "import withMDX from '@next/mdx'\nconst { a } = require('b');\nfunction f() {\n  return 1\n}\n";
    let program = parse_source(source).unwrap();
    assert_eq!(program.statements.len(), 3);
    assert_eq!(
        program.statements[0].kind,
        StatementKind::Raw("import withMDX from '@next/mdx'".to_string())
    );
    assert_eq!(
        program.statements[1].kind,
        StatementKind::Raw("const { a } = require('b');".to_string())
    );
    assert_eq!(
        program.statements[2].kind,
        StatementKind::Raw("function f() {\n  return 1\n}".to_string())
    );
}

#[test]
fn test_wrapped_export_is_raw_expression() {
    let program = parse_source("module.exports = withMDX(nextConfig)").unwrap();
    assert_eq!(
        program.statements[0].kind,
        StatementKind::ModuleExports {
            value: Expression::Raw("withMDX(nextConfig)".to_string()),
            semicolon: false,
        }
    );
}

#[test]
fn test_empty_source() {
    let program = parse_source("").unwrap();
    assert!(program.statements.is_empty());
    assert!(program.trailing_comments.is_empty());
}

#[test]
fn test_comment_only_source() {
    let program = parse_source("// nothing here\n").unwrap();
    assert!(program.statements.is_empty());
    assert_eq!(program.trailing_comments.len(), 1);
}

#[test]
fn test_unclosed_bracket_is_error() {
    assert!(parse_source("const c = {\n  a: [1, 2,\n").is_err());
}

#[test]
fn test_comment_before_object_is_attached() {
    let object = first_object("const nextConfig = /* x */ { a: true }");
    assert_eq!(object.leading_comments, vec!["/* x */".to_string()]);
    assert_eq!(object.properties.len(), 1);
}

#[test]
fn test_comment_between_key_and_value_moves_to_property() {
    let object = first_object("const c = {\n  a /* note */: true,\n}");
    let comments = &object.properties[0].leading_comments;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].text, "/* note */");
    assert_eq!(object.get("a"), Some(&Expression::Boolean(true)));
}

#[test]
fn test_comment_inside_raw_value_stays_in_text() {
    let program = parse_source("const c = wrap(/* inner */ 1)").unwrap();
    let statement = &program.statements[0];
    assert!(statement.leading_comments.is_empty());

    let StatementKind::Variable { declarators, .. } = &statement.kind else {
        panic!("Expected variable declaration")
    };
    assert_eq!(
        declarators[0].init,
        Some(Expression::Raw("wrap(/* inner */ 1)".to_string()))
    );
}

#[test]
fn test_comment_in_declaration_moves_above_statement() {
    let program = parse_source("const c /* why */ = true").unwrap();
    let statement = &program.statements[0];
    assert_eq!(statement.leading_comments.len(), 1);
    assert_eq!(statement.leading_comments[0].text, "/* why */");
}

#[test]
fn test_regex_value_is_raw() {
    let object = first_object(r"const c = { matcher: /^https:\/\//, b: true }");
    assert_eq!(
        object.get("matcher"),
        Some(&Expression::Raw(r"/^https:\/\//".to_string()))
    );
    assert_eq!(object.get("b"), Some(&Expression::Boolean(true)));
}
