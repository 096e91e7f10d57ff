//! Tests for patching Next.js config modules end to end.

use csa_codegen::generate;
use csa_parser::parse_source;
use csa_transform::{NextConfigPass, Pass, Transformer};

fn patch(source: &str) -> (String, bool) {
    let mut program = parse_source(source).unwrap();
    let changed = Transformer::new().transform(&mut program);
    (generate(&program), changed)
}

const GENERATED: &str = r#"/** @type {import('next').NextConfig} */
const nextConfig = {
  reactStrictMode: true,
}

module.exports = nextConfig
"#;

#[test]
fn test_patch_generated_config() {
    let (patched, changed) = patch(GENERATED);
    assert!(changed);
    insta::assert_snapshot!(patched.trim_end(), @r"
    /** @type {import('next').NextConfig} */
    const nextConfig = {
      reactStrictMode: true,
      images: {
        unoptimized: true,
      },
      trailingSlash: true,
    }

    module.exports = nextConfig
    ");
}

#[test]
fn test_patch_is_idempotent() {
    let (once, _) = patch(GENERATED);
    let (twice, changed) = patch(&once);
    assert!(!changed);
    assert_eq!(twice, once);
}

#[test]
fn test_existing_values_are_overwritten() {
    let source = "const nextConfig = {\n  images: {\n    unoptimized: false,\n  },\n  trailingSlash: false,\n}\n\nmodule.exports = nextConfig\n";
    let (patched, changed) = patch(source);
    assert!(changed);
    assert_eq!(
        patched,
        "const nextConfig = {\n  images: {\n    unoptimized: true,\n  },\n  trailingSlash: true,\n}\n\nmodule.exports = nextConfig\n"
    );
    assert_eq!(patched.matches("trailingSlash").count(), 1);
}

#[test]
fn test_other_image_settings_are_kept() {
    let source = "const nextConfig = {\n  images: {\n    domains: [\"example.com\"],\n  },\n}\n";
    let (patched, _) = patch(source);
    assert_eq!(
        patched,
        "const nextConfig = {\n  images: {\n    domains: [\"example.com\"],\n    unoptimized: true,\n  },\n  trailingSlash: true,\n}\n"
    );
}

#[test]
fn test_empty_images_object_is_filled() {
    let (patched, _) = patch("module.exports = { images: {} }\n");
    assert_eq!(
        patched,
        "module.exports = { images: { unoptimized: true }, trailingSlash: true }\n"
    );
}

#[test]
fn test_inline_export_default_is_patched() {
    let (patched, changed) = patch("export default { reactStrictMode: true };\n");
    assert!(changed);
    let (again, _) = patch(&patched);
    assert_eq!(again, patched);
    assert!(patched.contains("unoptimized: true"));
    assert!(patched.contains("trailingSlash: true"));
}

#[test]
fn test_missing_config_is_appended() {
    let (patched, changed) = patch("const path = require(\"path\")\n");
    assert!(changed);
    assert_eq!(
        patched,
        r#"const path = require("path")

/** @type {import('next').NextConfig} */
const nextConfig = {
  images: {
    unoptimized: true,
  },
  trailingSlash: true,
}

module.exports = nextConfig
"#
    );
}

#[test]
fn test_empty_file_gets_default_config() {
    let (patched, changed) = patch("");
    assert!(changed);
    assert!(patched.starts_with("/** @type"));
    assert_eq!(patched, generate(&NextConfigPass::new().default_program()));
}

#[test]
fn test_wrapped_export_is_left_unchanged() {
    let source = "const withMDX = require(\"@next/mdx\")()\n\nmodule.exports = withMDX({ pageExtensions: [\"md\"] })\n";
    let (patched, changed) = patch(source);
    assert!(!changed);
    assert_eq!(patched, source);
}

#[test]
fn test_differently_named_config_is_not_touched() {
    let source = "const config = { trailingSlash: false }\n";
    let mut program = parse_source(source).unwrap();
    assert!(NextConfigPass::new().run(&mut program));
    let patched = generate(&program);
    assert!(patched.starts_with("const config = { trailingSlash: false }\n"));

}

#[test]
fn test_comment_before_config_object_is_kept() {
    let source = "const nextConfig = /* x */ {\n  reactStrictMode: true,\n}\n\nmodule.exports = nextConfig\n";
    let (patched, changed) = patch(source);
    assert!(changed);
    insta::assert_snapshot!(patched.trim_end(), @r"
    const nextConfig = /* x */ {
      reactStrictMode: true,
      images: {
        unoptimized: true,
      },
      trailingSlash: true,
    }

    module.exports = nextConfig
    ");
}

#[test]
fn test_comment_before_nested_object_is_kept() {
    let source = "module.exports = {\n  images: /* keep */ {},\n}\n";
    let (patched, _) = patch(source);
    assert_eq!(
        patched,
        "module.exports = {\n  images: /* keep */ { unoptimized: true },\n  trailingSlash: true,\n}\n"
    );
}

#[test]
fn test_comment_inside_property_moves_above_it() {
    let source = "module.exports = {\n  trailingSlash /* old */: false,\n}\n";
    let (patched, _) = patch(source);
    assert!(patched.contains("  /* old */\n  trailingSlash: true,\n"));
}

#[test]
fn test_regex_values_are_kept_verbatim() {
    let source = "module.exports = {\n  matcher: /^https:\\/\\//,\n}\n";
    let (patched, changed) = patch(source);
    assert!(changed);
    insta::assert_snapshot!(patched.trim_end(), @r"
    module.exports = {
      matcher: /^https:\/\//,
      images: {
        unoptimized: true,
      },
      trailingSlash: true,
    }
    ");
}

#[test]
fn test_header_comment_stays_above_appended_config() {
    let (patched, changed) = patch("// header comment\n");
    assert!(changed);
    insta::assert_snapshot!(patched.trim_end(), @r"
    // header comment

    /** @type {import('next').NextConfig} */
    const nextConfig = {
      images: {
        unoptimized: true,
      },
      trailingSlash: true,
    }

    module.exports = nextConfig
    ");
}
