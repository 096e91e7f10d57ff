//! Tests for span handling.

use csa_core::Span;

#[test]
fn test_span_merge() {
    let a = Span::new(4, 9);
    let b = Span::new(2, 6);
    assert_eq!(a.merge(b), Span::new(2, 9));
}

#[test]
fn test_span_slice() {
    let source = "const nextConfig = {}";
    let span = Span::new(6, 16);
    assert_eq!(span.slice(source), "nextConfig");
}

#[test]
fn test_span_slice_out_of_range() {
    let span = Span::new(10, 40);
    assert_eq!(span.slice("short"), "");
}

