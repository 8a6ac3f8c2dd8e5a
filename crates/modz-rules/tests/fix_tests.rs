//! Tests for template rendering and fix application.
use std::borrow::Cow;

use super::*;
use modz_common::{Fix, Span};

fn render(template: &str, values: &[(&str, &str)]) -> Option<String> {
    render_template(template, |name| {
        values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| Cow::Owned(value.to_string()))
    })
}

#[test]
fn templates_substitute_named_captures() {
    assert_eq!(
        render("{array}.at(-1)", &[("array", "items")]).as_deref(),
        Some("items.at(-1)")
    );
    assert_eq!(
        render("{base} ** {exponent}", &[("base", "a"), ("exponent", "(b + 1)")]).as_deref(),
        Some("a ** (b + 1)")
    );
}

#[test]
fn templates_fail_on_a_missing_capture() {
    assert_eq!(render("{array}.at(-1)", &[]), None);
}

#[test]
fn braces_that_are_not_placeholders_are_copied() {
    assert_eq!(
        render("{ {properties} }", &[("properties", "...a")]).as_deref(),
        Some("{ ...a }")
    );
    assert_eq!(
        render("if (x) {\n{body}\n}", &[("body", "run();")]).as_deref(),
        Some("if (x) {\nrun();\n}")
    );
    assert_eq!(render("{}", &[]).as_deref(), Some("{}"));
}

#[test]
fn fixes_apply_in_span_order() {
    let text = "aa bb cc";
    let fixes = [Fix::new(Span::new(6, 8), "C"), Fix::new(Span::new(0, 2), "A")];
    let (out, applied) = apply_fixes(text, &fixes);
    assert_eq!(out, "A bb C");
    assert_eq!(applied, 2);
}

#[test]
fn overlapping_fixes_are_left_for_a_later_pass() {
    let text = "outer(inner)";
    let fixes = [
        Fix::new(Span::new(0, 12), "OUTER"),
        Fix::new(Span::new(6, 11), "INNER"),
    ];
    let (out, applied) = apply_fixes(text, &fixes);
    assert_eq!(out, "OUTER");
    assert_eq!(applied, 1);
}

#[test]
fn identical_spans_apply_once() {
    let text = "value";
    let fixes = [Fix::new(Span::new(0, 5), "first"), Fix::new(Span::new(0, 5), "second")];
    let (out, applied) = apply_fixes(text, &fixes);
    assert_eq!(out, "first");
    assert_eq!(applied, 1);
}

#[test]
fn adjacent_fixes_both_apply() {
    let text = "abcd";
    let fixes = [Fix::new(Span::new(0, 2), "x"), Fix::new(Span::new(2, 4), "y")];
    assert_eq!(apply_fixes(text, &fixes), ("xy".to_string(), 2));
}

#[test]
fn out_of_range_fixes_are_ignored() {
    let text = "abc";
    let fixes = [Fix::new(Span::new(1, 10), "zzz")];
    assert_eq!(apply_fixes(text, &fixes), ("abc".to_string(), 0));
}

#[test]
fn no_fixes_leaves_text_untouched() {
    let (out, applied) = apply_fixes("const x = 1;", std::iter::empty());
    assert_eq!(out, "const x = 1;");
    assert_eq!(applied, 0);
}
