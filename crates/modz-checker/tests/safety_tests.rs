//! Tests for the semantic safety oracle.
use crate::safety::{NullishKind, SafetyOracle};
use modz_binder::BinderState;
use modz_parser::node::NodeArena;
use modz_parser::{NodeIndex, ParserState};

fn bind(source: &str) -> (NodeArena, BinderState) {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    (arena, binder)
}

/// Outermost node spanning exactly the last occurrence of `needle`.
fn node_at(arena: &NodeArena, source: &str, needle: &str) -> NodeIndex {
    let start = source.rfind(needle).unwrap() as u32;
    let end = start + needle.len() as u32;
    (0..arena.nodes.len() as u32)
        .map(NodeIndex)
        .filter(|&i| arena.get(i).is_some_and(|n| n.pos == start && n.end == end))
        .max_by_key(|i| i.0)
        .unwrap()
}

fn check(source: &str, needle: &str, query: impl Fn(&SafetyOracle<'_>, NodeIndex) -> bool) -> bool {
    let (arena, binder) = bind(source);
    let oracle = SafetyOracle::new(&arena, &binder);
    let node = node_at(&arena, source, needle);
    query(&oracle, node)
}

fn pure(expr: &str) -> bool {
    let source = format!("x = {expr};");
    check(&source, expr, |oracle, node| oracle.is_pure_to_repeat(node))
}

fn constant(expr: &str) -> bool {
    let source = format!("x = {expr};");
    check(&source, expr, |oracle, node| oracle.is_constant_expression(node))
}

#[test]
fn identifiers_and_member_chains_are_pure() {
    assert!(pure("value"));
    assert!(pure("this.items"));
    assert!(pure("a.b[c].d"));
    assert!(pure("a[0]"));
    assert!(pure("(a)"));
}

#[test]
fn operators_without_side_effects_are_pure() {
    assert!(pure("a + b * 2"));
    assert!(pure("-a"));
    assert!(pure("!flag"));
    assert!(pure("typeof a"));
    assert!(pure("c ? a : b"));
    assert!(pure("`x${a}y`"));
}

#[test]
fn calls_and_mutations_are_not_pure() {
    assert!(!pure("f()"));
    assert!(!pure("a.b()"));
    assert!(!pure("new Foo()"));
    assert!(!pure("a = 1"));
    assert!(!pure("a++"));
    assert!(!pure("++a"));
    assert!(!pure("await a"));
    assert!(!pure("a[f()]"));
}

#[test]
fn literals_purity() {
    assert!(pure("[1, a]"));
    assert!(pure("{ a: 1, b }"));
    assert!(!pure("[...a]"));
    assert!(!pure("{ [f()]: 1 }"));
}

#[test]
fn constant_expressions() {
    assert!(constant("0"));
    assert!(constant("'text'"));
    assert!(constant("null"));
    assert!(constant("n * 2 + 1"));
    assert!(constant("value"));
    assert!(!constant("Math.random()"));
    assert!(!constant("[]"));
    assert!(!constant("{}"));
    assert!(!constant("/a/"));
    assert!(!constant("() => 1"));
}

fn nullish(source: &str, needle: &str) -> NullishKind {
    let (arena, binder) = bind(source);
    let oracle = SafetyOracle::new(&arena, &binder);
    oracle.nullish_kind(node_at(&arena, source, needle))
}

#[test]
fn nullish_literals() {
    assert_eq!(nullish("x = null;", "null"), NullishKind::Null);
    assert_eq!(nullish("x = undefined;", "undefined"), NullishKind::Undefined);
    assert_eq!(nullish("x = void 0;", "void 0"), NullishKind::Undefined);
    assert_eq!(nullish("x = (null);", "(null)"), NullishKind::Null);
    assert_eq!(nullish("x = 0;", "0"), NullishKind::None);
    assert_eq!(nullish("x = void 1;", "void 1"), NullishKind::None);
}

#[test]
fn shadowed_undefined_is_not_nullish() {
    assert_eq!(
        nullish("function f(undefined) { return undefined; }", "undefined"),
        NullishKind::None
    );
}

fn boolean_context(source: &str, needle: &str) -> bool {
    check(source, needle, |oracle, node| oracle.is_in_boolean_context(node))
}

#[test]
fn statement_tests_are_boolean_contexts() {
    assert!(boolean_context("if (a.find(p)) {}", "a.find(p)"));
    assert!(boolean_context("while (a.find(p)) {}", "a.find(p)"));
    assert!(boolean_context("for (; a.find(p); ) {}", "a.find(p)"));
    assert!(boolean_context("do {} while (a.find(p));", "a.find(p)"));
    assert!(boolean_context("x = a.find(p) ? 1 : 2;", "a.find(p)"));
    assert!(boolean_context("if ((a.find(p))) {}", "a.find(p)"));
}

#[test]
fn logical_operands_inherit_boolean_context() {
    assert!(boolean_context("if (ok && a.find(p)) {}", "a.find(p)"));
    assert!(boolean_context("if (a.find(p) || ok) {}", "a.find(p)"));
    assert!(!boolean_context("x = ok && a.find(p);", "a.find(p)"));
}

#[test]
fn value_positions_are_not_boolean_contexts() {
    assert!(!boolean_context("x = a.find(p);", "a.find(p)"));
    assert!(!boolean_context("f(a.find(p));", "a.find(p)"));
    assert!(!boolean_context("x = c ? a.find(p) : 1;", "a.find(p)"));
    assert!(!boolean_context("if (a.find(p) === b) {}", "a.find(p)"));
}

fn write_target(source: &str, needle: &str) -> bool {
    check(source, needle, |oracle, node| oracle.is_write_target(node))
}

#[test]
fn assignment_and_update_targets() {
    assert!(write_target("a.b = 1;", "a.b"));
    assert!(write_target("a.b += 1;", "a.b"));
    assert!(write_target("a.b++;", "a.b"));
    assert!(write_target("delete a.b;", "a.b"));
    assert!(write_target("for (a.b of c) {}", "a.b"));
    assert!(write_target("[a.b] = c;", "a.b"));
    assert!(write_target("({ k: a.b } = c);", "a.b"));
    assert!(!write_target("x = a.b;", "a.b"));
    assert!(!write_target("f(a.b);", "a.b"));
}

fn copy_source(source: &str, needle: &str) -> Option<String> {
    let (arena, binder) = bind(source);
    let oracle = SafetyOracle::new(&arena, &binder);
    oracle
        .shallow_copy_source(node_at(&arena, source, needle))
        .map(|node| arena.node_text(node, source).to_string())
}

#[test]
fn shallow_copies() {
    assert_eq!(copy_source("x = a.slice();", "a.slice()"), Some("a".to_string()));
    assert_eq!(copy_source("x = a.slice(0);", "a.slice(0)"), Some("a".to_string()));
    assert_eq!(copy_source("x = a.b.concat();", "a.b.concat()"), Some("a.b".to_string()));
    assert_eq!(copy_source("x = [...items];", "[...items]"), Some("items".to_string()));
    assert_eq!(copy_source("x = a.slice(1);", "a.slice(1)"), None);
    assert_eq!(copy_source("x = a?.slice();", "a?.slice()"), None);
    assert_eq!(copy_source("x = [...a, ...b];", "[...a, ...b]"), None);
}

#[test]
fn stable_values() {
    let source = "const limit = 10;\nlet count = 0;\ncount++;\nf(limit, count, 5, this, glob);";
    let (arena, binder) = bind(source);
    let oracle = SafetyOracle::new(&arena, &binder);
    assert!(oracle.is_stable_value(node_at(&arena, source, "limit")));
    assert!(!oracle.is_stable_value(node_at(&arena, source, "count")));
    assert!(oracle.is_stable_value(node_at(&arena, source, "5")));
    assert!(!oracle.is_stable_value(node_at(&arena, source, "this")));
    assert!(!oracle.is_stable_value(node_at(&arena, source, "glob")));
}

#[test]
fn global_identifiers() {
    let source = "Math.pow(a, b);\nfunction g(Math) { return Math.pow(a, b); }";
    let (arena, binder) = bind(source);
    let oracle = SafetyOracle::new(&arena, &binder);
    let first = node_at(&arena, &source[..16], "Math");
    assert!(oracle.is_global_identifier(first, "Math"));
    assert!(!oracle.is_global_identifier(node_at(&arena, source, "Math"), "Math"));
}

#[test]
fn very_deep_chains_are_answered_conservatively() {
    let short = format!("{}a", "a + ".repeat(100));
    assert!(pure(&short));
    assert!(constant(&short));

    let long = format!("{}a", "a + ".repeat(10_000));
    assert!(!pure(&long));
    assert!(!constant(&long));
}
