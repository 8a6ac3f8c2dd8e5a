//! Tests for single-initializer resolution and reassignment queries.
use crate::state::BinderState;
use modz_parser::node::NodeArena;
use modz_parser::{NodeIndex, ParserState};
use modz_scanner::SyntaxKind;

fn bind(source: &str) -> (NodeArena, BinderState) {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    (arena, binder)
}

/// Identifier node at the last occurrence of `needle` in `source`.
fn last_ident(arena: &NodeArena, source: &str, needle: &str) -> NodeIndex {
    let offset = source.rfind(needle).unwrap() as u32;
    (0..arena.nodes.len() as u32)
        .map(NodeIndex)
        .find(|&i| {
            arena
                .get(i)
                .is_some_and(|n| n.kind == SyntaxKind::Identifier as u16 && n.pos == offset)
        })
        .unwrap()
}

fn initializer_text(source: &str, needle: &str) -> Option<String> {
    let (arena, binder) = bind(source);
    let use_site = last_ident(&arena, source, needle);
    binder
        .resolve_single_initializer(&arena, use_site)
        .map(|init| arena.node_text(init, source).to_string())
}

#[test]
fn resolves_const_initializer() {
    assert_eq!(
        initializer_text("const re = /ab+/g;\nre.test(s);", "re"),
        Some("/ab+/g".to_string())
    );
}

#[test]
fn resolves_through_nested_scope() {
    assert_eq!(
        initializer_text("let items = [1, 2];\nfunction f() { return items; }", "items"),
        Some("[1, 2]".to_string())
    );
}

#[test]
fn reassigned_binding_does_not_resolve() {
    assert_eq!(initializer_text("let re = /a/;\nre = other;\nre;", "re"), None);
    assert_eq!(initializer_text("let n = 1;\nn++;\nn;", "n"), None);
}

#[test]
fn multiple_declarators_do_not_resolve() {
    assert_eq!(initializer_text("var x = 1;\nvar x = 2;\nx;", "x"), None);
}

#[test]
fn parameters_and_uninitialized_do_not_resolve() {
    assert_eq!(initializer_text("function f(p) { return p; }", "p"), None);
    assert_eq!(initializer_text("function f(p = 1) { return p; }", "p"), None);
    assert_eq!(initializer_text("let later;\nlater;", "later"), None);
}

#[test]
fn destructured_binding_does_not_resolve() {
    assert_eq!(initializer_text("const { a } = obj;\na;", "a"), None);
}

#[test]
fn unresolved_name_does_not_resolve() {
    assert_eq!(initializer_text("globalRegex.test(s);", "globalRegex"), None);
}

#[test]
fn declaration_name_is_not_a_reference() {
    let source = "const value = 1;";
    let (arena, binder) = bind(source);
    let name = last_ident(&arena, source, "value");
    assert!(binder.resolve_single_initializer(&arena, name).is_none());
}

#[test]
fn var_used_before_declaration_does_not_resolve() {
    assert_eq!(initializer_text("use(r);\nvar r = /x/;", "r);"), None);
    assert_eq!(
        initializer_text("var r = /x/;\nuse(r);", "r)"),
        Some("/x/".to_string())
    );
}

#[test]
fn var_in_loop_does_not_resolve() {
    assert_eq!(
        initializer_text("for (const s of xs) { var r = make(s); use(r); }", "r)"),
        None
    );
}

#[test]
fn never_reassigned_bindings() {
    let source = "const a = 1;\nlet b = 2;\nlet c = 3; c = 4;\nfunction f(p) { return [a, b, c, p, g]; }";
    let (arena, binder) = bind(source);
    let expect = [("a", true), ("b", true), ("c", false), ("p", true), ("g", false)];
    for (name, never) in expect {
        let site = last_ident(&arena, source, name);
        assert_eq!(
            binder.is_never_reassigned(&arena, site),
            never,
            "is_never_reassigned({name})"
        );
    }
}

#[test]
fn loop_var_is_reinitialized() {
    let source = "for (let i = 0; i < 3; i++) { var v = i; later(v); }";
    let (arena, binder) = bind(source);
    let site = last_ident(&arena, source, "v");
    assert!(!binder.is_never_reassigned(&arena, site));
}

#[test]
fn binds_long_left_deep_chains() {
    let source = format!("const a = 1;\nx = {}a;", "a + ".repeat(10_000));
    assert_eq!(initializer_text(&source, "a"), Some("1".to_string()));

    let members = format!("const o = {{}};\nx = o{};\no;", ".p".repeat(10_000));
    let (arena, binder) = bind(&members);
    assert!(binder.is_never_reassigned(&arena, last_ident(&arena, &members, "o")));
}
