//! Tests for scope construction, declarations and write tracking.
use crate::scopes::ContainerKind;
use crate::state::BinderState;
use crate::symbols::symbol_flags;
use modz_parser::node::NodeArena;
use modz_parser::{NodeIndex, ParserState};
use modz_scanner::SyntaxKind;

fn bind(source: &str) -> (NodeArena, BinderState) {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "parse errors: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    (arena, binder)
}

/// Identifier node starting at the `occurrence`-th match of `needle`.
fn ident(arena: &NodeArena, source: &str, needle: &str, occurrence: usize) -> NodeIndex {
    let offset = source
        .match_indices(needle)
        .nth(occurrence)
        .map(|(i, _)| i as u32)
        .unwrap();
    (0..arena.nodes.len() as u32)
        .map(NodeIndex)
        .find(|&i| {
            arena
                .get(i)
                .is_some_and(|n| n.kind == SyntaxKind::Identifier as u16 && n.pos == offset)
        })
        .unwrap()
}

#[test]
fn source_file_scope_is_root() {
    let (_arena, binder) = bind("const a = 1;");
    assert_eq!(binder.scopes[0].kind, ContainerKind::SourceFile);
    assert!(binder.scopes[0].table.has("a"));
}

#[test]
fn var_hoists_out_of_blocks_but_let_does_not() {
    let source = "function f() {\n  if (x) { var hoisted = 1; let local = 2; }\n}";
    let (arena, binder) = bind(source);
    let func_scope = binder
        .scopes
        .iter()
        .find(|s| s.kind == ContainerKind::Function)
        .unwrap();
    assert!(func_scope.table.has("hoisted"));
    assert!(!func_scope.table.has("local"));
    let hoisted = ident(&arena, source, "hoisted", 0);
    let sym = binder.resolve_identifier(&arena, hoisted).unwrap();
    assert!(
        binder
            .get_symbol(sym)
            .unwrap()
            .has_any_flags(symbol_flags::FUNCTION_SCOPED_VARIABLE)
    );
}

#[test]
fn inner_declaration_shadows_outer() {
    let source = "const Array = 1;\nfunction f() { return Array; }\nfunction g(Math) { return Math; }\nMath;";
    let (arena, binder) = bind(source);
    let array_use = ident(&arena, source, "Array", 1);
    assert!(!binder.is_global_reference(&arena, array_use, "Array"));

    let math_in_g = ident(&arena, source, "Math", 1);
    assert!(!binder.is_global_reference(&arena, math_in_g, "Math"));
    let math_top = ident(&arena, source, "Math", 2);
    assert!(binder.is_global_reference(&arena, math_top, "Math"));
}

#[test]
fn type_only_declarations_do_not_shadow_values() {
    let source = "interface Array<T> { extra(): void }\ntype Math = number;\nArray.from(x); Math.max(1);";
    let (arena, binder) = bind(source);
    let array_use = ident(&arena, source, "Array", 1);
    assert!(binder.is_global_reference(&arena, array_use, "Array"));
    let math_use = ident(&arena, source, "Math", 1);
    assert!(binder.is_global_reference(&arena, math_use, "Math"));
}

#[test]
fn writes_are_counted() {
    let source = "let a = 1; a = 2;\nlet b = 0; b++;\nlet c = 0; c += 1;\nlet d, e; [d, e] = [e, d];\nlet f; ({ f } = obj);\nlet g; for (g of xs) {}\nconst h = 1;";
    let (_arena, binder) = bind(source);
    let count = |name: &str| {
        let id = binder.scopes[0].table.get(name).unwrap();
        binder.get_symbol(id).unwrap().write_count
    };
    assert_eq!(count("a"), 1);
    assert_eq!(count("b"), 1);
    assert_eq!(count("c"), 1);
    assert_eq!(count("d"), 1);
    assert_eq!(count("e"), 1);
    assert_eq!(count("f"), 1);
    assert_eq!(count("g"), 1);
    assert_eq!(count("h"), 0);
}

#[test]
fn parameters_and_catch_bindings_are_scoped() {
    let source = "function f(a, { b }, [c] = []) { try {} catch (err) { err; } }";
    let (arena, binder) = bind(source);
    let func_scope = binder
        .scopes
        .iter()
        .find(|s| s.kind == ContainerKind::Function)
        .unwrap();
    for name in ["a", "b", "c"] {
        assert!(func_scope.table.has(name), "missing parameter {name}");
    }
    let err_use = ident(&arena, source, "err", 1);
    let sym = binder.resolve_identifier(&arena, err_use).unwrap();
    assert!(
        binder
            .get_symbol(sym)
            .unwrap()
            .has_any_flags(symbol_flags::CATCH_VARIABLE)
    );
}

#[test]
fn loop_head_let_is_scoped_to_loop() {
    let source = "for (let i = 0; i < 3; i++) {}\ni;";
    let (arena, binder) = bind(source);
    let outside = ident(&arena, source, "i", 3);
    assert!(binder.resolve_identifier(&arena, outside).is_none());
    let inside = ident(&arena, source, "i", 1);
    assert!(binder.resolve_identifier(&arena, inside).is_some());
}

#[test]
fn function_expression_name_is_local() {
    let source = "const f = function inner() { return inner; };\ninner;";
    let (arena, binder) = bind(source);
    let inside = ident(&arena, source, "inner", 1);
    assert!(binder.resolve_identifier(&arena, inside).is_some());
    let outside = ident(&arena, source, "inner", 2);
    assert!(binder.resolve_identifier(&arena, outside).is_none());
}

#[test]
fn imports_and_classes_declare_values() {
    let source = "import fs, { readFile as rf } from 'fs';\nclass Box {}\nfs; rf; Box;";
    let (arena, binder) = bind(source);
    for (name, occurrence) in [("fs", 2), ("rf", 1), ("Box", 1)] {
        let use_site = ident(&arena, source, name, occurrence);
        assert!(
            binder.resolve_identifier(&arena, use_site).is_some(),
            "{name} should resolve"
        );
    }
}

#[test]
fn redeclared_var_merges_declarations() {
    let (_arena, binder) = bind("var x = 1;\nvar x = 2;");
    let id = binder.scopes[0].table.get("x").unwrap();
    assert_eq!(binder.get_symbol(id).unwrap().declarations.len(), 2);
}
