//! Tests for arena accessors, child enumeration and parent links.
use crate::parser::node_access::{is_function_like_kind, kind_name};
use crate::parser::{NodeIndex, ParserState, syntax_kind_ext};
use modz_scanner::SyntaxKind;

fn parse_source(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

/// Collect every node reachable from `root` in pre-order.
fn walk(parser: &ParserState, root: NodeIndex) -> Vec<NodeIndex> {
    let arena = parser.get_arena();
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        out.push(index);
        let mut children = arena.children(index);
        children.reverse();
        stack.extend(children);
    }
    out
}

#[test]
fn every_child_points_back_to_its_parent() {
    let (parser, root) = parse_source(
        "function f(a, b = 1) {\n  const x = a?.b ?? [1, 2];\n  for (const y of x) { if (y) return y; }\n  return (b);\n}\nclass C extends D { m() { return this.z; } }",
    );
    let arena = parser.get_arena();
    for index in walk(&parser, root) {
        for child in arena.children(index) {
            assert_eq!(
                arena.parent(child),
                index,
                "parent of {} should be {}",
                kind_name(arena.kind(child).unwrap()),
                kind_name(arena.kind(index).unwrap())
            );
        }
    }
    assert!(arena.parent(root).is_none());
}

#[test]
fn children_are_in_source_order() {
    let (parser, root) = parse_source("do { a(); } while (b);\nfoo(x, y, z);");
    let arena = parser.get_arena();
    for index in walk(&parser, root) {
        let children = arena.children(index);
        for pair in children.windows(2) {
            let first = arena.get(pair[0]).unwrap();
            let second = arena.get(pair[1]).unwrap();
            assert!(
                first.pos <= second.pos,
                "children of {} out of order",
                kind_name(arena.kind(index).unwrap())
            );
        }
    }
}

#[test]
fn node_text_and_parenthesized_helpers() {
    let source = "const v = ((a + b));";
    let (parser, root) = parse_source(source);
    let arena = parser.get_arena();
    let all = walk(&parser, root);
    let outer = *all
        .iter()
        .find(|&&i| arena.is_kind(i, syntax_kind_ext::PARENTHESIZED_EXPRESSION))
        .unwrap();
    assert_eq!(arena.node_text(outer, source), "((a + b))");
    let inner = arena.skip_parenthesized(outer);
    assert_eq!(arena.node_text(inner, source), "a + b");

    let (parent, child) = arena.parent_skipping_parens(inner);
    assert_eq!(child, outer);
    assert!(arena.is_kind(parent, syntax_kind_ext::VARIABLE_DECLARATION));
}

#[test]
fn find_ancestor_reaches_enclosing_function() {
    let (parser, root) = parse_source("const f = () => { return value; };");
    let arena = parser.get_arena();
    let value = *walk(&parser, root)
        .iter()
        .find(|&&i| arena.is_identifier_named(i, "value"))
        .unwrap();
    let func = arena.find_ancestor(value, |node| is_function_like_kind(node.kind));
    assert!(arena.is_kind(func, syntax_kind_ext::ARROW_FUNCTION));
    let missing = arena.find_ancestor(value, |node| node.kind == syntax_kind_ext::CLASS_DECLARATION);
    assert!(missing.is_none());
}

#[test]
fn literal_value_helpers() {
    let (parser, root) = parse_source("f(-2, +3, (4), 'text', `tmpl`, 0x10);");
    let arena = parser.get_arena();
    let call = *walk(&parser, root)
        .iter()
        .find(|&&i| arena.is_kind(i, syntax_kind_ext::CALL_EXPRESSION))
        .unwrap();
    let args = arena.call_arguments(call);
    assert_eq!(arena.signed_numeric_value(args[0]), Some(-2.0));
    assert_eq!(arena.signed_numeric_value(args[1]), Some(3.0));
    assert_eq!(arena.numeric_literal_value(args[2]), Some(4.0));
    assert_eq!(arena.numeric_literal_value(args[0]), None);
    assert_eq!(arena.string_literal_value(args[3]), Some("text"));
    assert_eq!(arena.string_literal_value(args[4]), Some("tmpl"));
    assert_eq!(arena.numeric_literal_value(args[5]), Some(16.0));
}

#[test]
fn typed_accessors_check_kind() {
    let (parser, root) = parse_source("a.b;");
    let arena = parser.get_arena();
    let access = *walk(&parser, root)
        .iter()
        .find(|&&i| arena.is_kind(i, syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION))
        .unwrap();
    assert!(arena.get_access_expr_at(access).is_some());
    assert!(arena.get_call_expr_at(access).is_none());
    assert!(arena.get_binary_expr_at(NodeIndex::NONE).is_none());
}

#[test]
fn kind_names_are_readable() {
    assert_eq!(kind_name(syntax_kind_ext::CALL_EXPRESSION), "CallExpression");
    assert_eq!(kind_name(SyntaxKind::Identifier as u16), "Identifier");
    assert!(is_function_like_kind(syntax_kind_ext::METHOD_DECLARATION));
    assert!(!is_function_like_kind(syntax_kind_ext::CLASS_DECLARATION));
}
