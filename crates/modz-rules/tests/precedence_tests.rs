//! Tests for precedence classification and parenthesization decisions.
use crate::precedence::*;
use modz_parser::node::NodeArena;
use modz_parser::{NodeIndex, ParserState};
use modz_scanner::SyntaxKind;

fn parse(source: &str) -> NodeArena {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty());
    parser.into_arena()
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

fn precedence(source: &str, needle: &str) -> Precedence {
    let arena = parse(source);
    precedence_of(&arena, node_at(&arena, source, needle))
}

#[test]
fn binary_operators_map_to_their_level() {
    let cases = [
        (SyntaxKind::PlusToken, Precedence::Additive),
        (SyntaxKind::AsteriskAsteriskToken, Precedence::Exponent),
        (SyntaxKind::QuestionQuestionToken, Precedence::Coalesce),
        (SyntaxKind::BarBarToken, Precedence::LogicalOr),
        (SyntaxKind::EqualsEqualsEqualsToken, Precedence::Equality),
        (SyntaxKind::InstanceOfKeyword, Precedence::Relational),
        (SyntaxKind::EqualsToken, Precedence::Assignment),
        (SyntaxKind::PlusEqualsToken, Precedence::Assignment),
    ];
    for (token, expected) in cases {
        assert_eq!(binary_operator_precedence(token as u16), expected, "{token:?}");
    }
}

#[test]
fn levels_are_ordered_loosest_first() {
    assert!(Precedence::Comma < Precedence::Assignment);
    assert!(Precedence::Conditional < Precedence::Coalesce);
    assert!(Precedence::LogicalOr < Precedence::LogicalAnd);
    assert!(Precedence::Exponent < Precedence::Unary);
    assert!(Precedence::Call < Precedence::Member);
    assert!(Precedence::Member < Precedence::Primary);
}

#[test]
fn expressions_report_their_written_precedence() {
    assert_eq!(precedence("x = a ? b : c;", "a ? b : c"), Precedence::Conditional);
    assert_eq!(precedence("x = a ?? b;", "a ?? b"), Precedence::Coalesce);
    assert_eq!(precedence("x = -a;", "-a"), Precedence::Unary);
    assert_eq!(precedence("x = a++;", "a++"), Precedence::Update);
    assert_eq!(precedence("x = f(a);", "f(a)"), Precedence::Call);
    assert_eq!(precedence("x = a.b;", "a.b"), Precedence::Member);
    assert_eq!(precedence("x = (a + b);", "(a + b)"), Precedence::Primary);
    assert_eq!(precedence("x = () => 1;", "() => 1"), Precedence::Assignment);
}

#[test]
fn operands_are_wrapped_only_when_they_bind_looser() {
    let source = "x = [a + b, a * b, -a, f()];";
    let arena = parse(source);
    let sum = node_at(&arena, source, "a + b");
    let product = node_at(&arena, source, "a * b");
    let negation = node_at(&arena, source, "-a");
    assert!(operand_needs_parens(&arena, sum, Precedence::Multiplicative));
    assert!(!operand_needs_parens(&arena, product, Precedence::Additive));
    assert!(operand_needs_parens(&arena, negation, Precedence::Update));
    let call = node_at(&arena, source, "f()");
    assert!(!operand_needs_parens(&arena, call, Precedence::Call));
    assert!(operand_needs_parens(&arena, call, Precedence::Member));
}

#[test]
fn calls_are_receivers_but_not_constructor_callees() {
    let source = "x = a.b;
y = c();
z = d[0];
v = new E();
w = g`t`;";
    let arena = parse(source);
    for needle in ["a", "c", "d", "g"] {
        let node = node_at(&arena, source, needle);
        assert!(!replacement_needs_parens(&arena, node, Precedence::Call), "{needle}");
        assert!(replacement_needs_parens(&arena, node, Precedence::Unary), "{needle}");
    }
    let constructor = node_at(&arena, source, "E");
    assert!(replacement_needs_parens(&arena, constructor, Precedence::Call));
    assert!(!replacement_needs_parens(&arena, constructor, Precedence::Member));
}

#[test]
fn coalesce_operands_reject_unparenthesized_logical_operators() {
    let source = "x = [a || b, a && b, a ?? b, a ? b : c, a === b];";
    let arena = parse(source);
    let wraps = |needle: &str| operand_needs_parens(&arena, node_at(&arena, source, needle), Precedence::Coalesce);
    assert!(wraps("a || b"));
    assert!(wraps("a && b"));
    assert!(wraps("a ? b : c"));
    assert!(!wraps("a ?? b"));
    assert!(!wraps("a === b"));
}

#[test]
fn replacements_follow_their_parent_position() {
    let source = "x = -a;\ny = b.c;\nz = 1 + d;\nw = e ? 1 : 2;";
    let arena = parse(source);
    let under_negation = node_at(&arena, source, "a");
    assert!(replacement_needs_parens(&arena, under_negation, Precedence::Exponent));
    assert!(!replacement_needs_parens(&arena, under_negation, Precedence::Call));

    let member_object = node_at(&arena, source, "b");
    assert!(replacement_needs_parens(&arena, member_object, Precedence::Exponent));
    assert!(!replacement_needs_parens(&arena, member_object, Precedence::Member));

    let right_of_plus = node_at(&arena, source, "d");
    assert!(replacement_needs_parens(&arena, right_of_plus, Precedence::Additive));
    assert!(replacement_needs_parens(&arena, right_of_plus, Precedence::LogicalOr));
    assert!(!replacement_needs_parens(&arena, right_of_plus, Precedence::Multiplicative));

    let condition = node_at(&arena, source, "e");
    assert!(replacement_needs_parens(&arena, condition, Precedence::Conditional));
    assert!(!replacement_needs_parens(&arena, condition, Precedence::Coalesce));
}

#[test]
fn coalesce_replacements_cannot_mix_with_logical_operators() {
    let source = "x = a || b;";
    let arena = parse(source);
    let right = node_at(&arena, source, "b");
    assert!(replacement_needs_parens(&arena, right, Precedence::Coalesce));
}

#[test]
fn statement_start_detection() {
    let source = "a.b;\nf(q);\nconst g = () => d;\ne + 1;";
    let arena = parse(source);
    assert!(starts_statement_or_arrow_body(&arena, node_at(&arena, source, "a")));
    assert!(!starts_statement_or_arrow_body(&arena, node_at(&arena, source, "q")));
    assert!(starts_statement_or_arrow_body(&arena, node_at(&arena, source, "d")));
    assert!(starts_statement_or_arrow_body(&arena, node_at(&arena, source, "e")));
}
