use modz_checker::NullishKind;
use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use super::binary_parts;
use crate::context::MatchContext;
use crate::idiom::{FixMode, Idiom, IdiomMeta, Match};
use crate::precedence::Precedence;

/// Explicit nullish checks → `??` and `??=`.
pub struct PreferNullishCoalescing;

static META: IdiomMeta = IdiomMeta {
    id: "prefer-nullish-coalescing",
    description: "Prefer `??` and `??=` over explicit null and undefined checks",
    kinds: &[syntax_kind_ext::CONDITIONAL_EXPRESSION, syntax_kind_ext::IF_STATEMENT],
    messages: &[
        ("preferNullishCoalescing", "Use `{value} ?? ...` instead of a conditional that checks for null and undefined."),
        ("preferNullishAssignment", "Use `{target} ??= ...` instead of assigning inside a null check."),
    ],
    fix: FixMode::Autofix,
    requires_types: false,
};

impl Idiom for PreferNullishCoalescing {
    fn meta(&self) -> &'static IdiomMeta {
        &META
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        if ctx.is_kind(node, syntax_kind_ext::IF_STATEMENT) {
            guarded_assignment(ctx, node)
        } else {
            guarded_conditional(ctx, node)
        }
    }
}

/// `v == null ? d : v` and its mirrored and strict forms → `v ?? d`.
fn guarded_conditional(ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
    let cond = ctx.arena.get_conditional_expr_at(node)?;
    let (subject, nullish_when_true) = nullish_check(ctx, cond.condition)?;
    let (value, fallback) = if nullish_when_true {
        (cond.when_false, cond.when_true)
    } else {
        (cond.when_true, cond.when_false)
    };
    if !ctx.same_text(value, subject) || !ctx.safety.is_pure_to_repeat(subject) {
        return None;
    }
    Some(
        Match::new(node, "preferNullishCoalescing")
            .operand("value", ctx.arena.skip_parenthesized(value), Precedence::Coalesce)
            .operand("fallback", fallback, Precedence::Coalesce)
            .with_template("{value} ?? {fallback}", Precedence::Coalesce),
    )
}

/// `if (v == null) v = d;` without an else branch → `v ??= d;`.
fn guarded_assignment(ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
    let arena = ctx.arena;
    let stmt = arena.get_if_statement_at(node)?;
    if stmt.else_statement.is_some() {
        return None;
    }
    let (subject, true) = nullish_check(ctx, stmt.expression)? else {
        return None;
    };

    let mut body = stmt.then_statement;
    if let Some(block) = arena.get_block_at(body) {
        let [only] = block.statements.nodes.as_slice() else {
            return None;
        };
        body = *only;
    }
    let assigned = arena.get_expression_statement_at(body)?.expression;
    let (target, op, value) = binary_parts(ctx, arena.skip_parenthesized(assigned))?;
    if op != SyntaxKind::EqualsToken || !ctx.same_text(target, subject) || !is_simple_target(ctx, target) {
        return None;
    }
    if !ctx.safety.is_pure_to_repeat(subject) {
        return None;
    }
    Some(
        Match::new(node, "preferNullishAssignment")
            .node_capture("target", target)
            .node_capture("value", value)
            .with_template("{target} ??= {value};", Precedence::Primary),
    )
}

/// An identifier or member access; `??=` accepts nothing else.
fn is_simple_target(ctx: &MatchContext<'_>, node: NodeIndex) -> bool {
    matches!(
        ctx.kind(node),
        Some(kind) if kind == SyntaxKind::Identifier as u16
            || kind == syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION
            || kind == syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION
    ) && !ctx.arena.is_optional_chain(node)
}

/// Recognize a test for "`v` is null or undefined". Returns `v` and true
/// if the test holds when `v` is nullish, false if it holds when `v` is
/// not.
fn nullish_check(ctx: &MatchContext<'_>, test: NodeIndex) -> Option<(NodeIndex, bool)> {
    let (left, op, right) = binary_parts(ctx, ctx.arena.skip_parenthesized(test))?;
    match op {
        SyntaxKind::EqualsEqualsToken | SyntaxKind::ExclamationEqualsToken => {
            let (subject, _) = compared_to_nullish(ctx, left, right)?;
            Some((subject, op == SyntaxKind::EqualsEqualsToken))
        }
        SyntaxKind::BarBarToken | SyntaxKind::AmpersandAmpersandToken => {
            let strict = if op == SyntaxKind::BarBarToken {
                SyntaxKind::EqualsEqualsEqualsToken
            } else {
                SyntaxKind::ExclamationEqualsEqualsToken
            };
            let (first, first_kind) = strict_check(ctx, left, strict)?;
            let (second, second_kind) = strict_check(ctx, right, strict)?;
            let covers_both = matches!(
                (first_kind, second_kind),
                (NullishKind::Null, NullishKind::Undefined) | (NullishKind::Undefined, NullishKind::Null)
            );
            (covers_both && ctx.same_text(first, second)).then_some((first, op == SyntaxKind::BarBarToken))
        }
        _ => None,
    }
}

/// `v === null`, `undefined !== v` and so on, with the strict operator `op`.
fn strict_check(ctx: &MatchContext<'_>, test: NodeIndex, op: SyntaxKind) -> Option<(NodeIndex, NullishKind)> {
    let (left, actual, right) = binary_parts(ctx, ctx.arena.skip_parenthesized(test))?;
    if actual != op {
        return None;
    }
    compared_to_nullish(ctx, left, right)
}

/// Of two operands, the one compared against a nullish spelling, and that
/// spelling.
fn compared_to_nullish(ctx: &MatchContext<'_>, left: NodeIndex, right: NodeIndex) -> Option<(NodeIndex, NullishKind)> {
    let (left_kind, right_kind) = (ctx.safety.nullish_kind(left), ctx.safety.nullish_kind(right));
    match (left_kind.is_nullish(), right_kind.is_nullish()) {
        (false, true) => Some((left, right_kind)),
        (true, false) => Some((right, left_kind)),
        _ => None,
    }
}
