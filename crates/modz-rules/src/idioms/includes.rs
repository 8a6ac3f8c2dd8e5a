use modz_checker::{Capability, NullishKind};
use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use super::{arguments_capture, binary_parts, is_nan, is_negated, is_regex_literal, prefix_operand};
use crate::context::MatchContext;
use crate::idiom::{FixMode, Idiom, IdiomMeta, Match};
use crate::precedence::Precedence;

/// `indexOf` existence checks → `includes`.
pub struct PreferIncludes;

static META: IdiomMeta = IdiomMeta {
    id: "prefer-includes",
    description: "Prefer `.includes()` over comparing `.indexOf()` against -1",
    kinds: &[syntax_kind_ext::BINARY_EXPRESSION, syntax_kind_ext::PREFIX_UNARY_EXPRESSION],
    messages: &[("preferIncludes", "Use `.includes()` instead of checking the result of `.indexOf()`.")],
    fix: FixMode::Autofix,
    requires_types: false,
};

impl Idiom for PreferIncludes {
    fn meta(&self) -> &'static IdiomMeta {
        &META
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        let (call, negated) = if ctx.is_kind(node, syntax_kind_ext::BINARY_EXPRESSION) {
            compared_index(ctx, node)?
        } else {
            bitwise_not_index(ctx, node)?
        };
        let (receiver, args) = index_of_call(ctx, call)?;

        let template = if negated {
            ("!{array}.includes({args})", Precedence::Unary)
        } else {
            ("{array}.includes({args})", Precedence::Call)
        };
        Some(
            Match::new(node, "preferIncludes")
                .node_capture("array", receiver)
                .capture("args", arguments_capture(args))
                .with_template(template.0, template.1),
        )
    }
}

/// `a.indexOf(x) <op> literal` in either operand order. Returns the call
/// and whether the comparison tests for absence.
fn compared_index(ctx: &MatchContext<'_>, node: NodeIndex) -> Option<(NodeIndex, bool)> {
    let arena = ctx.arena;
    let (left, op, right) = binary_parts(ctx, node)?;
    let (call, op, literal) = if is_index_of(ctx, left) {
        (arena.skip_parenthesized(left), op, right)
    } else if is_index_of(ctx, right) {
        (arena.skip_parenthesized(right), mirror(op)?, left)
    } else {
        return None;
    };
    let value = arena.signed_numeric_value(literal)?;

    use SyntaxKind::*;
    let negated = if value == -1.0 {
        match op {
            ExclamationEqualsEqualsToken | ExclamationEqualsToken | GreaterThanToken => false,
            EqualsEqualsEqualsToken | EqualsEqualsToken => true,
            _ => return None,
        }
    } else if value == 0.0 {
        match op {
            GreaterThanEqualsToken => false,
            LessThanToken => true,
            _ => return None,
        }
    } else {
        return None;
    };
    Some((call, negated))
}

/// The operator that gives the same result with operands swapped.
fn mirror(op: SyntaxKind) -> Option<SyntaxKind> {
    use SyntaxKind::*;
    Some(match op {
        LessThanToken => GreaterThanToken,
        GreaterThanToken => LessThanToken,
        LessThanEqualsToken => GreaterThanEqualsToken,
        GreaterThanEqualsToken => LessThanEqualsToken,
        op if op.is_equality_operator() => op,
        _ => return None,
    })
}

/// `!~a.indexOf(x)`, or `~a.indexOf(x)` where only truthiness is observed.
fn bitwise_not_index(ctx: &MatchContext<'_>, node: NodeIndex) -> Option<(NodeIndex, bool)> {
    if let Some(inner) = prefix_operand(ctx, node, SyntaxKind::ExclamationToken) {
        let call = prefix_operand(ctx, inner, SyntaxKind::TildeToken)?;
        return is_index_of(ctx, call).then_some((call, true));
    }
    let call = prefix_operand(ctx, node, SyntaxKind::TildeToken)?;
    if !is_index_of(ctx, call) || is_negated(ctx, node) || !ctx.safety.is_in_boolean_context(node) {
        return None;
    }
    Some((call, false))
}

fn is_index_of(ctx: &MatchContext<'_>, node: NodeIndex) -> bool {
    let node = ctx.arena.skip_parenthesized(node);
    ctx.method_call(node).is_some_and(|(_, method)| method == "indexOf")
}

/// Receiver and arguments of an `indexOf` call that `includes` can replace.
fn index_of_call<'a>(ctx: &MatchContext<'a>, call: NodeIndex) -> Option<(NodeIndex, &'a [NodeIndex])> {
    let (receiver, _) = ctx.method_call(call)?;
    let args = ctx.plain_arguments(call)?;
    let search = match args {
        [search] | [search, _] => *search,
        _ => return None,
    };
    // `includes` finds NaN and treats holes as undefined; `indexOf` does
    // neither. String `includes` throws on a RegExp.
    if is_nan(ctx, search) || ctx.safety.nullish_kind(search) == NullishKind::Undefined {
        return None;
    }
    if is_regex_literal(ctx, search) || !ctx.holds(receiver, Capability::Searchable) {
        return None;
    }
    Some((receiver, args))
}
