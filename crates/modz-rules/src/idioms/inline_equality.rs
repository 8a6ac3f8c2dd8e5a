use modz_checker::Capability;
use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use super::{is_literal_value, is_nan, is_negated, prefix_operand};
use crate::context::MatchContext;
use crate::idiom::{Capture, FixMode, Idiom, IdiomMeta, Match};
use crate::fix::capture_text;
use crate::precedence::Precedence;

/// `[a, b].includes(x)` → `a === x || b === x`, and `[...s].includes(x)`
/// → `s.has(x)` / `s.includes(x)`.
pub struct PreferInlineEquality;

static META: IdiomMeta = IdiomMeta {
    id: "prefer-inline-equality",
    description: "Prefer direct comparisons over `.includes()` on a short literal array",
    kinds: &[syntax_kind_ext::CALL_EXPRESSION, syntax_kind_ext::PREFIX_UNARY_EXPRESSION],
    messages: &[
        ("preferEquality", "Compare `{value}` directly instead of building an array to call `.includes()`."),
        ("preferDirectLookup", "Call `.{method}()` on `{source}` instead of spreading it into an array."),
    ],
    fix: FixMode::Autofix,
    requires_types: false,
};

/// Longest literal array that is inlined.
const MAX_INLINE_ELEMENTS: usize = 6;

impl Idiom for PreferInlineEquality {
    fn meta(&self) -> &'static IdiomMeta {
        &META
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        if let Some(call) = prefix_operand(ctx, node, SyntaxKind::ExclamationToken) {
            return inline_comparisons(ctx, node, call, true);
        }
        if !ctx.is_kind(node, syntax_kind_ext::CALL_EXPRESSION) {
            return None;
        }
        if let Some(m) = spread_lookup(ctx, node) {
            return Some(m);
        }
        if is_negated(ctx, node) {
            return None;
        }
        inline_comparisons(ctx, node, node, false)
    }
}

/// The literal array and search value of `[...].includes(x)`.
fn includes_on_literal<'a>(ctx: &MatchContext<'a>, call: NodeIndex) -> Option<(&'a [NodeIndex], NodeIndex)> {
    let (receiver, method) = ctx.method_call(call)?;
    if method != "includes" {
        return None;
    }
    let [value] = ctx.plain_arguments(call)? else {
        return None;
    };
    let receiver = ctx.arena.skip_parenthesized(receiver);
    if !ctx.is_kind(receiver, syntax_kind_ext::ARRAY_LITERAL_EXPRESSION) {
        return None;
    }
    let elements = ctx.arena.get_literal_expr_at(receiver)?.elements.nodes.as_slice();
    Some((elements, *value))
}

/// Expand `[a, b].includes(x)` into equality tests, reported on `node`
/// (the call, or the `!` that negates it).
fn inline_comparisons(ctx: &MatchContext<'_>, node: NodeIndex, call: NodeIndex, negated: bool) -> Option<Match> {
    let (elements, value) = includes_on_literal(ctx, call)?;
    if elements.is_empty() || elements.len() > MAX_INLINE_ELEMENTS || !ctx.safety.is_pure_to_repeat(value) {
        return None;
    }
    // `includes` treats NaN as equal to itself and `===` does not; a
    // non-NaN literal on one side of every comparison rules that out.
    let value_is_literal = is_literal_value(ctx, value);
    let plain = elements.iter().all(|&element| {
        let element = ctx.arena.skip_parenthesized(element);
        (ctx.is_kind(element, SyntaxKind::Identifier as u16) || is_literal_value(ctx, element))
            && !is_nan(ctx, element)
            && (value_is_literal || is_literal_value(ctx, element))
    });
    if !plain || is_nan(ctx, value) {
        return None;
    }

    let (operator, joiner) = if negated { ("!==", " && ") } else { ("===", " || ") };
    let value_text = capture_text(ctx, &Capture::Operand(value, Precedence::Relational))?.into_owned();
    let comparisons = elements
        .iter()
        .map(|&element| format!("{} {operator} {value_text}", ctx.text_of(element)))
        .collect::<Vec<_>>()
        .join(joiner);
    let precedence = match (elements.len(), negated) {
        (1, _) => Precedence::Equality,
        (_, false) => Precedence::LogicalOr,
        (_, true) => Precedence::LogicalAnd,
    };
    Some(
        Match::new(node, "preferEquality")
            .node_capture("value", value)
            .text("comparisons", comparisons)
            .with_template("{comparisons}", precedence),
    )
}

/// `[...s].includes(x)` → `s.has(x)` for a set, `s.includes(x)` for an
/// array.
fn spread_lookup(ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
    let (elements, value) = includes_on_literal(ctx, node)?;
    let [spread] = elements else {
        return None;
    };
    if !ctx.is_kind(*spread, syntax_kind_ext::SPREAD_ELEMENT) {
        return None;
    }
    let source = ctx.arena.get_unary_expr_ex_at(*spread)?.expression;
    let method = if ctx.holds(source, Capability::SetLike) {
        "has"
    } else if ctx.holds(source, Capability::ArrayLike) {
        "includes"
    } else {
        return None;
    };
    let template = if method == "has" {
        "{source}.has({value})"
    } else {
        "{source}.includes({value})"
    };
    Some(
        Match::new(node, "preferDirectLookup")
            .operand("source", source, Precedence::Call)
            .node_capture("value", value)
            .text("method", method)
            .with_template(template, Precedence::Call),
    )
}
