use modz_checker::{Capability, NullishKind};
use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use super::{arguments_capture, binary_parts, is_negated, prefix_operand};
use crate::context::MatchContext;
use crate::idiom::{FixMode, Idiom, IdiomMeta, Match};
use crate::precedence::Precedence;

/// `.find()` used only to test for existence → `.some()`.
pub struct PreferArraySome;

static META: IdiomMeta = IdiomMeta {
    id: "prefer-array-some",
    description: "Prefer `.some()` over `.find()` when only existence is checked",
    kinds: &[
        syntax_kind_ext::BINARY_EXPRESSION,
        syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
        syntax_kind_ext::CALL_EXPRESSION,
    ],
    messages: &[("preferSome", "Use `{array}.some()` instead of checking the result of `.find()`.")],
    fix: FixMode::Autofix,
    requires_types: false,
};

impl Idiom for PreferArraySome {
    fn meta(&self) -> &'static IdiomMeta {
        &META
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        let (call, negated) = match ctx.kind(node)? {
            syntax_kind_ext::BINARY_EXPRESSION => compared_to_undefined(ctx, node)?,
            syntax_kind_ext::PREFIX_UNARY_EXPRESSION => negation(ctx, node)?,
            _ => (bare_test(ctx, node)?, false),
        };
        let (receiver, args) = find_call(ctx, call)?;
        let (template, precedence) = if negated {
            ("!{array}.some({args})", Precedence::Unary)
        } else {
            ("{array}.some({args})", Precedence::Call)
        };
        Some(
            Match::new(node, "preferSome")
                .node_capture("array", receiver)
                .capture("args", arguments_capture(args))
                .with_template(template, precedence),
        )
    }
}

/// `a.find(p) === undefined` (negated) and `!== undefined`.
fn compared_to_undefined(ctx: &MatchContext<'_>, node: NodeIndex) -> Option<(NodeIndex, bool)> {
    let (left, op, right) = binary_parts(ctx, node)?;
    let negated = match op {
        SyntaxKind::EqualsEqualsEqualsToken => true,
        SyntaxKind::ExclamationEqualsEqualsToken => false,
        _ => return None,
    };
    let call = if ctx.safety.nullish_kind(right) == NullishKind::Undefined {
        left
    } else if ctx.safety.nullish_kind(left) == NullishKind::Undefined {
        right
    } else {
        return None;
    };
    let call = ctx.arena.skip_parenthesized(call);
    is_find(ctx, call).then_some((call, negated))
}

/// `!a.find(p)` and `!!a.find(p)`. The inner `!` of a double negation is
/// left to the outer one.
fn negation(ctx: &MatchContext<'_>, node: NodeIndex) -> Option<(NodeIndex, bool)> {
    let operand = prefix_operand(ctx, node, SyntaxKind::ExclamationToken)?;
    if is_find(ctx, operand) {
        return (!is_negated(ctx, node)).then_some((operand, true));
    }
    let inner = prefix_operand(ctx, operand, SyntaxKind::ExclamationToken)?;
    is_find(ctx, inner).then_some((inner, false))
}

/// `a.find(p)` whose truthiness alone is observed, outside the shapes the
/// other two forms handle.
fn bare_test(ctx: &MatchContext<'_>, node: NodeIndex) -> Option<NodeIndex> {
    if !is_find(ctx, node) || is_negated(ctx, node) || !ctx.safety.is_in_boolean_context(node) {
        return None;
    }
    Some(node)
}

fn is_find(ctx: &MatchContext<'_>, node: NodeIndex) -> bool {
    ctx.method_call(node).is_some_and(|(_, method)| method == "find")
}

fn find_call<'a>(ctx: &MatchContext<'a>, call: NodeIndex) -> Option<(NodeIndex, &'a [NodeIndex])> {
    let (receiver, _) = ctx.method_call(call)?;
    let args = ctx.plain_arguments(call)?;
    if !(1..=2).contains(&args.len()) {
        return None;
    }
    // Iterators and other collections may have `find`; only a known
    // non-array receiver declines.
    if ctx.types.query(receiver, Capability::ArrayLike).is_no() {
        return None;
    }
    Some((receiver, args))
}
