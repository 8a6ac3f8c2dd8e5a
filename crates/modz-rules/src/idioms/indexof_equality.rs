use modz_checker::{Capability, NullishKind};
use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use super::{binary_parts, is_literal_value, is_nan, is_regex_literal};
use crate::context::MatchContext;
use crate::idiom::{FixMode, Idiom, IdiomMeta, Match};
use crate::precedence::Precedence;

/// `indexOf(x) === 0` → `startsWith(x)` on strings, `[0] === x` on arrays.
///
/// Needs types: the right rewrite depends on whether the receiver is a
/// string or an array.
pub struct NoIndexofEquality;

static META: IdiomMeta = IdiomMeta {
    id: "no-indexof-equality",
    description: "Disallow comparing the result of `.indexOf()` to test for a position",
    kinds: &[syntax_kind_ext::BINARY_EXPRESSION],
    messages: &[
        ("preferStartsWith", "Use `{receiver}.startsWith()` instead of comparing `.indexOf()` to 0."),
        ("preferFirstElement", "Compare `{receiver}[0]` directly instead of comparing `.indexOf()` to 0."),
    ],
    fix: FixMode::Autofix,
    requires_types: true,
};

impl Idiom for NoIndexofEquality {
    fn meta(&self) -> &'static IdiomMeta {
        &META
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        let arena = ctx.arena;
        let (left, op, right) = binary_parts(ctx, node)?;
        if !matches!(op, SyntaxKind::EqualsEqualsEqualsToken | SyntaxKind::EqualsEqualsToken) {
            return None;
        }
        let (call, index) = if index_of_receiver(ctx, left).is_some() {
            (arena.skip_parenthesized(left), right)
        } else {
            (arena.skip_parenthesized(right), left)
        };
        let receiver = index_of_receiver(ctx, call)?;
        let [search] = ctx.plain_arguments(call)? else {
            return None;
        };
        // Positions other than 0 decline: indexOf reports only the first
        // occurrence.
        if arena.numeric_literal_value(index) != Some(0.0) {
            return None;
        }

        if ctx.holds(receiver, Capability::StringLike) {
            if is_regex_literal(ctx, *search) {
                return None;
            }
            return Some(
                Match::new(node, "preferStartsWith")
                    .node_capture("receiver", receiver)
                    .node_capture("search", *search)
                    .with_template("{receiver}.startsWith({search})", Precedence::Call),
            );
        }
        if ctx.holds(receiver, Capability::ArrayLike)
            && is_literal_value(ctx, *search)
            && !is_nan(ctx, *search)
            && ctx.safety.nullish_kind(*search) != NullishKind::Undefined
        {
            return Some(
                Match::new(node, "preferFirstElement")
                    .node_capture("receiver", receiver)
                    .operand("search", *search, Precedence::Relational)
                    .with_template("{receiver}[0] === {search}", Precedence::Equality),
            );
        }
        None
    }
}

fn index_of_receiver(ctx: &MatchContext<'_>, node: NodeIndex) -> Option<NodeIndex> {
    match ctx.method_call(ctx.arena.skip_parenthesized(node))? {
        (receiver, "indexOf") => Some(receiver),
        _ => None,
    }
}
