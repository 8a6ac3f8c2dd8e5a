//! Mutating array methods called on a fresh shallow copy, rewritten to their
//! copying counterparts.

use modz_checker::Capability;
use modz_parser::{NodeIndex, syntax_kind_ext};

use super::arguments_capture;
use crate::context::MatchContext;
use crate::idiom::{FixMode, Idiom, IdiomMeta, Match};
use crate::precedence::Precedence;

/// `a.slice().reverse()` → `a.toReversed()`.
pub struct PreferArrayToReversed;

/// `a.slice().sort(cmp)` → `a.toSorted(cmp)`.
pub struct PreferArrayToSorted;

/// `a.slice().splice(i, n)` → `a.toSpliced(i, n)`, as a suggestion.
pub struct PreferArrayToSpliced;

const CALL_KINDS: &[u16] = &[syntax_kind_ext::CALL_EXPRESSION];

static TO_REVERSED: IdiomMeta = IdiomMeta {
    id: "prefer-array-to-reversed",
    description: "Prefer `.toReversed()` over reversing a copy",
    kinds: CALL_KINDS,
    messages: &[("preferToReversed", "Use `{array}.toReversed()` instead of copying and then reversing.")],
    fix: FixMode::Autofix,
    requires_types: false,
};

static TO_SORTED: IdiomMeta = IdiomMeta {
    id: "prefer-array-to-sorted",
    description: "Prefer `.toSorted()` over sorting a copy",
    kinds: CALL_KINDS,
    messages: &[("preferToSorted", "Use `{array}.toSorted()` instead of copying and then sorting.")],
    fix: FixMode::Autofix,
    requires_types: false,
};

static TO_SPLICED: IdiomMeta = IdiomMeta {
    id: "prefer-array-to-spliced",
    description: "Prefer `.toSpliced()` over splicing a copy",
    kinds: CALL_KINDS,
    messages: &[
        ("preferToSpliced", "Use `{array}.toSpliced()` instead of copying and then splicing."),
        (
            "suggestToSpliced",
            "Replace with `{array}.toSpliced()`; note that it returns the new array, not the removed elements.",
        ),
    ],
    fix: FixMode::Suggestion {
        message_key: "suggestToSpliced",
    },
    requires_types: false,
};

impl Idiom for PreferArrayToReversed {
    fn meta(&self) -> &'static IdiomMeta {
        &TO_REVERSED
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        let (source, args) = copied_call(ctx, node, "reverse")?;
        if !args.is_empty() {
            return None;
        }
        Some(
            Match::new(node, "preferToReversed")
                .operand("array", source, Precedence::Call)
                .with_template("{array}.toReversed()", Precedence::Call),
        )
    }
}

impl Idiom for PreferArrayToSorted {
    fn meta(&self) -> &'static IdiomMeta {
        &TO_SORTED
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        let (source, args) = copied_call(ctx, node, "sort")?;
        if args.len() > 1 {
            return None;
        }
        Some(
            Match::new(node, "preferToSorted")
                .operand("array", source, Precedence::Call)
                .capture("args", arguments_capture(args))
                .with_template("{array}.toSorted({args})", Precedence::Call),
        )
    }
}

impl Idiom for PreferArrayToSpliced {
    fn meta(&self) -> &'static IdiomMeta {
        &TO_SPLICED
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        let (source, args) = copied_call(ctx, node, "splice")?;
        Some(
            Match::new(node, "preferToSpliced")
                .operand("array", source, Precedence::Call)
                .capture("args", arguments_capture(args))
                .with_template("{array}.toSpliced({args})", Precedence::Call),
        )
    }
}

/// For `copy.method(args)` where `copy` is a shallow copy of some array,
/// return that array and the arguments.
///
/// `[...a]` copies any iterable, so the spread form also needs `a` to be
/// known as an array.
fn copied_call<'a>(ctx: &MatchContext<'a>, node: NodeIndex, method: &str) -> Option<(NodeIndex, &'a [NodeIndex])> {
    let (receiver, called) = ctx.method_call(node)?;
    if called != method {
        return None;
    }
    let args = ctx.plain_arguments(node)?;
    let source = ctx.safety.shallow_copy_source(receiver)?;
    if ctx.safety.is_shallow_copy_call(ctx.arena.skip_parenthesized(receiver)) {
        return Some((source, args));
    }
    ctx.holds(source, Capability::ArrayLike).then_some((source, args))
}
