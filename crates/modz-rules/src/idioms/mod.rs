//! The idiom catalogue.
//!
//! One module per idiom (the three copy-method idioms share one). Helpers
//! here are shapes that several matchers look for.

mod array_at;
mod array_fill;
mod array_from_map;
mod array_some;
mod copy_methods;
mod date_now;
mod exponentiation;
mod includes;
mod indexof_equality;
mod inline_equality;
mod nullish_coalescing;
mod object_has_own;
mod regex_test;
mod spread_syntax;
mod static_regex;
mod timer_args;
mod url_canparse;

use modz_checker::is_primitive_literal_kind;
use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use crate::context::MatchContext;
use crate::idiom::{Capture, Idiom};

pub use array_at::PreferArrayAt;
pub use array_fill::PreferArrayFill;
pub use array_from_map::PreferArrayFromMap;
pub use array_some::PreferArraySome;
pub use copy_methods::{PreferArrayToReversed, PreferArrayToSorted, PreferArrayToSpliced};
pub use date_now::PreferDateNow;
pub use exponentiation::PreferExponentiationOperator;
pub use includes::PreferIncludes;
pub use indexof_equality::NoIndexofEquality;
pub use inline_equality::PreferInlineEquality;
pub use nullish_coalescing::PreferNullishCoalescing;
pub use object_has_own::PreferObjectHasOwn;
pub use regex_test::PreferRegexTest;
pub use spread_syntax::PreferSpreadSyntax;
pub use static_regex::PreferStaticRegex;
pub use timer_args::PreferTimerArgs;
pub use url_canparse::PreferUrlCanParse;

/// Every idiom, in catalogue order. Matchers for one node kind run in
/// this order.
pub static IDIOMS: &[&dyn Idiom] = &[
    &PreferArrayAt,
    &PreferArrayFill,
    &PreferArrayFromMap,
    &PreferIncludes,
    &PreferArrayToReversed,
    &PreferArrayToSorted,
    &PreferArrayToSpliced,
    &PreferExponentiationOperator,
    &PreferNullishCoalescing,
    &PreferObjectHasOwn,
    &PreferSpreadSyntax,
    &PreferUrlCanParse,
    &NoIndexofEquality,
    &PreferTimerArgs,
    &PreferDateNow,
    &PreferRegexTest,
    &PreferArraySome,
    &PreferInlineEquality,
    &PreferStaticRegex,
];

// =============================================================================
// Shared shapes
// =============================================================================

/// `(left, operator, right)` of a binary expression.
pub(crate) fn binary_parts(ctx: &MatchContext<'_>, node: NodeIndex) -> Option<(NodeIndex, SyntaxKind, NodeIndex)> {
    let binary = ctx.arena.get_binary_expr_at(node)?;
    let op = SyntaxKind::from_u16(binary.operator_token)?;
    Some((binary.left, op, binary.right))
}

/// The operand of a prefix `op` expression, parentheses skipped.
pub(crate) fn prefix_operand(ctx: &MatchContext<'_>, node: NodeIndex, op: SyntaxKind) -> Option<NodeIndex> {
    if !ctx.is_kind(node, syntax_kind_ext::PREFIX_UNARY_EXPRESSION) {
        return None;
    }
    let unary = ctx.arena.get_unary_expr_at(node)?;
    (unary.operator == op as u16).then(|| ctx.arena.skip_parenthesized(unary.operand))
}

/// True if `node`, looking past parentheses, is the operand of `!`.
pub(crate) fn is_negated(ctx: &MatchContext<'_>, node: NodeIndex) -> bool {
    let (parent, _) = ctx.arena.parent_skipping_parens(node);
    prefix_operand(ctx, parent, SyntaxKind::ExclamationToken).is_some()
}

/// Verbatim argument list, or empty text for no arguments.
pub(crate) fn arguments_capture(args: &[NodeIndex]) -> Capture {
    match args {
        [] => Capture::Text(String::new()),
        [first, .., last] => Capture::Range(*first, *last),
        [only] => Capture::Range(*only, *only),
    }
}

/// A primitive literal, including signed numbers such as `-1`.
pub(crate) fn is_literal_value(ctx: &MatchContext<'_>, node: NodeIndex) -> bool {
    let node = ctx.arena.skip_parenthesized(node);
    ctx.kind(node).is_some_and(is_primitive_literal_kind) || ctx.arena.signed_numeric_value(node).is_some()
}

/// The global `NaN` or `Number.NaN`.
pub(crate) fn is_nan(ctx: &MatchContext<'_>, node: NodeIndex) -> bool {
    ctx.is_global(node, "NaN") || ctx.is_global_member(node, "Number", "NaN")
}

/// True if `name` refers to the global binding at `site`.
pub(crate) fn global_in_scope(ctx: &MatchContext<'_>, site: NodeIndex, name: &str) -> bool {
    ctx.binder.is_global_reference(ctx.arena, site, name)
}

/// True for a regular expression literal token.
pub(crate) fn is_regex_literal(ctx: &MatchContext<'_>, node: NodeIndex) -> bool {
    ctx.is_kind(ctx.arena.skip_parenthesized(node), SyntaxKind::RegularExpressionLiteral as u16)
}

#[cfg(test)]
#[path = "../../tests/idioms_tests.rs"]
mod tests;
