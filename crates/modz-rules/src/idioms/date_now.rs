use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use super::prefix_operand;
use crate::context::MatchContext;
use crate::idiom::{FixMode, Idiom, IdiomMeta, Match};
use crate::precedence::Precedence;

/// `new Date().getTime()` and `+new Date()` → `Date.now()`.
pub struct PreferDateNow;

static META: IdiomMeta = IdiomMeta {
    id: "prefer-date-now",
    description: "Prefer `Date.now()` for the current timestamp",
    kinds: &[syntax_kind_ext::CALL_EXPRESSION, syntax_kind_ext::PREFIX_UNARY_EXPRESSION],
    messages: &[("preferDateNow", "Use `Date.now()` instead of creating a `Date` to read the current time.")],
    fix: FixMode::Autofix,
    requires_types: false,
};

impl Idiom for PreferDateNow {
    fn meta(&self) -> &'static IdiomMeta {
        &META
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        let constructed = match prefix_operand(ctx, node, SyntaxKind::PlusToken) {
            Some(operand) => operand,
            None => match ctx.method_call(node)? {
                (receiver, "getTime") if ctx.arena.call_arguments(node).is_empty() => receiver,
                _ => return None,
            },
        };
        let prefix = current_date_prefix(ctx, constructed)?;
        Some(
            Match::new(node, "preferDateNow")
                .text("prefix", prefix)
                .with_template("{prefix}Date.now()", Precedence::Call),
        )
    }
}

/// For `new Date()` with no arguments on the global `Date`, the
/// `window.`/`globalThis.` prefix it was written with.
fn current_date_prefix<'a>(ctx: &MatchContext<'a>, node: NodeIndex) -> Option<&'a str> {
    let node = ctx.arena.skip_parenthesized(node);
    if !ctx.is_kind(node, syntax_kind_ext::NEW_EXPRESSION) || !ctx.arena.call_arguments(node).is_empty() {
        return None;
    }
    let callee = ctx.arena.get_call_expr_at(node)?.expression;
    match ctx.global_reference(callee)? {
        ("Date", prefix) => Some(prefix),
        _ => None,
    }
}
