use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use crate::context::MatchContext;
use crate::idiom::{FixMode, Idiom, IdiomMeta, Match};
use crate::precedence::Precedence;

/// `setTimeout(() => f(a), d)` and `setTimeout(f.bind(null, a), d)` →
/// `setTimeout(f, d, a)`.
pub struct PreferTimerArgs;

static META: IdiomMeta = IdiomMeta {
    id: "prefer-timer-args",
    description: "Pass callback arguments to timers directly instead of wrapping the callback",
    kinds: &[syntax_kind_ext::CALL_EXPRESSION],
    messages: &[("preferTimerArgs", "Pass `{callback}` and its arguments to `{timer}` directly.")],
    fix: FixMode::Autofix,
    requires_types: false,
};

const TIMERS: &[&str] = &["setTimeout", "setInterval"];

impl Idiom for PreferTimerArgs {
    fn meta(&self) -> &'static IdiomMeta {
        &META
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        let arena = ctx.arena;
        if !ctx.is_kind(node, syntax_kind_ext::CALL_EXPRESSION) || arena.is_optional_chain(node) {
            return None;
        }
        let timer = arena.get_call_expr_at(node)?.expression;
        let (name, _) = ctx.global_reference(timer)?;
        if !TIMERS.contains(&name) {
            return None;
        }
        let [wrapper, delay] = ctx.plain_arguments(node)? else {
            return None;
        };
        let (callback, args) = arrow_call(ctx, *wrapper).or_else(|| bound_call(ctx, *wrapper))?;

        let mut rest = String::new();
        for &arg in args {
            rest.push_str(", ");
            rest.push_str(ctx.text_of(arg));
        }
        Some(
            Match::new(node, "preferTimerArgs")
                .node_capture("timer", timer)
                .node_capture("callback", callback)
                .node_capture("delay", *delay)
                .text("args", rest)
                .with_template("{timer}({callback}, {delay}{args})", Precedence::Call),
        )
    }
}

/// `() => f(a, b)` where `f` and every argument keep their value until the
/// timer fires.
fn arrow_call<'a>(ctx: &MatchContext<'a>, wrapper: NodeIndex) -> Option<(NodeIndex, &'a [NodeIndex])> {
    let arena = ctx.arena;
    let wrapper = arena.skip_parenthesized(wrapper);
    if !ctx.is_kind(wrapper, syntax_kind_ext::ARROW_FUNCTION) {
        return None;
    }
    let arrow = arena.get_function_at(wrapper)?;
    if arrow.is_async || !arrow.parameters.nodes.is_empty() || arena.get_block_at(arrow.body).is_some() {
        return None;
    }
    let call = arena.skip_parenthesized(arrow.body);
    if !ctx.is_kind(call, syntax_kind_ext::CALL_EXPRESSION) || arena.is_optional_chain(call) {
        return None;
    }
    let callee = arena.get_call_expr_at(call)?.expression;
    if !ctx.is_kind(callee, SyntaxKind::Identifier as u16) || !ctx.safety.is_stable_value(callee) {
        return None;
    }
    let args = ctx.plain_arguments(call)?;
    args.iter()
        .all(|&arg| ctx.safety.is_stable_value(arg))
        .then_some((callee, args))
}

/// `f.bind(null, a, b)` with pure operands.
fn bound_call<'a>(ctx: &MatchContext<'a>, wrapper: NodeIndex) -> Option<(NodeIndex, &'a [NodeIndex])> {
    let wrapper = ctx.arena.skip_parenthesized(wrapper);
    let (callee, method) = ctx.method_call(wrapper)?;
    if method != "bind" {
        return None;
    }
    let [this_arg, args @ ..] = ctx.plain_arguments(wrapper)? else {
        return None;
    };
    if !ctx.safety.nullish_kind(*this_arg).is_nullish()
        || !ctx.safety.is_pure_to_repeat(callee)
        || !args.iter().all(|&arg| ctx.safety.is_pure_to_repeat(arg))
    {
        return None;
    }
    Some((callee, args))
}
