use modz_checker::Capability;
use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use crate::context::MatchContext;
use crate::idiom::{FixMode, Idiom, IdiomMeta, Match};
use crate::precedence::Precedence;

/// `s.match(re)` and `re.exec(s)` tested for truthiness → `re.test(s)`.
pub struct PreferRegexTest;

static META: IdiomMeta = IdiomMeta {
    id: "prefer-regex-test",
    description: "Prefer `RegExp#test()` when only the presence of a match is checked",
    kinds: &[syntax_kind_ext::CALL_EXPRESSION],
    messages: &[("preferTest", "Use `.test()` when only checking whether the pattern matches.")],
    fix: FixMode::Autofix,
    requires_types: false,
};

impl Idiom for PreferRegexTest {
    fn meta(&self) -> &'static IdiomMeta {
        &META
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        let (receiver, method) = ctx.method_call(node)?;
        let [argument] = ctx.plain_arguments(node)? else {
            return None;
        };
        let (regex, subject) = match method {
            "match" => {
                // A global or sticky `match` ignores and resets `lastIndex`;
                // `test` honors it.
                let flags = visible_flags(ctx, *argument, 0)?;
                if flags.contains('g') || flags.contains('y') {
                    return None;
                }
                (*argument, receiver)
            }
            "exec" if is_regex(ctx, receiver, 0) => (receiver, *argument),
            _ => return None,
        };
        if !ctx.safety.is_in_boolean_context(node)
            || !ctx.safety.is_pure_to_repeat(regex)
            || !ctx.safety.is_pure_to_repeat(subject)
        {
            return None;
        }
        Some(
            Match::new(node, "preferTest")
                .operand("regex", regex, Precedence::Call)
                .node_capture("subject", subject)
                .with_template("{regex}.test({subject})", Precedence::Call),
        )
    }
}

/// How far identifier initializers are followed.
const MAX_INITIALIZER_HOPS: usize = 1;

/// A regex literal, `new RegExp(...)`, an identifier initialized with one,
/// or a value the type service confirms is a `RegExp`.
fn is_regex(ctx: &MatchContext<'_>, node: NodeIndex, hops: usize) -> bool {
    let node = ctx.arena.skip_parenthesized(node);
    if ctx.is_kind(node, SyntaxKind::RegularExpressionLiteral as u16) || is_regexp_construction(ctx, node) {
        return true;
    }
    if hops < MAX_INITIALIZER_HOPS
        && let Some(init) = ctx.binder.resolve_single_initializer(ctx.arena, node)
        && is_regex(ctx, init, hops + 1)
    {
        return true;
    }
    ctx.holds(node, Capability::RegExp)
}

fn is_regexp_construction(ctx: &MatchContext<'_>, node: NodeIndex) -> bool {
    ctx.is_kind(node, syntax_kind_ext::NEW_EXPRESSION)
        && ctx
            .arena
            .get_call_expr_at(node)
            .is_some_and(|call| ctx.is_global(call.expression, "RegExp"))
}

/// The flags of a regular expression whose flags are written out in the
/// source. `None` if `node` is not such a regex.
fn visible_flags<'a>(ctx: &MatchContext<'a>, node: NodeIndex, hops: usize) -> Option<&'a str> {
    let arena = ctx.arena;
    let node = arena.skip_parenthesized(node);
    if ctx.is_kind(node, SyntaxKind::RegularExpressionLiteral as u16) {
        let raw = ctx.text_of(node);
        return raw.rfind('/').map(|slash| &raw[slash + 1..]);
    }
    if is_regexp_construction(ctx, node) {
        return match ctx.plain_arguments(node)? {
            [_] => Some(""),
            [_, flags] => arena.string_literal_value(*flags),
            _ => None,
        };
    }
    if hops < MAX_INITIALIZER_HOPS {
        let init = ctx.binder.resolve_single_initializer(arena, node)?;
        return visible_flags(ctx, init, hops + 1);
    }
    None
}
