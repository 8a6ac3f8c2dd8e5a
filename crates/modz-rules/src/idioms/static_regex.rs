use modz_parser::node_access::is_function_like_kind;
use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use crate::context::MatchContext;
use crate::idiom::{FixMode, Idiom, IdiomMeta, Match};

/// Constant regular expressions built inside a function body, once per call.
pub struct PreferStaticRegex;

static META: IdiomMeta = IdiomMeta {
    id: "prefer-static-regex",
    description: "Hoist constant regular expressions out of functions",
    kinds: &[SyntaxKind::RegularExpressionLiteral as u16, syntax_kind_ext::NEW_EXPRESSION],
    messages: &[(
        "preferStaticRegex",
        "Move `{regex}` to module scope so it is not rebuilt on every call.",
    )],
    fix: FixMode::ReportOnly,
    requires_types: false,
};

impl Idiom for PreferStaticRegex {
    fn meta(&self) -> &'static IdiomMeta {
        &META
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        let arena = ctx.arena;
        let flags = if ctx.is_kind(node, syntax_kind_ext::NEW_EXPRESSION) {
            let callee = arena.get_call_expr_at(node)?.expression;
            if !ctx.is_global(callee, "RegExp") {
                return None;
            }
            match ctx.plain_arguments(node)? {
                [pattern] => {
                    arena.string_literal_value(*pattern)?;
                    ""
                }
                [pattern, flags] => {
                    arena.string_literal_value(*pattern)?;
                    arena.string_literal_value(*flags)?
                }
                _ => return None,
            }
        } else {
            let raw = ctx.text_of(node);
            raw.rfind('/').map_or("", |slash| &raw[slash + 1..])
        };
        // A global or sticky regex carries `lastIndex` between uses, so a
        // per-call instance is not equivalent to a shared one.
        if flags.contains('g') || flags.contains('y') {
            return None;
        }
        if arena.find_ancestor(node, |n| is_function_like_kind(n.kind)).is_none() {
            return None;
        }
        Some(Match::new(node, "preferStaticRegex").node_capture("regex", node))
    }
}
