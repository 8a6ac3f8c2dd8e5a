use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use super::global_in_scope;
use crate::context::MatchContext;
use crate::idiom::{FixMode, Idiom, IdiomMeta, Match};
use crate::precedence::Precedence;

/// `[...it].map(fn)` → `Array.from(it, fn)`, skipping the intermediate array.
pub struct PreferArrayFromMap;

static META: IdiomMeta = IdiomMeta {
    id: "prefer-array-from-map",
    description: "Prefer `Array.from(iterable, mapper)` over spreading and then mapping",
    kinds: &[syntax_kind_ext::CALL_EXPRESSION],
    messages: &[(
        "preferArrayFrom",
        "Use `Array.from({iterable}, ...)` to map while copying instead of `[...{iterable}].map(...)`.",
    )],
    fix: FixMode::Autofix,
    requires_types: false,
};

/// `map` passes `(element, index, array)`; `Array.from` passes only the
/// first two, so a mapper may declare at most two.
const MAX_MAPPER_PARAMETERS: usize = 2;

impl Idiom for PreferArrayFromMap {
    fn meta(&self) -> &'static IdiomMeta {
        &META
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        let arena = ctx.arena;
        let (receiver, method) = ctx.method_call(node)?;
        if method != "map" {
            return None;
        }
        let [mapper] = ctx.plain_arguments(node)? else {
            return None;
        };
        if !is_plain_mapper(ctx, *mapper) {
            return None;
        }

        let receiver = arena.skip_parenthesized(receiver);
        if !ctx.is_kind(receiver, syntax_kind_ext::ARRAY_LITERAL_EXPRESSION) {
            return None;
        }
        let [spread] = arena.get_literal_expr_at(receiver)?.elements.nodes.as_slice() else {
            return None;
        };
        if !ctx.is_kind(*spread, syntax_kind_ext::SPREAD_ELEMENT) {
            return None;
        }
        let iterable = arena.get_unary_expr_ex_at(*spread)?.expression;

        if !global_in_scope(ctx, node, "Array") {
            return None;
        }

        Some(
            Match::new(node, "preferArrayFrom")
                .node_capture("iterable", iterable)
                .node_capture("mapper", *mapper)
                .with_template("Array.from({iterable}, {mapper})", Precedence::Call),
        )
    }
}

/// A function or arrow with at most two parameters, none of them rest,
/// defaulted or destructured.
fn is_plain_mapper(ctx: &MatchContext<'_>, node: NodeIndex) -> bool {
    let arena = ctx.arena;
    let node = arena.skip_parenthesized(node);
    if !ctx.is_kind(node, syntax_kind_ext::ARROW_FUNCTION) && !ctx.is_kind(node, syntax_kind_ext::FUNCTION_EXPRESSION) {
        return false;
    }
    let Some(function) = arena.get_function_at(node) else {
        return false;
    };
    let parameters = &function.parameters.nodes;
    parameters.len() <= MAX_MAPPER_PARAMETERS
        && parameters.iter().all(|&parameter| {
            arena.get_parameter_at(parameter).is_some_and(|data| {
                !data.dot_dot_dot_token
                    && data.initializer.is_none()
                    && arena.is_kind(data.name, SyntaxKind::Identifier as u16)
            })
        })
}
