use modz_checker::Capability;
use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use super::binary_parts;
use crate::context::MatchContext;
use crate::idiom::{FixMode, Idiom, IdiomMeta, Match};
use crate::precedence::Precedence;

/// `list[list.length - 1]` → `list.at(-1)`.
pub struct PreferArrayAt;

static META: IdiomMeta = IdiomMeta {
    id: "prefer-array-at",
    description: "Prefer `.at(-1)` for reading the last element",
    kinds: &[syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION],
    messages: &[("preferAt", "Use `{array}.at(-1)` instead of indexing with `{array}.length - 1`.")],
    fix: FixMode::Autofix,
    requires_types: false,
};

impl Idiom for PreferArrayAt {
    fn meta(&self) -> &'static IdiomMeta {
        &META
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        let arena = ctx.arena;
        if arena.is_optional_chain(node) {
            return None;
        }
        let access = arena.get_access_expr_at(node)?;
        let object = access.expression;

        let (left, op, right) = binary_parts(ctx, arena.skip_parenthesized(access.name_or_argument))?;
        if op != SyntaxKind::MinusToken || arena.numeric_literal_value(right) != Some(1.0) {
            return None;
        }
        let length = arena.skip_parenthesized(left);
        if arena.property_access_name(length) != Some("length") || arena.is_optional_chain(length) {
            return None;
        }
        let length_of = arena.get_access_expr_at(length)?.expression;
        if !ctx.same_text(length_of, object) {
            return None;
        }

        if ctx.safety.is_write_target(node)
            || !ctx.safety.is_pure_to_repeat(object)
            || !ctx.holds(object, Capability::Indexable)
        {
            return None;
        }

        Some(
            Match::new(node, "preferAt")
                .node_capture("array", object)
                .with_template("{array}.at(-1)", Precedence::Call),
        )
    }
}
