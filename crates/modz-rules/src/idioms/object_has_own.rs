use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use super::global_in_scope;
use crate::context::MatchContext;
use crate::idiom::{FixMode, Idiom, IdiomMeta, Match};
use crate::precedence::Precedence;

/// `hasOwnProperty` checks → `Object.hasOwn(o, p)`.
pub struct PreferObjectHasOwn;

static META: IdiomMeta = IdiomMeta {
    id: "prefer-object-has-own",
    description: "Prefer `Object.hasOwn()` over `hasOwnProperty`",
    kinds: &[syntax_kind_ext::CALL_EXPRESSION],
    messages: &[("preferHasOwn", "Use `Object.hasOwn({object}, {key})` instead of `hasOwnProperty`.")],
    fix: FixMode::Autofix,
    requires_types: false,
};

impl Idiom for PreferObjectHasOwn {
    fn meta(&self) -> &'static IdiomMeta {
        &META
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        let (receiver, method) = ctx.method_call(node)?;
        let args = ctx.plain_arguments(node)?;
        let (object, key) = match (method, args) {
            ("call", [object, key]) if is_prototype_has_own(ctx, receiver) => (*object, *key),
            ("hasOwnProperty", [key]) => {
                if ctx.is_kind(ctx.arena.skip_parenthesized(receiver), SyntaxKind::SuperKeyword as u16) {
                    return None;
                }
                (receiver, *key)
            }
            _ => return None,
        };
        if !global_in_scope(ctx, node, "Object") {
            return None;
        }
        Some(
            Match::new(node, "preferHasOwn")
                .operand("object", object, Precedence::Assignment)
                .node_capture("key", key)
                .with_template("Object.hasOwn({object}, {key})", Precedence::Call),
        )
    }
}

/// `Object.prototype.hasOwnProperty` on the global `Object`.
fn is_prototype_has_own(ctx: &MatchContext<'_>, node: NodeIndex) -> bool {
    let arena = ctx.arena;
    let node = arena.skip_parenthesized(node);
    if arena.property_access_name(node) != Some("hasOwnProperty") || arena.is_optional_chain(node) {
        return false;
    }
    arena
        .get_access_expr_at(node)
        .is_some_and(|access| ctx.is_global_member(access.expression, "Object", "prototype"))
}
