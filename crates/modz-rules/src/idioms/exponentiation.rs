use modz_parser::{NodeIndex, syntax_kind_ext};

use crate::context::MatchContext;
use crate::idiom::{FixMode, Idiom, IdiomMeta, Match};
use crate::precedence::Precedence;

/// `Math.pow(a, b)` → `a ** b`.
pub struct PreferExponentiationOperator;

static META: IdiomMeta = IdiomMeta {
    id: "prefer-exponentiation-operator",
    description: "Prefer the `**` operator over `Math.pow()`",
    kinds: &[syntax_kind_ext::CALL_EXPRESSION],
    messages: &[("preferExponentiation", "Use the `**` operator instead of `Math.pow()`.")],
    fix: FixMode::Autofix,
    requires_types: false,
};

impl Idiom for PreferExponentiationOperator {
    fn meta(&self) -> &'static IdiomMeta {
        &META
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        let call = ctx.arena.get_call_expr_at(node)?;
        if !ctx.is_kind(node, syntax_kind_ext::CALL_EXPRESSION)
            || ctx.arena.is_optional_chain(node)
            || !ctx.is_global_member(call.expression, "Math", "pow")
        {
            return None;
        }
        let [base, exponent] = ctx.plain_arguments(node)? else {
            return None;
        };
        // A unary expression is not allowed as the base of `**`.
        Some(
            Match::new(node, "preferExponentiation")
                .operand("base", *base, Precedence::Update)
                .operand("exponent", *exponent, Precedence::Unary)
                .with_template("{base} ** {exponent}", Precedence::Exponent),
        )
    }
}
