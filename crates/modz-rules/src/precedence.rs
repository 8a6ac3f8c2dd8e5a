//! Expression precedence, for deciding where spliced text needs parentheses.

use modz_parser::node::NodeArena;
use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

/// Binding strength of an expression form, loosest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Comma,
    /// Assignment, arrow functions, `yield`.
    Assignment,
    Conditional,
    /// `??`; may not be mixed with `||` or `&&` without parentheses.
    Coalesce,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    /// Relational operators, `in`, `instanceof`, `as`, `satisfies`.
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Exponent,
    Unary,
    Update,
    /// Calls and tagged templates. Valid as a receiver or a callee, but not
    /// as the callee of `new`.
    Call,
    /// Member access and `new` with arguments.
    Member,
    Primary,
}

impl Precedence {
    fn is_short_circuit(self) -> bool {
        matches!(self, Precedence::LogicalOr | Precedence::LogicalAnd)
    }

    /// True if an expression of this precedence cannot appear unparenthesized
    /// as an operand of a binary operator of precedence `op`.
    fn conflicts_as_operand_of(self, op: Precedence) -> bool {
        self <= op
            || (op == Precedence::Coalesce && self.is_short_circuit())
            || (self == Precedence::Coalesce && op.is_short_circuit())
    }
}

pub fn binary_operator_precedence(op: u16) -> Precedence {
    let Some(kind) = SyntaxKind::from_u16(op) else {
        return Precedence::Comma;
    };
    match kind {
        SyntaxKind::CommaToken => Precedence::Comma,
        SyntaxKind::QuestionQuestionToken => Precedence::Coalesce,
        SyntaxKind::BarBarToken => Precedence::LogicalOr,
        SyntaxKind::AmpersandAmpersandToken => Precedence::LogicalAnd,
        SyntaxKind::BarToken => Precedence::BitwiseOr,
        SyntaxKind::CaretToken => Precedence::BitwiseXor,
        SyntaxKind::AmpersandToken => Precedence::BitwiseAnd,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => Precedence::Equality,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword => Precedence::Relational,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => Precedence::Shift,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => Precedence::Additive,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            Precedence::Multiplicative
        }
        SyntaxKind::AsteriskAsteriskToken => Precedence::Exponent,
        kind if kind.is_assignment_operator() => Precedence::Assignment,
        _ => Precedence::Comma,
    }
}

/// Precedence of the expression at `node` as written.
pub fn precedence_of(arena: &NodeArena, node: NodeIndex) -> Precedence {
    let Some(n) = arena.get(node) else {
        return Precedence::Primary;
    };
    match n.kind {
        syntax_kind_ext::BINARY_EXPRESSION => arena
            .get_binary_expr(n)
            .map_or(Precedence::Comma, |binary| binary_operator_precedence(binary.operator_token)),
        syntax_kind_ext::CONDITIONAL_EXPRESSION => Precedence::Conditional,
        syntax_kind_ext::ARROW_FUNCTION | syntax_kind_ext::YIELD_EXPRESSION => Precedence::Assignment,
        syntax_kind_ext::AS_EXPRESSION | syntax_kind_ext::SATISFIES_EXPRESSION => Precedence::Relational,
        syntax_kind_ext::PREFIX_UNARY_EXPRESSION
        | syntax_kind_ext::DELETE_EXPRESSION
        | syntax_kind_ext::TYPE_OF_EXPRESSION
        | syntax_kind_ext::VOID_EXPRESSION
        | syntax_kind_ext::AWAIT_EXPRESSION => Precedence::Unary,
        syntax_kind_ext::POSTFIX_UNARY_EXPRESSION => Precedence::Update,
        syntax_kind_ext::CALL_EXPRESSION | syntax_kind_ext::TAGGED_TEMPLATE_EXPRESSION => Precedence::Call,
        syntax_kind_ext::NEW_EXPRESSION
        | syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION
        | syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION
        | syntax_kind_ext::NON_NULL_EXPRESSION => Precedence::Member,
        _ => Precedence::Primary,
    }
}

/// True if `node`, written with precedence `inner`, must be parenthesized
/// to keep its meaning in the position `min` describes.
pub fn operand_needs_parens(arena: &NodeArena, node: NodeIndex, min: Precedence) -> bool {
    let inner = precedence_of(arena, node);
    if min == Precedence::Coalesce {
        return inner.conflicts_as_operand_of(Precedence::Conditional) || inner.is_short_circuit();
    }
    inner < min
}

/// True if text of precedence `replacement` must be parenthesized when it
/// replaces `node` in its current parent.
pub fn replacement_needs_parens(arena: &NodeArena, node: NodeIndex, replacement: Precedence) -> bool {
    let parent = arena.parent(node);
    let Some(p) = arena.get(parent) else {
        return false;
    };
    match p.kind {
        syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION | syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION => arena
            .get_access_expr(p)
            .is_some_and(|access| access.expression == node && replacement < Precedence::Call),
        syntax_kind_ext::CALL_EXPRESSION => arena
            .get_call_expr(p)
            .is_some_and(|call| call.expression == node && replacement < Precedence::Call),
        syntax_kind_ext::NEW_EXPRESSION => arena
            .get_call_expr(p)
            .is_some_and(|call| call.expression == node && replacement < Precedence::Member),
        syntax_kind_ext::TAGGED_TEMPLATE_EXPRESSION | syntax_kind_ext::NON_NULL_EXPRESSION => {
            replacement < Precedence::Call
        }
        syntax_kind_ext::PREFIX_UNARY_EXPRESSION
        | syntax_kind_ext::DELETE_EXPRESSION
        | syntax_kind_ext::TYPE_OF_EXPRESSION
        | syntax_kind_ext::VOID_EXPRESSION
        | syntax_kind_ext::AWAIT_EXPRESSION => replacement <= Precedence::Exponent,
        syntax_kind_ext::POSTFIX_UNARY_EXPRESSION => replacement < Precedence::Call,
        syntax_kind_ext::BINARY_EXPRESSION => arena.get_binary_expr(p).is_some_and(|binary| {
            let op = binary_operator_precedence(binary.operator_token);
            if op == Precedence::Assignment {
                binary.left == node || replacement < Precedence::Assignment
            } else {
                replacement.conflicts_as_operand_of(op)
            }
        }),
        syntax_kind_ext::CONDITIONAL_EXPRESSION => arena
            .get_conditional_expr(p)
            .is_some_and(|cond| cond.condition == node && replacement <= Precedence::Conditional),
        syntax_kind_ext::AS_EXPRESSION | syntax_kind_ext::SATISFIES_EXPRESSION => {
            replacement <= Precedence::Relational
        }
        syntax_kind_ext::SPREAD_ELEMENT | syntax_kind_ext::SPREAD_ASSIGNMENT => {
            replacement < Precedence::Assignment
        }
        _ => false,
    }
}

/// True if `node` is the leftmost part of an expression statement or of a
/// concise arrow body, where a leading `{` would start a block.
pub fn starts_statement_or_arrow_body(arena: &NodeArena, node: NodeIndex) -> bool {
    let mut current = node;
    loop {
        let parent = arena.parent(current);
        let Some(p) = arena.get(parent) else {
            return false;
        };
        let leftmost = match p.kind {
            syntax_kind_ext::EXPRESSION_STATEMENT => return true,
            syntax_kind_ext::ARROW_FUNCTION => {
                return arena.get_function(p).is_some_and(|func| func.body == current);
            }
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION | syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION => {
                arena.get_access_expr(p).is_some_and(|access| access.expression == current)
            }
            syntax_kind_ext::CALL_EXPRESSION => arena.get_call_expr(p).is_some_and(|call| call.expression == current),
            syntax_kind_ext::BINARY_EXPRESSION => arena.get_binary_expr(p).is_some_and(|binary| binary.left == current),
            syntax_kind_ext::CONDITIONAL_EXPRESSION => arena
                .get_conditional_expr(p)
                .is_some_and(|cond| cond.condition == current),
            syntax_kind_ext::TAGGED_TEMPLATE_EXPRESSION => arena
                .get_tagged_template(p)
                .is_some_and(|tagged| tagged.tag == current),
            syntax_kind_ext::POSTFIX_UNARY_EXPRESSION
            | syntax_kind_ext::NON_NULL_EXPRESSION
            | syntax_kind_ext::AS_EXPRESSION
            | syntax_kind_ext::SATISFIES_EXPRESSION => true,
            _ => false,
        };
        if !leftmost {
            return false;
        }
        current = parent;
    }
}

#[cfg(test)]
#[path = "../tests/precedence_tests.rs"]
mod tests;
