//! Semantic safety oracle.
//!
//! Structural predicates that decide whether a rewrite may duplicate,
//! hoist or re-evaluate an expression. Each predicate recognizes a closed
//! set of shapes and answers `false` for everything else.

use modz_binder::BinderState;
use modz_parser::node::NodeArena;
use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

/// Deepest expression nesting the recursive predicates look into. Deeper
/// expressions are answered conservatively (`false`).
const MAX_EXPR_CHECK_DEPTH: u32 = 500;

/// The spelling of a nullish value: `null`, or `undefined` / `void 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NullishKind {
    None,
    Null,
    Undefined,
}

impl NullishKind {
    #[inline]
    pub fn is_nullish(self) -> bool {
        self != NullishKind::None
    }
}

/// Shape queries over one bound file.
#[derive(Clone, Copy)]
pub struct SafetyOracle<'a> {
    arena: &'a NodeArena,
    binder: &'a BinderState,
}

impl<'a> SafetyOracle<'a> {
    pub fn new(arena: &'a NodeArena, binder: &'a BinderState) -> SafetyOracle<'a> {
        SafetyOracle { arena, binder }
    }

    pub fn arena(&self) -> &'a NodeArena {
        self.arena
    }

    pub fn binder(&self) -> &'a BinderState {
        self.binder
    }

    // =========================================================================
    // Purity
    // =========================================================================

    /// True if evaluating `node` twice has the same observable effect as
    /// evaluating it once.
    ///
    /// Calls, `new`, tagged templates, updates, assignments, `delete`,
    /// `await`, `yield`, spreads and function values are never pure.
    pub fn is_pure_to_repeat(&self, node: NodeIndex) -> bool {
        self.pure_at(node, 0)
    }

    fn pure_at(&self, node: NodeIndex, depth: u32) -> bool {
        if depth >= MAX_EXPR_CHECK_DEPTH {
            return false;
        }
        let arena = self.arena;
        let Some(n) = arena.get(node) else {
            return false;
        };
        match n.kind {
            k if is_leaf_value_kind(k) => true,
            k if k == SyntaxKind::RegularExpressionLiteral as u16 => true,
            syntax_kind_ext::PARENTHESIZED_EXPRESSION
            | syntax_kind_ext::NON_NULL_EXPRESSION
            | syntax_kind_ext::AS_EXPRESSION
            | syntax_kind_ext::SATISFIES_EXPRESSION
            | syntax_kind_ext::TYPE_OF_EXPRESSION
            | syntax_kind_ext::VOID_EXPRESSION => self.pure_at(wrapped_expression(arena, node), depth + 1),
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION => arena
                .get_access_expr(n)
                .is_some_and(|access| self.pure_at(access.expression, depth + 1)),
            syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION => arena.get_access_expr(n).is_some_and(|access| {
                self.pure_at(access.expression, depth + 1)
                    && self.pure_at(access.name_or_argument, depth + 1)
            }),
            syntax_kind_ext::PREFIX_UNARY_EXPRESSION => arena.get_unary_expr(n).is_some_and(|unary| {
                !is_update_operator(unary.operator) && self.pure_at(unary.operand, depth + 1)
            }),
            syntax_kind_ext::BINARY_EXPRESSION => arena.get_binary_expr(n).is_some_and(|binary| {
                !is_assignment_operator(binary.operator_token)
                    && self.pure_at(binary.left, depth + 1)
                    && self.pure_at(binary.right, depth + 1)
            }),
            syntax_kind_ext::CONDITIONAL_EXPRESSION => arena.get_conditional_expr(n).is_some_and(|cond| {
                self.pure_at(cond.condition, depth + 1)
                    && self.pure_at(cond.when_true, depth + 1)
                    && self.pure_at(cond.when_false, depth + 1)
            }),
            syntax_kind_ext::TEMPLATE_EXPRESSION => {
                self.template_spans_all(node, |expr| self.pure_at(expr, depth + 1))
            }
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION => arena.get_literal_expr(n).is_some_and(|lit| {
                lit.elements.nodes.iter().all(|&el| {
                    arena.is_kind(el, syntax_kind_ext::OMITTED_EXPRESSION) || self.pure_at(el, depth + 1)
                })
            }),
            syntax_kind_ext::OBJECT_LITERAL_EXPRESSION => arena.get_literal_expr(n).is_some_and(|lit| {
                lit.elements
                    .nodes
                    .iter()
                    .all(|&prop| self.is_pure_property(prop, depth + 1))
            }),
            _ => false,
        }
    }

    fn is_pure_property(&self, prop: NodeIndex, depth: u32) -> bool {
        let arena = self.arena;
        let Some(n) = arena.get(prop) else {
            return false;
        };
        match n.kind {
            syntax_kind_ext::PROPERTY_ASSIGNMENT => arena.get_property_assignment(n).is_some_and(|assign| {
                self.is_pure_property_name(assign.name, depth) && self.pure_at(assign.initializer, depth + 1)
            }),
            syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT => arena
                .get_shorthand_property(n)
                .is_some_and(|short| short.object_assignment_initializer.is_none()),
            _ => false,
        }
    }

    fn is_pure_property_name(&self, name: NodeIndex, depth: u32) -> bool {
        match self.arena.get_computed_property_at(name) {
            Some(computed) => self.pure_at(computed.expression, depth + 1),
            None => true,
        }
    }

    // =========================================================================
    // Constant values
    // =========================================================================

    /// True if `node` yields an equal, non-fresh value every time it is
    /// evaluated, so a callback returning it can be replaced by the value.
    ///
    /// Stricter than purity: anything that allocates (array and object
    /// literals, regex literals, functions, classes) or calls is rejected.
    pub fn is_constant_expression(&self, node: NodeIndex) -> bool {
        self.constant_at(node, 0)
    }

    fn constant_at(&self, node: NodeIndex, depth: u32) -> bool {
        if depth >= MAX_EXPR_CHECK_DEPTH {
            return false;
        }
        let arena = self.arena;
        let Some(n) = arena.get(node) else {
            return false;
        };
        match n.kind {
            k if is_leaf_value_kind(k) => true,
            syntax_kind_ext::PARENTHESIZED_EXPRESSION
            | syntax_kind_ext::NON_NULL_EXPRESSION
            | syntax_kind_ext::AS_EXPRESSION
            | syntax_kind_ext::SATISFIES_EXPRESSION
            | syntax_kind_ext::TYPE_OF_EXPRESSION
            | syntax_kind_ext::VOID_EXPRESSION => self.constant_at(wrapped_expression(arena, node), depth + 1),
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION => arena
                .get_access_expr(n)
                .is_some_and(|access| self.constant_at(access.expression, depth + 1)),
            syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION => arena.get_access_expr(n).is_some_and(|access| {
                self.constant_at(access.expression, depth + 1)
                    && self.constant_at(access.name_or_argument, depth + 1)
            }),
            syntax_kind_ext::PREFIX_UNARY_EXPRESSION => arena.get_unary_expr(n).is_some_and(|unary| {
                !is_update_operator(unary.operator) && self.constant_at(unary.operand, depth + 1)
            }),
            syntax_kind_ext::BINARY_EXPRESSION => arena.get_binary_expr(n).is_some_and(|binary| {
                !is_assignment_operator(binary.operator_token)
                    && self.constant_at(binary.left, depth + 1)
                    && self.constant_at(binary.right, depth + 1)
            }),
            syntax_kind_ext::CONDITIONAL_EXPRESSION => arena.get_conditional_expr(n).is_some_and(|cond| {
                self.constant_at(cond.condition, depth + 1)
                    && self.constant_at(cond.when_true, depth + 1)
                    && self.constant_at(cond.when_false, depth + 1)
            }),
            syntax_kind_ext::TEMPLATE_EXPRESSION => {
                self.template_spans_all(node, |expr| self.constant_at(expr, depth + 1))
            }
            _ => false,
        }
    }

    fn template_spans_all(&self, node: NodeIndex, pred: impl Fn(NodeIndex) -> bool) -> bool {
        let arena = self.arena;
        arena.get_template_expr_at(node).is_some_and(|template| {
            template.template_spans.nodes.iter().all(|&span| {
                arena
                    .get_template_span_at(span)
                    .is_some_and(|data| pred(data.expression))
            })
        })
    }

    // =========================================================================
    // Nullish spellings
    // =========================================================================

    /// Classify `null`, `undefined` and `void 0`.
    ///
    /// `undefined` only counts when it is the global binding.
    pub fn nullish_kind(&self, node: NodeIndex) -> NullishKind {
        let arena = self.arena;
        let node = arena.skip_parenthesized(node);
        let Some(n) = arena.get(node) else {
            return NullishKind::None;
        };
        match n.kind {
            k if k == SyntaxKind::NullKeyword as u16 => NullishKind::Null,
            k if k == SyntaxKind::Identifier as u16 => {
                if arena.is_identifier_named(node, "undefined")
                    && self.binder.is_global_reference(arena, node, "undefined")
                {
                    NullishKind::Undefined
                } else {
                    NullishKind::None
                }
            }
            syntax_kind_ext::VOID_EXPRESSION => {
                let operand = wrapped_expression(arena, node);
                if arena.numeric_literal_value(operand) == Some(0.0) {
                    NullishKind::Undefined
                } else {
                    NullishKind::None
                }
            }
            _ => NullishKind::None,
        }
    }

    // =========================================================================
    // Use-site context
    // =========================================================================

    /// True if only the truthiness of `node`'s value is observed.
    ///
    /// Holds for the test of `if`/`while`/`do`/`for` and of a ternary, for
    /// the operand of `!`, and for an operand of `&&`/`||` whose own result
    /// is in boolean context.
    pub fn is_in_boolean_context(&self, node: NodeIndex) -> bool {
        let arena = self.arena;
        let mut current = node;
        loop {
            let (parent, child) = arena.parent_skipping_parens(current);
            let Some(p) = arena.get(parent) else {
                return false;
            };
            match p.kind {
                syntax_kind_ext::IF_STATEMENT => {
                    return arena.get_if_statement(p).is_some_and(|stmt| stmt.expression == child);
                }
                syntax_kind_ext::WHILE_STATEMENT
                | syntax_kind_ext::DO_STATEMENT
                | syntax_kind_ext::FOR_STATEMENT => {
                    return arena.get_loop(p).is_some_and(|stmt| stmt.condition == child);
                }
                syntax_kind_ext::CONDITIONAL_EXPRESSION => {
                    return arena.get_conditional_expr(p).is_some_and(|cond| cond.condition == child);
                }
                syntax_kind_ext::PREFIX_UNARY_EXPRESSION => {
                    return arena
                        .get_unary_expr(p)
                        .is_some_and(|unary| unary.operator == SyntaxKind::ExclamationToken as u16);
                }
                syntax_kind_ext::BINARY_EXPRESSION => {
                    let short_circuit = arena.get_binary_expr(p).is_some_and(|binary| {
                        binary.operator_token == SyntaxKind::AmpersandAmpersandToken as u16
                            || binary.operator_token == SyntaxKind::BarBarToken as u16
                    });
                    if !short_circuit {
                        return false;
                    }
                    current = parent;
                }
                _ => return false,
            }
        }
    }

    /// True if `node` is written to: an assignment or update target, the
    /// operand of `delete`, a for-in/of head, or a slot inside a
    /// destructuring assignment pattern.
    pub fn is_write_target(&self, node: NodeIndex) -> bool {
        let arena = self.arena;
        let (parent, child) = arena.parent_skipping_parens(node);
        let Some(p) = arena.get(parent) else {
            return false;
        };
        match p.kind {
            syntax_kind_ext::BINARY_EXPRESSION => arena
                .get_binary_expr(p)
                .is_some_and(|binary| is_assignment_operator(binary.operator_token) && binary.left == child),
            syntax_kind_ext::PREFIX_UNARY_EXPRESSION | syntax_kind_ext::POSTFIX_UNARY_EXPRESSION => arena
                .get_unary_expr(p)
                .is_some_and(|unary| is_update_operator(unary.operator)),
            syntax_kind_ext::DELETE_EXPRESSION => true,
            syntax_kind_ext::FOR_IN_STATEMENT | syntax_kind_ext::FOR_OF_STATEMENT => arena
                .get_for_in_of(p)
                .is_some_and(|stmt| stmt.initializer == child),
            syntax_kind_ext::PROPERTY_ASSIGNMENT => {
                arena
                    .get_property_assignment(p)
                    .is_some_and(|assign| assign.initializer == child)
                    && self.is_write_target(parent)
            }
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION
            | syntax_kind_ext::OBJECT_LITERAL_EXPRESSION
            | syntax_kind_ext::SPREAD_ELEMENT
            | syntax_kind_ext::SPREAD_ASSIGNMENT
            | syntax_kind_ext::NON_NULL_EXPRESSION
            | syntax_kind_ext::AS_EXPRESSION
            | syntax_kind_ext::SATISFIES_EXPRESSION => self.is_write_target(parent),
            _ => false,
        }
    }

    // =========================================================================
    // Copies
    // =========================================================================

    /// True for `a.slice()`, `a.slice(0)` and `a.concat()`.
    pub fn is_shallow_copy_call(&self, node: NodeIndex) -> bool {
        self.copy_call_receiver(node).is_some()
    }

    /// The array a shallow copy is taken of: the receiver of a copy call,
    /// or `a` in `[...a]`.
    pub fn shallow_copy_source(&self, node: NodeIndex) -> Option<NodeIndex> {
        let arena = self.arena;
        let node = arena.skip_parenthesized(node);
        if let Some(receiver) = self.copy_call_receiver(node) {
            return Some(receiver);
        }
        let literal = arena
            .get(node)
            .filter(|n| n.kind == syntax_kind_ext::ARRAY_LITERAL_EXPRESSION)
            .and_then(|n| arena.get_literal_expr(n))?;
        match literal.elements.nodes.as_slice() {
            [only] if arena.is_kind(*only, syntax_kind_ext::SPREAD_ELEMENT) => {
                Some(wrapped_expression(arena, *only))
            }
            _ => None,
        }
    }

    fn copy_call_receiver(&self, node: NodeIndex) -> Option<NodeIndex> {
        let arena = self.arena;
        if !arena.is_kind(node, syntax_kind_ext::CALL_EXPRESSION) || arena.is_optional_chain(node) {
            return None;
        }
        let call = arena.get_call_expr_at(node)?;
        let method = arena.property_access_name(call.expression)?;
        let receiver = arena.get_access_expr_at(call.expression)?.expression;
        match (method, arena.call_arguments(node)) {
            ("slice" | "concat", []) => Some(receiver),
            ("slice", [start]) if arena.numeric_literal_value(*start) == Some(0.0) => Some(receiver),
            _ => None,
        }
    }

    // =========================================================================
    // Bindings
    // =========================================================================

    /// True for an identifier `name` that refers to the global binding.
    pub fn is_global_identifier(&self, node: NodeIndex, name: &str) -> bool {
        self.arena.is_identifier_named(node, name)
            && self.binder.is_global_reference(self.arena, node, name)
    }

    /// True if `node` is guaranteed to evaluate to the same value at any
    /// later time: a primitive literal, or an identifier whose local
    /// binding is never reassigned.
    pub fn is_stable_value(&self, node: NodeIndex) -> bool {
        let arena = self.arena;
        let node = arena.skip_parenthesized(node);
        match arena.kind(node) {
            Some(k) if k == SyntaxKind::Identifier as u16 => self.binder.is_never_reassigned(arena, node),
            Some(k) => is_leaf_value_kind(k) && k != SyntaxKind::ThisKeyword as u16,
            None => false,
        }
    }
}

// =============================================================================
// Kind helpers
// =============================================================================

/// Identifiers, `this` and primitive literals.
fn is_leaf_value_kind(kind: u16) -> bool {
    kind == SyntaxKind::Identifier as u16
        || kind == SyntaxKind::ThisKeyword as u16
        || is_primitive_literal_kind(kind)
}

/// Literals that evaluate to a primitive value.
pub fn is_primitive_literal_kind(kind: u16) -> bool {
    kind == SyntaxKind::NumericLiteral as u16
        || kind == SyntaxKind::BigIntLiteral as u16
        || kind == SyntaxKind::StringLiteral as u16
        || kind == SyntaxKind::NoSubstitutionTemplateLiteral as u16
        || kind == SyntaxKind::NullKeyword as u16
        || kind == SyntaxKind::TrueKeyword as u16
        || kind == SyntaxKind::FalseKeyword as u16
}

pub fn is_assignment_operator(op: u16) -> bool {
    SyntaxKind::from_u16(op).is_some_and(SyntaxKind::is_assignment_operator)
}

fn is_update_operator(op: u16) -> bool {
    op == SyntaxKind::PlusPlusToken as u16 || op == SyntaxKind::MinusMinusToken as u16
}

/// The single operand of a wrapper node (parentheses, `!`-assertion, `as`,
/// `typeof`, `void`, spread).
fn wrapped_expression(arena: &NodeArena, node: NodeIndex) -> NodeIndex {
    if let Some(paren) = arena.get_parenthesized_at(node) {
        return paren.expression;
    }
    if let Some(assertion) = arena.get_type_assertion_at(node) {
        return assertion.expression;
    }
    arena
        .get_unary_expr_ex_at(node)
        .map_or(NodeIndex::NONE, |unary| unary.expression)
}

#[cfg(test)]
#[path = "../tests/safety_tests.rs"]
mod tests;
