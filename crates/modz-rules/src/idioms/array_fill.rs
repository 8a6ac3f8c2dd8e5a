use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use crate::context::MatchContext;
use crate::idiom::{FixMode, Idiom, IdiomMeta, Match};
use crate::precedence::Precedence;

/// `Array.from({length: n}, () => v)` and `[...Array(n)].map(() => v)`
/// → `.fill(v)`.
pub struct PreferArrayFill;

static META: IdiomMeta = IdiomMeta {
    id: "prefer-array-fill",
    description: "Prefer `.fill()` for arrays of one repeated constant",
    kinds: &[syntax_kind_ext::CALL_EXPRESSION],
    messages: &[("preferFill", "Use `.fill({value})` instead of a callback that returns a constant.")],
    fix: FixMode::Autofix,
    requires_types: false,
};

impl Idiom for PreferArrayFill {
    fn meta(&self) -> &'static IdiomMeta {
        &META
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        if ctx.arena.is_optional_chain(node) {
            return None;
        }
        from_length_object(ctx, node).or_else(|| mapped_spread(ctx, node))
    }
}

/// `Array.from({length: n}, cb)` → `Array.from({length: n}).fill(v)`.
fn from_length_object(ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
    let call = ctx.arena.get_call_expr_at(node)?;
    if !ctx.is_global_member(call.expression, "Array", "from") {
        return None;
    }
    let [source, callback] = ctx.plain_arguments(node)? else {
        return None;
    };
    if !is_length_object(ctx, *source) {
        return None;
    }
    let value = constant_callback_value(ctx, *callback)?;
    Some(
        Match::new(node, "preferFill")
            .node_capture("callee", call.expression)
            .node_capture("source", *source)
            .operand("value", value, Precedence::Assignment)
            .with_template("{callee}({source}).fill({value})", Precedence::Call),
    )
}

/// `[...Array(n)].map(cb)` → `Array(n).fill(v)`.
fn mapped_spread(ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
    let arena = ctx.arena;
    let (receiver, method) = ctx.method_call(node)?;
    if method != "map" {
        return None;
    }
    let [callback] = ctx.plain_arguments(node)? else {
        return None;
    };
    let receiver = arena.skip_parenthesized(receiver);
    if !ctx.is_kind(receiver, syntax_kind_ext::ARRAY_LITERAL_EXPRESSION) {
        return None;
    }
    let literal = arena.get_literal_expr_at(receiver)?;
    let [spread] = literal.elements.nodes.as_slice() else {
        return None;
    };
    let sized = arena
        .get_unary_expr_ex_at(*spread)
        .filter(|_| arena.is_kind(*spread, syntax_kind_ext::SPREAD_ELEMENT))?
        .expression;
    if !is_sized_array(ctx, sized) {
        return None;
    }
    let value = constant_callback_value(ctx, *callback)?;
    Some(
        Match::new(node, "preferFill")
            .operand("source", sized, Precedence::Call)
            .operand("value", value, Precedence::Assignment)
            .with_template("{source}.fill({value})", Precedence::Call),
    )
}

/// `{ length: n }` with no other properties.
fn is_length_object(ctx: &MatchContext<'_>, node: NodeIndex) -> bool {
    let arena = ctx.arena;
    let node = arena.skip_parenthesized(node);
    if !ctx.is_kind(node, syntax_kind_ext::OBJECT_LITERAL_EXPRESSION) {
        return false;
    }
    let Some(literal) = arena.get_literal_expr_at(node) else {
        return false;
    };
    let [property] = literal.elements.nodes.as_slice() else {
        return false;
    };
    if let Some(assignment) = arena.get_property_assignment_at(*property) {
        return arena.is_identifier_named(assignment.name, "length")
            || arena.string_literal_value(assignment.name) == Some("length");
    }
    arena
        .get_shorthand_property_at(*property)
        .is_some_and(|short| short.object_assignment_initializer.is_none() && arena.is_identifier_named(short.name, "length"))
}

/// `Array(n)` or `new Array(n)` on the global `Array`, with one argument.
fn is_sized_array(ctx: &MatchContext<'_>, node: NodeIndex) -> bool {
    let arena = ctx.arena;
    let node = arena.skip_parenthesized(node);
    let Some(call) = arena.get_call_expr_at(node) else {
        return false;
    };
    ctx.is_global(call.expression, "Array") && matches!(ctx.plain_arguments(node), Some([_]))
}

/// The value a parameterless callback always returns, if it is a constant
/// expression that keeps its meaning outside the callback.
fn constant_callback_value(ctx: &MatchContext<'_>, callback: NodeIndex) -> Option<NodeIndex> {
    let arena = ctx.arena;
    let callback = arena.skip_parenthesized(callback);
    let kind = ctx.kind(callback)?;
    if kind != syntax_kind_ext::ARROW_FUNCTION && kind != syntax_kind_ext::FUNCTION_EXPRESSION {
        return None;
    }
    let function = arena.get_function_at(callback)?;
    if function.is_async || function.asterisk_token || !function.parameters.nodes.is_empty() {
        return None;
    }
    // A named function expression can refer to itself by name.
    if kind == syntax_kind_ext::FUNCTION_EXPRESSION && function.name.is_some() {
        return None;
    }

    let value = match arena.get_block_at(function.body) {
        Some(block) => {
            let [statement] = block.statements.nodes.as_slice() else {
                return None;
            };
            if !ctx.is_kind(*statement, syntax_kind_ext::RETURN_STATEMENT) {
                return None;
            }
            arena.get_return_statement_at(*statement)?.expression
        }
        None => function.body,
    };
    if value.is_none() || !ctx.safety.is_constant_expression(value) {
        return None;
    }
    if kind == syntax_kind_ext::FUNCTION_EXPRESSION && uses_function_receiver(ctx, value) {
        return None;
    }
    Some(value)
}

/// True if `this` or `arguments` occurs in `node`.
fn uses_function_receiver(ctx: &MatchContext<'_>, node: NodeIndex) -> bool {
    let arena = ctx.arena;
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if ctx.is_kind(current, SyntaxKind::ThisKeyword as u16) || arena.is_identifier_named(current, "arguments") {
            return true;
        }
        stack.extend(arena.children(current));
    }
    false
}
