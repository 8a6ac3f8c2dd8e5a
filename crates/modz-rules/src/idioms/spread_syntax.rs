use modz_checker::Capability;
use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use crate::context::MatchContext;
use crate::fix::capture_text;
use crate::idiom::{Capture, FixMode, Idiom, IdiomMeta, Match};
use crate::precedence::Precedence;

/// `concat`, `Object.assign` onto a literal, and `apply` → spread syntax.
pub struct PreferSpreadSyntax;

static META: IdiomMeta = IdiomMeta {
    id: "prefer-spread-syntax",
    description: "Prefer spread syntax over `concat`, `Object.assign` and `apply`",
    kinds: &[syntax_kind_ext::CALL_EXPRESSION],
    messages: &[
        ("preferArraySpread", "Use array spread instead of `.concat()`."),
        ("preferObjectSpread", "Use object spread instead of `Object.assign()` onto a literal."),
        ("preferCallSpread", "Use `{callee}(...{args})` instead of `.apply()`."),
    ],
    fix: FixMode::Autofix,
    requires_types: false,
};

impl Idiom for PreferSpreadSyntax {
    fn meta(&self) -> &'static IdiomMeta {
        &META
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        if ctx.arena.is_optional_chain(node) {
            return None;
        }
        let args = ctx.plain_arguments(node)?;
        let callee = ctx.arena.get_call_expr_at(node)?.expression;
        if ctx.is_global_member(callee, "Object", "assign") {
            return object_assign(ctx, node, args);
        }
        match ctx.method_call(node)? {
            (receiver, "concat") => concat(ctx, node, receiver, args),
            (receiver, "apply") => apply(ctx, node, receiver, args),
            _ => None,
        }
    }
}

/// `a.concat(b, c)` → `[...a, ...b, ...c]` when every operand is an array.
fn concat(ctx: &MatchContext<'_>, node: NodeIndex, receiver: NodeIndex, args: &[NodeIndex]) -> Option<Match> {
    if args.is_empty() {
        return None;
    }
    let operands = || std::iter::once(receiver).chain(args.iter().copied());
    if !operands().all(|operand| is_known_array(ctx, operand)) {
        return None;
    }
    let elements = operands()
        .map(|operand| {
            let capture = Capture::Operand(operand, Precedence::Assignment);
            capture_text(ctx, &capture).map(|text| format!("...{text}"))
        })
        .collect::<Option<Vec<_>>>()?
        .join(", ");
    Some(
        Match::new(node, "preferArraySpread")
            .text("elements", elements)
            .with_template("[{elements}]", Precedence::Primary),
    )
}

/// An array literal, or a value the type service confirms is an array.
fn is_known_array(ctx: &MatchContext<'_>, node: NodeIndex) -> bool {
    let node = ctx.arena.skip_parenthesized(node);
    ctx.is_kind(node, syntax_kind_ext::ARRAY_LITERAL_EXPRESSION) || ctx.holds(node, Capability::ArrayLike)
}

/// `Object.assign({a: 1}, x, y)` → `{a: 1, ...x, ...y}`.
fn object_assign(ctx: &MatchContext<'_>, node: NodeIndex, args: &[NodeIndex]) -> Option<Match> {
    let arena = ctx.arena;
    let [target, sources @ ..] = args else {
        return None;
    };
    if sources.is_empty() {
        return None;
    }
    let target = arena.skip_parenthesized(*target);
    if !ctx.is_kind(target, syntax_kind_ext::OBJECT_LITERAL_EXPRESSION) {
        return None;
    }
    let properties = &arena.get_literal_expr_at(target)?.elements.nodes;
    // Spread defines properties where `assign` would run setters, and a
    // `__proto__` key means something else in a literal.
    if properties.iter().any(|&property| is_accessor(ctx, property) || is_proto_key(ctx, property)) {
        return None;
    }

    let mut parts = Vec::with_capacity(properties.len() + sources.len());
    if let (Some(first), Some(last)) = (properties.first(), properties.last()) {
        parts.push(capture_text(ctx, &Capture::Range(*first, *last))?.into_owned());
    }
    for &source in sources {
        let text = capture_text(ctx, &Capture::Operand(source, Precedence::Assignment))?.into_owned();
        parts.push(format!("...{text}"));
    }
    Some(
        Match::new(node, "preferObjectSpread")
            .text("properties", parts.join(", "))
            .with_template("{ {properties} }", Precedence::Primary),
    )
}

fn is_accessor(ctx: &MatchContext<'_>, property: NodeIndex) -> bool {
    ctx.is_kind(property, syntax_kind_ext::GET_ACCESSOR) || ctx.is_kind(property, syntax_kind_ext::SET_ACCESSOR)
}

fn is_proto_key(ctx: &MatchContext<'_>, property: NodeIndex) -> bool {
    let arena = ctx.arena;
    let name = arena
        .get_property_assignment_at(property)
        .map(|assignment| assignment.name)
        .or_else(|| arena.get_shorthand_property_at(property).map(|short| short.name));
    name.is_some_and(|name| {
        arena.is_identifier_named(name, "__proto__") || arena.string_literal_value(name) == Some("__proto__")
    })
}

/// `f.apply(null, args)` → `f(...args)` for an identifier `f` and an
/// argument list that spread accepts.
fn apply(ctx: &MatchContext<'_>, node: NodeIndex, receiver: NodeIndex, args: &[NodeIndex]) -> Option<Match> {
    let [this_arg, list] = args else {
        return None;
    };
    let callee = ctx.arena.skip_parenthesized(receiver);
    if !ctx.is_kind(callee, SyntaxKind::Identifier as u16) || !ctx.safety.nullish_kind(*this_arg).is_nullish() {
        return None;
    }
    // `apply` takes array-likes, spread only iterables.
    if !(is_known_array(ctx, *list) || ctx.arena.is_identifier_named(ctx.arena.skip_parenthesized(*list), "arguments"))
    {
        return None;
    }
    Some(
        Match::new(node, "preferCallSpread")
            .node_capture("callee", callee)
            .operand("args", *list, Precedence::Assignment)
            .with_template("{callee}(...{args})", Precedence::Call),
    )
}
