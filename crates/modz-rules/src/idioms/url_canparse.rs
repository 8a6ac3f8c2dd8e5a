use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use super::{arguments_capture, global_in_scope};
use crate::context::MatchContext;
use crate::idiom::{Capture, FixMode, Idiom, IdiomMeta, Match};
use crate::precedence::Precedence;

/// `try { new URL(u) } catch {}` used as a validity test → `URL.canParse(u)`.
///
/// Offered as a suggestion: in the `if` form, exceptions thrown by the rest
/// of the try block are no longer caught.
pub struct PreferUrlCanParse;

static META: IdiomMeta = IdiomMeta {
    id: "prefer-url-canparse",
    description: "Prefer `URL.canParse()` over constructing a URL inside try/catch",
    kinds: &[syntax_kind_ext::TRY_STATEMENT],
    messages: &[
        ("preferCanParse", "Use `URL.canParse()` instead of catching the error thrown by `new URL()`."),
        ("replaceWithCanParse", "Replace the try/catch with `URL.canParse({args})`."),
    ],
    fix: FixMode::Suggestion {
        message_key: "replaceWithCanParse",
    },
    requires_types: false,
};

const RETURN_TEMPLATE: &str = "return URL.canParse({args});";
const IF_TEMPLATE: &str = "if (URL.canParse({args})) {\n{body}\n}";
const UNLESS_TEMPLATE: &str = "if (!URL.canParse({args})) {\n{handler}\n}";
const IF_ELSE_TEMPLATE: &str = "if (URL.canParse({args})) {\n{body}\n} else {\n{handler}\n}";

impl Idiom for PreferUrlCanParse {
    fn meta(&self) -> &'static IdiomMeta {
        &META
    }

    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match> {
        let arena = ctx.arena;
        let try_stmt = arena.get_try_at(node)?;
        if try_stmt.finally_block.is_some() || try_stmt.catch_clause.is_none() {
            return None;
        }
        let attempted = &arena.get_block_at(try_stmt.try_block)?.statements.nodes;
        let catch = arena.get_catch_clause_at(try_stmt.catch_clause)?;
        let handler = &arena.get_block_at(catch.block)?.statements.nodes;
        if catch_binding_is_used(ctx, catch.variable_declaration, catch.block) {
            return None;
        }

        let (first, rest) = attempted.split_first()?;
        let construct = arena.skip_parenthesized(arena.get_expression_statement_at(*first)?.expression);
        if !ctx.is_kind(construct, syntax_kind_ext::NEW_EXPRESSION) {
            return None;
        }
        let callee = arena.get_call_expr_at(construct)?.expression;
        let args = ctx.plain_arguments(construct)?;
        if !ctx.is_global(callee, "URL") || !(1..=2).contains(&args.len()) || !global_in_scope(ctx, node, "URL") {
            return None;
        }

        let m = Match::new(node, "preferCanParse").capture("args", arguments_capture(args));
        if let ([returned], [refused]) = (rest, handler.as_slice())
            && returns_keyword(ctx, *returned, SyntaxKind::TrueKeyword)
            && returns_keyword(ctx, *refused, SyntaxKind::FalseKeyword)
        {
            return Some(m.with_template(RETURN_TEMPLATE, Precedence::Primary));
        }

        let body = rest.first().zip(rest.last());
        let handled = handler.first().zip(handler.last());
        match (body, handled) {
            (Some((first, last)), Some((handler_first, handler_last))) => Some(
                m.capture("body", Capture::Range(*first, *last))
                    .capture("handler", Capture::Range(*handler_first, *handler_last))
                    .with_template(IF_ELSE_TEMPLATE, Precedence::Primary),
            ),
            (Some((first, last)), None) => Some(
                m.capture("body", Capture::Range(*first, *last))
                    .with_template(IF_TEMPLATE, Precedence::Primary),
            ),
            (None, Some((first, last))) => Some(
                m.capture("handler", Capture::Range(*first, *last))
                    .with_template(UNLESS_TEMPLATE, Precedence::Primary),
            ),
            (None, None) => None,
        }
    }
}

/// `return true;` / `return false;`.
fn returns_keyword(ctx: &MatchContext<'_>, stmt: NodeIndex, keyword: SyntaxKind) -> bool {
    ctx.is_kind(stmt, syntax_kind_ext::RETURN_STATEMENT)
        && ctx
            .arena
            .get_return_statement_at(stmt)
            .is_some_and(|ret| ctx.is_kind(ret.expression, keyword as u16))
}

/// True if the catch clause binds a name the handler mentions, or binds a
/// pattern.
fn catch_binding_is_used(ctx: &MatchContext<'_>, declaration: NodeIndex, block: NodeIndex) -> bool {
    let arena = ctx.arena;
    let Some(decl) = arena.get_variable_declaration_at(declaration) else {
        return false;
    };
    let Some(name) = arena.identifier_text(decl.name) else {
        return true;
    };
    let mut stack = vec![block];
    while let Some(current) = stack.pop() {
        if arena.is_identifier_named(current, name) {
            return true;
        }
        stack.extend(arena.children(current));
    }
    false
}
