//! Per-file state handed to every matcher.

use modz_binder::BinderState;
use modz_checker::{Capability, SafetyOracle, TypeOracle};
use modz_parser::node::NodeArena;
use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

/// Read-only view of one analyzed file: tree, bindings, source text and
/// the two oracles.
#[derive(Clone, Copy)]
pub struct MatchContext<'a> {
    pub arena: &'a NodeArena,
    pub binder: &'a BinderState,
    pub text: &'a str,
    pub safety: SafetyOracle<'a>,
    pub types: TypeOracle<'a>,
}

impl<'a> MatchContext<'a> {
    pub fn new(
        arena: &'a NodeArena,
        binder: &'a BinderState,
        text: &'a str,
        types: TypeOracle<'a>,
    ) -> MatchContext<'a> {
        MatchContext {
            arena,
            binder,
            text,
            safety: SafetyOracle::new(arena, binder),
            types,
        }
    }

    pub fn text_of(&self, node: NodeIndex) -> &'a str {
        self.arena.node_text(node, self.text)
    }

    /// True if two nodes have byte-identical source text.
    pub fn same_text(&self, a: NodeIndex, b: NodeIndex) -> bool {
        let (a, b) = (self.arena.skip_parenthesized(a), self.arena.skip_parenthesized(b));
        self.text_of(a) == self.text_of(b)
    }

    pub fn kind(&self, node: NodeIndex) -> Option<u16> {
        self.arena.kind(node)
    }

    pub fn is_kind(&self, node: NodeIndex, kind: u16) -> bool {
        self.arena.is_kind(node, kind)
    }

    pub fn holds(&self, node: NodeIndex, capability: Capability) -> bool {
        self.types.holds(node, capability)
    }

    /// True for an identifier `name` bound to the global object's property.
    pub fn is_global(&self, node: NodeIndex, name: &str) -> bool {
        self.safety.is_global_identifier(self.arena.skip_parenthesized(node), name)
    }

    /// Match `Object.member` where `Object` is the global binding and the
    /// access is not optional.
    pub fn is_global_member(&self, node: NodeIndex, object: &str, member: &str) -> bool {
        let node = self.arena.skip_parenthesized(node);
        self.arena.property_access_name(node) == Some(member)
            && !self.arena.is_optional_chain(node)
            && self
                .arena
                .get_access_expr_at(node)
                .is_some_and(|access| self.is_global(access.expression, object))
    }

    /// Name of a global referenced as `X`, `window.X` or `globalThis.X`,
    /// together with the text of the `window.`/`globalThis.` prefix.
    pub fn global_reference(&self, node: NodeIndex) -> Option<(&'a str, &'a str)> {
        let arena = self.arena;
        let node = arena.skip_parenthesized(node);
        if arena.is_kind(node, SyntaxKind::Identifier as u16) {
            let name = arena.identifier_text(node)?;
            return self.is_global(node, name).then_some((name, ""));
        }
        if arena.is_optional_chain(node) {
            return None;
        }
        let access = arena.get_access_expr_at(node)?;
        let name = arena.property_access_name(node)?;
        let receiver = arena.skip_parenthesized(access.expression);
        if !["window", "globalThis"]
            .into_iter()
            .any(|global| self.is_global(receiver, global))
        {
            return None;
        }
        let prefix_start = arena.get(access.expression)?.pos as usize;
        let prefix_end = arena.get(access.name_or_argument)?.pos as usize;
        Some((name, self.text.get(prefix_start..prefix_end)?))
    }

    /// For `receiver.method(args)`, return `(receiver, method)`. Optional
    /// chains anywhere in the callee decline.
    pub fn method_call(&self, call: NodeIndex) -> Option<(NodeIndex, &'a str)> {
        let arena = self.arena;
        if !arena.is_kind(call, syntax_kind_ext::CALL_EXPRESSION) || arena.is_optional_chain(call) {
            return None;
        }
        let callee = arena.get_call_expr_at(call)?.expression;
        let method = arena.property_access_name(callee)?;
        let receiver = arena.get_access_expr_at(callee)?.expression;
        Some((receiver, method))
    }

    /// Arguments of a call, with `None` when any is a spread element.
    pub fn plain_arguments(&self, call: NodeIndex) -> Option<&'a [NodeIndex]> {
        let args = self.arena.call_arguments(call);
        (!args
            .iter()
            .any(|&arg| self.arena.is_kind(arg, syntax_kind_ext::SPREAD_ELEMENT)))
        .then_some(args)
    }
}
