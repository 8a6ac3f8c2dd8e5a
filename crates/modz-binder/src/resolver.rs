//! Scope/binding resolver queries used by the safety and type oracles.
//!
//! Every query here fails safe: when the binding cannot be pinned down
//! exactly (unresolved, declared more than once, written after declaration,
//! destructured, a parameter) the answer is "no".

use modz_parser::node::NodeArena;
use modz_parser::node_access::is_function_like_kind;
use modz_parser::{NodeIndex, syntax_kind_ext};
use modz_scanner::SyntaxKind;

use crate::state::BinderState;
use crate::symbols::symbol_flags;

impl BinderState {
    /// Resolve an identifier reference to the initializer of its binding.
    ///
    /// Returns `Some(initializer)` only when the identifier resolves to a
    /// variable declared by exactly one plain `name = expr` declarator and
    /// never written afterwards. Declaration names themselves are not
    /// references and resolve to nothing.
    pub fn resolve_single_initializer(
        &self,
        arena: &NodeArena,
        ident: NodeIndex,
    ) -> Option<NodeIndex> {
        if !arena.is_kind(ident, SyntaxKind::Identifier as u16)
            || self.is_declaration_name(arena, ident)
        {
            return None;
        }
        let sym_id = self.resolve_identifier(arena, ident)?;
        let symbol = self.get_symbol(sym_id)?;
        if !symbol.has_any_flags(symbol_flags::VARIABLE)
            || symbol.has_any_flags(symbol_flags::AMBIENT)
            || !symbol.is_never_reassigned()
        {
            return None;
        }
        let declaration = *symbol.declarations.first()?;
        let decl = arena.get_variable_declaration_at(declaration)?;
        if !arena.is_kind(decl.name, SyntaxKind::Identifier as u16) || decl.initializer.is_none() {
            return None;
        }
        // A hoisted `var` read before its declarator runs is still undefined.
        if symbol.has_any_flags(symbol_flags::FUNCTION_SCOPED_VARIABLE) {
            let decl_end = arena.get(declaration)?.end;
            let use_pos = arena.get(ident)?.pos;
            if use_pos < decl_end || is_reinitialized_in_loop(arena, declaration) {
                return None;
            }
        }
        Some(decl.initializer)
    }

    /// True if `ident` refers to a local binding whose value cannot change
    /// between two evaluations: a declaration (variable, parameter, function,
    /// class, import) that is never written after it is initialized.
    ///
    /// Unresolved names are globals and may be reassigned by other code.
    pub fn is_never_reassigned(&self, arena: &NodeArena, ident: NodeIndex) -> bool {
        let Some(sym_id) = self.resolve_identifier(arena, ident) else {
            return false;
        };
        let Some(symbol) = self.get_symbol(sym_id) else {
            return false;
        };
        if !symbol.is_never_reassigned() {
            return false;
        }
        !(symbol.has_any_flags(symbol_flags::FUNCTION_SCOPED_VARIABLE)
            && symbol
                .declarations
                .first()
                .is_some_and(|&decl| is_reinitialized_in_loop(arena, decl)))
    }
}

/// A `var` declared inside a loop (body or head) of the same function is one
/// binding whose initializer runs on every iteration.
fn is_reinitialized_in_loop(arena: &NodeArena, declaration: NodeIndex) -> bool {
    let mut current = arena.parent(declaration);
    while let Some(node) = arena.get(current) {
        match node.kind {
            syntax_kind_ext::FOR_STATEMENT
            | syntax_kind_ext::FOR_IN_STATEMENT
            | syntax_kind_ext::FOR_OF_STATEMENT
            | syntax_kind_ext::WHILE_STATEMENT
            | syntax_kind_ext::DO_STATEMENT => return true,
            kind if is_function_like_kind(kind) => return false,
            syntax_kind_ext::CLASS_STATIC_BLOCK_DECLARATION => return false,
            _ => current = arena.parent(current),
        }
    }
    false
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod tests;
