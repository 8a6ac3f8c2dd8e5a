//! Binder state: scopes, symbols and identifier resolution.

use modz_parser::node::NodeArena;
use modz_parser::NodeIndex;
use rustc_hash::FxHashMap;
use tracing::{debug, debug_span, trace};

use crate::scopes::{ContainerKind, Scope, ScopeId};
use crate::symbols::{Symbol, SymbolArena, SymbolId, symbol_flags};

const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;

/// Binder state for one file.
///
/// Scopes are persistent: after `bind_source_file` every scope-creating node
/// maps to its `ScopeId`, and any identifier can be resolved by walking its
/// parent links to the nearest scope and then up the scope chain.
#[derive(Debug)]
pub struct BinderState {
    /// Arena for symbol storage
    pub symbols: SymbolArena,
    /// Persistent scopes; index 0 is the source file scope
    pub scopes: Vec<Scope>,
    /// Map from AST node (that creates a scope) to its ScopeId
    pub node_scope_ids: FxHashMap<u32, ScopeId>,
    /// Declaration node and declaration name node to symbol
    pub node_symbols: FxHashMap<u32, SymbolId>,
    /// Current active ScopeId during binding
    pub(crate) current_scope_id: ScopeId,
}

impl Default for BinderState {
    fn default() -> Self {
        BinderState::new()
    }
}

impl BinderState {
    pub fn new() -> BinderState {
        BinderState {
            symbols: SymbolArena::new(),
            scopes: Vec::new(),
            node_scope_ids: FxHashMap::default(),
            node_symbols: FxHashMap::default(),
            current_scope_id: ScopeId::NONE,
        }
    }

    /// Bind a parsed file. Replaces any previous binding state.
    pub fn bind_source_file(&mut self, arena: &NodeArena, root: NodeIndex) {
        let _span = debug_span!("bind_source_file", root = root.0).entered();

        self.symbols = SymbolArena::new();
        self.scopes.clear();
        self.node_scope_ids.clear();
        self.node_symbols.clear();
        self.current_scope_id = ScopeId::NONE;

        self.bind_node(arena, root);

        debug!(
            scopes = self.scopes.len(),
            symbols = self.symbols.len(),
            "bound source file"
        );
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get_symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    /// Symbol declared by a declaration node or its name identifier.
    pub fn symbol_of_declaration(&self, node: NodeIndex) -> Option<SymbolId> {
        self.node_symbols.get(&node.0).copied()
    }

    /// True if `node` is the name identifier of a declaration.
    pub fn is_declaration_name(&self, arena: &NodeArena, node: NodeIndex) -> bool {
        arena.get_identifier_at(node).is_some() && self.node_symbols.contains_key(&node.0)
    }

    /// Resolve an identifier to the value symbol it refers to.
    ///
    /// Declaration names resolve to the symbol they declare. Type-only
    /// symbols (interfaces, type aliases) are skipped so they never hide a
    /// value binding of the same name in an outer scope.
    pub fn resolve_identifier(&self, arena: &NodeArena, node_idx: NodeIndex) -> Option<SymbolId> {
        let name = arena.identifier_text(node_idx)?;
        if let Some(sym_id) = self.symbol_of_declaration(node_idx) {
            return Some(sym_id);
        }
        self.lookup_value(arena, node_idx, name)
    }

    /// Find the value binding named `name` visible at `site`.
    pub fn lookup_value(&self, arena: &NodeArena, site: NodeIndex, name: &str) -> Option<SymbolId> {
        self.lookup_with(arena, site, name, Symbol::is_value)
    }

    /// Find the type declaration (class, interface, type alias, enum or
    /// imported name) named `name` visible at `site`.
    pub fn lookup_type(&self, arena: &NodeArena, site: NodeIndex, name: &str) -> Option<SymbolId> {
        self.lookup_with(arena, site, name, |sym| sym.has_any_flags(symbol_flags::TYPE))
    }

    fn lookup_with(
        &self,
        arena: &NodeArena,
        site: NodeIndex,
        name: &str,
        accept: impl Fn(&Symbol) -> bool,
    ) -> Option<SymbolId> {
        let mut scope_id = self.find_enclosing_scope(arena, site)?;
        let mut iterations = 0;
        while !scope_id.is_none() {
            iterations += 1;
            if iterations > MAX_SCOPE_WALK_ITERATIONS {
                debug!(name, "scope walk exceeded iteration limit");
                return None;
            }
            let scope = self.scopes.get(scope_id.0 as usize)?;
            if let Some(sym_id) = scope.table.get(name)
                && self.symbols.get(sym_id).is_some_and(&accept)
            {
                trace!(name, symbol = sym_id.0, "resolved");
                return Some(sym_id);
            }
            scope_id = scope.parent;
        }
        trace!(name, "unresolved");
        None
    }

    /// True if `name` at `site` refers to the global object's binding, i.e.
    /// no local declaration shadows it.
    pub fn is_global_reference(&self, arena: &NodeArena, site: NodeIndex, name: &str) -> bool {
        self.lookup_value(arena, site, name).is_none()
    }

    /// Returns the ScopeId of the nearest scope-creating ancestor node
    /// (or of `node_idx` itself).
    pub fn find_enclosing_scope(&self, arena: &NodeArena, node_idx: NodeIndex) -> Option<ScopeId> {
        let mut current = node_idx;
        while !current.is_none() {
            if let Some(&scope_id) = self.node_scope_ids.get(&current.0) {
                return Some(scope_id);
            }
            current = arena.parent(current);
        }
        if self.scopes.is_empty() {
            None
        } else {
            Some(ScopeId(0))
        }
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)
    }

    // =========================================================================
    // Scope management
    // =========================================================================

    pub(crate) fn enter_scope(&mut self, kind: ContainerKind, node: NodeIndex) {
        let new_scope_id = ScopeId(self.scopes.len() as u32);
        self.scopes
            .push(Scope::new(self.current_scope_id, kind, node));
        if node.is_some() {
            self.node_scope_ids.insert(node.0, new_scope_id);
        }
        self.current_scope_id = new_scope_id;
    }

    pub(crate) fn exit_scope(&mut self) {
        if let Some(scope) = self.scopes.get(self.current_scope_id.0 as usize) {
            self.current_scope_id = scope.parent;
        }
    }

    /// Nearest enclosing scope that `var` declarations hoist to.
    fn var_scope_id(&self) -> ScopeId {
        let mut scope_id = self.current_scope_id;
        while let Some(scope) = self.scopes.get(scope_id.0 as usize) {
            if scope.kind.is_var_container() {
                return scope_id;
            }
            scope_id = scope.parent;
        }
        self.current_scope_id
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Declare `name` in the current scope.
    pub(crate) fn declare_symbol(
        &mut self,
        name: &str,
        flags: u32,
        declaration: NodeIndex,
        name_node: NodeIndex,
    ) -> SymbolId {
        let scope_id = self.current_scope_id;
        self.declare_in_scope(scope_id, name, flags, declaration, name_node)
    }

    /// Declare `name` in the nearest function or file scope.
    pub(crate) fn declare_hoisted(
        &mut self,
        name: &str,
        flags: u32,
        declaration: NodeIndex,
        name_node: NodeIndex,
    ) -> SymbolId {
        let scope_id = self.var_scope_id();
        self.declare_in_scope(scope_id, name, flags, declaration, name_node)
    }

    /// Declarations of the same name in one scope merge into a single
    /// symbol that lists every declaration site.
    fn declare_in_scope(
        &mut self,
        scope_id: ScopeId,
        name: &str,
        flags: u32,
        declaration: NodeIndex,
        name_node: NodeIndex,
    ) -> SymbolId {
        let existing = self
            .scopes
            .get(scope_id.0 as usize)
            .and_then(|scope| scope.table.get(name));

        let sym_id = match existing {
            Some(existing_id) => {
                if let Some(sym) = self.symbols.get_mut(existing_id) {
                    sym.flags |= flags;
                    if !sym.declarations.contains(&declaration) {
                        sym.declarations.push(declaration);
                    }
                }
                existing_id
            }
            None => {
                let sym_id = self.symbols.alloc(flags, name.to_string());
                if let Some(sym) = self.symbols.get_mut(sym_id) {
                    sym.declarations.push(declaration);
                }
                if let Some(scope) = self.scopes.get_mut(scope_id.0 as usize) {
                    scope.table.set(name.to_string(), sym_id);
                }
                sym_id
            }
        };

        trace!(name, flags, symbol = sym_id.0, "declared");
        self.node_symbols.insert(declaration.0, sym_id);
        if name_node.is_some() {
            self.node_symbols.insert(name_node.0, sym_id);
        }
        sym_id
    }

    /// Record a write (assignment, update, destructuring target) to the
    /// binding an identifier refers to.
    pub(crate) fn record_write(&mut self, arena: &NodeArena, ident: NodeIndex) {
        if let Some(sym_id) = self.resolve_identifier(arena, ident)
            && let Some(sym) = self.symbols.get_mut(sym_id)
        {
            sym.write_count += 1;
        }
    }
}

#[cfg(test)]
#[path = "../tests/scopes_tests.rs"]
mod tests;
