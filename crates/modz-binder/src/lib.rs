//! Name binder for modz.
//!
//! Builds persistent lexical scopes over a parsed file, declares every
//! binding it introduces, and records which bindings are ever written after
//! their declaration. Resolution walks from a node up through its enclosing
//! scopes, so it can be queried in any order once binding is done.

pub mod resolver;
pub mod scopes;
pub mod state;
mod state_binding;
pub mod symbols;

pub use scopes::{ContainerKind, Scope, ScopeId};
pub use state::BinderState;
pub use symbols::{Symbol, SymbolArena, SymbolId, SymbolTable, symbol_flags};
