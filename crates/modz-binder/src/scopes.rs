//! Persistent lexical scopes.

use modz_parser::NodeIndex;

use crate::symbols::SymbolTable;

/// Index of a scope in `BinderState::scopes`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const NONE: ScopeId = ScopeId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// What kind of node created a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    SourceFile,
    /// Functions, arrows, methods, accessors, constructors and class static blocks.
    /// `var` declarations hoist to the nearest one of these.
    Function,
    Block,
    Class,
    /// `for`, `for-in` and `for-of` heads with `let`/`const` declarations
    Loop,
    CatchClause,
    /// `switch` case block
    Switch,
}

impl ContainerKind {
    /// True if `var` declarations stop here.
    pub fn is_var_container(self) -> bool {
        matches!(self, ContainerKind::SourceFile | ContainerKind::Function)
    }
}

/// A lexical scope and the names declared directly in it.
#[derive(Clone, Debug)]
pub struct Scope {
    pub parent: ScopeId,
    pub kind: ContainerKind,
    /// Node that created this scope
    pub container: NodeIndex,
    pub table: SymbolTable,
}

impl Scope {
    pub fn new(parent: ScopeId, kind: ContainerKind, container: NodeIndex) -> Scope {
        Scope {
            parent,
            kind,
            container,
            table: SymbolTable::new(),
        }
    }
}
