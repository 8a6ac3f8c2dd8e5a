//! Symbols and symbol tables.

use modz_parser::NodeIndex;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Symbol flags (bitset).
pub mod symbol_flags {
    pub const NONE: u32 = 0;
    /// `var` declarations and `var`-like hoisted names
    pub const FUNCTION_SCOPED_VARIABLE: u32 = 1 << 0;
    /// `let` and `const` declarations
    pub const BLOCK_SCOPED_VARIABLE: u32 = 1 << 1;
    pub const CONST: u32 = 1 << 2;
    pub const PARAMETER: u32 = 1 << 3;
    pub const FUNCTION: u32 = 1 << 4;
    pub const CLASS: u32 = 1 << 5;
    pub const ENUM: u32 = 1 << 6;
    pub const INTERFACE: u32 = 1 << 7;
    pub const TYPE_ALIAS: u32 = 1 << 8;
    /// Imported name (`import x from`, `import { x }`, `import x = require()`)
    pub const ALIAS: u32 = 1 << 9;
    pub const CATCH_VARIABLE: u32 = 1 << 10;
    /// Declared with `declare`
    pub const AMBIENT: u32 = 1 << 11;

    pub const VARIABLE: u32 = FUNCTION_SCOPED_VARIABLE | BLOCK_SCOPED_VARIABLE;
    pub const VALUE: u32 =
        VARIABLE | PARAMETER | FUNCTION | CLASS | ENUM | ALIAS | CATCH_VARIABLE;
    pub const TYPE: u32 = CLASS | ENUM | INTERFACE | TYPE_ALIAS | ALIAS;
}

/// Index of a symbol in a `SymbolArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub const NONE: SymbolId = SymbolId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// A named binding and every site that declares it.
#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub flags: u32,
    /// Declaring nodes: variable declarations, binding elements, parameters,
    /// functions, classes, import specifiers.
    pub declarations: SmallVec<[NodeIndex; 1]>,
    /// Number of assignments, updates and destructuring writes after declaration.
    pub write_count: u32,
}

impl Symbol {
    pub fn new(name: String, flags: u32) -> Symbol {
        Symbol {
            name,
            flags,
            declarations: SmallVec::new(),
            write_count: 0,
        }
    }

    #[inline]
    pub fn has_any_flags(&self, flags: u32) -> bool {
        (self.flags & flags) != 0
    }

    /// True if this symbol introduces a runtime value.
    #[inline]
    pub fn is_value(&self) -> bool {
        self.has_any_flags(symbol_flags::VALUE)
    }

    /// Declared exactly once and never written afterwards.
    pub fn is_never_reassigned(&self) -> bool {
        self.declarations.len() == 1 && self.write_count == 0
    }
}

/// Arena of all symbols created for one file.
#[derive(Clone, Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> SymbolArena {
        SymbolArena::default()
    }

    pub fn alloc(&mut self, flags: u32, name: String) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol::new(name, flags));
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, sym)| (SymbolId(i as u32), sym))
    }
}

/// Name to symbol mapping for a single scope.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    entries: FxHashMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.entries.get(name).copied()
    }

    pub fn set(&mut self, name: String, id: SymbolId) {
        self.entries.insert(name, id);
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SymbolId)> {
        self.entries.iter()
    }
}
