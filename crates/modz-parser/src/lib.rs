//! JavaScript/TypeScript parser for modz.
//!
//! The AST is a thin-node arena: every node is a 16-byte header
//! (`kind`, `flags`, `pos`, `end`, `data_index`) plus an entry in a typed
//! data pool. Parent links are stored beside the headers and are set once,
//! when the parent is added.

pub mod parser;

pub use parser::{
    NodeArena, NodeIndex, NodeList, ParseDiagnostic, ParserState, node, node_access, node_flags,
    syntax_kind_ext,
};
