//! Parser module layout:
//!
//! - `base` - `NodeIndex` / `NodeList`
//! - `node` - node header, data pools, `NodeArena`
//! - `node_arena` - `add_*` creation methods
//! - `node_access` - typed accessors, child enumeration and tree queries
//! - `state*` - the recursive-descent parser

pub mod base;
pub mod node;
pub mod node_access;
pub mod node_arena;
pub mod state;
mod state_expressions;
mod state_statements;
mod state_types;

pub use base::{NodeIndex, NodeList};
pub use node::{NodeArena, node_flags, syntax_kind_ext};
pub use state::{ParseDiagnostic, ParserState};
