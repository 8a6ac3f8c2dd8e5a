//! Semantic oracles consulted by the idiom matchers.
//!
//! - `safety` - purity, constant-valuedness, nullish spellings, boolean
//!   context and shallow-copy recognition over syntax shapes
//! - `type_oracle` - tri-state capability queries over an optional
//!   `TypeService`, collapsed with a per-capability default
//! - `declared_types` - a `TypeService` built from what a file declares

pub mod declared_types;
pub mod safety;
pub mod type_oracle;

pub use declared_types::DeclaredTypeService;
pub use safety::{NullishKind, SafetyOracle, is_primitive_literal_kind};
pub use type_oracle::{Capability, NoTypeService, TriState, TypeId, TypeOracle, TypeService};
