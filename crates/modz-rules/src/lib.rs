//! Idiom rules for modz.
//!
//! A [`Registry`] maps node kinds to enabled idiom matchers. The [`Linter`]
//! parses and binds a file, walks it once, and dispatches every node to the
//! matchers registered for its kind. A firing matcher yields a [`Match`];
//! the reporter turns it into a diagnostic with an optional fix rendered
//! from verbatim source captures.

pub mod context;
pub mod error;
pub mod fix;
pub mod idiom;
pub mod idioms;
pub mod linter;
pub mod precedence;
pub mod presets;
pub mod registry;
pub mod reporter;

pub use context::MatchContext;
pub use error::LintError;
pub use fix::apply_fixes;
pub use idiom::{Capture, FixMode, Idiom, IdiomMeta, Match};
pub use idioms::IDIOMS;
pub use linter::{FixOutcome, Linter};
pub use precedence::Precedence;
pub use presets::{PRESET_NAMES, preset};
pub use registry::{Enabled, Registry, find_idiom};
