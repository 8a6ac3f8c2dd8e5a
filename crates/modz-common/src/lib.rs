//! Common types shared by every modz crate.
//!
//! - `Span` - closed-open byte range over a source text
//! - `LineMap` / `Position` - offset to 1-based line/column conversion
//! - `Diagnostic`, `Fix`, `Suggestion` - the finding records handed to hosts

pub mod diagnostics;
pub mod position;
pub mod span;

pub use diagnostics::{Diagnostic, Fix, Severity, Suggestion};
pub use position::{LineMap, Position};
pub use span::Span;
