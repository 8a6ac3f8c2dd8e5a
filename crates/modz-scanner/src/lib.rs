//! JavaScript/TypeScript scanner/tokenizer for modz.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `char_codes` - Character classification utilities

pub mod char_codes;
pub mod scanner;
pub mod syntax_kind;

pub use scanner::{ScannerDiagnostic, ScannerSnapshot, ScannerState, TokenFlags, numeric_literal_value};
pub use syntax_kind::{SyntaxKind, text_to_keyword, token_to_string};
