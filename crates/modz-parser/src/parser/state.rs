//! Parser state - core token handling and the source-file entry point.
//!
//! `ParserState` owns the scanner and the arena it fills. Expressions,
//! statements and type annotations are parsed by the `state_*` modules,
//! which all extend this struct.

use std::sync::Arc;

use modz_scanner::{ScannerState, SyntaxKind, token_to_string};
use serde::Serialize;
use tracing::{debug, trace};

use crate::parser::node::{IdentifierData, NodeArena, SourceFileData};
use crate::parser::{NodeIndex, NodeList, syntax_kind_ext};

// =============================================================================
// Context flags
// =============================================================================

/// `in` is not a binary operator (for-statement initializers).
pub const CONTEXT_FLAG_DISALLOW_IN: u32 = 1 << 0;
/// Inside a function body.
pub const CONTEXT_FLAG_IN_FUNCTION: u32 = 1 << 1;
/// Inside an async function: `await` is an operator.
pub const CONTEXT_FLAG_ASYNC: u32 = 1 << 2;
/// Inside a generator: `yield` is an operator.
pub const CONTEXT_FLAG_GENERATOR: u32 = 1 << 3;
/// Parsing the `true` branch of a conditional; a `:` belongs to it.
pub const CONTEXT_FLAG_IN_CONDITIONAL_TRUE: u32 = 1 << 4;

/// Deepest nesting the recursive-descent functions will enter.
const MAX_RECURSION_DEPTH: u32 = 1000;

/// A syntax error found while parsing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) current_token: SyntaxKind,
    /// End of the last consumed token; the end of every finished node.
    pub(crate) prev_token_end: u32,
    pub(crate) context_flags: u32,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    recursion_depth: u32,
}

impl ParserState {
    pub fn new(file_name: String, source: String) -> ParserState {
        let text: Arc<str> = Arc::from(source);
        let estimated_nodes = text.len() / 6;
        ParserState {
            scanner: ScannerState::new(text),
            arena: NodeArena::with_capacity(estimated_nodes),
            file_name,
            current_token: SyntaxKind::Unknown,
            prev_token_end: 0,
            context_flags: 0,
            parse_diagnostics: Vec::new(),
            recursion_depth: 0,
        }
    }

    /// Parse the whole file and return the `SOURCE_FILE` node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.next_token();
        let statements = self.parse_statement_list(|state| state.is_token(SyntaxKind::EndOfFileToken));
        for diag in self.scanner.get_scanner_diagnostics() {
            self.parse_diagnostics.push(ParseDiagnostic {
                start: diag.pos as u32,
                length: diag.length as u32,
                message: diag.message.to_string(),
            });
        }
        self.parse_diagnostics.sort_by_key(|diag| diag.start);
        let text = Arc::clone(self.scanner.get_text());
        let end = text.len() as u32;
        let root = self.arena.add_source_file(
            syntax_kind_ext::SOURCE_FILE,
            0,
            end,
            SourceFileData {
                file_name: self.file_name.clone(),
                text,
                statements,
            },
        );
        debug!(
            file = %self.file_name,
            nodes = self.arena.len(),
            errors = self.parse_diagnostics.len(),
            "parsed source file"
        );
        root
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    pub fn get_source_text(&self) -> &str {
        self.scanner.get_text()
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.get_token_pos()
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.get_token_end()
    }

    /// End position for a node whose last token was just consumed.
    #[inline]
    pub(crate) fn node_end(&self) -> u32 {
        self.prev_token_end
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.get_token_end();
        self.current_token = self.scanner.scan();
        trace!(token = ?self.current_token, pos = self.token_pos(), "next token");
        self.current_token
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    /// Consume `kind` if present, otherwise report it as missing.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            return true;
        }
        let expected = token_to_string(kind).unwrap_or("token");
        self.error_at_current_token(&format!("'{expected}' expected."));
        false
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// True if a statement may end here by automatic semicolon insertion.
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        self.is_token(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.has_preceding_line_break()
    }

    pub(crate) fn parse_semicolon(&mut self) {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return;
        }
        if !self.can_parse_semicolon() {
            self.error_at_current_token("';' expected.");
        }
    }

    /// Run `f` with the scanner rewound afterwards. `f` must not create nodes.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut ParserState) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let prev_end = self.prev_token_end;
        let result = f(self);
        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.prev_token_end = prev_end;
        result
    }

    /// Identifiers and contextual keywords can name bindings.
    pub(crate) fn is_identifier(&self) -> bool {
        let token = self.token();
        token == SyntaxKind::Identifier
            || (token.is_contextual_keyword() && !self.is_reserved_in_context(token))
    }

    fn is_reserved_in_context(&self, token: SyntaxKind) -> bool {
        match token {
            SyntaxKind::AwaitKeyword => self.in_context(CONTEXT_FLAG_ASYNC),
            SyntaxKind::YieldKeyword => self.in_context(CONTEXT_FLAG_GENERATOR),
            _ => false,
        }
    }

    /// Any identifier or keyword: property names after `.`, object keys.
    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        self.token() == SyntaxKind::Identifier || self.token().is_keyword()
    }

    #[inline]
    pub(crate) fn in_context(&self, flag: u32) -> bool {
        self.context_flags & flag != 0
    }

    /// Run `f` with `set` flags added and `clear` flags removed.
    pub(crate) fn with_context<T>(
        &mut self,
        set: u32,
        clear: u32,
        f: impl FnOnce(&mut ParserState) -> T,
    ) -> T {
        let saved = self.context_flags;
        self.context_flags = (self.context_flags | set) & !clear;
        let result = f(self);
        self.context_flags = saved;
        result
    }

    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            self.error_at_current_token("Expression or statement nested too deeply.");
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Diagnostics and recovery
    // =========================================================================

    pub(crate) fn error_at_current_token(&mut self, message: &str) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start);
        // One error per position keeps cascades out of the output.
        if self
            .parse_diagnostics
            .last()
            .is_some_and(|last| last.start == start)
        {
            return;
        }
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: message.to_string(),
        });
    }

    pub(crate) fn error_expression_expected(&mut self) {
        self.error_at_current_token("Expression expected.");
    }

    /// Zero-width identifier standing in for a missing expression.
    pub(crate) fn create_missing_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.arena.add_identifier(
            SyntaxKind::Identifier as u16,
            pos,
            pos,
            IdentifierData {
                escaped_text: String::new(),
            },
        )
    }

    /// Parse statements until `is_end` holds, always making progress.
    pub(crate) fn parse_statement_list(
        &mut self,
        is_end: impl Fn(&ParserState) -> bool,
    ) -> NodeList {
        let mut statements = Vec::new();
        while !is_end(self) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let start = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.token_pos() == start && !is_end(self) {
                self.error_at_current_token("Declaration or statement expected.");
                self.next_token();
            }
        }
        NodeList::from_nodes(statements)
    }

    /// Set flags on an already-created node.
    pub(crate) fn add_node_flags(&mut self, index: NodeIndex, flags: u16) {
        if let Some(node) = self.arena.get_mut(index) {
            node.flags |= flags;
        }
    }

    /// Create a token node for the current token and consume it.
    pub(crate) fn parse_token_node(&mut self) -> NodeIndex {
        let kind = self.token() as u16;
        let pos = self.token_pos();
        let end = self.token_end();
        self.next_token();
        self.arena.add_token(kind, pos, end)
    }
}
