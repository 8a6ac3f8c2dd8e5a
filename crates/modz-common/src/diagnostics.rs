//! Finding records produced by the rule engine.
//!
//! Every record is serde-serializable so hosts can emit JSON directly.

use serde::{Deserialize, Serialize};

use crate::position::Position;
use crate::span::Span;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A text-span replacement over the original source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    pub span: Span,
    pub replacement: String,
}

impl Fix {
    pub fn new(span: Span, replacement: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
        }
    }

    /// Apply this fix to `text`, returning the rewritten text.
    ///
    /// A span that does not fit `text` leaves it unchanged.
    pub fn apply(&self, text: &str) -> String {
        let (Some(head), Some(tail)) = (
            text.get(..self.span.start as usize),
            text.get(self.span.end as usize..),
        ) else {
            return text.to_string();
        };
        let mut out = String::with_capacity(text.len() + self.replacement.len());
        out.push_str(head);
        out.push_str(&self.replacement);
        out.push_str(tail);
        out
    }
}

/// A named, human-reviewed alternative carrying its own fix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub message_key: String,
    pub message: String,
    pub fix: Fix,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub rule_id: String,
    pub message_key: String,
    pub message: String,
    pub severity: Severity,
    pub file: String,
    pub span: Span,
    pub start: Position,
    pub end: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    pub fn is_fixable(&self) -> bool {
        self.fix.is_some()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
