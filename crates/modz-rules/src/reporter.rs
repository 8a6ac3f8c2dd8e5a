//! Reporter: wraps matches and their fixes into diagnostic records.

use modz_common::{Diagnostic, LineMap, Severity, Span, Suggestion};
use tracing::trace;

use crate::context::MatchContext;
use crate::fix::{render_message, synthesize};
use crate::idiom::{FixMode, IdiomMeta, Match};

/// Collects the diagnostics of one file.
pub struct Reporter<'a> {
    file: &'a str,
    line_map: LineMap,
    text: &'a str,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Reporter<'a> {
    pub fn new(file: &'a str, text: &'a str) -> Reporter<'a> {
        Reporter {
            file,
            line_map: LineMap::new(text),
            text,
            diagnostics: Vec::new(),
        }
    }

    pub fn report(&mut self, ctx: &MatchContext<'_>, meta: &'static IdiomMeta, severity: Severity, m: &Match) {
        let Some(node) = ctx.arena.get(m.node) else {
            return;
        };
        let span = Span::new(node.pos, node.end);
        let message = meta
            .message(m.message_key)
            .map_or_else(|| meta.description.to_string(), |template| render_message(ctx, template, m));

        let mut fix = None;
        let mut suggestions = Vec::new();
        match meta.fix {
            FixMode::Autofix => fix = synthesize(ctx, m),
            FixMode::Suggestion { message_key } => {
                if let Some(suggested) = synthesize(ctx, m) {
                    let message = meta
                        .message(message_key)
                        .map_or_else(|| meta.description.to_string(), |template| render_message(ctx, template, m));
                    suggestions.push(Suggestion {
                        message_key: message_key.to_string(),
                        message,
                        fix: suggested,
                    });
                }
            }
            FixMode::ReportOnly => {}
        }

        trace!(rule = meta.id, start = span.start, end = span.end, fixable = fix.is_some(), "finding");
        self.diagnostics.push(Diagnostic {
            rule_id: meta.id.to_string(),
            message_key: m.message_key.to_string(),
            message,
            severity,
            file: self.file.to_string(),
            span,
            start: self.line_map.position_of(self.text, span.start),
            end: self.line_map.position_of(self.text, span.end),
            fix,
            suggestions,
        });
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
