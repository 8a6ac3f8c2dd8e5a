//! Fix synthesizer: renders a match's template from verbatim capture text.
//!
//! Captured sub-expressions are copied byte-for-byte from the source, so
//! formatting and comments inside them survive. The fix span is always the
//! span of the reported node.

use std::borrow::Cow;

use modz_common::{Fix, Span};
use tracing::debug;

use crate::context::MatchContext;
use crate::idiom::{Capture, Match};
use crate::precedence::{operand_needs_parens, replacement_needs_parens, starts_statement_or_arrow_body};

/// Source text for one capture.
pub fn capture_text<'a>(ctx: &MatchContext<'a>, capture: &'a Capture) -> Option<Cow<'a, str>> {
    match capture {
        Capture::Node(node) => Some(Cow::Borrowed(ctx.text_of(*node))),
        Capture::Operand(node, min) => {
            let text = ctx.text_of(*node);
            if operand_needs_parens(ctx.arena, *node, *min) {
                Some(Cow::Owned(format!("({text})")))
            } else {
                Some(Cow::Borrowed(text))
            }
        }
        Capture::Range(first, last) => {
            let start = ctx.arena.get(*first)?.pos as usize;
            let end = ctx.arena.get(*last)?.end as usize;
            ctx.text.get(start..end).map(Cow::Borrowed)
        }
        Capture::Text(text) => Some(Cow::Borrowed(text.as_str())),
    }
}

/// Substitute `{name}` placeholders using `lookup`.
///
/// Returns `None` if a placeholder has no value. A `{` that does not open a
/// well-formed placeholder is copied through.
pub fn render_template<'t>(
    template: &str,
    mut lookup: impl FnMut(&str) -> Option<Cow<'t, str>>,
) -> Option<String> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}');
        let name = close.map(|close| &after[..close]);
        match name {
            Some(name) if is_placeholder_name(name) => {
                out.push_str(&lookup(name)?);
                rest = &after[name.len() + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Some(out)
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Render the replacement text for a match, without any outer parentheses.
pub fn render_replacement(ctx: &MatchContext<'_>, m: &Match) -> Option<String> {
    let template = m.template?;
    let rendered = render_template(template, |name| {
        m.get(name).and_then(|capture| capture_text(ctx, capture))
    });
    if rendered.is_none() {
        debug!(template, "template references a missing capture");
    }
    rendered
}

/// Turn a match into a fix over the reported node's span.
pub fn synthesize(ctx: &MatchContext<'_>, m: &Match) -> Option<Fix> {
    let node = ctx.arena.get(m.node)?;
    let mut replacement = render_replacement(ctx, m)?;
    let wrap = replacement_needs_parens(ctx.arena, m.node, m.precedence)
        || (replacement.starts_with('{') && starts_statement_or_arrow_body(ctx.arena, m.node));
    if wrap {
        replacement = format!("({replacement})");
    }
    Some(Fix::new(Span::new(node.pos, node.end), replacement))
}

/// Render a message template, leaving unknown placeholders as written.
pub fn render_message(ctx: &MatchContext<'_>, template: &str, m: &Match) -> String {
    render_template(template, |name| {
        Some(
            m.get(name)
                .and_then(|capture| capture_text(ctx, capture))
                .unwrap_or_else(|| Cow::Owned(format!("{{{name}}}"))),
        )
    })
    .unwrap_or_else(|| template.to_string())
}

/// Apply non-overlapping fixes to `text`.
///
/// Fixes are taken in span order; a fix overlapping one already accepted is
/// skipped and left for the next pass. Returns the new text and the number
/// of fixes applied.
pub fn apply_fixes<'f>(text: &str, fixes: impl IntoIterator<Item = &'f Fix>) -> (String, usize) {
    let mut fixes: Vec<&Fix> = fixes.into_iter().collect();
    fixes.sort_by_key(|fix| (fix.span.start, fix.span.end));

    let mut accepted: Vec<&Fix> = Vec::with_capacity(fixes.len());
    for fix in fixes {
        if fix.span.end as usize > text.len() {
            continue;
        }
        if accepted.last().is_some_and(|prev| prev.span.overlaps(fix.span) || prev.span == fix.span) {
            continue;
        }
        accepted.push(fix);
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for fix in &accepted {
        let (start, end) = (fix.span.start as usize, fix.span.end as usize);
        let Some(head) = text.get(cursor..start) else {
            continue;
        };
        out.push_str(head);
        out.push_str(&fix.replacement);
        cursor = end;
    }
    out.push_str(text.get(cursor..).unwrap_or_default());
    (out, accepted.len())
}

#[cfg(test)]
#[path = "../tests/fix_tests.rs"]
mod tests;
