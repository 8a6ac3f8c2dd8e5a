//! The single-pass linter: parse, bind, walk once, dispatch by kind.

use modz_binder::BinderState;
use modz_checker::{DeclaredTypeService, NoTypeService, TypeOracle, TypeService};
use modz_common::{Diagnostic, LineMap};
use modz_parser::node::NodeArena;
use modz_parser::{NodeIndex, ParserState};
use tracing::{debug, debug_span, trace};

use crate::context::MatchContext;
use crate::error::LintError;
use crate::fix::apply_fixes;
use crate::registry::Registry;
use crate::reporter::Reporter;

/// Result of repeatedly fixing one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixOutcome {
    pub text: String,
    /// Total fixes applied across all passes.
    pub applied: usize,
    pub passes: usize,
    /// Findings left in the final text.
    pub remaining: Vec<Diagnostic>,
}

impl FixOutcome {
    pub fn changed(&self) -> bool {
        self.applied > 0
    }
}

pub struct Linter {
    registry: Registry,
}

impl Linter {
    pub fn new(registry: Registry) -> Linter {
        Linter { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Lint one file. Files with syntax errors fail as a whole.
    pub fn lint_source(&self, file_name: &str, text: &str) -> Result<Vec<Diagnostic>, LintError> {
        let _span = debug_span!("lint_source", file = file_name, len = text.len()).entered();

        let mut parser = ParserState::new(file_name.to_string(), text.to_string());
        let root = parser.parse_source_file();
        if let Some(first) = parser.get_diagnostics().first() {
            let position = LineMap::new(text).position_of(text, first.start);
            debug!(errors = parser.get_diagnostics().len(), "parse failed");
            return Err(LintError::Parse {
                file: file_name.to_string(),
                line: position.line,
                column: position.column,
                message: first.message.clone(),
            });
        }
        let arena = parser.into_arena();

        let mut binder = BinderState::new();
        binder.bind_source_file(&arena, root);

        let declared;
        let service: &dyn TypeService = if self.registry.type_aware() {
            declared = DeclaredTypeService::new(&arena, &binder);
            &declared
        } else {
            &NoTypeService
        };
        let ctx = MatchContext::new(&arena, &binder, text, TypeOracle::new(service));

        let mut reporter = Reporter::new(file_name, text);
        self.walk(&ctx, &arena, root, &mut reporter);

        let mut diagnostics = reporter.into_diagnostics();
        diagnostics.sort_by(|a, b| a.span.start.cmp(&b.span.start).then_with(|| a.rule_id.cmp(&b.rule_id)));
        debug!(findings = diagnostics.len(), "linted");
        Ok(diagnostics)
    }

    /// Depth-first pre-order walk; every node is visited exactly once.
    fn walk(&self, ctx: &MatchContext<'_>, arena: &NodeArena, root: NodeIndex, reporter: &mut Reporter<'_>) {
        let mut stack = vec![root];
        let mut visited = 0usize;
        while let Some(node) = stack.pop() {
            visited += 1;
            if let Some(kind) = arena.kind(node) {
                for enabled in self.registry.matchers_for(kind) {
                    if let Some(m) = enabled.idiom.check(ctx, node) {
                        trace!(rule = enabled.meta().id, node = node.0, "matched");
                        reporter.report(ctx, enabled.meta(), enabled.severity, &m);
                    }
                }
            }
            stack.extend(arena.children(node).into_iter().rev());
        }
        trace!(visited, "walk complete");
    }

    /// Apply automatic fixes and re-lint until nothing changes or
    /// `max_passes` is reached.
    pub fn fix_source(&self, file_name: &str, text: &str, max_passes: usize) -> Result<FixOutcome, LintError> {
        let mut current = text.to_string();
        let mut applied = 0;
        let mut passes = 0;
        let mut diagnostics = self.lint_source(file_name, &current)?;
        while passes < max_passes {
            let (next, count) = apply_fixes(&current, diagnostics.iter().filter_map(|d| d.fix.as_ref()));
            if count == 0 {
                break;
            }
            passes += 1;
            applied += count;
            current = next;
            diagnostics = self.lint_source(file_name, &current)?;
        }
        debug!(file = file_name, applied, passes, "fixed");
        Ok(FixOutcome {
            text: current,
            applied,
            passes,
            remaining: diagnostics,
        })
    }
}

#[cfg(test)]
#[path = "../tests/linter_tests.rs"]
mod tests;
