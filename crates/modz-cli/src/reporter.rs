use colored::Colorize;
use modz_common::{Diagnostic, Severity};
use serde::Serialize;

/// Renders findings for the terminal.
pub struct Reporter {
    color: bool,
}

/// Counts printed after the findings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
    /// Findings whose automatic fix was not applied.
    pub fixable: usize,
    /// Fixes written back by `--fix`.
    pub fixed: usize,
}

impl Summary {
    pub fn add(&mut self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            match diagnostic.severity {
                Severity::Error => self.errors += 1,
                Severity::Warning => self.warnings += 1,
            }
            if diagnostic.is_fixable() {
                self.fixable += 1;
            }
        }
    }
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// All findings of one file, each followed by a source snippet.
    /// `text` is the source the spans refer to.
    pub fn render_file(&self, text: &str, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diagnostic in diagnostics {
            out.push_str(&self.format_diagnostic(text, diagnostic));
            out.push('\n');
        }
        out
    }

    pub fn format_diagnostic(&self, text: &str, diagnostic: &Diagnostic) -> String {
        let location = format!(
            "{}:{}:{}",
            diagnostic.file, diagnostic.start.line, diagnostic.start.column
        );
        let mut output = String::new();
        output.push_str(&location);
        output.push_str(" - ");
        output.push_str(&self.format_severity(diagnostic.severity));
        output.push_str(": ");
        output.push_str(&diagnostic.message);
        output.push(' ');
        output.push_str(&self.format_rule(&diagnostic.rule_id));
        if let Some(snippet) = self.format_snippet(text, diagnostic) {
            output.push_str(&snippet);
        }
        output
    }

    /// The first line of the finding with its span underlined:
    ///
    /// ```text
    ///     3   const last = items[items.length - 1];
    ///                      ~~~~~~~~~~~~~~~~~~~~~~~
    /// ```
    fn format_snippet(&self, text: &str, diagnostic: &Diagnostic) -> Option<String> {
        if diagnostic.span.is_empty() {
            return None;
        }
        let line_num = diagnostic.start.line;
        let line_text = text.lines().nth(line_num.checked_sub(1)? as usize)?;
        let first_column = diagnostic.start.column - 1;
        // Spans that continue past this line are underlined to its end.
        let last_column = if diagnostic.end.line == line_num {
            diagnostic.end.column - 1
        } else {
            u32::MAX
        };

        let mut underline = String::new();
        for (i, ch) in line_text.chars().enumerate() {
            let column = i as u32;
            if column >= last_column {
                break;
            }
            let marker = if column < first_column { ' ' } else { '~' };
            if ch == '\t' {
                underline.extend(std::iter::repeat_n(marker, 4));
            } else {
                underline.push(marker);
            }
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!("\n  {line_num:>3}   {}\n        {underline}", line_text.replace('\t', "    ")))
    }

    fn format_severity(&self, severity: Severity) -> String {
        let label = severity.as_str();
        if !self.color {
            return label.to_string();
        }
        match severity {
            Severity::Error => label.red().bold().to_string(),
            Severity::Warning => label.yellow().bold().to_string(),
        }
    }

    fn format_rule(&self, rule_id: &str) -> String {
        let label = format!("[{rule_id}]");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }

    pub fn render_summary(&self, summary: &Summary) -> String {
        let problems = summary.errors + summary.warnings;
        let mut out = if problems == 0 {
            format!("No problems found in {} file(s).", summary.files)
        } else {
            format!(
                "Found {problems} problem(s) ({} error(s), {} warning(s)) in {} file(s).",
                summary.errors, summary.warnings, summary.files
            )
        };
        if summary.fixable > 0 {
            out.push_str(&format!(" {} fixable with --fix.", summary.fixable));
        }
        if summary.fixed > 0 {
            out.push_str(&format!(" Applied {} fix(es).", summary.fixed));
        }
        if self.color && summary.errors > 0 {
            out = out.red().to_string();
        }
        out
    }
}

/// Findings and totals as one JSON document.
pub fn render_json(diagnostics: &[Diagnostic], summary: &Summary) -> serde_json::Result<String> {
    #[derive(Serialize)]
    struct Report<'a> {
        diagnostics: &'a [Diagnostic],
        summary: &'a Summary,
    }
    serde_json::to_string_pretty(&Report { diagnostics, summary })
}

#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod tests;
