use super::*;
use modz_common::{Fix, Position, Span};

fn diagnostic(source: &str, needle: &str, severity: Severity) -> Diagnostic {
    let start = source.find(needle).unwrap() as u32;
    let end = start + needle.len() as u32;
    let line_map = modz_common::LineMap::new(source);
    Diagnostic {
        rule_id: "prefer-array-at".to_string(),
        message_key: "preferAt".to_string(),
        message: "Use `.at(-1)`.".to_string(),
        severity,
        file: "src/a.js".to_string(),
        span: Span::new(start, end),
        start: line_map.position_of(source, start),
        end: line_map.position_of(source, end),
        fix: Some(Fix::new(Span::new(start, end), "items.at(-1)")),
        suggestions: Vec::new(),
    }
}

#[test]
fn human_format_has_location_rule_and_underline() {
    let source = "const a = 1;\nconst last = items[items.length - 1];\n";
    let finding = diagnostic(source, "items[items.length - 1]", Severity::Error);
    assert_eq!(finding.start, Position { line: 2, column: 14 });

    let rendered = Reporter::new(false).format_diagnostic(source, &finding);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "src/a.js:2:14 - error: Use `.at(-1)`. [prefer-array-at]");
    assert_eq!(lines[1], "    2   const last = items[items.length - 1];");
    assert_eq!(lines[2], format!("        {}{}", " ".repeat(13), "~".repeat(23)));
}

#[test]
fn multi_line_spans_underline_to_the_end_of_the_first_line() {
    let source = "x = Math.pow(\n  a,\n  b\n);";
    let finding = diagnostic(source, "Math.pow(\n  a,\n  b\n)", Severity::Warning);
    let rendered = Reporter::new(false).format_diagnostic(source, &finding);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "src/a.js:1:5 - warning: Use `.at(-1)`. [prefer-array-at]");
    assert_eq!(lines[2], format!("        {}{}", " ".repeat(4), "~".repeat(9)));
}

#[test]
fn summary_counts_problems_and_fixes() {
    let source = "const last = items[items.length - 1];";
    let mut summary = Summary {
        files: 2,
        ..Summary::default()
    };
    summary.add(&[
        diagnostic(source, "items[items.length - 1]", Severity::Error),
        diagnostic(source, "items[items.length - 1]", Severity::Warning),
    ]);
    assert_eq!((summary.errors, summary.warnings, summary.fixable), (1, 1, 2));
    assert_eq!(
        Reporter::new(false).render_summary(&summary),
        "Found 2 problem(s) (1 error(s), 1 warning(s)) in 2 file(s). 2 fixable with --fix."
    );

    let clean = Summary {
        files: 3,
        fixed: 4,
        ..Summary::default()
    };
    assert_eq!(
        Reporter::new(false).render_summary(&clean),
        "No problems found in 3 file(s). Applied 4 fix(es)."
    );
}

#[test]
fn json_output_is_camel_case() {
    let source = "const last = items[items.length - 1];";
    let findings = [diagnostic(source, "items[items.length - 1]", Severity::Error)];
    let mut summary = Summary::default();
    summary.add(&findings);
    let json = render_json(&findings, &summary).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let first = &value["diagnostics"][0];
    assert_eq!(first["ruleId"], "prefer-array-at");
    assert_eq!(first["severity"], "error");
    assert_eq!(first["start"]["line"], 1);
    assert_eq!(first["fix"]["replacement"], "items.at(-1)");
    assert_eq!(value["summary"]["errors"], 1);
}
