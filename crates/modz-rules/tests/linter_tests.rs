//! End-to-end tests for the single-pass linter and the fix loop.
use super::*;
use crate::presets::preset;
use modz_common::{Position, Severity};

fn linter(rules: &[(&str, Severity)]) -> Linter {
    Linter::new(Registry::new(rules.iter().copied(), false).unwrap())
}

#[test]
fn last_element_scenario() {
    let linter = linter(&[("prefer-array-at", Severity::Error)]);
    let source = "const last = myArray[myArray.length - 1];";
    let found = linter.lint_source("a.js", source).unwrap();
    assert_eq!(found.len(), 1);
    let finding = &found[0];
    assert_eq!(finding.rule_id, "prefer-array-at");
    assert_eq!(finding.message_key, "preferAt");
    assert_eq!(finding.severity, Severity::Error);
    assert_eq!(finding.file, "a.js");
    assert_eq!(finding.span.slice(source), "myArray[myArray.length - 1]");
    assert_eq!(finding.fix.as_ref().unwrap().replacement, "myArray.at(-1)");

    let other_offset = linter.lint_source("a.js", "const x = myArray[myArray.length - 2];").unwrap();
    assert!(other_offset.is_empty());
}

#[test]
fn positions_are_one_based() {
    let linter = linter(&[("prefer-array-at", Severity::Warning)]);
    let source = "const a = 1;\nconst x = arr[arr.length - 1];";
    let found = linter.lint_source("a.js", source).unwrap();
    assert_eq!(found[0].start, Position { line: 2, column: 11 });
    assert_eq!(found[0].end, Position { line: 2, column: 30 });
    assert_eq!(found[0].severity, Severity::Warning);
}

#[test]
fn findings_are_sorted_by_position() {
    let linter = linter(&[
        ("prefer-includes", Severity::Error),
        ("prefer-array-at", Severity::Error),
    ]);
    let source = "if (list.indexOf(x) !== -1) {}\nconst y = list[list.length - 1];\nconst z = list.indexOf(y) === -1;";
    let found = linter.lint_source("a.ts", source).unwrap();
    let rules: Vec<_> = found.iter().map(|d| d.rule_id.as_str()).collect();
    assert_eq!(rules, ["prefer-includes", "prefer-array-at", "prefer-includes"]);
    assert!(found.windows(2).all(|pair| pair[0].span.start <= pair[1].span.start));
}

#[test]
fn messages_render_captures() {
    let linter = linter(&[("prefer-includes", Severity::Error)]);
    let found = linter.lint_source("a.js", "const has = arr.indexOf(x) !== -1;").unwrap();
    assert_eq!(found[0].message_key, "preferIncludes");
    assert!(!found[0].message.contains('{'), "unrendered message: {}", found[0].message);
}

#[test]
fn syntax_errors_fail_the_file() {
    let linter = linter(&[("prefer-array-at", Severity::Error)]);
    let err = linter.lint_source("broken.js", "const = ;").unwrap_err();
    assert!(matches!(err, LintError::Parse { ref file, line: 1, .. } if file == "broken.js"));
}

#[test]
fn untouched_source_reports_nothing() {
    let linter = linter(&[
        ("prefer-array-at", Severity::Error),
        ("prefer-includes", Severity::Error),
        ("prefer-nullish-coalescing", Severity::Error),
    ]);
    let source = "export function sum(xs) {\n  let total = 0;\n  for (const x of xs) total += x;\n  return total;\n}\n";
    assert!(linter.lint_source("a.js", source).unwrap().is_empty());
}

#[test]
fn fix_loop_resolves_nested_matches_over_passes() {
    let linter = linter(&[("prefer-exponentiation-operator", Severity::Error)]);
    let outcome = linter
        .fix_source("a.js", "const p = Math.pow(Math.pow(a, b), c);", 10)
        .unwrap();
    assert_eq!(outcome.text, "const p = (a ** b) ** c;");
    assert_eq!(outcome.applied, 2);
    assert_eq!(outcome.passes, 2);
    assert!(outcome.remaining.is_empty());
    assert!(outcome.changed());
}

#[test]
fn fix_loop_stops_at_the_pass_limit() {
    let linter = linter(&[("prefer-exponentiation-operator", Severity::Error)]);
    let outcome = linter
        .fix_source("a.js", "const p = Math.pow(Math.pow(a, b), c);", 1)
        .unwrap();
    assert_eq!(outcome.text, "const p = Math.pow(a, b) ** c;");
    assert_eq!(outcome.passes, 1);
    assert_eq!(outcome.remaining.len(), 1);
}

#[test]
fn fix_loop_applies_independent_fixes_together() {
    let linter = linter(&[
        ("prefer-includes", Severity::Error),
        ("prefer-nullish-coalescing", Severity::Error),
    ]);
    let source = "const a = arr.indexOf(x) === -1;\nconst b = value !== null && value !== undefined ? value : fallback;";
    let outcome = linter.fix_source("a.js", source, 10).unwrap();
    assert_eq!(outcome.text, "const a = !arr.includes(x);\nconst b = value ?? fallback;");
    assert_eq!(outcome.applied, 2);
    assert_eq!(outcome.passes, 1);
}

#[test]
fn fix_loop_never_applies_suggestions() {
    let linter = linter(&[("prefer-array-to-spliced", Severity::Error)]);
    let source = "const s = items.slice().splice(1, 2);";
    let outcome = linter.fix_source("a.js", source, 10).unwrap();
    assert_eq!(outcome.text, source);
    assert!(!outcome.changed());
    assert_eq!(outcome.passes, 0);
    assert_eq!(outcome.remaining.len(), 1);
}

#[test]
fn report_only_findings_carry_no_fix() {
    let linter = linter(&[("prefer-static-regex", Severity::Warning)]);
    let found = linter
        .lint_source("a.js", "function f(s) { return /a+/.test(s); }")
        .unwrap();
    assert_eq!(found.len(), 1);
    assert!(!found[0].is_fixable());
}

#[test]
fn long_operator_chains_lint_and_fix() {
    let linter = Linter::new(Registry::new(preset("all").unwrap(), false).unwrap());
    let chain = "a + ".repeat(10_000);
    let source = format!("x = {chain}xs[xs.length - 1];");
    let found = linter.lint_source("a.js", &source).unwrap();
    let rules: Vec<_> = found.iter().map(|d| d.rule_id.as_str()).collect();
    assert_eq!(rules, ["prefer-array-at"]);

    let outcome = linter.fix_source("a.js", &source, 10).unwrap();
    assert_eq!(outcome.text, format!("x = {chain}xs.at(-1);"));

    let members = format!("const v = o{}.indexOf(k) !== -1;", ".p".repeat(10_000));
    let found = linter.lint_source("a.js", &members).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].rule_id, "prefer-includes");
}
