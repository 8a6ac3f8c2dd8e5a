use super::*;
use clap::Parser;
use std::fs;

fn args(extra: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("modz").chain(extra.iter().copied())).unwrap()
}

fn output(result: &RunResult, format: OutputFormat) -> String {
    let mut out = Vec::new();
    print_report(result, format, false, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn reports_findings_with_the_default_preset() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.js"), "const last = items[items.length - 1];\n").unwrap();
    fs::write(dir.path().join("b.js"), "const first = items[0];\n").unwrap();

    let result = run(&args(&[]), dir.path()).unwrap();
    assert_eq!(result.summary.files, 2);
    assert_eq!(result.summary.errors, 1);
    assert_eq!(result.exit_code(), EXIT_FINDINGS);

    let text = output(&result, OutputFormat::Human);
    assert!(text.starts_with("a.js:1:14 - error: "), "{text}");
    assert!(text.contains("[prefer-array-at]"));
    assert!(text.trim_end().ends_with("1 fixable with --fix."), "{text}");
}

#[test]
fn clean_runs_exit_successfully() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.ts"), "export const n: number = 1;\n").unwrap();
    let result = run(&args(&[]), dir.path()).unwrap();
    assert_eq!(result.exit_code(), EXIT_SUCCESS);
    assert!(output(&result, OutputFormat::Human).contains("No problems found in 1 file(s)."));
}

#[test]
fn warnings_do_not_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.js"), "const t = new Date().getTime();\n").unwrap();
    let result = run(&args(&["--rule", "prefer-date-now=warn"]), dir.path()).unwrap();
    assert_eq!(result.summary.warnings, 1);
    assert_eq!(result.exit_code(), EXIT_SUCCESS);
}

#[test]
fn fix_writes_files_back() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.js");
    fs::write(
        &file,
        "const a = arr.indexOf(x) === -1;\nconst p = Math.pow(Math.pow(a, b), c);\n",
    )
    .unwrap();

    let cli = args(&[
        "--fix",
        "--rule",
        "prefer-includes=error",
        "--rule",
        "prefer-exponentiation-operator=error",
    ]);
    let result = run(&cli, dir.path()).unwrap();
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "const a = !arr.includes(x);\nconst p = (a ** b) ** c;\n"
    );
    assert_eq!(result.summary.fixed, 3);
    assert_eq!(result.exit_code(), EXIT_SUCCESS);
}

#[test]
fn fix_respects_the_pass_limit() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.js");
    fs::write(&file, "const p = Math.pow(Math.pow(a, b), c);\n").unwrap();
    let cli = args(&["--fix", "--max-fix-passes", "1", "--rule", "prefer-exponentiation-operator=error"]);
    let result = run(&cli, dir.path()).unwrap();
    assert_eq!(fs::read_to_string(&file).unwrap(), "const p = Math.pow(a, b) ** c;\n");
    assert_eq!(result.summary.errors, 1);
    assert_eq!(result.exit_code(), EXIT_FINDINGS);
}

#[test]
fn parse_errors_are_faults_for_that_file_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.js"), "const = ;\n").unwrap();
    fs::write(dir.path().join("good.js"), "const last = xs[xs.length - 1];\n").unwrap();
    let result = run(&args(&[]), dir.path()).unwrap();
    assert!(result.has_faults());
    assert_eq!(result.exit_code(), EXIT_FAULT);
    let faults: Vec<_> = fault_messages(&result).collect();
    assert_eq!(faults.len(), 1);
    assert!(faults[0].starts_with("bad.js:1:"), "{}", faults[0]);
    assert_eq!(result.summary.errors, 1);
}

#[test]
fn config_file_selects_rules_and_globs() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("modz.json"),
        r#"{ "rules": { "prefer-date-now": "error" }, "exclude": ["vendor/**"] }"#,
    )
    .unwrap();
    fs::create_dir(dir.path().join("vendor")).unwrap();
    fs::write(dir.path().join("vendor/old.js"), "const t = +new Date();\n").unwrap();
    fs::write(dir.path().join("app.js"), "const t = +new Date();\nconst l = xs[xs.length - 1];\n").unwrap();

    let result = run(&args(&[]), dir.path()).unwrap();
    assert_eq!(result.summary.files, 1);
    let rules: Vec<_> = result.diagnostics().map(|d| d.rule_id.as_str()).collect();
    assert_eq!(rules, ["prefer-date-now"]);
}

#[test]
fn configuration_faults_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("modz.json"), r#"{ "extends": "nope" }"#).unwrap();
    let err = run(&args(&[]), dir.path()).unwrap_err();
    assert!(err.to_string().contains("unknown preset `nope`"));

    let err = run(&args(&["--config", "missing.json"]), dir.path()).unwrap_err();
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn typed_rules_without_type_awareness_fail_up_front() {
    let dir = tempfile::tempdir().unwrap();
    let err = run(&args(&["--rule", "no-indexof-equality=error"]), dir.path()).unwrap_err();
    assert!(err.to_string().contains("requires type information"));
}

#[test]
fn json_output_lists_every_finding() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.js"), "const l = xs[xs.length - 1];\nconst m = ys[ys.length - 1];\n").unwrap();
    let result = run(&args(&["--format", "json"]), dir.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output(&result, OutputFormat::Json)).unwrap();
    assert_eq!(value["diagnostics"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["diagnostics"][1]["start"]["line"], 2);
    assert_eq!(value["summary"]["files"], 1);
}

#[test]
fn unreadable_files_are_faults_named_relative_to_the_root() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/latin1.js"), b"const s = '\xe9';\n").unwrap();
    let result = run(&args(&[]), dir.path()).unwrap();
    assert_eq!(result.exit_code(), EXIT_FAULT);
    let faults: Vec<_> = fault_messages(&result).collect();
    let expected = format!("{}: failed to read: ", Path::new("src").join("latin1.js").display());
    assert!(faults[0].starts_with(&expected), "{}", faults[0]);
}
