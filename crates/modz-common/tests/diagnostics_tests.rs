use super::*;

fn sample() -> Diagnostic {
    Diagnostic {
        rule_id: "prefer-array-at".to_string(),
        message_key: "preferAt".to_string(),
        message: "Use .at(-1) instead of [arr.length - 1]".to_string(),
        severity: Severity::Error,
        file: "a.js".to_string(),
        span: Span::new(0, 19),
        start: Position { line: 1, column: 1 },
        end: Position { line: 1, column: 20 },
        fix: Some(Fix::new(Span::new(0, 19), "arr.at(-1)")),
        suggestions: Vec::new(),
    }
}

#[test]
fn fix_apply_replaces_exact_span() {
    let text = "arr[arr.length - 1];";
    let fix = Fix::new(Span::new(0, 19), "arr.at(-1)");
    assert_eq!(fix.apply(text), "arr.at(-1);");
}

#[test]
fn diagnostic_serializes_camel_case_and_skips_empty_suggestions() {
    let json = serde_json::to_value(sample()).unwrap();
    assert_eq!(json["ruleId"], "prefer-array-at");
    assert_eq!(json["messageKey"], "preferAt");
    assert_eq!(json["severity"], "error");
    assert_eq!(json["fix"]["replacement"], "arr.at(-1)");
    assert!(json.get("suggestions").is_none());
}

#[test]
fn diagnostic_round_trips_through_json() {
    let diag = sample();
    let text = serde_json::to_string(&diag).unwrap();
    let back: Diagnostic = serde_json::from_str(&text).unwrap();
    assert_eq!(back, diag);
    assert!(back.is_fixable());
}
