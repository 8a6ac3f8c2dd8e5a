use modz_common::{Diagnostic, Severity};

use crate::fix::apply_fixes;
use crate::linter::Linter;
use crate::registry::Registry;

fn linter(rule: &str, type_aware: bool) -> Linter {
    Linter::new(Registry::new([(rule, Severity::Error)], type_aware).expect("known rule"))
}

fn findings_with(rule: &str, type_aware: bool, source: &str) -> Vec<Diagnostic> {
    linter(rule, type_aware)
        .lint_source("test.ts", source)
        .expect("source parses")
}

fn findings(rule: &str, source: &str) -> Vec<Diagnostic> {
    findings_with(rule, false, source)
}

fn assert_valid(rule: &str, source: &str) {
    let found = findings(rule, source);
    assert!(found.is_empty(), "unexpected findings in {source:?}: {found:#?}");
}

fn assert_valid_typed(rule: &str, source: &str) {
    let found = findings_with(rule, true, source);
    assert!(found.is_empty(), "unexpected findings in {source:?}: {found:#?}");
}

/// Apply the single finding's fix, check it covers the reported node, and
/// check the result is clean.
fn fixed_with(rule: &str, type_aware: bool, source: &str) -> String {
    let linter = linter(rule, type_aware);
    let found = linter.lint_source("test.ts", source).expect("source parses");
    assert_eq!(found.len(), 1, "expected one finding in {source:?}: {found:#?}");
    let fix = found[0].fix.as_ref().expect("finding has a fix");
    assert_eq!(fix.span, found[0].span);

    let (fixed, applied) = apply_fixes(source, [fix]);
    assert_eq!(applied, 1);
    let again = linter.lint_source("test.ts", &fixed).expect("fixed output parses");
    assert!(again.is_empty(), "{fixed:?} still reports: {again:#?}");
    fixed
}

fn assert_fix(rule: &str, source: &str, expected: &str) {
    assert_eq!(fixed_with(rule, false, source), expected);
}

fn assert_typed_fix(rule: &str, source: &str, expected: &str) {
    assert_eq!(fixed_with(rule, true, source), expected);
}

/// Apply the single finding's only suggestion.
fn suggested(rule: &str, source: &str) -> String {
    let found = findings(rule, source);
    assert_eq!(found.len(), 1, "expected one finding in {source:?}: {found:#?}");
    assert!(found[0].fix.is_none());
    assert_eq!(found[0].suggestions.len(), 1);
    found[0].suggestions[0].fix.apply(source)
}

// =============================================================================
// prefer-array-at
// =============================================================================

#[test]
fn array_at_rewrites_last_element_reads() {
    assert_fix(
        "prefer-array-at",
        "const last = myArray[myArray.length - 1];",
        "const last = myArray.at(-1);",
    );
    assert_fix(
        "prefer-array-at",
        "use(this.items[this.items.length - 1]);",
        "use(this.items.at(-1));",
    );
    assert_fix("prefer-array-at", "const x = a[a.length - 1]?.x;", "const x = a.at(-1)?.x;");
    assert_fix("prefer-array-at", "const x = a[a.length - 1].y;", "const x = a.at(-1).y;");
}

#[test]
fn array_at_keeps_comments_inside_the_capture() {
    assert_fix(
        "prefer-array-at",
        "const x = (a /* keep */ || b)[(a /* keep */ || b).length - 1];",
        "const x = (a /* keep */ || b).at(-1);",
    );
}

#[test]
fn array_at_declines_other_offsets_and_unsafe_receivers() {
    assert_valid("prefer-array-at", "const x = myArray[myArray.length - 2];");
    assert_valid("prefer-array-at", "const x = a[b.length - 1];");
    assert_valid("prefer-array-at", "const x = load()[load().length - 1];");
    assert_valid("prefer-array-at", "const x = a?.[a.length - 1];");
}

#[test]
fn array_at_declines_write_targets() {
    assert_valid("prefer-array-at", "myArray[myArray.length - 1] = 0;");
    assert_valid("prefer-array-at", "myArray[myArray.length - 1]++;");
    assert_valid("prefer-array-at", "delete myArray[myArray.length - 1];");
}

#[test]
fn array_at_consults_declared_types() {
    assert_valid_typed("prefer-array-at", "const n: number = 5;\nconst x = n[n.length - 1];");
    assert_typed_fix(
        "prefer-array-at",
        "const s: string = \"ab\";\nconst c = s[s.length - 1];",
        "const s: string = \"ab\";\nconst c = s.at(-1);",
    );
}

// =============================================================================
// prefer-array-fill
// =============================================================================

#[test]
fn array_fill_rewrites_constant_callbacks() {
    assert_fix(
        "prefer-array-fill",
        "const xs = Array.from({ length: 3 }, () => 0);",
        "const xs = Array.from({ length: 3 }).fill(0);",
    );
    assert_fix(
        "prefer-array-fill",
        "const xs = [...Array(5)].map(() => \"x\");",
        "const xs = Array(5).fill(\"x\");",
    );
    assert_fix(
        "prefer-array-fill",
        "const xs = Array.from({ length: n }, function () { return 1; });",
        "const xs = Array.from({ length: n }).fill(1);",
    );
}

#[test]
fn array_fill_declines_varying_callbacks() {
    assert_valid("prefer-array-fill", "const xs = [...Array(5)].map(() => Math.random());");
    assert_valid("prefer-array-fill", "const xs = Array.from({ length: 3 }, (_, i) => i);");
    assert_valid("prefer-array-fill", "const xs = Array.from({ length: 3 }, () => []);");
    assert_valid("prefer-array-fill", "const xs = Array.from({ length: 3 }, () => ({}));");
    assert_valid("prefer-array-fill", "const xs = [...Array(5)].map(function () { return this.x; });");
    assert_valid("prefer-array-fill", "const xs = [...Array(5)].map(() => 0, context);");
}

#[test]
fn array_fill_respects_a_shadowed_array() {
    assert_valid(
        "prefer-array-fill",
        "function f(Array) { return Array.from({ length: 2 }, () => 0); }",
    );
}

// =============================================================================
// prefer-array-from-map
// =============================================================================

#[test]
fn array_from_map_rewrites_spread_then_map() {
    assert_fix(
        "prefer-array-from-map",
        "const ys = [...set].map((x) => x * 2);",
        "const ys = Array.from(set, (x) => x * 2);",
    );
    assert_fix(
        "prefer-array-from-map",
        "const ys = [...nodes].map(function (n, i) { return i; });",
        "const ys = Array.from(nodes, function (n, i) { return i; });",
    );
}

#[test]
fn array_from_map_declines_other_mappers() {
    assert_valid("prefer-array-from-map", "const ys = [...a].map((x, i, all) => x);");
    assert_valid("prefer-array-from-map", "const ys = [...a, b].map((x) => x);");
    assert_valid("prefer-array-from-map", "const ys = [...a].map(fn);");
    assert_valid("prefer-array-from-map", "const ys = [...a].map(({ id }) => id);");
}

// =============================================================================
// prefer-includes
// =============================================================================

#[test]
fn includes_rewrites_comparisons_against_minus_one() {
    assert_fix(
        "prefer-includes",
        "if (arr.indexOf(x) !== -1) {}",
        "if (arr.includes(x)) {}",
    );
    assert_fix(
        "prefer-includes",
        "const missing = arr.indexOf(x) === -1;",
        "const missing = !arr.includes(x);",
    );
    assert_fix("prefer-includes", "const has = -1 != arr.indexOf(x);", "const has = arr.includes(x);");
    assert_fix("prefer-includes", "const has = arr.indexOf(x) > -1;", "const has = arr.includes(x);");
}

#[test]
fn includes_rewrites_comparisons_against_zero() {
    assert_fix("prefer-includes", "const has = arr.indexOf(x) >= 0;", "const has = arr.includes(x);");
    assert_fix("prefer-includes", "const none = 0 > arr.indexOf(x);", "const none = !arr.includes(x);");
}

#[test]
fn includes_rewrites_bitwise_not_in_boolean_context() {
    assert_fix("prefer-includes", "if (~arr.indexOf(x)) {}", "if (arr.includes(x)) {}");
    assert_fix("prefer-includes", "if (!~arr.indexOf(x)) {}", "if (!arr.includes(x)) {}");
    assert_valid("prefer-includes", "const n = ~arr.indexOf(x);");
}

#[test]
fn includes_keeps_the_start_index() {
    assert_fix(
        "prefer-includes",
        "const has = arr.indexOf(x, 2) !== -1;",
        "const has = arr.includes(x, 2);",
    );
}

#[test]
fn includes_declines_values_with_different_semantics() {
    assert_valid("prefer-includes", "const has = arr.indexOf(NaN) !== -1;");
    assert_valid("prefer-includes", "const has = arr.indexOf(undefined) === -1;");
    assert_valid("prefer-includes", "const first = arr.indexOf(x) === 0;");
    assert_valid("prefer-includes", "const odd = arr.indexOf(x) !== -2;");
    assert_valid("prefer-includes", "const has = arr?.indexOf(x) !== -1;");
}

#[test]
fn includes_declines_receivers_typed_as_neither_array_nor_string() {
    assert_valid_typed("prefer-includes", "const n: number = 1;\nconst has = n.indexOf(x) !== -1;");
}

// =============================================================================
// prefer-array-to-reversed / to-sorted / to-spliced
// =============================================================================

#[test]
fn to_reversed_and_to_sorted_replace_copy_then_mutate() {
    assert_fix(
        "prefer-array-to-reversed",
        "const r = items.slice().reverse();",
        "const r = items.toReversed();",
    );
    assert_fix(
        "prefer-array-to-sorted",
        "const s = items.concat().sort((a, b) => a - b);",
        "const s = items.toSorted((a, b) => a - b);",
    );
    assert_fix("prefer-array-to-sorted", "const s = items.slice(0).sort();", "const s = items.toSorted();");    assert_fix(
        "prefer-array-to-reversed",
        "const r = load().slice().reverse();",
        "const r = load().toReversed();",
    );
}

#[test]
fn spread_copies_need_a_known_array() {
    assert_valid("prefer-array-to-reversed", "const r = [...items].reverse();");
    assert_typed_fix(
        "prefer-array-to-reversed",
        "const items: number[] = [];\nconst r = [...items].reverse();",
        "const items: number[] = [];\nconst r = items.toReversed();",
    );
}

#[test]
fn copy_methods_decline_uncopied_receivers() {
    assert_valid("prefer-array-to-reversed", "items.reverse();");
    assert_valid("prefer-array-to-reversed", "const r = items.slice(1).reverse();");
    assert_valid("prefer-array-to-sorted", "const s = items.slice().sort(a, b);");
}

#[test]
fn to_spliced_is_only_a_suggestion() {
    assert_eq!(
        suggested("prefer-array-to-spliced", "const s = items.slice().splice(1, 2);"),
        "const s = items.toSpliced(1, 2);"
    );
}

// =============================================================================
// prefer-exponentiation-operator
// =============================================================================

#[test]
fn exponentiation_rewrites_math_pow() {
    assert_fix("prefer-exponentiation-operator", "const p = Math.pow(a, b);", "const p = a ** b;");
    assert_fix("prefer-exponentiation-operator", "const p = Math.pow(-2, x);", "const p = (-2) ** x;");
    assert_fix(
        "prefer-exponentiation-operator",
        "const p = Math.pow(a + /* one */ 1, b * 2);",
        "const p = (a + /* one */ 1) ** (b * 2);",
    );
}

#[test]
fn exponentiation_parenthesizes_for_its_position() {
    assert_fix("prefer-exponentiation-operator", "const p = -Math.pow(a, b);", "const p = -(a ** b);");
    assert_fix(
        "prefer-exponentiation-operator",
        "const p = Math.pow(a, b).toFixed(2);",
        "const p = (a ** b).toFixed(2);",
    );
    assert_fix("prefer-exponentiation-operator", "const p = 2 * Math.pow(a, b);", "const p = 2 * a ** b;");
}

#[test]
fn exponentiation_declines_shadowed_math_and_spread_arguments() {
    assert_valid(
        "prefer-exponentiation-operator",
        "function f(Math) { return Math.pow(a, b); }",
    );
    assert_valid("prefer-exponentiation-operator", "const p = Math.pow(...args);");
    assert_valid("prefer-exponentiation-operator", "const p = Math?.pow(a, b);");
}

// =============================================================================
// prefer-nullish-coalescing
// =============================================================================

#[test]
fn nullish_rewrites_strict_pair_checks() {
    assert_fix(
        "prefer-nullish-coalescing",
        "const r = value !== null && value !== undefined ? value : fallback;",
        "const r = value ?? fallback;",
    );
    assert_fix(
        "prefer-nullish-coalescing",
        "const r = value === null || value === undefined ? fallback : value;",
        "const r = value ?? fallback;",
    );
    assert_fix(
        "prefer-nullish-coalescing",
        "const r = undefined === value || null === value ? d : value;",
        "const r = value ?? d;",
    );
}

#[test]
fn nullish_rewrites_loose_checks() {
    assert_fix(
        "prefer-nullish-coalescing",
        "const r = value == null ? fallback : value;",
        "const r = value ?? fallback;",
    );
    assert_fix(
        "prefer-nullish-coalescing",
        "const r = opts.size != null ? opts.size : 10;",
        "const r = opts.size ?? 10;",
    );
}

#[test]
fn nullish_parenthesizes_short_circuit_fallbacks() {
    assert_fix(
        "prefer-nullish-coalescing",
        "const r = value != null ? value : a || b;",
        "const r = value ?? (a || b);",
    );
}

#[test]
fn nullish_rewrites_guarded_assignments() {
    assert_fix("prefer-nullish-coalescing", "if (value == null) value = 1;", "value ??= 1;");
    assert_fix(
        "prefer-nullish-coalescing",
        "if (obj.list == null) {\n  obj.list = [];\n}",
        "obj.list ??= [];",
    );
}

#[test]
fn nullish_declines_partial_or_mismatched_checks() {
    assert_valid("prefer-nullish-coalescing", "const r = value === null ? fallback : value;");
    assert_valid("prefer-nullish-coalescing", "const r = value != null ? fallback : value;");
    assert_valid("prefer-nullish-coalescing", "const r = a !== null && b !== undefined ? a : d;");
    assert_valid("prefer-nullish-coalescing", "const r = get() != null ? get() : d;");
    assert_valid("prefer-nullish-coalescing", "if (v == null) v = 1; else v = 2;");
    assert_valid("prefer-nullish-coalescing", "if (v == null) w = 1;");
}

#[test]
fn nullish_declines_a_shadowed_undefined() {
    assert_valid(
        "prefer-nullish-coalescing",
        "function f(undefined) { return v === null || v === undefined ? d : v; }",
    );
}

// =============================================================================
// prefer-object-has-own
// =============================================================================

#[test]
fn has_own_rewrites_both_spellings() {
    assert_fix(
        "prefer-object-has-own",
        "const own = Object.prototype.hasOwnProperty.call(obj, key);",
        "const own = Object.hasOwn(obj, key);",
    );
    assert_fix(
        "prefer-object-has-own",
        "if (cache.entries.hasOwnProperty(id)) {}",
        "if (Object.hasOwn(cache.entries, id)) {}",
    );
}

#[test]
fn has_own_declines_other_shapes() {
    assert_valid("prefer-object-has-own", "const own = obj.hasOwnProperty(a, b);");
    assert_valid("prefer-object-has-own", "const own = obj?.hasOwnProperty(key);");
    assert_valid(
        "prefer-object-has-own",
        "function f(Object) { return obj.hasOwnProperty(key); }",
    );
}

// =============================================================================
// prefer-spread-syntax
// =============================================================================

#[test]
fn spread_rewrites_concat_of_known_arrays() {
    assert_fix(
        "prefer-spread-syntax",
        "const all = [1, 2].concat([3]);",
        "const all = [...[1, 2], ...[3]];",
    );
    assert_valid("prefer-spread-syntax", "const all = a.concat(b);");
    assert_typed_fix(
        "prefer-spread-syntax",
        "const a: number[] = [];\nconst b: number[] = [];\nconst c = a.concat(b);",
        "const a: number[] = [];\nconst b: number[] = [];\nconst c = [...a, ...b];",
    );
}

#[test]
fn spread_rewrites_object_assign_onto_a_literal() {
    assert_fix(
        "prefer-spread-syntax",
        "const o = Object.assign({}, defaults, options);",
        "const o = { ...defaults, ...options };",
    );
    assert_fix(
        "prefer-spread-syntax",
        "const o = Object.assign({ a: 1 }, rest);",
        "const o = { a: 1, ...rest };",
    );
    assert_fix("prefer-spread-syntax", "Object.assign({}, a);", "({ ...a });");
}

#[test]
fn spread_declines_object_assign_with_other_targets() {
    assert_valid("prefer-spread-syntax", "Object.assign(target, a);");
    assert_valid("prefer-spread-syntax", "const o = Object.assign({ __proto__: null }, a);");
    assert_valid("prefer-spread-syntax", "const o = Object.assign({}, ...sources);");
    assert_valid("prefer-spread-syntax", "const o = Object.assign({});");
}

#[test]
fn spread_rewrites_apply_with_a_null_receiver() {
    assert_fix("prefer-spread-syntax", "fn.apply(null, [1, 2]);", "fn(...[1, 2]);");
    assert_fix(
        "prefer-spread-syntax",
        "function g() { return fn.apply(undefined, arguments); }",
        "function g() { return fn(...arguments); }",
    );
    assert_valid("prefer-spread-syntax", "obj.fn.apply(null, [1]);");
    assert_valid("prefer-spread-syntax", "fn.apply(this, [1]);");
    assert_valid("prefer-spread-syntax", "fn.apply(null, list);");
}

// =============================================================================
// prefer-url-canparse
// =============================================================================

#[test]
fn url_canparse_suggests_a_return() {
    let source = "function isValid(u) {\n  try {\n    new URL(u);\n    return true;\n  } catch {\n    return false;\n  }\n}";
    assert_eq!(
        suggested("prefer-url-canparse", source),
        "function isValid(u) {\n  return URL.canParse(u);\n}"
    );
}

#[test]
fn url_canparse_suggests_an_if_else() {
    let source = "function check(u) {\n  try {\n    new URL(u);\n    ok();\n  } catch (e) {\n    fail();\n  }\n}";
    assert_eq!(
        suggested("prefer-url-canparse", source),
        "function check(u) {\n  if (URL.canParse(u)) {\nok();\n} else {\nfail();\n}\n}"
    );
}

#[test]
fn url_canparse_declines_used_errors_and_finally() {
    assert_valid(
        "prefer-url-canparse",
        "function f(u) { try { new URL(u); ok(); } catch (e) { log(e); } }",
    );
    assert_valid(
        "prefer-url-canparse",
        "function f(u) { try { new URL(u); ok(); } catch { fail(); } finally { done(); } }",
    );
    assert_valid(
        "prefer-url-canparse",
        "function f(u) { try { parse(u); ok(); } catch { fail(); } }",
    );
}

// =============================================================================
// no-indexof-equality
// =============================================================================

#[test]
fn indexof_equality_uses_starts_with_on_strings() {
    assert_typed_fix(
        "no-indexof-equality",
        "const s: string = \"abc\";\nconst t = s.indexOf(\"a\") === 0;",
        "const s: string = \"abc\";\nconst t = s.startsWith(\"a\");",
    );
}

#[test]
fn indexof_equality_compares_the_first_element_on_arrays() {
    assert_typed_fix(
        "no-indexof-equality",
        "const xs: number[] = [];\nconst t = xs.indexOf(3) === 0;",
        "const xs: number[] = [];\nconst t = xs[0] === 3;",
    );
}

#[test]
fn indexof_equality_declines_other_positions_and_unknown_receivers() {
    assert_valid_typed("no-indexof-equality", "const xs: number[] = [];\nconst t = xs.indexOf(y) === 0;");
    assert_valid_typed("no-indexof-equality", "const s: string = \"\";\nconst t = s.indexOf(\"a\") === 1;");
    assert_valid_typed("no-indexof-equality", "const t = q.indexOf(\"a\") === 0;");
}

// =============================================================================
// prefer-timer-args
// =============================================================================

#[test]
fn timer_args_unwraps_arrow_callbacks() {
    assert_fix(
        "prefer-timer-args",
        "function tick(n) {}\nsetTimeout(() => tick(1), 100);",
        "function tick(n) {}\nsetTimeout(tick, 100, 1);",
    );
    assert_fix(
        "prefer-timer-args",
        "function poll(x) {}\nconst id = 3;\nsetInterval(() => poll(id), 50);",
        "function poll(x) {}\nconst id = 3;\nsetInterval(poll, 50, id);",
    );
    assert_fix(
        "prefer-timer-args",
        "function tick() {}\nwindow.setTimeout(() => tick(), 10);",
        "function tick() {}\nwindow.setTimeout(tick, 10);",
    );
}

#[test]
fn timer_args_unwraps_bind() {
    assert_fix("prefer-timer-args", "setTimeout(tick.bind(null, a), 5);", "setTimeout(tick, 5, a);");
}

#[test]
fn timer_args_declines_values_that_may_change() {
    assert_valid(
        "prefer-timer-args",
        "function tick(n) {}\nlet n = 1;\nn = 2;\nsetTimeout(() => tick(n), 1);",
    );
    assert_valid("prefer-timer-args", "function tick(n) {}\nsetTimeout(() => tick(a()), 1);");
    assert_valid("prefer-timer-args", "setTimeout(() => obj.m(), 1);");
    assert_valid("prefer-timer-args", "function tick() {}\nsetTimeout(() => { tick(); }, 1);");
    assert_valid("prefer-timer-args", "setTimeout(tick.bind(obj, 1), 1);");
    assert_valid(
        "prefer-timer-args",
        "function tick() {}\nfunction setTimeout(f, d) {}\nsetTimeout(() => tick(), 1);",
    );
}

// =============================================================================
// prefer-date-now
// =============================================================================

#[test]
fn date_now_rewrites_both_forms() {
    assert_fix("prefer-date-now", "const t = new Date().getTime();", "const t = Date.now();");
    assert_fix("prefer-date-now", "const t = +new Date();", "const t = Date.now();");
    assert_fix("prefer-date-now", "const t = new globalThis.Date().getTime();", "const t = globalThis.Date.now();");
}

#[test]
fn date_now_declines_dates_with_arguments_or_local_date() {
    assert_valid("prefer-date-now", "const t = new Date(0).getTime();");
    assert_valid("prefer-date-now", "class Date {}\nconst t = new Date().getTime();");
}

// =============================================================================
// prefer-regex-test
// =============================================================================

#[test]
fn regex_test_rewrites_match_and_exec_in_conditions() {
    assert_fix("prefer-regex-test", "if (s.match(/ab+/)) {}", "if (/ab+/.test(s)) {}");
    assert_fix("prefer-regex-test", "if (/x/.exec(s)) {}", "if (/x/.test(s)) {}");
    assert_fix(
        "prefer-regex-test",
        "const re = /a/i;\nif (str.match(re)) {}",
        "const re = /a/i;\nif (re.test(str)) {}",
    );
    assert_fix("prefer-regex-test", "while (!/b/.exec(s)) {}", "while (!/b/.test(s)) {}");
}

#[test]
fn regex_test_declines_global_and_value_uses() {
    assert_valid("prefer-regex-test", "if (s.match(/a/g)) {}");
    assert_valid("prefer-regex-test", "const m = s.match(/a/);");
    assert_valid("prefer-regex-test", "if (s.match(pattern)) {}");
    assert_valid("prefer-regex-test", "if (read().match(/a/)) {}");
}

// =============================================================================
// prefer-array-some
// =============================================================================

#[test]
fn array_some_rewrites_existence_checks() {
    assert_fix("prefer-array-some", "if (items.find(isReady)) {}", "if (items.some(isReady)) {}");
    assert_fix(
        "prefer-array-some",
        "const none = items.find((x) => x.ok) === undefined;",
        "const none = !items.some((x) => x.ok);",
    );
    assert_fix("prefer-array-some", "const has = items.find(p) !== undefined;", "const has = items.some(p);");
    assert_fix("prefer-array-some", "const has = !!items.find(p);", "const has = items.some(p);");
    assert_fix("prefer-array-some", "if (!items.find(p)) {}", "if (!items.some(p)) {}");
}

#[test]
fn array_some_declines_value_uses() {
    assert_valid("prefer-array-some", "const hit = items.find(p);");
    assert_valid("prefer-array-some", "const none = items.find(p) == undefined;");
    assert_valid("prefer-array-some", "const none = items.find(p) === null;");
    assert_valid_typed("prefer-array-some", "const s: string = \"\";\nif (s.find(p)) {}");
}

// =============================================================================
// prefer-inline-equality
// =============================================================================

#[test]
fn inline_equality_expands_short_literal_arrays() {
    assert_fix(
        "prefer-inline-equality",
        "if ([\"a\", \"b\"].includes(kind)) {}",
        "if (\"a\" === kind || \"b\" === kind) {}",
    );
    assert_fix(
        "prefer-inline-equality",
        "if (![1, 2].includes(code)) {}",
        "if (1 !== code && 2 !== code) {}",
    );
    assert_fix("prefer-inline-equality", "const ok = [A].includes(\"x\");", "const ok = A === \"x\";");
    assert_fix(
        "prefer-inline-equality",
        "const same = [true].includes(a === b);",
        "const same = true === (a === b);",
    );
}

#[test]
fn inline_equality_declines_nan_prone_and_long_arrays() {
    assert_valid("prefer-inline-equality", "const ok = [a, b].includes(x);");
    assert_valid("prefer-inline-equality", "const ok = [1, NaN].includes(x);");
    assert_valid("prefer-inline-equality", "const ok = [1, 2, 3, 4, 5, 6, 7].includes(x);");
    assert_valid("prefer-inline-equality", "const ok = [1].includes(next());");
    assert_valid("prefer-inline-equality", "const ok = [...xs].includes(x);");
}

#[test]
fn inline_equality_uses_set_lookup_for_spread_sets() {
    assert_typed_fix(
        "prefer-inline-equality",
        "const seen: Set<string> = new Set();\nif ([...seen].includes(k)) {}",
        "const seen: Set<string> = new Set();\nif (seen.has(k)) {}",
    );
}

// =============================================================================
// prefer-static-regex
// =============================================================================

#[test]
fn static_regex_reports_regexes_built_per_call() {
    let found = findings("prefer-static-regex", "function f(s) { return /ab/.test(s); }");
    assert_eq!(found.len(), 1);
    assert!(found[0].fix.is_none() && found[0].suggestions.is_empty());
    assert_eq!(found[0].message, "Move `/ab/` to module scope so it is not rebuilt on every call.");

    let found = findings(
        "prefer-static-regex",
        "function f(s) { return new RegExp(\"ab\", \"i\").test(s); }",
    );
    assert_eq!(found.len(), 1);
}

#[test]
fn static_regex_ignores_module_scope_and_stateful_or_dynamic_regexes() {
    assert_valid("prefer-static-regex", "const re = /ab/;");
    assert_valid("prefer-static-regex", "function f(s) { return /ab/g.exec(s); }");
    assert_valid("prefer-static-regex", "function f(p) { return new RegExp(p); }");
}
