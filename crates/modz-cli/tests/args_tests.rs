use super::*;
use clap::Parser;

#[test]
fn defaults() {
    let args = CliArgs::try_parse_from(["modz"]).unwrap();
    assert!(args.paths.is_empty());
    assert!(!args.fix);
    assert!(!args.type_aware);
    assert_eq!(args.max_fix_passes, 10);
    assert_eq!(args.format, OutputFormat::Human);
    assert_eq!(args.color, None);
}

#[test]
fn repeated_presets_and_rules() {
    let args = CliArgs::try_parse_from([
        "modz",
        "--preset",
        "recommended",
        "--preset",
        "modernization",
        "--rule",
        "prefer-includes=warn",
        "--rule",
        "prefer-array-at=off",
        "src",
        "lib/a.ts",
    ])
    .unwrap();
    assert_eq!(args.presets, ["recommended", "modernization"]);
    assert_eq!(args.rules, ["prefer-includes=warn", "prefer-array-at=off"]);
    assert_eq!(args.paths, [PathBuf::from("src"), PathBuf::from("lib/a.ts")]);
}

#[test]
fn fix_json_and_type_aware() {
    let args = CliArgs::try_parse_from([
        "modz",
        "--fix",
        "--max-fix-passes",
        "3",
        "--format",
        "json",
        "--type-aware",
        "--config",
        "custom.json",
    ])
    .unwrap();
    assert!(args.fix);
    assert_eq!(args.max_fix_passes, 3);
    assert_eq!(args.format, OutputFormat::Json);
    assert!(args.type_aware);
    assert_eq!(args.config, Some(PathBuf::from("custom.json")));
}

#[test]
fn rejects_unknown_formats() {
    assert!(CliArgs::try_parse_from(["modz", "--format", "xml"]).is_err());
}
