use super::*;
use clap::Parser;
use modz_common::Severity;

fn args(extra: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("modz").chain(extra.iter().copied())).unwrap()
}

fn config(json: &str) -> ModzConfig {
    parse_config(Path::new("modz.json"), json).unwrap()
}

fn rule_ids(resolved: &ResolvedConfig) -> Vec<&'static str> {
    resolved.rules.keys().copied().collect()
}

#[test]
fn parses_every_key() {
    let parsed = config(
        r#"{
            "extends": ["modernization"],
            "rules": { "prefer-date-now": "warn", "prefer-array-at": 0, "prefer-includes": 2 },
            "typeAware": true,
            "include": ["src/**"],
            "exclude": ["**/*.test.ts"]
        }"#,
    );
    assert_eq!(parsed.extends, Some(Extends::Many(vec!["modernization".to_string()])));
    let levels: Vec<_> = parsed.rules.iter().map(|(id, level)| (id.as_str(), *level)).collect();
    assert_eq!(
        levels,
        [
            ("prefer-date-now", RuleLevel::Warn),
            ("prefer-array-at", RuleLevel::Off),
            ("prefer-includes", RuleLevel::Error),
        ]
    );
    assert_eq!(parsed.type_aware, Some(true));
    assert_eq!(parsed.include.as_deref(), Some(&["src/**".to_string()][..]));
}

#[test]
fn extends_accepts_a_single_name() {
    assert_eq!(
        config(r#"{ "extends": "recommended" }"#).extends,
        Some(Extends::One("recommended".to_string()))
    );
}

#[test]
fn rejects_bad_levels_and_unknown_keys() {
    assert!(parse_config(Path::new("modz.json"), r#"{ "rules": { "prefer-array-at": "loud" } }"#).is_err());
    assert!(parse_config(Path::new("modz.json"), r#"{ "rules": { "prefer-array-at": 3 } }"#).is_err());
    let err = parse_config(Path::new("modz.json"), r#"{ "rulez": {} }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn level_spellings() {
    assert_eq!(RuleLevel::parse("off").unwrap(), RuleLevel::Off);
    assert_eq!(RuleLevel::parse("WARN").unwrap(), RuleLevel::Warn);
    assert_eq!(RuleLevel::parse("2").unwrap(), RuleLevel::Error);
    assert_eq!(RuleLevel::Warn.severity(), Some(Severity::Warning));
    assert_eq!(RuleLevel::Off.severity(), None);
    assert!(RuleLevel::parse("loud").is_err());
}

#[test]
fn recommended_is_the_default() {
    let resolved = resolve(&ModzConfig::default(), &args(&[])).unwrap();
    assert_eq!(rule_ids(&resolved), ["prefer-array-at"]);
    assert!(!resolved.type_aware);
    assert!(resolved.include.is_none() && resolved.exclude.is_none());
}

#[test]
fn layers_apply_in_order() {
    let file = config(
        r#"{
            "extends": "modernization",
            "rules": { "prefer-array-fill": "off", "prefer-includes": "warn" }
        }"#,
    );
    let resolved = resolve(
        &file,
        &args(&["--preset", "recommended", "--rule", "prefer-date-now=error", "--rule", "prefer-includes=error"]),
    )
    .unwrap();
    assert_eq!(rule_ids(&resolved), ["prefer-array-at", "prefer-includes", "prefer-date-now"]);
    assert_eq!(resolved.rules["prefer-includes"], Severity::Error);
}

#[test]
fn rules_alone_replace_the_default() {
    let resolved = resolve(&config(r#"{ "rules": { "prefer-date-now": "warn" } }"#), &args(&[])).unwrap();
    assert_eq!(rule_ids(&resolved), ["prefer-date-now"]);
    assert_eq!(resolved.rules["prefer-date-now"], Severity::Warning);
}

#[test]
fn unknown_names_are_faults() {
    let err = resolve(&config(r#"{ "extends": "strict" }"#), &args(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownPreset(ref name) if name == "strict"));

    let err = resolve(&ModzConfig::default(), &args(&["--rule", "prefer-magic=warn"])).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownRule(ref id) if id == "prefer-magic"));

    let err = resolve(&ModzConfig::default(), &args(&["--rule", "prefer-array-at"])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRuleFlag(_)));
}

#[test]
fn typed_rules_need_type_awareness() {
    let cli = args(&["--rule", "no-indexof-equality=error"]);
    let resolved = resolve(&ModzConfig::default(), &cli).unwrap();
    let err = resolved.registry().err();
    assert!(matches!(err, Some(ConfigError::Lint(LintError::TypeInformationRequired { .. }))));

    let resolved = resolve(&config(r#"{ "typeAware": true }"#), &cli).unwrap();
    assert!(resolved.type_aware);
    assert!(resolved.registry().is_ok());

    let resolved = resolve(&ModzConfig::default(), &args(&["--type-aware", "--rule", "no-indexof-equality=1"])).unwrap();
    assert!(resolved.registry().is_ok());
}

#[test]
fn globs_compile_and_match() {
    let set = compile_globset(&["src/**/*.ts".to_string()]).unwrap();
    assert!(set.is_match("src/a/b.ts"));
    assert!(!set.is_match("lib/b.ts"));
    assert!(matches!(
        compile_globset(&["src/[".to_string()]),
        Err(ConfigError::InvalidGlob { .. })
    ));
}

#[test]
fn config_file_lookup() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(config_path(&args(&[]), dir.path()), None);

    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{}").unwrap();
    assert_eq!(config_path(&args(&[]), dir.path()), Some(dir.path().join(CONFIG_FILE_NAME)));
    assert_eq!(
        config_path(&args(&["--config", "other.json"]), dir.path()),
        Some(dir.path().join("other.json"))
    );
}

#[test]
fn load_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("missing.json"));
}
