//! `modz.json` loading and rule resolution.
//!
//! Settings are layered: presets named by `extends`, then the file's
//! `rules`, then `--preset` flags, then `--rule` flags. A later layer
//! overrides an earlier one rule by rule, and `off` removes a rule.

use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use thiserror::Error;

use modz_common::Severity;
use modz_rules::{LintError, Registry, find_idiom, preset};

use crate::args::CliArgs;

/// Default config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "modz.json";

/// Preset used when nothing selects any rule.
pub const DEFAULT_PRESET: &str = "recommended";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown preset `{0}`")]
    UnknownPreset(String),

    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("invalid rule setting `{0}`; expected ID=off|warn|error")]
    InvalidRuleFlag(String),

    #[error("invalid level `{0}`; expected off, warn, error, 0, 1 or 2")]
    InvalidLevel(String),

    #[error("invalid glob `{pattern}`: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error(transparent)]
    Lint(#[from] LintError),
}

/// Level of one rule, as written in config or on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RuleLevel {
    Off,
    Warn,
    Error,
}

impl RuleLevel {
    pub fn parse(value: &str) -> Result<RuleLevel, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "off" | "0" => Ok(RuleLevel::Off),
            "warn" | "warning" | "1" => Ok(RuleLevel::Warn),
            "error" | "2" => Ok(RuleLevel::Error),
            _ => Err(ConfigError::InvalidLevel(value.to_string())),
        }
    }

    pub fn severity(self) -> Option<Severity> {
        match self {
            RuleLevel::Off => None,
            RuleLevel::Warn => Some(Severity::Warning),
            RuleLevel::Error => Some(Severity::Error),
        }
    }
}

/// Accepts `"off" | "warn" | "error"` and `0 | 1 | 2`.
impl<'de> Deserialize<'de> for RuleLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumberOrString {
            Number(u64),
            String(String),
        }

        let text = match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::String(s) => s,
        };
        RuleLevel::parse(&text).map_err(Error::custom)
    }
}

/// One preset name or a list of them.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    pub fn names(&self) -> &[String] {
        match self {
            Extends::One(name) => std::slice::from_ref(name),
            Extends::Many(names) => names,
        }
    }
}

/// Contents of `modz.json`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModzConfig {
    #[serde(default)]
    pub extends: Option<Extends>,
    #[serde(default)]
    pub rules: IndexMap<String, RuleLevel>,
    #[serde(default)]
    pub type_aware: Option<bool>,
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
}

pub fn parse_config(path: &Path, source: &str) -> Result<ModzConfig, ConfigError> {
    serde_json::from_str(source).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_config(path: &Path) -> Result<ModzConfig, ConfigError> {
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(path, &source)
}

/// The config file for a run: `--config`, else `modz.json` in `cwd` if
/// present.
pub fn config_path(args: &CliArgs, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = &args.config {
        return Some(if path.is_relative() { cwd.join(path) } else { path.clone() });
    }
    let default_path = cwd.join(CONFIG_FILE_NAME);
    default_path.is_file().then_some(default_path)
}

/// Settings for one run after layering the config file and flags.
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Enabled rules in first-enabled order.
    pub rules: IndexMap<&'static str, Severity>,
    pub type_aware: bool,
    pub include: Option<GlobSet>,
    pub exclude: Option<GlobSet>,
}

impl ResolvedConfig {
    /// Build the rule registry. Fails when a rule that needs type
    /// information is enabled without `typeAware`.
    pub fn registry(&self) -> Result<Registry, ConfigError> {
        let rules = self.rules.iter().map(|(id, severity)| (*id, *severity));
        Ok(Registry::new(rules, self.type_aware)?)
    }
}

pub fn resolve(config: &ModzConfig, args: &CliArgs) -> Result<ResolvedConfig, ConfigError> {
    let mut rules: IndexMap<&'static str, Severity> = IndexMap::new();

    let file_presets = config.extends.as_ref().map(Extends::names).unwrap_or_default();
    add_presets(&mut rules, file_presets)?;
    for (id, level) in &config.rules {
        set_level(&mut rules, id, *level)?;
    }
    add_presets(&mut rules, &args.presets)?;
    for flag in &args.rules {
        let (id, level) = flag
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidRuleFlag(flag.clone()))?;
        set_level(&mut rules, id.trim(), RuleLevel::parse(level)?)?;
    }

    let nothing_selected = file_presets.is_empty()
        && args.presets.is_empty()
        && config.rules.is_empty()
        && args.rules.is_empty();
    if nothing_selected && let Some(entries) = preset(DEFAULT_PRESET) {
        rules.extend(entries);
    }

    Ok(ResolvedConfig {
        rules,
        type_aware: args.type_aware || config.type_aware.unwrap_or(false),
        include: config.include.as_deref().map(compile_globset).transpose()?,
        exclude: config.exclude.as_deref().map(compile_globset).transpose()?,
    })
}

fn add_presets(rules: &mut IndexMap<&'static str, Severity>, names: &[String]) -> Result<(), ConfigError> {
    for name in names {
        let entries = preset(name).ok_or_else(|| ConfigError::UnknownPreset(name.clone()))?;
        rules.extend(entries);
    }
    Ok(())
}

fn set_level(rules: &mut IndexMap<&'static str, Severity>, id: &str, level: RuleLevel) -> Result<(), ConfigError> {
    let idiom = find_idiom(id).ok_or_else(|| ConfigError::UnknownRule(id.to_string()))?;
    let id = idiom.meta().id;
    match level.severity() {
        Some(severity) => {
            rules.insert(id, severity);
        }
        None => {
            rules.shift_remove(id);
        }
    }
    Ok(())
}

pub fn compile_globset(globs: &[String]) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in globs {
        let glob = Glob::new(pattern).map_err(|source| ConfigError::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ConfigError::InvalidGlob {
        pattern: globs.join(", "),
        source,
    })
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod tests;
