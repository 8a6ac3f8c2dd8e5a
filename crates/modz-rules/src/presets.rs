//! Named rule sets.

use modz_common::Severity;

use crate::idioms::IDIOMS;

pub const PRESET_NAMES: &[&str] = &["recommended", "modernization", "performance-improvements", "all"];

const RECOMMENDED: &[&str] = &["prefer-array-at"];

const MODERNIZATION: &[&str] = &["prefer-array-at", "prefer-array-fill", "prefer-includes"];

const PERFORMANCE_IMPROVEMENTS: &[&str] = &[
    "prefer-array-from-map",
    "prefer-timer-args",
    "prefer-date-now",
    "prefer-regex-test",
    "prefer-array-some",
];

/// Rule ids of a preset, each at `error` severity.
pub fn preset(name: &str) -> Option<Vec<(&'static str, Severity)>> {
    let ids: Vec<&'static str> = match name {
        "recommended" => RECOMMENDED.to_vec(),
        "modernization" => MODERNIZATION.to_vec(),
        "performance-improvements" => PERFORMANCE_IMPROVEMENTS.to_vec(),
        "all" => IDIOMS
            .iter()
            .map(|idiom| idiom.meta())
            .filter(|meta| !meta.requires_types)
            .map(|meta| meta.id)
            .collect(),
        _ => return None,
    };
    Some(ids.into_iter().map(|id| (id, Severity::Error)).collect())
}
