//! Node-kind → matcher table, resolved once per run.

use modz_common::Severity;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::error::LintError;
use crate::idiom::{Idiom, IdiomMeta};
use crate::idioms::IDIOMS;

/// One enabled idiom.
#[derive(Clone, Copy)]
pub struct Enabled {
    pub idiom: &'static dyn Idiom,
    pub severity: Severity,
}

impl Enabled {
    pub fn meta(&self) -> &'static IdiomMeta {
        self.idiom.meta()
    }
}

/// Enabled idioms and the kinds they are dispatched on.
///
/// Matchers for a kind run in catalogue order, whatever order the rules
/// were enabled in.
pub struct Registry {
    enabled: Vec<Enabled>,
    by_kind: FxHashMap<u16, SmallVec<[u16; 4]>>,
    type_aware: bool,
}

impl Registry {
    /// Build the table for `rules`.
    ///
    /// Fails on an unknown rule id, and on a rule that requires type
    /// information when `type_aware` is false; the latter is a configuration
    /// fault, never a silent skip.
    pub fn new<'r>(
        rules: impl IntoIterator<Item = (&'r str, Severity)>,
        type_aware: bool,
    ) -> Result<Registry, LintError> {
        let mut chosen: Vec<(usize, Severity)> = Vec::new();
        for (id, severity) in rules {
            let Some(position) = IDIOMS.iter().position(|idiom| idiom.meta().id == id) else {
                return Err(LintError::UnknownRule(id.to_string()));
            };
            let meta = IDIOMS[position].meta();
            if meta.requires_types && !type_aware {
                return Err(LintError::TypeInformationRequired {
                    rule: meta.id.to_string(),
                });
            }
            match chosen.iter_mut().find(|(existing, _)| *existing == position) {
                Some(entry) => entry.1 = severity,
                None => chosen.push((position, severity)),
            }
        }
        chosen.sort_by_key(|(position, _)| *position);

        let enabled: Vec<Enabled> = chosen
            .into_iter()
            .map(|(position, severity)| Enabled {
                idiom: IDIOMS[position],
                severity,
            })
            .collect();

        let mut by_kind: FxHashMap<u16, SmallVec<[u16; 4]>> = FxHashMap::default();
        for (slot, entry) in enabled.iter().enumerate() {
            for &kind in entry.meta().kinds {
                by_kind.entry(kind).or_default().push(slot as u16);
            }
        }

        debug!(rules = enabled.len(), kinds = by_kind.len(), type_aware, "registry built");
        Ok(Registry {
            enabled,
            by_kind,
            type_aware,
        })
    }

    /// Matchers registered for `kind`, in dispatch order.
    pub fn matchers_for(&self, kind: u16) -> impl Iterator<Item = &Enabled> {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .filter_map(|&slot| self.enabled.get(slot as usize))
    }

    pub fn enabled(&self) -> &[Enabled] {
        &self.enabled
    }

    pub fn type_aware(&self) -> bool {
        self.type_aware
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}

/// Look up an idiom by id.
pub fn find_idiom(id: &str) -> Option<&'static dyn Idiom> {
    IDIOMS.iter().copied().find(|idiom| idiom.meta().id == id)
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
