//! Process-wide record of registered instrument names.

use std::collections::BTreeMap;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::{PromredError, Result};

static GLOBAL: LazyLock<MetricsNamespace> = LazyLock::new(MetricsNamespace::new);

/// Kind of a registered instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentKind {
    Counter,
    Histogram,
}

#[derive(Debug, Clone)]
struct Registration {
    kind: InstrumentKind,
    labels: Vec<&'static str>,
}

/// The set of instrument names claimed in one metrics namespace.
///
/// The `metrics` facade resolves instruments by name at record time and never
/// rejects duplicates, so two registries sharing a prefix would silently merge
/// their series. A namespace refuses the second registration instead.
///
/// [`MetricsNamespace::global`] is the namespace shared by the whole process;
/// tests create private ones to stay independent of each other.
#[derive(Debug, Default)]
pub struct MetricsNamespace {
    registered: Mutex<BTreeMap<String, Registration>>,
}

impl MetricsNamespace {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide namespace.
    pub fn global() -> &'static MetricsNamespace {
        &GLOBAL
    }

    /// Claim every name in `instruments`, or none of them.
    ///
    /// Fails with [`PromredError::RegistrationConflict`] naming the first
    /// instrument that is already registered.
    pub(crate) fn claim(
        &self,
        instruments: &[(&str, InstrumentKind, &[&'static str])],
    ) -> Result<()> {
        let mut registered = self.lock();

        if let Some((name, _, _)) = instruments
            .iter()
            .find(|(name, _, _)| registered.contains_key(*name))
        {
            return Err(PromredError::RegistrationConflict {
                name: (*name).to_string(),
            });
        }

        for (name, kind, labels) in instruments {
            debug!(metric = *name, kind = ?kind, labels = ?labels, "registering instrument");
            registered.insert(
                (*name).to_string(),
                Registration {
                    kind: *kind,
                    labels: labels.to_vec(),
                },
            );
        }
        Ok(())
    }

    /// Whether an instrument with this name has been registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    /// Kind and label names of a registered instrument.
    pub fn describe(&self, name: &str) -> Option<(InstrumentKind, Vec<&'static str>)> {
        self.lock()
            .get(name)
            .map(|r| (r.kind, r.labels.clone()))
    }

    /// All registered instrument names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Registration>> {
        // The table is only ever inserted into; a poisoned guard is still consistent.
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_registers_all_names() {
        let ns = MetricsNamespace::new();
        ns.claim(&[
            ("a_total", InstrumentKind::Counter, &["x"][..]),
            ("a_seconds", InstrumentKind::Histogram, &["x"][..]),
        ])
        .unwrap();

        assert_eq!(ns.names(), vec!["a_seconds", "a_total"]);
        assert_eq!(
            ns.describe("a_seconds"),
            Some((InstrumentKind::Histogram, vec!["x"]))
        );
    }

    #[test]
    fn conflicting_claim_registers_nothing() {
        let ns = MetricsNamespace::new();
        ns.claim(&[("b_total", InstrumentKind::Counter, &["x"][..])])
            .unwrap();

        let err = ns
            .claim(&[
                ("c_total", InstrumentKind::Counter, &["x"][..]),
                ("b_total", InstrumentKind::Counter, &["x"][..]),
            ])
            .unwrap_err();

        assert!(matches!(err, PromredError::RegistrationConflict { ref name } if name == "b_total"));
        assert!(!ns.is_registered("c_total"));
    }
}
