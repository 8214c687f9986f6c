//! Changed-variable tracking
//!
//! A variable is changed when its live value differs from what the
//! flavor's defaults alone would produce. That baseline comes from a
//! shadow registry: the code declarations at their defaults, with every
//! loaded defaults document replayed for the requested flavor. Overrides
//! are never applied to the shadow.

use crate::resolve::apply_defaults;
use crate::{DefaultsDocument, Flavor, TypedValue, UndeclaredPolicy, VariableRegistry};

/// Changed variables in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangedVariables {
    entries: Vec<(String, TypedValue)>,
}

impl ChangedVariables {
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<(String, TypedValue)> {
        self.entries
    }
}

impl IntoIterator for ChangedVariables {
    type Item = (String, TypedValue);
    type IntoIter = std::vec::IntoIter<(String, TypedValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Build the defaults-only baseline for `flavor`.
pub fn baseline(
    live: &VariableRegistry,
    defaults: &[DefaultsDocument],
    flavor: &Flavor,
    policy: UndeclaredPolicy,
) -> VariableRegistry {
    let mut shadow = live.declarations_only();
    for doc in defaults {
        apply_defaults(&mut shadow, doc, flavor, policy);
    }
    shadow
}

/// Diff `live` against the defaults-only baseline for `flavor`.
pub fn changed_variables(
    live: &VariableRegistry,
    defaults: &[DefaultsDocument],
    flavor: &Flavor,
    policy: UndeclaredPolicy,
) -> ChangedVariables {
    let shadow = baseline(live, defaults, flavor, policy);

    let entries = live
        .iter()
        .filter(|variable| shadow.value(variable.name()) != Some(variable.value()))
        .map(|variable| (variable.name().to_string(), variable.value().clone()))
        .collect::<Vec<_>>();

    tracing::debug!(%flavor, changed = entries.len(), "Computed changed variables");
    ChangedVariables { entries }
}
