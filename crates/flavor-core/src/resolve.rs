//! Applying documents to a registry
//!
//! Defaults are applied in a single left-to-right pass over the matching
//! entries, so later assignments clobber earlier ones. They apply to every
//! declared variable regardless of its overridable flag. Overrides apply
//! only to declared variables marked overridable.

use crate::{DefaultsDocument, Flavor, OverridesDocument, UndeclaredPolicy, VariableRegistry};

/// Counts describing what one load did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Entries in the document (always equals `applied + skipped` for overrides)
    pub entries: usize,
    /// Defaults entries whose flavor tags matched
    pub matched: usize,
    /// Assignments written to the registry
    pub applied: usize,
    /// Variables declared by the document
    pub introduced: usize,
    /// Assignments dropped because the name was never declared
    pub skipped_undeclared: usize,
    /// Overrides dropped because the variable is not overridable
    pub skipped_not_overridable: usize,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.skipped_undeclared + self.skipped_not_overridable
    }
}

/// Apply every entry of `doc` that matches `flavor`.
pub fn apply_defaults(
    registry: &mut VariableRegistry,
    doc: &DefaultsDocument,
    flavor: &Flavor,
    policy: UndeclaredPolicy,
) -> LoadReport {
    let mut report = LoadReport {
        entries: doc.len(),
        ..LoadReport::default()
    };

    for entry in doc.matching(flavor) {
        report.matched += 1;
        tracing::debug!(
            tags = ?entry.tags.sorted(),
            assignments = entry.assignments.len(),
            "Defaults entry matches {}",
            flavor
        );

        for assignment in &entry.assignments {
            if registry.set(&assignment.name, assignment.value.clone()).is_ok() {
                report.applied += 1;
                continue;
            }
            match policy {
                UndeclaredPolicy::Ignore => {
                    tracing::debug!(name = %assignment.name, "Ignoring undeclared default");
                    report.skipped_undeclared += 1;
                }
                UndeclaredPolicy::Declare => {
                    tracing::debug!(name = %assignment.name, "Declaring variable from defaults");
                    registry.introduce(
                        &assignment.name,
                        assignment.value.clone(),
                        assignment.overridable,
                    );
                    report.introduced += 1;
                    report.applied += 1;
                }
            }
        }
    }

    report
}

/// Apply `doc` to every declared, overridable variable it names.
pub fn apply_overrides(registry: &mut VariableRegistry, doc: &OverridesDocument) -> LoadReport {
    let mut report = LoadReport {
        entries: doc.len(),
        ..LoadReport::default()
    };

    for (name, value) in doc.iter() {
        if !registry.contains(name) {
            tracing::debug!(%name, "Ignoring override of undeclared variable");
            report.skipped_undeclared += 1;
        } else if !registry.is_overridable(name) {
            tracing::debug!(%name, "Ignoring override of non-overridable variable");
            report.skipped_not_overridable += 1;
        } else if registry.set(name, value.clone()).is_ok() {
            report.applied += 1;
        }
    }

    report
}
