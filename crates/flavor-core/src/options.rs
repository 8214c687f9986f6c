//! Resolver options

use serde::{Deserialize, Serialize};

use crate::Result;

/// What a defaults document may do with a name that was never declared.
///
/// Overrides documents never introduce variables, whatever the policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndeclaredPolicy {
    /// Drop the assignment
    #[default]
    Ignore,
    /// Declare the variable with the assigned value as its default
    Declare,
}

/// Options controlling how documents are applied.
///
/// ```
/// use flavor_core::{ResolveOptions, UndeclaredPolicy};
///
/// let options = ResolveOptions::from_toml(r#"undeclared = "declare""#).unwrap();
/// assert_eq!(options.undeclared, UndeclaredPolicy::Declare);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    pub undeclared: UndeclaredPolicy,
}

impl ResolveOptions {
    pub fn with_undeclared(mut self, policy: UndeclaredPolicy) -> Self {
        self.undeclared = policy;
        self
    }

    /// Parse options from TOML. Missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
