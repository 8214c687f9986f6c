//! Variable registry
//!
//! The registry maps variable names to their compiled-in default, live
//! value and overridable flag. Declaration order is preserved and drives
//! every iteration, so resolved output is deterministic.

use std::collections::HashMap;

use crate::{Error, Result, TypedValue};

/// Where a variable's declaration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableOrigin {
    /// Declared in code before any load
    Declared,
    /// Introduced by a defaults document under [`crate::UndeclaredPolicy::Declare`]
    Document,
}

/// A declared configuration variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    default_value: TypedValue,
    value: TypedValue,
    overridable: bool,
    origin: VariableOrigin,
}

impl Variable {
    fn new(name: String, default_value: TypedValue, origin: VariableOrigin) -> Self {
        Self {
            name,
            value: default_value.clone(),
            default_value,
            overridable: false,
            origin,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current live value.
    pub fn value(&self) -> &TypedValue {
        &self.value
    }

    /// Value the variable was declared with.
    pub fn default_value(&self) -> &TypedValue {
        &self.default_value
    }

    pub fn is_overridable(&self) -> bool {
        self.overridable
    }

    pub fn origin(&self) -> VariableOrigin {
        self.origin
    }

    /// Permit or forbid overrides documents to change this variable.
    pub fn set_overridable(&mut self, overridable: bool) -> &mut Self {
        self.overridable = overridable;
        self
    }
}

/// Ordered name to [`Variable`] store.
///
/// ```
/// use flavor_core::{TypedValue, VariableRegistry};
///
/// let mut registry = VariableRegistry::new();
/// registry.declare("FullScreen", true).set_overridable(true);
///
/// assert_eq!(registry.get("FullScreen"), TypedValue::Bool(true));
/// assert_eq!(registry.get("Plugins"), TypedValue::Empty);
/// assert!(registry.set("Plugins", "A;B").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableRegistry {
    variables: Vec<Variable>,
    index: HashMap<String, usize>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable with its compiled-in default.
    ///
    /// Re-declaring an existing name keeps its position but replaces the
    /// default, resets the live value to it and clears the overridable flag.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        default_value: impl Into<TypedValue>,
    ) -> &mut Variable {
        self.insert(name.into(), default_value.into(), VariableOrigin::Declared)
    }

    /// Declare a variable and its overridable flag in one call.
    pub fn declare_with(
        &mut self,
        name: impl Into<String>,
        default_value: impl Into<TypedValue>,
        overridable: bool,
    ) -> &mut Variable {
        self.declare(name, default_value).set_overridable(overridable)
    }

    /// Declare a variable on behalf of a defaults document.
    pub(crate) fn introduce(
        &mut self,
        name: &str,
        value: TypedValue,
        overridable: bool,
    ) -> &mut Variable {
        self.insert(name.to_string(), value, VariableOrigin::Document)
            .set_overridable(overridable)
    }

    fn insert(
        &mut self,
        name: String,
        default_value: TypedValue,
        origin: VariableOrigin,
    ) -> &mut Variable {
        let variable = Variable::new(name.clone(), default_value, origin);
        let slot = match self.index.get(&name) {
            Some(&slot) => {
                tracing::debug!(%name, "Re-declaring variable");
                self.variables[slot] = variable;
                slot
            }
            None => {
                let slot = self.variables.len();
                self.variables.push(variable);
                self.index.insert(name, slot);
                slot
            }
        };
        &mut self.variables[slot]
    }

    /// Current value, or [`TypedValue::Empty`] if `name` was never declared.
    pub fn get(&self, name: &str) -> TypedValue {
        self.value(name).cloned().unwrap_or_default()
    }

    /// Borrow the current value of a declared variable.
    pub fn value(&self, name: &str) -> Option<&TypedValue> {
        self.variable(name).map(Variable::value)
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.index.get(name).map(|&slot| &self.variables[slot])
    }

    /// Assign a declared variable, regardless of its overridable flag.
    pub fn set(&mut self, name: &str, value: impl Into<TypedValue>) -> Result<()> {
        let slot = *self
            .index
            .get(name)
            .ok_or_else(|| Error::unknown_variable(name))?;
        self.variables[slot].value = value.into();
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn is_overridable(&self, name: &str) -> bool {
        self.variable(name).is_some_and(Variable::is_overridable)
    }

    pub fn default_value(&self, name: &str) -> Option<&TypedValue> {
        self.variable(name).map(Variable::default_value)
    }

    /// Variables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// A copy holding only code-declared variables, each at its default.
    pub fn declarations_only(&self) -> Self {
        let mut shadow = self.clone();
        shadow.reset();
        shadow
    }

    /// Restore every code-declared variable to its default and forget
    /// variables introduced by documents.
    pub fn reset(&mut self) {
        self.variables
            .retain(|variable| variable.origin == VariableOrigin::Declared);
        self.index.clear();
        for (slot, variable) in self.variables.iter_mut().enumerate() {
            variable.value = variable.default_value.clone();
            self.index.insert(variable.name.clone(), slot);
        }
    }
}
