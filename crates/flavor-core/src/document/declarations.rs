//! Declarations documents: variable definitions kept outside of code

use serde_json::{Map, Value};

use super::{RawTypedValue, decode};
use crate::{Error, Result, TypedValue, VariableRegistry};

/// One declared variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub default_value: TypedValue,
    pub overridable: bool,
}

/// `{"Name": {"type": ..., "value": ..., "overridable": bool}}`, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationsDocument {
    declarations: Vec<Declaration>,
}

impl DeclarationsDocument {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let raw: Map<String, Value> = serde_json::from_slice(bytes)?;
        let declarations = raw
            .into_iter()
            .map(|(name, value)| -> Result<Declaration> {
                let raw: RawTypedValue = serde_json::from_value(value)
                    .map_err(|e| Error::from(e).context(format!("variable '{}'", name)))?;
                Ok(Declaration {
                    default_value: decode(&name, &raw.ty, &raw.value)?,
                    overridable: raw.overridable,
                    name,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { declarations })
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Declare every entry in `registry`.
    pub fn declare_into(&self, registry: &mut VariableRegistry) {
        for declaration in &self.declarations {
            registry.declare_with(
                declaration.name.clone(),
                declaration.default_value.clone(),
                declaration.overridable,
            );
        }
    }
}
