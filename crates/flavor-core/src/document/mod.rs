//! Document formats
//!
//! - **Defaults**: `{"Default": [{"Flavor": [...], "Variables": [{key, type, value}]}]}`
//! - **Overrides**: `{"Name": {type, value}}`
//! - **Declarations**: the overrides format with an optional `overridable`
//!   flag, standing in for variables declared in code

mod declarations;
mod defaults;
mod overrides;

pub use declarations::{Declaration, DeclarationsDocument};
pub use defaults::{Assignment, DEFAULTS_KEY, DefaultsDocument, DefaultsEntry};
pub use overrides::OverridesDocument;

use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result, TypedValue, ValueType};

/// A `{type, value}` record as written in overrides and declarations.
#[derive(Debug, Deserialize)]
struct RawTypedValue {
    #[serde(rename = "type")]
    ty: String,
    value: Value,
    #[serde(default)]
    overridable: bool,
}

fn decode(name: &str, ty: &str, value: &Value) -> Result<TypedValue> {
    let context = || format!("variable '{}'", name);
    let ty: ValueType = ty.parse().map_err(|e: Error| e.context(context()))?;
    TypedValue::from_json(ty, value).map_err(|e| e.context(context()))
}
