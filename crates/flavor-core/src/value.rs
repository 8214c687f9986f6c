//! Typed configuration values
//!
//! A [`TypedValue`] is a closed set of primitive variants plus the
//! [`TypedValue::Empty`] state returned for undefined variables. Documents
//! carry values as `{type, value}` pairs; [`ValueType`] names the variant
//! and [`TypedValue::from_json`] decodes the payload strictly against it.

use std::fmt;
use std::str::FromStr;

use serde_json::{Value, json};

use crate::{Error, Result};

/// The type tags accepted in documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Int,
    Int64,
    Float,
    Double,
    String,
    StringVector,
    Vector2,
    Vector3,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Int64 => "Int64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::String => "String",
            Self::StringVector => "StringVector",
            Self::Vector2 => "Vector2",
            Self::Vector3 => "Vector3",
        }
    }

    /// All tags, in declaration order.
    pub fn all() -> &'static [ValueType] {
        &[
            Self::Bool,
            Self::Int,
            Self::Int64,
            Self::Float,
            Self::Double,
            Self::String,
            Self::StringVector,
            Self::Vector2,
            Self::Vector3,
        ]
    }
}

impl FromStr for ValueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| Error::parse(format!("unknown value type '{}'", s)))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configuration value.
///
/// Two values are equal iff they carry the same variant and payload.
/// `Empty` is distinct from every typed zero value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TypedValue {
    #[default]
    Empty,
    Bool(bool),
    Int(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    String(String),
    StringVector(Vec<String>),
    Vector2([f32; 2]),
    Vector3([f32; 3]),
}

impl TypedValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The type tag, or `None` for `Empty`.
    pub fn value_type(&self) -> Option<ValueType> {
        Some(match self {
            Self::Empty => return None,
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Int64(_) => ValueType::Int64,
            Self::Float(_) => ValueType::Float,
            Self::Double(_) => ValueType::Double,
            Self::String(_) => ValueType::String,
            Self::StringVector(_) => ValueType::StringVector,
            Self::Vector2(_) => ValueType::Vector2,
            Self::Vector3(_) => ValueType::Vector3,
        })
    }

    /// Decode a document payload as the given type.
    ///
    /// ```
    /// use flavor_core::{TypedValue, ValueType};
    /// use serde_json::json;
    ///
    /// let v = TypedValue::from_json(ValueType::Bool, &json!(true)).unwrap();
    /// assert_eq!(v, TypedValue::Bool(true));
    /// assert!(TypedValue::from_json(ValueType::Int, &json!(1.5)).is_err());
    /// ```
    pub fn from_json(ty: ValueType, value: &Value) -> Result<Self> {
        let mismatch = || Error::parse(format!("expected {} value, found {}", ty, value));

        Ok(match ty {
            ValueType::Bool => Self::Bool(value.as_bool().ok_or_else(mismatch)?),
            ValueType::Int => {
                let n = value.as_i64().ok_or_else(mismatch)?;
                Self::Int(i32::try_from(n).map_err(|_| mismatch())?)
            }
            ValueType::Int64 => Self::Int64(value.as_i64().ok_or_else(mismatch)?),
            ValueType::Float => {
                let x = value.as_f64().ok_or_else(mismatch)? as f32;
                Self::Float(Some(x).filter(|x| x.is_finite()).ok_or_else(mismatch)?)
            }
            ValueType::Double => Self::Double(value.as_f64().ok_or_else(mismatch)?),
            ValueType::String => Self::String(value.as_str().ok_or_else(mismatch)?.to_string()),
            ValueType::StringVector => {
                let items = value.as_array().ok_or_else(mismatch)?;
                let strings = items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(mismatch)?;
                Self::StringVector(strings)
            }
            ValueType::Vector2 => Self::Vector2(decode_components(value).ok_or_else(mismatch)?),
            ValueType::Vector3 => Self::Vector3(decode_components(value).ok_or_else(mismatch)?),
        })
    }

    /// Encode the payload for a document. `Empty` encodes as `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Empty => Value::Null,
            Self::Bool(b) => json!(b),
            Self::Int(n) => json!(n),
            Self::Int64(n) => json!(n),
            Self::Float(x) => json!(x),
            Self::Double(x) => json!(x),
            Self::String(s) => json!(s),
            Self::StringVector(items) => json!(items),
            Self::Vector2(v) => json!(v),
            Self::Vector3(v) => json!(v),
        }
    }

    /// Encode as a `{type, value}` record, or `None` for `Empty`.
    pub fn to_typed_json(&self) -> Option<Value> {
        let ty = self.value_type()?;
        Some(json!({ "type": ty.as_str(), "value": self.to_json() }))
    }
}

/// Vectors are written either as a number array or as a
/// whitespace-separated string such as `"1 2"`. Every component must be
/// finite once narrowed to `f32`.
fn decode_components<const N: usize>(value: &Value) -> Option<[f32; N]> {
    let parts: Vec<f32> = match value {
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_f64().map(|x| x as f32))
            .map(|x| x.filter(|x| x.is_finite()))
            .collect::<Option<_>>()?,
        Value::String(s) => s
            .split_whitespace()
            .map(|part| part.parse::<f32>().ok().filter(|x| x.is_finite()))
            .collect::<Option<_>>()?,
        _ => return None,
    };
    parts.try_into().ok()
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("<empty>"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::Int64(n) => write!(f, "{}", n),
            Self::Float(x) => write!(f, "{}", x),
            Self::Double(x) => write!(f, "{}", x),
            Self::String(s) => f.write_str(s),
            Self::StringVector(items) => f.write_str(&items.join(";")),
            Self::Vector2([x, y]) => write!(f, "{} {}", x, y),
            Self::Vector3([x, y, z]) => write!(f, "{} {} {}", x, y, z),
        }
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for TypedValue {
    fn from(n: i32) -> Self {
        Self::Int(n)
    }
}

impl From<i64> for TypedValue {
    fn from(n: i64) -> Self {
        Self::Int64(n)
    }
}

impl From<f32> for TypedValue {
    fn from(x: f32) -> Self {
        Self::Float(x)
    }
}

impl From<f64> for TypedValue {
    fn from(x: f64) -> Self {
        Self::Double(x)
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<String>> for TypedValue {
    fn from(items: Vec<String>) -> Self {
        Self::StringVector(items)
    }
}
