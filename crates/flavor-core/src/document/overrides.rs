//! Overrides documents: flat, flavor-independent assignments

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::{RawTypedValue, decode};
use crate::{ChangedVariables, Result, TypedValue};

/// A parsed overrides document, ordered by variable name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverridesDocument {
    entries: Vec<(String, TypedValue)>,
}

impl OverridesDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{"Name": {"type": ..., "value": ...}}`.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let raw: BTreeMap<String, RawTypedValue> = serde_json::from_slice(bytes)?;
        let entries = raw
            .into_iter()
            .map(|(name, raw)| -> Result<(String, TypedValue)> {
                let value = decode(&name, &raw.ty, &raw.value)?;
                Ok((name, value))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Build a document that reproduces a set of changed variables.
    ///
    /// Empty values have no document form and are left out.
    pub fn from_changes(changes: &ChangedVariables) -> Self {
        let mut doc = Self::new();
        for (name, value) in changes.iter() {
            if value.is_empty() {
                tracing::debug!(%name, "Skipping empty value in overrides document");
                continue;
            }
            doc.insert(name, value.clone());
        }
        doc
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, name: impl Into<String>, value: TypedValue) {
        let name = name.into();
        match self.entries.binary_search_by(|(n, _)| n.as_str().cmp(name.as_str())) {
            Ok(i) => self.entries[i].1 = value,
            Err(i) => self.entries.insert(i, (name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.entries
            .binary_search_by(|(n, _)| n.as_str().cmp(name))
            .ok()
            .map(|i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as a JSON object of `{type, value}` records.
    pub fn to_json(&self) -> Value {
        let mut members = Map::new();
        for (name, value) in &self.entries {
            if let Some(record) = value.to_typed_json() {
                members.insert(name.clone(), record);
            }
        }
        Value::Object(members)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }
}
