//! Defaults documents: ordered, flavor-tagged variable assignments

use serde::Deserialize;
use serde_json::Value;

use super::decode;
use crate::{Error, Flavor, FlavorTagSet, Result, TypedValue};

/// Top-level key holding the entry list.
pub const DEFAULTS_KEY: &str = "Default";

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(rename = "Flavor", default)]
    flavor: Vec<String>,
    #[serde(rename = "Variables", default)]
    variables: Vec<RawVariable>,
}

#[derive(Debug, Deserialize)]
struct RawVariable {
    key: String,
    #[serde(rename = "type")]
    ty: String,
    value: Value,
    #[serde(default)]
    overridable: bool,
}

/// One `name = value` assignment inside a defaults entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub value: TypedValue,
    /// Flag given to the variable if this assignment introduces it.
    pub overridable: bool,
}

/// A flavor-tagged group of assignments.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultsEntry {
    pub tags: FlavorTagSet,
    pub assignments: Vec<Assignment>,
}

impl DefaultsEntry {
    pub fn matches(&self, requested: &Flavor) -> bool {
        self.tags.matches(requested)
    }
}

/// A parsed defaults document.
///
/// Entries keep document order; when several match a flavor, later
/// assignments win.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultsDocument {
    entries: Vec<DefaultsEntry>,
}

impl DefaultsDocument {
    pub fn new(entries: Vec<DefaultsEntry>) -> Self {
        Self { entries }
    }

    /// Parse a defaults document.
    ///
    /// The entry list lives under [`DEFAULTS_KEY`]. A document without that
    /// key is accepted when it has exactly one top-level member.
    ///
    /// ```
    /// use flavor_core::{DefaultsDocument, Flavor};
    ///
    /// let doc = DefaultsDocument::parse(br#"{
    ///     "Default": [
    ///         { "Flavor": [], "Variables": [{ "key": "FullScreen", "type": "Bool", "value": true }] },
    ///         { "Flavor": ["Mobile"], "Variables": [{ "key": "FullScreen", "type": "Bool", "value": false }] }
    ///     ]
    /// }"#).unwrap();
    ///
    /// assert_eq!(doc.len(), 2);
    /// assert_eq!(doc.matching(&Flavor::new("Desktop")).count(), 1);
    /// ```
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let root: Value = serde_json::from_slice(bytes)?;
        let Value::Object(mut members) = root else {
            return Err(Error::parse("defaults document must be a JSON object"));
        };

        let list = match members.remove(DEFAULTS_KEY) {
            Some(list) => list,
            None if members.len() == 1 => {
                let (key, list) = members
                    .into_iter()
                    .next()
                    .ok_or_else(|| Error::parse("defaults document is empty"))?;
                tracing::warn!(%key, expected = DEFAULTS_KEY, "Unexpected defaults document key");
                list
            }
            None => {
                return Err(Error::parse(format!(
                    "defaults document must have a single '{}' member, found {}",
                    DEFAULTS_KEY,
                    members.len()
                )));
            }
        };

        let raw: Vec<RawEntry> = serde_json::from_value(list)?;
        let entries = raw
            .into_iter()
            .enumerate()
            .map(|(i, entry)| convert_entry(entry).map_err(|e| e.context(format!("entry {}", i))))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[DefaultsEntry] {
        &self.entries
    }

    /// Entries that apply to `requested`, in document order.
    pub fn matching<'a>(&'a self, requested: &'a Flavor) -> impl Iterator<Item = &'a DefaultsEntry> {
        self.entries.iter().filter(move |entry| entry.matches(requested))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn convert_entry(entry: RawEntry) -> Result<DefaultsEntry> {
    let assignments = entry
        .variables
        .into_iter()
        .map(|raw| -> Result<Assignment> {
            Ok(Assignment {
                value: decode(&raw.key, &raw.ty, &raw.value)?,
                name: raw.key,
                overridable: raw.overridable,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DefaultsEntry {
        tags: entry.flavor.into_iter().collect(),
        assignments,
    })
}
