//! Flavors and flavor matching
//!
//! A flavor names a build, platform or runtime variant. Defaults entries
//! carry a set of flavor tags; an entry applies to a requested flavor when
//! the set is empty, contains [`Flavor::UNIVERSAL`], or contains the
//! requested flavor itself.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A flavor identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flavor(String);

impl Flavor {
    /// Name of the flavor that matches every requested flavor.
    pub const UNIVERSAL: &'static str = "Universal";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn universal() -> Self {
        Self::new(Self::UNIVERSAL)
    }

    pub fn is_universal(&self) -> bool {
        self.0 == Self::UNIVERSAL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Flavor {
    fn default() -> Self {
        Self::universal()
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Flavor {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Flavor {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Unordered set of flavor tags attached to a defaults entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlavorTagSet {
    tags: HashSet<Flavor>,
}

impl FlavorTagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, flavor: impl Into<Flavor>) -> bool {
        self.tags.insert(flavor.into())
    }

    pub fn contains(&self, flavor: &Flavor) -> bool {
        self.tags.contains(flavor)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Whether the entry applies to every requested flavor.
    pub fn is_unconditional(&self) -> bool {
        self.tags.is_empty() || self.tags.iter().any(Flavor::is_universal)
    }

    /// Whether an entry carrying these tags applies to `requested`.
    ///
    /// ```
    /// use flavor_core::{Flavor, FlavorTagSet};
    ///
    /// let desktop: FlavorTagSet = ["Desktop"].into_iter().collect();
    /// assert!(desktop.matches(&Flavor::new("Desktop")));
    /// assert!(!desktop.matches(&Flavor::new("Mobile")));
    /// assert!(FlavorTagSet::new().matches(&Flavor::new("Mobile")));
    /// ```
    pub fn matches(&self, requested: &Flavor) -> bool {
        self.is_unconditional() || self.tags.contains(requested)
    }

    /// Tags in sorted order.
    pub fn sorted(&self) -> Vec<&Flavor> {
        let mut tags: Vec<&Flavor> = self.tags.iter().collect();
        tags.sort();
        tags
    }
}

impl<F: Into<Flavor>> FromIterator<F> for FlavorTagSet {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(Into::into).collect(),
        }
    }
}
