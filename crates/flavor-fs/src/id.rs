//! Source identifiers of the form `scheme://name`

use std::fmt;

/// Scheme assumed when an identifier carries none.
pub const FILE_SCHEME: &str = "file";

/// A document address split into scheme and name.
///
/// Names are normalized to forward slashes so the same identifier
/// resolves identically on every platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceId {
    scheme: String,
    name: String,
}

impl SourceId {
    /// Build an identifier from an explicit scheme and name.
    pub fn new(scheme: impl AsRef<str>, name: impl AsRef<str>) -> Self {
        let scheme = scheme.as_ref().to_ascii_lowercase();
        Self {
            scheme: if scheme.is_empty() {
                FILE_SCHEME.to_string()
            } else {
                scheme
            },
            name: name.as_ref().replace('\\', "/"),
        }
    }

    /// Parse `scheme://name`. Input without a scheme is a `file` name.
    ///
    /// ```
    /// use flavor_fs::SourceId;
    ///
    /// let id = SourceId::parse("memory://ConfigDefaults.json");
    /// assert_eq!(id.scheme(), "memory");
    /// assert_eq!(id.name(), "ConfigDefaults.json");
    ///
    /// let bare = SourceId::parse("conf/defaults.json");
    /// assert_eq!(bare.scheme(), "file");
    /// ```
    pub fn parse(uri: &str) -> Self {
        match uri.split_once("://") {
            Some((scheme, name)) => Self::new(scheme, name),
            None => Self::new(FILE_SCHEME, uri),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.name)
    }
}

impl From<&str> for SourceId {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for SourceId {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}
