//! Error types for flavor-core

/// Result type for flavor-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A defaults, overrides or declarations document is malformed
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// The document could not be fetched from its source
    #[error("Source unavailable: {0}")]
    SourceUnavailable(#[from] flavor_fs::Error),

    /// Direct assignment to a variable that was never declared
    #[error("Unknown variable: {name}")]
    UnknownVariable { name: String },

    /// Resolver options file is not valid TOML
    #[error(transparent)]
    OptionsParse(#[from] toml::de::Error),
}

impl Error {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable { name: name.into() }
    }

    /// Prefix a parse error message with where it happened.
    pub fn context(self, context: impl std::fmt::Display) -> Self {
        match self {
            Self::Parse { message } => Self::parse(format!("{}: {}", context, message)),
            other => other,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}
