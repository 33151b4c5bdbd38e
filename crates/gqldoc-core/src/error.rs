//! Error types for the gqldoc core engine
//!
//! Structural problems with an introspection document are the only fatal
//! conditions in this crate; everything else (absent keys handed to a
//! removal, misbehaving dynamic-example hooks, runaway descent depth)
//! degrades in place and is reported through `tracing`.

use thiserror::Error;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum Error {
    /// The introspection document has no `__schema` member
    #[error("Introspection document has no __schema member")]
    MissingSchema,

    /// The `__schema` member carries no `types` array
    #[error("Introspection __schema has no types array")]
    MissingTypes,

    /// The `__schema` member names no query root type
    #[error("Introspection __schema names no query root type")]
    MissingQueryRoot,

    /// A named root type is absent from the types array
    #[error("Root type '{name}' is not present in the types array")]
    MissingRootType { name: String },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}
