use thiserror::Error;

/// Errors raised by the persistence layer.
///
/// Engines never produce errors; only reading and writing persisted
/// records can fail.
#[derive(Error, Debug)]
pub enum DenError {
    #[error("storage I/O failed for key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record under key `{key}`: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Convenience Result type for persistence operations
pub type Result<T> = std::result::Result<T, DenError>;
