//! Error types for plog operations.

use thiserror::Error;

/// The main error type for plog operations.
///
/// Logging calls themselves never fail from the caller's point of view; this
/// enum covers the fallible edges around them: configuration loading, level
/// parsing and explicit serialization.
#[derive(Error, Debug)]
pub enum PlogError {
    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unknown level name
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Value could not be serialized for dumping
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for plog operations.
pub type Result<T> = std::result::Result<T, PlogError>;

/// Helper macro to bail out with a PlogError
///
/// # Example
///
/// ```ignore
/// if max_size == 0 {
///     bail!(Config, "max size must be positive, got {}", max_size);
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::PlogError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::PlogError::$variant(format!($fmt, $($arg)*)))
    };
}
