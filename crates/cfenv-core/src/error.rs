//! Error types for cfenv-core

/// Result type for facade construction
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building an [`AppEnv`](crate::AppEnv).
///
/// Lookups on a constructed facade never fail; they signal "not found"
/// with `None` instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required value could not be determined from any source
    #[error("Variable not found: {name}")]
    VariableNotFound { name: String },

    /// A value was present but could not be parsed as its expected type
    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },

    /// The options document does not have the expected shape
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },
}

impl Error {
    pub(crate) fn invalid_value(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// A record could not be finalized because a required field is missing
/// or has the wrong type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing or malformed field: {field}")]
pub struct FieldError {
    pub field: &'static str,
}

impl FieldError {
    pub(crate) fn missing(field: &'static str) -> Self {
        Self { field }
    }
}
