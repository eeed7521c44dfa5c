use thiserror::Error;

/// Main error type for query generation
#[derive(Error, Debug)]
pub enum QuerygenError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Invalid date for field '{field}': {value}")]
    InvalidDate { field: String, value: String },

    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Query nesting exceeds the depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}

/// Result type alias for query generation
pub type Result<T> = std::result::Result<T, QuerygenError>;

impl QuerygenError {
    pub(crate) fn invalid_value(field: &str, reason: impl Into<String>) -> Self {
        QuerygenError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this error was raised while decoding a schema
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            QuerygenError::UnknownFieldType(_) | QuerygenError::InvalidSchema(_)
        )
    }
}
