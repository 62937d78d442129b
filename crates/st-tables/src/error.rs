//! Table loading and assembly errors.

use thiserror::Error;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors that can occur while loading or querying table structure.
#[derive(Error, Debug)]
pub enum TableError {
    /// Unrecognized property name.
    #[error("Unknown property: {name}")]
    UnknownProperty { name: String },

    /// A table needed for a lookup has no rows.
    #[error("Empty table: {what}")]
    EmptyTable { what: &'static str },

    /// Block index past the end of a region table.
    #[error("Pressure block {index} out of range (blocks={len})")]
    BlockOutOfRange { index: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TableError::UnknownProperty { name: "rho".into() };
        assert!(err.to_string().contains("rho"));

        let err = TableError::BlockOutOfRange { index: 7, len: 3 };
        assert!(err.to_string().contains("blocks=3"));
    }
}
