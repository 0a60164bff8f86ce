//! Error types for the FairCom dialect.

use thiserror::Error;

/// The main error type for rewriting, compiling, and executing statements.
#[derive(Debug, Error)]
pub enum FaircomError {
    /// A LIMIT/OFFSET value could not be resolved to a literal integer.
    #[error("Cannot extract pagination value: {0}")]
    Extraction(String),

    /// The tokenizer could not make sense of the statement text.
    #[error("Syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    /// The remote database (or the transport in front of it) failed.
    #[error("Database error: {0}")]
    Database(String),

    /// The API was used in the wrong order (fetch before execute, use after close).
    #[error("Programming error: {0}")]
    Programming(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML configuration file.
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl FaircomError {
    /// Create a syntax error at the given byte offset.
    pub fn syntax(position: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
        }
    }

    /// Create an extraction error.
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }
}

/// Result type alias for FairCom operations.
pub type FaircomResult<T> = Result<T, FaircomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FaircomError::syntax(5, "unterminated string literal");
        assert_eq!(
            err.to_string(),
            "Syntax error at position 5: unterminated string literal"
        );
    }

    #[test]
    fn test_extraction_display() {
        let err = FaircomError::extraction("NULL is not an integer");
        assert_eq!(
            err.to_string(),
            "Cannot extract pagination value: NULL is not an integer"
        );
    }
}
