//! Error types for the Spamsift library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`SpamsiftError`] enum.
//!
//! # Examples
//!
//! ```
//! use spamsift::error::{SpamsiftError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpamsiftError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Spamsift operations.
///
/// Degenerate data (empty corpora, unreadable documents, out-of-vocabulary
/// terms) is never reported through this type; it is absorbed by the
/// statistics. Errors are reserved for misuse and broken inputs.
#[derive(Error, Debug)]
pub enum SpamsiftError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument passed to an operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Inference was requested from a model that has not been trained
    #[error("Model not trained: {0}")]
    ModelNotTrained(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with SpamsiftError.
pub type Result<T> = std::result::Result<T, SpamsiftError>;

impl SpamsiftError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SpamsiftError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SpamsiftError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SpamsiftError::InvalidArgument(msg.into())
    }

    /// Create a new "model not trained" error for the named model.
    pub fn not_trained<S: Into<String>>(model: S) -> Self {
        SpamsiftError::ModelNotTrained(format!("{} must be trained before inference", model.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SpamsiftError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");

        let error = SpamsiftError::config("bad lambda");
        assert_eq!(error.to_string(), "Configuration error: bad lambda");

        let error = SpamsiftError::not_trained("naive_bayes");
        assert_eq!(
            error.to_string(),
            "Model not trained: naive_bayes must be trained before inference"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let spamsift_error = SpamsiftError::from(io_error);

        match spamsift_error {
            SpamsiftError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let spamsift_error = SpamsiftError::from(json_error);

        assert!(matches!(spamsift_error, SpamsiftError::Json(_)));
        assert!(spamsift_error.to_string().starts_with("JSON error: "));
    }
}
