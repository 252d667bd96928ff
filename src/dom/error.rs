//! Document error types

use thiserror::Error;

/// Errors raised when the page does not match the expected layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// An element id the loaders write to is absent from the page
    #[error("Element not found: #{0}")]
    MissingElement(String),
}

/// Result type alias for document operations
pub type DomResult<T> = Result<T, DomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomError::MissingElement("cash".to_string());
        assert_eq!(err.to_string(), "Element not found: #cash");
    }
}
