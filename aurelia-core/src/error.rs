//! Structured error types for the Aurelia toolkit.

use thiserror::Error;

/// Unified error type for all Aurelia operations.
#[derive(Debug, Error)]
pub enum AureliaError {
    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A bounded auxiliary structure hit its byte ceiling
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the Aurelia toolkit.
pub type Result<T> = std::result::Result<T, AureliaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = AureliaError::InvalidInput("sequence is empty".into());
        assert_eq!(e.to_string(), "invalid input: sequence is empty");

        let e = AureliaError::ResourceExhausted("recovery stack over 1024 bytes".into());
        assert_eq!(e.to_string(), "resource exhausted: recovery stack over 1024 bytes");

        let e = AureliaError::Other("unexpected".into());
        assert_eq!(e.to_string(), "unexpected");
    }
}
