//! Error types for grid analysis.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// Errors raised by grid indexing, spatial queries and classification.
///
/// These are data-contract errors: they are reported at the point of
/// detection and never retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    /// Malformed or out-of-domain argument (non-finite coordinates,
    /// non-positive radius, bad threshold schedule, inconsistent shapes).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A required coordinate axis is absent after normalization.
    #[error("missing coordinate axis: {0}")]
    MissingAxis(String),

    /// A required data variable is absent from the dataset.
    #[error("missing data variable: {0}")]
    MissingVariable(String),
}

impl GridError {
    /// Create an InvalidInput error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a MissingAxis error.
    pub fn missing_axis(name: impl Into<String>) -> Self {
        Self::MissingAxis(name.into())
    }

    /// Create a MissingVariable error.
    pub fn missing_variable(name: impl Into<String>) -> Self {
        Self::MissingVariable(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GridError::invalid_input("radius must be > 0").to_string(),
            "invalid input: radius must be > 0"
        );
        assert_eq!(
            GridError::missing_axis("latitude").to_string(),
            "missing coordinate axis: latitude"
        );
        assert_eq!(
            GridError::missing_variable("rp").to_string(),
            "missing data variable: rp"
        );
    }
}
