//! Validation error types

use std::fmt;

/// Validation error for configuration values and domain names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Numeric value below the accepted minimum
    BelowMinimum { field: &'static str, min: u64, value: u64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::BelowMinimum { field, min, value } => {
                write!(f, "{} must be at least {} (got {})", field, min, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "collection name",
            max: 128,
        };
        assert_eq!(
            err.to_string(),
            "collection name exceeds maximum length of 128 characters"
        );

        let err = ValidationError::BelowMinimum {
            field: "chunk_size",
            min: 1,
            value: 0,
        };
        assert_eq!(err.to_string(), "chunk_size must be at least 1 (got 0)");
    }
}
