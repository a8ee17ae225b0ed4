//! Core error types for TOOLSMITH.

use std::fmt;

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid timestamp
    InvalidTimestamp {
        /// Rejected input
        input: String,
        /// Parser message
        reason: String,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimestamp { input, reason } => {
                write!(f, "Invalid timestamp {:?}: {}", input, reason)
            }
        }
    }
}

impl std::error::Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidTimestamp {
            input: "yesterday".to_string(),
            reason: "input contains invalid characters".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Invalid timestamp \"yesterday\": input contains invalid characters"
        );
    }
}
