//! Error types for component selection

use thiserror::Error;

/// Message carried by every error raised from inside a rule body.
pub const USER_CODE_ERROR: &str = "Could not apply component selection rule with all().";

/// Boxed failure returned by rule bodies and metadata factories.
pub type RuleFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for component selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// A rule body failed; the original failure is kept as the source.
    #[error("{}", USER_CODE_ERROR)]
    UserCode {
        #[source]
        source: RuleFailure,
    },

    /// The metadata factory failed while a rule needed metadata.
    #[error(transparent)]
    MetadataFetch(#[from] MetadataFetchError),

    /// A rule was refused at registration time.
    #[error("{message}")]
    InvalidRule {
        message: String,
        #[source]
        source: Option<NotationError>,
    },
}

impl SelectionError {
    /// Wraps a failure raised by rule logic.
    pub fn user_code(source: impl Into<RuleFailure>) -> Self {
        Self::UserCode {
            source: source.into(),
        }
    }

    /// Creates a registration error without an underlying cause.
    pub fn invalid_rule(message: impl Into<String>) -> Self {
        Self::InvalidRule {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if the root cause lies in rule-author code.
    pub fn is_user_code(&self) -> bool {
        matches!(self, Self::UserCode { .. })
    }
}

/// Failure of the factory producing a candidate's metadata.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct MetadataFetchError {
    message: String,
    #[source]
    source: Option<RuleFailure>,
}

impl MetadataFetchError {
    /// Creates a fetch error with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a fetch error wrapping the failure of an upstream source.
    pub fn with_source(message: impl Into<String>, source: impl Into<RuleFailure>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A string could not be parsed as `group:name` module coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot convert '{notation}' to a module identifier: expected the form 'group:name'")]
pub struct NotationError {
    notation: String,
}

impl NotationError {
    pub fn new(notation: impl Into<String>) -> Self {
        Self {
            notation: notation.into(),
        }
    }

    pub fn notation(&self) -> &str {
        &self.notation
    }
}

/// Result type alias for component selection operations
pub type Result<T> = std::result::Result<T, SelectionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_user_code_error_keeps_cause() {
        let err = SelectionError::user_code("boom");
        assert_eq!(err.to_string(), USER_CODE_ERROR);
        assert!(err.is_user_code());
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("boom".to_string())
        );
    }

    #[test]
    fn test_metadata_fetch_error_is_transparent() {
        let err: SelectionError = MetadataFetchError::new("repository offline").into();
        assert_eq!(err.to_string(), "repository offline");
        assert!(!err.is_user_code());
    }
}
