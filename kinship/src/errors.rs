use thiserror::Error;

use crate::id::IdError;

/// Top-level error type returned by the Kinship client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No usable bearer token, or the backend rejected it.
    #[error("authentication required: please log in")]
    Unauthenticated,

    /// Backend answered with a non-2xx status.
    #[error("request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (connection refused, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The session has a token but no cached profile, so the acting user is unknown.
    #[error("session has no current user")]
    NoCurrentUser,

    /// Response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Request body could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),

    /// An entity carried no usable identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),

    /// Target entity is not present in the local list.
    #[error("entity not found")]
    NotFound { entity_id: Option<String> },

    /// Client-side validation failed before anything was sent.
    #[error("validation failed")]
    Validation(#[from] ValidationError),

    /// Configuration could not be loaded or is malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Session storage could not be read or written.
    #[error("session storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Short, user-facing text suitable for a toast or a CLI error line.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Unauthenticated => "Please log in to continue.".to_string(),
            ClientError::NoCurrentUser => "Your session does not know which user you are.".to_string(),
            ClientError::Http { message, .. } => message.clone(),
            ClientError::Transport(_) => "Network error. Please try again.".to_string(),
            ClientError::Validation(err) => err
                .issues
                .iter()
                .map(|issue| issue.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Unauthenticated => Some(401),
            _ => None,
        }
    }
}

/// Collection of validation issues encountered while preparing a request.
#[derive(Debug, Clone, Error)]
#[error("validation errors: {issues:?}")]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        Self {
            issues: issues.into_iter().collect(),
        }
    }

    /// Convenience helper for constructing a single-field validation error.
    pub fn single(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new([ValidationIssue::new(field, code, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Turns collected issues into a result, `Ok` when nothing was reported.
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Detailed validation failure for a single field or logical path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_backend_text() {
        let err = ClientError::Http {
            status: 400,
            message: "Group name already taken".to_string(),
        };
        assert_eq!(err.user_message(), "Group name already taken");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn validation_message_joins_issues() {
        let err = ClientError::from(ValidationError::new([
            ValidationIssue::new("title", "required", "Title is required"),
            ValidationIssue::new("salary", "range", "Minimum salary exceeds maximum"),
        ]));
        assert_eq!(
            err.user_message(),
            "Title is required; Minimum salary exceeds maximum"
        );
    }

    #[test]
    fn empty_validation_collects_to_ok() {
        assert!(ValidationError::new([]).into_result().is_ok());
        assert!(ValidationError::single("name", "required", "missing").into_result().is_err());
    }
}
