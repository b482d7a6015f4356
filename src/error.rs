//! Error types for talking to the books backend

use crate::book::FieldErrors;
use thiserror::Error;

/// Result type alias using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

/// Failure of a single backend call. Every variant is terminal for the
/// operation that produced it; nothing is retried.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never got a response (connection refused, DNS, reset...).
    #[error("{0}")]
    Transport(String),

    /// Non-2xx status. `message` is the operation's generic failure text.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// POST/PUT rejected with a field-keyed error map.
    #[error("The server rejected {} field(s)", .0.len())]
    Fields(FieldErrors),

    /// 2xx response whose body does not match the contract.
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

/// What the rendering layer needs to know about an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Validation,
    FieldMap,
}

impl ApiError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Fields(_) => ErrorKind::FieldMap,
            ApiError::Transport(_) | ApiError::Status { .. } | ApiError::Decode(_) => {
                ErrorKind::Transport
            }
        }
    }

    /// Field messages carried by a rejected submission, if any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Fields(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Field;

    #[test]
    fn status_error_shows_generic_message() {
        let err = ApiError::status(500, "Failed to fetch book details");
        assert_eq!(err.to_string(), "Failed to fetch book details");
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.field_errors().is_none());
    }

    #[test]
    fn field_map_is_its_own_kind() {
        let mut map = FieldErrors::default();
        map.insert(Field::Title, "taken");
        let err = ApiError::Fields(map);
        assert_eq!(err.kind(), ErrorKind::FieldMap);
        assert_eq!(err.field_errors().unwrap().get(Field::Title), Some("taken"));
    }
}
