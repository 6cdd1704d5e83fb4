//! Action error types.
//!
//! Every failure that crosses the dispatcher boundary is an [`ActionError`].
//! Its [`ErrorKind`] is what the client sees in the `kind` field of the error
//! envelope and determines the HTTP status of the response.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors produced while resolving, running, or validating an action.
#[derive(Error, Debug)]
pub enum ActionError {
    /// No handler is registered under the requested name.
    #[error("no such action: {0}")]
    NotFound(String),

    /// The argument payload could not be decoded into the handler's input type.
    #[error("invalid arguments: {0}")]
    ArgumentDecode(#[from] serde_json::Error),

    /// A collaborator call made by the handler failed.
    #[error("{0}")]
    Handler(String),

    /// The handler reported success with a result that is not a valid patch.
    #[error("invalid result: {0}")]
    InvalidResult(String),
}

impl ActionError {
    /// Wrap any displayable error as a handler failure.
    #[must_use]
    pub fn handler(err: impl fmt::Display) -> Self {
        Self::Handler(err.to_string())
    }

    /// Kind reported on the wire.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::ActionNotFound,
            Self::ArgumentDecode(_) => ErrorKind::ArgumentDecodeError,
            Self::Handler(_) => ErrorKind::HandlerError,
            Self::InvalidResult(_) => ErrorKind::InvalidResult,
        }
    }
}

/// Wire-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Unknown action name.
    ActionNotFound,
    /// Malformed argument payload.
    ArgumentDecodeError,
    /// Collaborator failure or caught panic.
    HandlerError,
    /// Handler contract violation.
    InvalidResult,
}

impl ErrorKind {
    /// HTTP status code used for responses carrying this kind.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::ActionNotFound => 404,
            Self::ArgumentDecodeError => 400,
            Self::HandlerError | Self::InvalidResult => 500,
        }
    }

    /// Name used in the `kind` field of the error envelope.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ActionNotFound => "ActionNotFound",
            Self::ArgumentDecodeError => "ArgumentDecodeError",
            Self::HandlerError => "HandlerError",
            Self::InvalidResult => "InvalidResult",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_statuses() {
        assert_eq!(ActionError::NotFound("x".into()).kind().status_code(), 404);
        assert_eq!(ActionError::handler("boom").kind().status_code(), 500);
        assert_eq!(
            ActionError::InvalidResult("empty".into()).kind().status_code(),
            500
        );
    }

    #[test]
    fn decode_errors_convert_from_serde() {
        let err = serde_json::from_str::<String>("{").map(|_| ()).map_err(ActionError::from);
        assert!(matches!(err, Err(ActionError::ArgumentDecode(_))));
        assert_eq!(
            err.err().map(|e| e.kind()),
            Some(ErrorKind::ArgumentDecodeError)
        );
    }

    #[test]
    fn display_is_readable() {
        assert_eq!(
            ActionError::NotFound("viewPart".into()).to_string(),
            "no such action: viewPart"
        );
        assert_eq!(ErrorKind::HandlerError.to_string(), "HandlerError");
    }
}
