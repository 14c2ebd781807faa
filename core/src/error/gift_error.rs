// core/src/error/gift_error.rs
use thiserror::Error;

use super::ExecutorError;

/// Text shown to callers in place of any internal diagnostic.
pub const INTERNAL_PUBLIC_MESSAGE: &str = "Internal server error";

/// Caller-facing failure of a gift generation request.
///
/// `Validation` means the request was rejected by the core binary's own
/// rules and its message may be shown to the client. `Internal` carries
/// diagnostics for logs only.
#[derive(Debug, Error)]
pub enum GiftError {
    #[error("{message}")]
    Validation { message: String, exit_code: i32 },

    #[error("{message}")]
    Internal {
        exit_code: Option<i32>,
        message: String,
        #[source]
        source: Option<ExecutorError>,
    },
}

impl GiftError {
    pub fn is_validation(&self) -> bool {
        matches!(self, GiftError::Validation { .. })
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            GiftError::Validation { exit_code, .. } => Some(*exit_code),
            GiftError::Internal { exit_code, .. } => *exit_code,
        }
    }

    /// Message safe to hand to an external caller.
    pub fn public_message(&self) -> &str {
        match self {
            GiftError::Validation { message, .. } => message,
            GiftError::Internal { .. } => INTERNAL_PUBLIC_MESSAGE,
        }
    }
}

impl From<ExecutorError> for GiftError {
    fn from(err: ExecutorError) -> Self {
        GiftError::Internal {
            exit_code: None,
            message: err.to_string(),
            source: Some(err),
        }
    }
}
