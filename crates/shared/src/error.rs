use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::SiteId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    FetchFailed,
    UnknownType,
    ModerationFailure,
}

impl ErrorCode {
    /// Whether re-issuing the same operation can succeed.
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorCode::FetchFailed | ErrorCode::ModerationFailure)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("failed to fetch item types for site {}: {reason}", site.0)]
    FetchFailed { site: SiteId, reason: String },
    #[error("unknown menu item type '{0}'")]
    UnknownType(String),
    #[error("moderation failed: {0}")]
    ModerationFailure(String),
}

impl CoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::FetchFailed { .. } => ErrorCode::FetchFailed,
            CoreError::UnknownType(_) => ErrorCode::UnknownType,
            CoreError::ModerationFailure(_) => ErrorCode::ModerationFailure,
        }
    }
}

/// Error shape handed to the rendering layer for an error indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<&CoreError> for ErrorReport {
    fn from(value: &CoreError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}

impl From<CoreError> for ErrorReport {
    fn from(value: CoreError) -> Self {
        Self::from(&value)
    }
}
