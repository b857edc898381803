//! Structured configuration error carried by validation diagnostics.

use serde::Serialize;
use thiserror::Error;

use super::error_code::ErrorCode;
use crate::error::RankError;

/// A single configuration problem: code, JSON-pointer path, message and an
/// optional hint on how to fix it.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("[{code}] {path}: {message}")]
pub struct ConfigError {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ConfigError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ConfigError> for RankError {
    fn from(err: ConfigError) -> Self {
        RankError::InvalidParameter {
            name: err.path,
            message: err.message,
        }
    }
}
