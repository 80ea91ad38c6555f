//! Engine error model.

use thiserror::Error;

/// Result type used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine-level error.
///
/// The engine favors graceful degradation: numeric edge cases (empty series,
/// zero variance, zero demand) produce defined defaults, never errors. Only
/// structural contract violations on the *inputs* are surfaced here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// An input violated a structural contract (negative quantity,
    /// non-positive lead time, unsorted history, non-finite number).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl EngineError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
