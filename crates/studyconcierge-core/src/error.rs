//! Error types for the study agents.

use studyconcierge_config::ConfigError;
use studyconcierge_memory::MemoryError;
use studyconcierge_tools::ToolError;
use thiserror::Error;

/// Errors returned by agent and facade operations.
///
/// Unknown keys and sessions are not errors, and external model failures are
/// absorbed by the template fallback, so this only covers caller mistakes and
/// local failures.
#[derive(Debug, Error)]
pub enum StudyError {
    /// Caller passed an argument the operation cannot accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A study tool failed.
    #[error("tool error: {0}")]
    Tool(#[from] ToolError),
    /// A record could not be written to the memory bank.
    #[error("memory error: {0}")]
    Memory(#[from] MemoryError),
    /// Configuration was rejected.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl StudyError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        StudyError::InvalidArgument(message.into())
    }
}
