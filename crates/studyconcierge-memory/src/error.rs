//! Error types for memory operations.

/// Errors returned by memory bank helpers.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// Serialization error while converting a payload to JSON.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
