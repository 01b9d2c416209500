//! Memory bank support for StudyConcierge.
//!
//! The memory bank is an append-only, per-key record store shared by every
//! agent. It never evicts and never persists; keyword-overlap search stands in
//! for semantic retrieval.

pub mod error;
pub mod model;
pub mod provider;
pub mod recall;

/// Memory error type.
pub use error::MemoryError;
/// Memory record model.
pub use model::{MemoryRecord, RecordId, ScoredRecord};
/// Memory bank interface and default in-memory implementation.
pub use provider::{InMemoryBank, MemoryBank, save_json};
/// Search options and scoring helpers.
pub use recall::{SearchOptions, overlap_score, tokenize};
