//! Memory record model used by memory banks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Identifier returned when a record is saved.
pub type RecordId = Uuid;

/// Timestamped record stored under a key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryRecord {
    /// Record identifier.
    pub id: RecordId,
    /// Key the record was saved under.
    pub key: String,
    /// Opaque payload; plain text is stored as a JSON string.
    pub value: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Bank-wide insertion counter.
    pub sequence: u64,
}

impl MemoryRecord {
    /// Text used for keyword search: raw text for strings, compact JSON otherwise.
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// Search hit with its keyword-overlap score in `(0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    /// Matching record.
    pub record: MemoryRecord,
    /// Fraction of query tokens found in the record.
    pub score: f32,
}
