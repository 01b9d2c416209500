//! Memory bank interface and the default in-memory implementation.

use crate::error::MemoryError;
use crate::model::{MemoryRecord, RecordId, ScoredRecord};
use crate::recall::{SearchOptions, overlap_score, tokenize};
use chrono::Utc;
use log::{debug, info};
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Append-only key/record store shared by the agents.
///
/// Reads of unknown keys return empty results; none of these operations fail.
pub trait MemoryBank: Send + Sync {
    /// Append a timestamped record under `key`.
    fn save(&self, key: &str, value: Value) -> RecordId;

    /// All records for `key` in insertion order.
    fn recall(&self, key: &str) -> Vec<MemoryRecord>;

    /// Most recent records for `key`, newest first.
    fn recall_recent(&self, key: &str, limit: usize) -> Vec<MemoryRecord> {
        let mut records = self.recall(key);
        records.reverse();
        records.truncate(limit);
        records
    }

    /// Keyword-overlap search across every stored record.
    fn search(&self, query: &str) -> Vec<ScoredRecord> {
        self.search_with_options(query, SearchOptions::default())
    }

    /// Keyword-overlap search with limit and score filtering.
    fn search_with_options(&self, query: &str, options: SearchOptions) -> Vec<ScoredRecord>;

    /// Keys that currently hold records.
    fn keys(&self) -> Vec<String>;

    /// Total number of stored records.
    fn len(&self) -> usize;

    /// Whether the bank holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every record stored under `key`.
    fn delete(&self, key: &str) -> bool;

    /// Remove all records.
    fn clear(&self);
}

/// Serialize `value` and save it under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    bank: &dyn MemoryBank,
    key: &str,
    value: &T,
) -> Result<RecordId, MemoryError> {
    let value = serde_json::to_value(value)?;
    Ok(bank.save(key, value))
}

#[derive(Debug, Default)]
struct BankState {
    records: BTreeMap<String, Vec<MemoryRecord>>,
    next_sequence: u64,
}

/// Volatile memory bank guarded by a single lock.
#[derive(Debug, Default)]
pub struct InMemoryBank {
    state: RwLock<BankState>,
}

impl InMemoryBank {
    /// Create an empty bank.
    pub fn new() -> Self {
        info!("initialized in-memory memory bank");
        Self::default()
    }
}

impl MemoryBank for InMemoryBank {
    fn save(&self, key: &str, value: Value) -> RecordId {
        let mut state = self.state.write();
        let sequence = state.next_sequence;
        state.next_sequence += 1;
        let record = MemoryRecord {
            id: Uuid::new_v4(),
            key: key.to_string(),
            value,
            created_at: Utc::now(),
            sequence,
        };
        let id = record.id;
        state
            .records
            .entry(key.to_string())
            .or_default()
            .push(record);
        debug!("saved memory record (key={key}, id={id}, sequence={sequence})");
        id
    }

    fn recall(&self, key: &str) -> Vec<MemoryRecord> {
        let records = self
            .state
            .read()
            .records
            .get(key)
            .cloned()
            .unwrap_or_default();
        debug!("recall memory (key={key}, returned={})", records.len());
        records
    }

    fn search_with_options(&self, query: &str, options: SearchOptions) -> Vec<ScoredRecord> {
        let query_tokens: BTreeSet<String> = tokenize(query).into_iter().collect();
        if query_tokens.is_empty() {
            return Vec::new();
        }
        let min_score = options.min_score.unwrap_or(0.0);
        let mut hits: Vec<ScoredRecord> = {
            let state = self.state.read();
            state
                .records
                .values()
                .flatten()
                .filter_map(|record| {
                    let score = overlap_score(&query_tokens, &record.value_text());
                    (score > 0.0 && score >= min_score).then(|| ScoredRecord {
                        record: record.clone(),
                        score,
                    })
                })
                .collect()
        };
        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.record.created_at.cmp(&a.record.created_at))
                .then_with(|| b.record.sequence.cmp(&a.record.sequence))
        });
        if let Some(limit) = options.limit {
            hits.truncate(limit);
        }
        debug!("search memory (query_tokens={}, hits={})", query_tokens.len(), hits.len());
        hits
    }

    fn keys(&self) -> Vec<String> {
        self.state.read().records.keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.state.read().records.values().map(Vec::len).sum()
    }

    fn delete(&self, key: &str) -> bool {
        info!("deleting memory records (key={key})");
        self.state.write().records.remove(key).is_some()
    }

    fn clear(&self) {
        info!("clearing memory bank");
        self.state.write().records.clear();
    }
}
