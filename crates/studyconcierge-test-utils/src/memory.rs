use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use studyconcierge_memory::{MemoryBank, MemoryRecord, RecordId, ScoredRecord, SearchOptions};

/// Memory bank that records saves and answers reads from canned records.
#[derive(Clone, Default)]
pub struct StubMemory {
    recall_records: Vec<MemoryRecord>,
    saved: Arc<Mutex<Vec<(String, Value)>>>,
}

impl StubMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every `recall` with `records`, regardless of key.
    pub fn with_recall(recall_records: Vec<MemoryRecord>) -> Self {
        Self {
            recall_records,
            saved: Arc::default(),
        }
    }

    /// Every `(key, value)` pair passed to `save`, in call order.
    pub fn saved(&self) -> Vec<(String, Value)> {
        self.saved.lock().clone()
    }

    /// Values saved under `key`, in call order.
    pub fn saved_under(&self, key: &str) -> Vec<Value> {
        self.saved
            .lock()
            .iter()
            .filter(|(saved_key, _)| saved_key == key)
            .map(|(_, value)| value.clone())
            .collect()
    }
}

impl MemoryBank for StubMemory {
    fn save(&self, key: &str, value: Value) -> RecordId {
        self.saved.lock().push((key.to_string(), value));
        RecordId::new_v4()
    }

    fn recall(&self, _key: &str) -> Vec<MemoryRecord> {
        self.recall_records.clone()
    }

    fn search_with_options(&self, _query: &str, _options: SearchOptions) -> Vec<ScoredRecord> {
        Vec::new()
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.saved.lock().iter().map(|(key, _)| key.clone()).collect();
        keys.sort();
        keys.dedup();
        keys
    }

    fn len(&self) -> usize {
        self.saved.lock().len()
    }

    fn delete(&self, key: &str) -> bool {
        let mut saved = self.saved.lock();
        let before = saved.len();
        saved.retain(|(saved_key, _)| saved_key != key);
        saved.len() != before
    }

    fn clear(&self) {
        self.saved.lock().clear();
    }
}
