//! The four study agents.
//!
//! Agents never call each other. Each one receives the shared memory bank and
//! generation strategy at construction and leaves its results in the bank.

mod planner;
mod quiz;
mod session;
mod summarizer;

pub use planner::{PlanRequest, PlannerAgent};
pub use quiz::QuizAgent;
pub use session::SessionManager;
pub use summarizer::SummarizerAgent;

use log::warn;
use serde::Serialize;
use studyconcierge_memory::{MemoryBank, save_json};

/// Save a side record whose loss must not fail the caller's operation.
fn record<T: Serialize + ?Sized>(memory: &dyn MemoryBank, key: &str, value: &T) {
    if let Err(err) = save_json(memory, key, value) {
        warn!("failed to record memory entry (key={key}): {err}");
    }
}
