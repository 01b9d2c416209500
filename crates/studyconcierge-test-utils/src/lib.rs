//! Test helpers shared across StudyConcierge crates.

pub mod llm;
pub mod memory;

pub use llm::{FailingLLM, FixedChatResponse, FixedLLM, RecordingChatLLM, ScriptedLLM};
pub use memory::StubMemory;
