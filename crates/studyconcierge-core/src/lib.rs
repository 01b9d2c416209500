//! Study agents and the StudyConcierge facade.
//!
//! This crate owns the planner, quiz, summarizer and session agents, the
//! template/external generation strategy they share, and the facade that
//! wires them to one memory bank.

pub mod agents;
pub mod concierge;
pub mod error;
pub mod model;
pub mod sessions;
mod text;
pub mod types;

/// Study agents.
pub use agents::{PlanRequest, PlannerAgent, QuizAgent, SessionManager, SummarizerAgent};
/// Facade used by the SDK and the demo binary.
pub use concierge::StudyConcierge;
pub use error::StudyError;
/// Generation strategies.
pub use model::{ExternalModel, PlanInput, QuizInput, StudyModel, TemplateModel, select_model};
pub use sessions::SessionStore;
pub use types::*;
