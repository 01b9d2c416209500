//! Generation strategies behind the study agents.
//!
//! Every agent holds an `Arc<dyn StudyModel>` chosen once at construction.
//! [`TemplateModel`] is deterministic; [`ExternalModel`] asks an LLM provider
//! and answers with the template result whenever the provider fails or its
//! output cannot be used. Neither variant returns an error, so callers never
//! see provider failures.

mod external;
mod template;

pub use external::ExternalModel;
pub use template::TemplateModel;

use crate::types::{Question, SessionState, StudyPlan};
use async_trait::async_trait;
use autoagents_llm::LLMProvider;
use chrono::NaiveDate;
use log::{info, warn};
use std::collections::BTreeMap;
use std::sync::Arc;
use studyconcierge_config::StudyConciergeConfig;

/// Validated planner input.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanInput {
    /// Distinct, non-empty subjects in request order.
    pub subjects: Vec<String>,
    pub deadlines: BTreeMap<String, NaiveDate>,
    /// Strictly positive and finite.
    pub hours_per_day: f64,
    pub start: NaiveDate,
    /// Days to schedule from `start`, at least one.
    pub horizon_days: u32,
}

impl PlanInput {
    /// Whether `subject` still has study days on `date`.
    pub fn is_active(&self, subject: &str, date: NaiveDate) -> bool {
        self.deadlines
            .get(subject)
            .is_none_or(|deadline| date < *deadline)
    }
}

/// Validated quiz input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizInput {
    pub topic: String,
    pub content: String,
    /// At least one.
    pub num_questions: usize,
    pub max_key_terms: usize,
    /// At least two.
    pub choices_per_question: usize,
}

/// Strategy producing plans, summaries, questions and session digests.
#[async_trait]
pub trait StudyModel: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// Build a day-by-day plan.
    async fn plan(&self, input: &PlanInput) -> StudyPlan;

    /// Summarize `text` in at most `max_chars` characters.
    async fn summarize(&self, text: &str, max_chars: usize) -> String;

    /// Produce exactly `input.num_questions` questions.
    async fn questions(&self, input: &QuizInput) -> Vec<Question>;

    /// One-paragraph digest of a finished session.
    async fn session_digest(&self, state: &SessionState) -> String;
}

/// Pick the generation strategy for `config`.
///
/// The external model is used only when the config asks for it and a
/// provider is supplied.
pub fn select_model(
    config: &StudyConciergeConfig,
    llm: Option<Arc<dyn LLMProvider>>,
) -> Arc<dyn StudyModel> {
    let template = TemplateModel::new(config.quiz.choices_per_question);
    match (config.use_external_llm, llm) {
        (true, Some(llm)) => {
            info!("using external model (model={})", config.model_name);
            Arc::new(ExternalModel::new(llm, config.model_name.clone(), template))
        }
        (true, None) => {
            warn!(
                "external model requested but no provider configured; using templates (model={})",
                config.model_name
            );
            Arc::new(template)
        }
        (false, _) => {
            info!("using template model");
            Arc::new(template)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use studyconcierge_test_utils::FixedLLM;

    #[test]
    fn selects_template_unless_external_is_usable() {
        let config = StudyConciergeConfig::default();
        assert_eq!(select_model(&config, None).name(), "template");
        let llm: Arc<dyn LLMProvider> = Arc::new(FixedLLM::new("ok"));
        assert_eq!(select_model(&config, Some(llm.clone())).name(), "template");

        let external = StudyConciergeConfig::builder().use_external_llm(true).build();
        assert_eq!(select_model(&external, None).name(), "template");
        assert_eq!(select_model(&external, Some(llm)).name(), "external");
    }

    #[test]
    fn deadlines_only_limit_matching_subjects() {
        let date = |value: &str| NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("date");
        let input = PlanInput {
            subjects: vec!["Algebra".to_string(), "Physics".to_string()],
            deadlines: BTreeMap::from([("Algebra".to_string(), date("2025-03-03"))]),
            hours_per_day: 2.0,
            start: date("2025-03-01"),
            horizon_days: 7,
        };
        assert!(input.is_active("Algebra", date("2025-03-02")));
        assert!(!input.is_active("Algebra", date("2025-03-03")));
        assert!(input.is_active("Physics", date("2025-03-05")));
    }
}
