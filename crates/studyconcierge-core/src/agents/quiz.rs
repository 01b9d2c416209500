//! Multiple-choice quiz generation.

use crate::error::StudyError;
use crate::model::{QuizInput, StudyModel};
use crate::types::{Quiz, memory_keys};
use chrono::Utc;
use log::info;
use std::sync::Arc;
use studyconcierge_config::QuizConfig;
use studyconcierge_memory::{MemoryBank, save_json};

/// Builds quizzes from study material and saves them under `quizzes`.
#[derive(Clone)]
pub struct QuizAgent {
    memory: Arc<dyn MemoryBank>,
    model: Arc<dyn StudyModel>,
    config: QuizConfig,
}

impl QuizAgent {
    pub fn new(memory: Arc<dyn MemoryBank>, model: Arc<dyn StudyModel>, config: QuizConfig) -> Self {
        Self {
            memory,
            model,
            config,
        }
    }

    /// Generate `num_questions` questions (the configured default when `None`).
    pub async fn generate_quiz(
        &self,
        topic: &str,
        content: &str,
        num_questions: Option<usize>,
    ) -> Result<Quiz, StudyError> {
        let num_questions = num_questions.unwrap_or(self.config.default_num_questions);
        if num_questions == 0 {
            return Err(StudyError::invalid("num_questions must be greater than zero"));
        }
        let topic = topic.trim();
        info!(
            "generating quiz (topic={topic}, questions={num_questions}, content_chars={}, model={})",
            content.chars().count(),
            self.model.name()
        );
        let input = QuizInput {
            topic: topic.to_string(),
            content: content.to_string(),
            num_questions,
            max_key_terms: self.config.max_key_terms,
            choices_per_question: self.config.choices_per_question.max(2),
        };
        let quiz = Quiz {
            topic: input.topic.clone(),
            questions: self.model.questions(&input).await,
            generated_at: Utc::now(),
            source_chars: content.chars().count(),
        };
        save_json(self.memory.as_ref(), memory_keys::QUIZZES, &quiz)?;
        Ok(quiz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TemplateModel;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use studyconcierge_test_utils::StubMemory;

    fn agent(memory: Arc<StubMemory>) -> QuizAgent {
        QuizAgent::new(
            memory,
            Arc::new(TemplateModel::default()),
            QuizConfig::default(),
        )
    }

    #[tokio::test]
    async fn quiz_with_few_terms_still_has_requested_questions() {
        let memory = Arc::new(StubMemory::new());
        let quiz = agent(memory.clone())
            .generate_quiz("Cells", "Mitochondria power cells.", Some(7))
            .await
            .expect("quiz");

        assert_eq!(quiz.topic, "Cells");
        assert_eq!(quiz.questions.len(), 7);
        for question in &quiz.questions {
            assert!(!question.distractors().is_empty());
            let unique: HashSet<&String> = question.choices.iter().collect();
            assert_eq!(unique.len(), question.choices.len());
            assert!(question.correct_index < question.choices.len());
        }
        assert_eq!(memory.saved_under(memory_keys::QUIZZES).len(), 1);
    }

    #[tokio::test]
    async fn default_question_count_comes_from_config() {
        let quiz = agent(Arc::new(StubMemory::new()))
            .generate_quiz("Art", "", None)
            .await
            .expect("quiz");
        assert_eq!(quiz.questions.len(), 5);
        assert_eq!(quiz.source_chars, 0);
    }

    #[tokio::test]
    async fn zero_questions_is_invalid() {
        let memory = Arc::new(StubMemory::new());
        let err = agent(memory.clone())
            .generate_quiz("Art", "content", Some(0))
            .await
            .unwrap_err();
        assert!(matches!(err, StudyError::InvalidArgument(_)));
        assert!(memory.saved().is_empty());
    }
}
