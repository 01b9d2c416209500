//! Deterministic template generation.

use super::{PlanInput, QuizInput, StudyModel};
use crate::text;
use crate::types::{Allocation, Question, SessionState, StudyPlan};
use async_trait::async_trait;
use chrono::Days;
use std::collections::BTreeMap;

/// Prompts used for questions built around a key term.
const TERM_PROMPTS: [&str; 4] = [
    "What is the significance of {term} in this context?",
    "How does {term} relate to the main topic?",
    "Define {term} based on the provided content.",
    "Explain the role of {term} in the subject matter.",
];

/// Prompts used when the material has too few key terms.
const GENERAL_PROMPTS: [&str; 4] = [
    "What is the main focus of {topic}?",
    "Which of the following is most relevant to {topic}?",
    "How would you summarize the key points of {topic}?",
    "What is the primary purpose of studying {topic}?",
];

/// Answers for general questions; the first one is correct.
const GENERAL_CHOICES: [&str; 4] = [
    "To gain a comprehensive understanding of the subject.",
    "To complete a mandatory assignment.",
    "To prepare for an upcoming examination.",
    "To develop critical thinking skills.",
];

/// Rule-based generator with no external dependencies.
#[derive(Debug, Clone)]
pub struct TemplateModel {
    default_choices: usize,
}

impl Default for TemplateModel {
    fn default() -> Self {
        Self::new(GENERAL_CHOICES.len())
    }
}

impl TemplateModel {
    /// `default_choices` is used when a quiz input asks for fewer than two choices.
    pub fn new(default_choices: usize) -> Self {
        Self {
            default_choices: default_choices.max(2),
        }
    }

    /// Split `hours_per_day` evenly between the subjects active on each day.
    pub fn build_plan(&self, input: &PlanInput) -> StudyPlan {
        let mut allocation = BTreeMap::new();
        for offset in 0..input.horizon_days {
            let Some(date) = input.start.checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };
            let active: Vec<&String> = input
                .subjects
                .iter()
                .filter(|subject| input.is_active(subject, date))
                .collect();
            if active.is_empty() {
                continue;
            }
            let share = input.hours_per_day / active.len() as f64;
            allocation.insert(
                date,
                active
                    .into_iter()
                    .map(|subject| Allocation {
                        subject: subject.clone(),
                        hours: share,
                    })
                    .collect(),
            );
        }
        StudyPlan::new(
            input.subjects.clone(),
            input.deadlines.clone(),
            allocation,
            input.hours_per_day,
        )
    }

    /// Key-term questions, or general topic questions when fewer than two terms exist.
    pub fn build_questions(&self, input: &QuizInput) -> Vec<Question> {
        let terms: Vec<String> = text::key_terms(&input.content, input.max_key_terms)
            .into_iter()
            .map(|(term, _)| term)
            .collect();
        let choices = if input.choices_per_question < 2 {
            self.default_choices
        } else {
            input.choices_per_question
        };
        (0..input.num_questions)
            .map(|index| {
                if terms.len() < 2 {
                    general_question(&input.topic, index, choices)
                } else {
                    term_question(&input.topic, &terms, index, choices)
                }
            })
            .collect()
    }

    pub fn build_digest(&self, state: &SessionState) -> String {
        let owner = state.user_id.as_deref().unwrap_or("an anonymous user");
        let minutes = (state.last_updated - state.created_at).num_minutes();
        let mut digest = format!(
            "Session {} for {owner} lasted {minutes} minute(s) and recorded {} progress unit(s) across {} topic(s).",
            state.session_id,
            state.total_progress(),
            state.progress.len()
        );
        let strongest = state
            .progress
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)));
        let weakest = state
            .progress
            .iter()
            .min_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));
        match (strongest, weakest) {
            (Some((best, _)), Some((worst, _))) if best != worst => {
                digest.push_str(&format!(
                    " Most progress was made on {best}; review {worst} next."
                ));
            }
            (Some((best, _)), _) => {
                digest.push_str(&format!(" Keep building on {best} next time."));
            }
            _ => digest.push_str(" No topics were studied; start with a short review next time."),
        }
        digest
    }
}

/// Question `index` about term `index % terms.len()`.
fn term_question(topic: &str, terms: &[String], index: usize, choices: usize) -> Question {
    let term_index = index % terms.len();
    let term = &terms[term_index];
    let others: Vec<&String> = terms
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != term_index)
        .map(|(_, other)| other)
        .collect();
    let wanted = (choices - 1).min(others.len());
    let mut options: Vec<String> = (0..wanted)
        .map(|step| others[(index + step) % others.len()].clone())
        .collect();
    let correct_index = index % (options.len() + 1);
    options.insert(correct_index, term.clone());
    Question {
        prompt: TERM_PROMPTS[index % TERM_PROMPTS.len()].replace("{term}", term),
        choices: options,
        correct_index,
        explanation: format!(
            "'{term}' is one of the key terms in the material on {topic}."
        ),
    }
}

fn general_question(topic: &str, index: usize, choices: usize) -> Question {
    let count = choices.min(GENERAL_CHOICES.len());
    let correct_index = index % count;
    let mut options: Vec<String> = GENERAL_CHOICES[1..count]
        .iter()
        .map(|choice| choice.to_string())
        .collect();
    options.insert(correct_index, GENERAL_CHOICES[0].to_string());
    Question {
        prompt: GENERAL_PROMPTS[index % GENERAL_PROMPTS.len()].replace("{topic}", topic),
        choices: options,
        correct_index,
        explanation: format!("This question assesses general understanding of {topic}."),
    }
}

#[async_trait]
impl StudyModel for TemplateModel {
    fn name(&self) -> &str {
        "template"
    }

    async fn plan(&self, input: &PlanInput) -> StudyPlan {
        self.build_plan(input)
    }

    async fn summarize(&self, text: &str, max_chars: usize) -> String {
        text::extractive_summary(text, max_chars)
    }

    async fn questions(&self, input: &QuizInput) -> Vec<Question> {
        self.build_questions(input)
    }

    async fn session_digest(&self, state: &SessionState) -> String {
        self.build_digest(state)
    }
}
