//! LLM-backed generation with template fallback.

use super::template::TemplateModel;
use super::{PlanInput, QuizInput, StudyModel};
use crate::text;
use crate::types::{Allocation, Question, SessionState, StudyPlan};
use async_trait::async_trait;
use autoagents_llm::LLMProvider;
use autoagents_llm::chat::{ChatMessage, ChatProvider, ChatResponse, ChatRole, MessageType};
use autoagents_llm::error::LLMError;
use chrono::{Days, NaiveDate};
use log::{debug, warn};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Characters of source material included in quiz prompts.
const QUIZ_SOURCE_CHARS: usize = 1000;

/// Reasons an external answer is discarded.
#[derive(Debug, Error)]
enum ExternalFailure {
    #[error("provider error: {0}")]
    Provider(#[from] LLMError),
    #[error("empty response")]
    Empty,
    #[error("unparsable response: {0}")]
    Unparsable(String),
    #[error("rejected response: {0}")]
    Rejected(String),
}

/// JSON shape requested for plans.
#[derive(Debug, Deserialize)]
struct PlanReply {
    daily_allocation: BTreeMap<NaiveDate, Vec<Allocation>>,
}

/// JSON shape requested for quizzes.
#[derive(Debug, Deserialize)]
struct QuizReply {
    questions: Vec<Question>,
}

/// Strategy that prompts an LLM provider and falls back to templates.
#[derive(Clone)]
pub struct ExternalModel {
    llm: Arc<dyn LLMProvider>,
    model_name: String,
    fallback: TemplateModel,
}

impl ExternalModel {
    pub fn new(llm: Arc<dyn LLMProvider>, model_name: impl Into<String>, fallback: TemplateModel) -> Self {
        Self {
            llm,
            model_name: model_name.into(),
            fallback,
        }
    }

    async fn ask(&self, prompt: String) -> Result<String, ExternalFailure> {
        debug!(
            "sending prompt to external model (model={}, prompt_len={})",
            self.model_name,
            prompt.len()
        );
        let messages = vec![ChatMessage {
            role: ChatRole::User,
            message_type: MessageType::Text,
            content: prompt,
        }];
        let response: Box<dyn ChatResponse> =
            self.llm.chat_with_tools(&messages, None, None).await?;
        let text = response.text().unwrap_or_default();
        let text = text.trim();
        if text.is_empty() {
            return Err(ExternalFailure::Empty);
        }
        Ok(text.to_string())
    }

    async fn try_plan(&self, input: &PlanInput) -> Result<StudyPlan, ExternalFailure> {
        let deadlines = serde_json::to_string(&input.deadlines)
            .map_err(|err| ExternalFailure::Unparsable(err.to_string()))?;
        let prompt = format!(
            "Create a study plan as strict JSON of the form \
             {{\"daily_allocation\": {{\"YYYY-MM-DD\": [{{\"subject\": string, \"hours\": number}}]}}}}.\n\
             Subjects: {}\nDeadlines: {deadlines}\nStart date: {}\nDays to plan: {}\nHours per day: {}\n\
             A subject with a deadline must not be scheduled on or after it.",
            input.subjects.join(", "),
            input.start,
            input.horizon_days,
            input.hours_per_day
        );
        let reply: PlanReply = parse_json(&self.ask(prompt).await?)?;
        validate_plan(input, &reply.daily_allocation)?;
        Ok(StudyPlan::new(
            input.subjects.clone(),
            input.deadlines.clone(),
            reply.daily_allocation,
            input.hours_per_day,
        ))
    }

    async fn try_summarize(&self, source: &str, max_chars: usize) -> Result<String, ExternalFailure> {
        let prompt = format!(
            "You are a concise academic summarizer. Summarize the following text in a single \
             paragraph of at most {max_chars} characters, keeping the key ideas intact. \
             Output only the summary.\n\n{source}"
        );
        let summary = self.ask(prompt).await?;
        Ok(text::truncate_chars(&summary, max_chars))
    }

    async fn try_questions(&self, input: &QuizInput) -> Result<Vec<Question>, ExternalFailure> {
        let source: String = input.content.chars().take(QUIZ_SOURCE_CHARS).collect();
        let prompt = format!(
            "Generate a multiple-choice quiz as strict JSON of the form \
             {{\"questions\": [{{\"prompt\": string, \"choices\": [string], \"correct_index\": number, \"explanation\": string}}]}}.\n\
             Topic: {}\nNumber of questions: {}\nChoices per question: {}\nSource content: {source}",
            input.topic, input.num_questions, input.choices_per_question
        );
        let reply: QuizReply = parse_json(&self.ask(prompt).await?)?;
        validate_questions(input, &reply.questions)?;
        Ok(reply.questions)
    }

    async fn try_digest(&self, state: &SessionState) -> Result<String, ExternalFailure> {
        let progress = serde_json::to_string(&state.progress)
            .map_err(|err| ExternalFailure::Unparsable(err.to_string()))?;
        let prompt = format!(
            "Summarize this study session and suggest next steps in one concise paragraph.\n\
             Session: {}\nUser: {}\nProgress by topic: {progress}",
            state.session_id,
            state.user_id.as_deref().unwrap_or("unknown")
        );
        self.ask(prompt).await
    }
}

/// Parse the first JSON object in `text`, tolerating code fences and prose around it.
fn parse_json<T: for<'de> Deserialize<'de>>(text: &str) -> Result<T, ExternalFailure> {
    let start = text.find('{');
    let end = text.rfind('}');
    let body = match (start, end) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => return Err(ExternalFailure::Unparsable("no JSON object found".to_string())),
    };
    serde_json::from_str(body).map_err(|err| ExternalFailure::Unparsable(err.to_string()))
}

fn validate_plan(
    input: &PlanInput,
    allocation: &BTreeMap<NaiveDate, Vec<Allocation>>,
) -> Result<(), ExternalFailure> {
    if allocation.is_empty() {
        return Err(ExternalFailure::Rejected("empty allocation".to_string()));
    }
    let window_end = input
        .start
        .checked_add_days(Days::new(u64::from(input.horizon_days)));
    for (date, entries) in allocation {
        if *date < input.start || window_end.is_some_and(|end| *date >= end) {
            return Err(ExternalFailure::Rejected(format!(
                "{date} is outside the planning window"
            )));
        }
        for entry in entries {
            if !input.subjects.contains(&entry.subject) {
                return Err(ExternalFailure::Rejected(format!(
                    "unknown subject {}",
                    entry.subject
                )));
            }
            if !(entry.hours.is_finite() && entry.hours > 0.0) {
                return Err(ExternalFailure::Rejected(format!(
                    "non-positive hours on {date}"
                )));
            }
            if !input.is_active(&entry.subject, *date) {
                return Err(ExternalFailure::Rejected(format!(
                    "{} scheduled after its deadline",
                    entry.subject
                )));
            }
        }
    }
    Ok(())
}

fn validate_questions(input: &QuizInput, questions: &[Question]) -> Result<(), ExternalFailure> {
    if questions.len() != input.num_questions {
        return Err(ExternalFailure::Rejected(format!(
            "expected {} questions, got {}",
            input.num_questions,
            questions.len()
        )));
    }
    for question in questions {
        let unique: HashSet<&String> = question.choices.iter().collect();
        if question.choices.len() < 2
            || unique.len() != question.choices.len()
            || question.correct_index >= question.choices.len()
        {
            return Err(ExternalFailure::Rejected(format!(
                "malformed question: {}",
                question.prompt
            )));
        }
    }
    Ok(())
}

fn report(operation: &str, model_name: &str, err: &ExternalFailure) {
    warn!("external {operation} failed, falling back to templates (model={model_name}): {err}");
}

#[async_trait]
impl StudyModel for ExternalModel {
    fn name(&self) -> &str {
        "external"
    }

    async fn plan(&self, input: &PlanInput) -> StudyPlan {
        match self.try_plan(input).await {
            Ok(plan) => plan,
            Err(err) => {
                report("plan", &self.model_name, &err);
                self.fallback.build_plan(input)
            }
        }
    }

    async fn summarize(&self, source: &str, max_chars: usize) -> String {
        if source.trim().is_empty() {
            return String::new();
        }
        match self.try_summarize(source, max_chars).await {
            Ok(summary) => summary,
            Err(err) => {
                report("summary", &self.model_name, &err);
                text::extractive_summary(source, max_chars)
            }
        }
    }

    async fn questions(&self, input: &QuizInput) -> Vec<Question> {
        match self.try_questions(input).await {
            Ok(questions) => questions,
            Err(err) => {
                report("quiz", &self.model_name, &err);
                self.fallback.build_questions(input)
            }
        }
    }

    async fn session_digest(&self, state: &SessionState) -> String {
        match self.try_digest(state).await {
            Ok(digest) => digest,
            Err(err) => {
                report("session digest", &self.model_name, &err);
                self.fallback.build_digest(state)
            }
        }
    }
}
