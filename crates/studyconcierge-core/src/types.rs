//! Data types produced and consumed by the study agents.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use studyconcierge_tools::SearchResult;

/// Session identifier, `session_<user>_<suffix>`.
pub type SessionId = String;

/// Memory bank keys written by the agents.
pub mod memory_keys {
    pub const PAST_STUDY_PLANS: &str = "past_study_plans";
    pub const ADJUSTED_STUDY_PLAN: &str = "adjusted_study_plan";
    pub const QUIZZES: &str = "quizzes";
    pub const CONTENT_SUMMARIES: &str = "content_summaries";
    pub const LARGE_PDF_PROCESSING: &str = "large_pdf_processing";
    pub const SESSION_EVENTS: &str = "session_events";
    pub const SESSION_SUMMARY: &str = "session_summary";
}

/// Hours assigned to one subject on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub subject: String,
    pub hours: f64,
}

/// Day-by-day study plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    /// Subjects in the order they were requested.
    pub subjects: Vec<String>,
    /// Task or subject name to due date.
    pub deadlines: BTreeMap<String, NaiveDate>,
    /// One entry per (date, active subject) pair.
    pub daily_allocation: BTreeMap<NaiveDate, Vec<Allocation>>,
    pub hours_per_day: f64,
    /// ISO week label (`2025-W47`) to the subjects studied that week.
    pub weekly_goals: BTreeMap<String, Vec<String>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub adjusted_at: Option<DateTime<Utc>>,
}

impl StudyPlan {
    /// Assemble a plan and derive its weekly goals from the allocation.
    pub fn new(
        subjects: Vec<String>,
        deadlines: BTreeMap<String, NaiveDate>,
        daily_allocation: BTreeMap<NaiveDate, Vec<Allocation>>,
        hours_per_day: f64,
    ) -> Self {
        let weekly_goals = weekly_goals(&daily_allocation);
        Self {
            subjects,
            deadlines,
            daily_allocation,
            hours_per_day,
            weekly_goals,
            created_at: Utc::now(),
            adjusted_at: None,
        }
    }

    /// Total hours allocated on `date`.
    pub fn hours_on(&self, date: NaiveDate) -> f64 {
        self.daily_allocation
            .get(&date)
            .map(|entries| entries.iter().map(|entry| entry.hours).sum())
            .unwrap_or(0.0)
    }

    /// Total hours allocated to `subject` across the plan.
    pub fn hours_for(&self, subject: &str) -> f64 {
        self.daily_allocation
            .values()
            .flatten()
            .filter(|entry| entry.subject == subject)
            .map(|entry| entry.hours)
            .sum()
    }

    /// Number of scheduled days.
    pub fn total_days(&self) -> usize {
        self.daily_allocation.len()
    }
}

fn weekly_goals(allocation: &BTreeMap<NaiveDate, Vec<Allocation>>) -> BTreeMap<String, Vec<String>> {
    let mut goals: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (date, entries) in allocation {
        let week = date.iso_week();
        let subjects = goals
            .entry(format!("{}-W{:02}", week.year(), week.week()))
            .or_default();
        for entry in entries {
            if !subjects.contains(&entry.subject) {
                subjects.push(entry.subject.clone());
            }
        }
    }
    goals
}

/// Multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    /// The correct choice, when `correct_index` is in range.
    pub fn correct_choice(&self) -> Option<&str> {
        self.choices.get(self.correct_index).map(String::as_str)
    }

    /// Every choice except the correct one.
    pub fn distractors(&self) -> Vec<&str> {
        self.choices
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != self.correct_index)
            .map(|(_, choice)| choice.as_str())
            .collect()
    }
}

/// Generated quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub topic: String,
    pub questions: Vec<Question>,
    pub generated_at: DateTime<Utc>,
    /// Character count of the material the quiz was built from.
    pub source_chars: usize,
}

/// Placeholder summary of one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSummary {
    pub index: usize,
    /// Characters in the source chunk.
    pub chars: usize,
    pub summary: String,
}

/// Result of chunked summarization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Chunk summaries joined by a single space, in chunk order.
    pub summary: String,
    pub chunks: Vec<ChunkSummary>,
    pub chunk_count: usize,
    pub total_chars: usize,
}

/// Kind of material passed to `summarize_content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Raw text.
    Text,
    /// A PDF path, extracted with the PDF tool.
    Pdf,
    /// A search query, answered by the search tool.
    Web,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Pdf => "pdf",
            ContentKind::Web => "web",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ContentKind::Text),
            "pdf" => Ok(ContentKind::Pdf),
            "web" => Ok(ContentKind::Web),
            other => Err(format!("unknown content kind: {other}")),
        }
    }
}

/// Summary of a piece of study material with its key points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSummary {
    pub kind: ContentKind,
    pub summary: String,
    pub key_points: Vec<String>,
    /// Characters in the content as passed by the caller.
    pub original_chars: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_results: Vec<SearchResult>,
    pub summarized_at: DateTime<Utc>,
}

/// Outcome of a long-running PDF run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfStatus {
    Completed,
    Failed,
}

/// Report for a chunked PDF summarization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfReport {
    pub pdf_path: String,
    pub status: PdfStatus,
    pub chunks_processed: usize,
    pub total_chunks: usize,
    pub summary: Option<ContentSummary>,
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Progress counters for one study session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: SessionId,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Topic to accumulated progress units.
    pub progress: BTreeMap<String, i64>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl SessionState {
    pub fn new(session_id: impl Into<SessionId>, user_id: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.into(),
            user_id,
            progress: BTreeMap::new(),
            created_at: now,
            last_updated: now,
        }
    }

    /// Sum of all topic counters.
    pub fn total_progress(&self) -> i64 {
        self.progress
            .values()
            .fold(0i64, |total, value| total.saturating_add(*value))
    }
}

/// Lifecycle events recorded under `session_events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEventKind {
    SessionStarted,
    ProgressUpdated,
    SessionEnded,
}

/// Session event as stored in the memory bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub session_id: SessionId,
    #[serde(default)]
    pub user_id: Option<String>,
    pub event: SessionEventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<i64>,
    pub timestamp: DateTime<Utc>,
}

/// Study history aggregated from recorded session events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserHistory {
    pub user_id: String,
    pub sessions_count: usize,
    pub total_progress: i64,
    /// Topic to progress across every session of the user.
    pub topics: BTreeMap<String, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("date")
    }

    #[test]
    fn weekly_goals_group_by_iso_week() {
        let mut allocation = BTreeMap::new();
        // 2025-11-16 is a Sunday, the next day starts ISO week 47.
        allocation.insert(
            date("2025-11-16"),
            vec![Allocation {
                subject: "Algebra".to_string(),
                hours: 2.0,
            }],
        );
        allocation.insert(
            date("2025-11-17"),
            vec![
                Allocation {
                    subject: "Algebra".to_string(),
                    hours: 1.0,
                },
                Allocation {
                    subject: "Physics".to_string(),
                    hours: 1.0,
                },
            ],
        );
        let plan = StudyPlan::new(
            vec!["Algebra".to_string(), "Physics".to_string()],
            BTreeMap::new(),
            allocation,
            2.0,
        );
        assert_eq!(
            plan.weekly_goals,
            BTreeMap::from([
                ("2025-W46".to_string(), vec!["Algebra".to_string()]),
                (
                    "2025-W47".to_string(),
                    vec!["Algebra".to_string(), "Physics".to_string()]
                ),
            ])
        );
        assert_eq!(plan.hours_on(date("2025-11-17")), 2.0);
        assert_eq!(plan.hours_for("Algebra"), 3.0);
        assert_eq!(plan.total_days(), 2);
    }

    #[test]
    fn content_kind_parses_case_insensitively() {
        assert_eq!("PDF".parse::<ContentKind>(), Ok(ContentKind::Pdf));
        assert_eq!(" web ".parse::<ContentKind>(), Ok(ContentKind::Web));
        assert!("video".parse::<ContentKind>().is_err());
    }

    #[test]
    fn question_distractors_skip_correct_choice() {
        let question = Question {
            prompt: "?".to_string(),
            choices: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            correct_index: 1,
            explanation: String::new(),
        };
        assert_eq!(question.correct_choice(), Some("b"));
        assert_eq!(question.distractors(), vec!["a", "c"]);
    }

    #[test]
    fn session_events_serialize_snake_case() {
        let event = SessionEvent {
            session_id: "session_u_1".to_string(),
            user_id: Some("u".to_string()),
            event: SessionEventKind::ProgressUpdated,
            topic: Some("math".to_string()),
            delta: Some(2),
            timestamp: Utc::now(),
        };
        let value = serde_json::to_value(&event).expect("json");
        assert_eq!(value["event"], "progress_updated");
        let back: SessionEvent = serde_json::from_value(value).expect("event");
        assert_eq!(back, event);
    }
}
