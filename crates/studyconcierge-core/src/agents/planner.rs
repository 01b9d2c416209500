//! Study plan creation and adjustment.

use crate::error::StudyError;
use crate::model::{PlanInput, StudyModel};
use crate::types::{StudyPlan, memory_keys};
use chrono::{Local, NaiveDate, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use studyconcierge_config::PlannerConfig;
use studyconcierge_memory::{MemoryBank, save_json};

/// Date format accepted for deadlines.
const DATE_FORMAT: &str = "%Y-%m-%d";
/// Longest plan that can be built, roughly ten years.
const MAX_HORIZON_DAYS: u32 = 3660;

/// Caller-facing plan request. Dates are validated when the plan is created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub subjects: Vec<String>,
    /// Task or subject name to a `YYYY-MM-DD` date.
    #[serde(default)]
    pub deadlines: BTreeMap<String, String>,
    /// Falls back to the configured default.
    #[serde(default)]
    pub hours_per_day: Option<f64>,
    /// Falls back to today.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl PlanRequest {
    pub fn new<I, S>(subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subjects: subjects.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Subjects from a comma-separated syllabus.
    pub fn from_syllabus(syllabus: &str) -> Self {
        Self::new(
            syllabus
                .split(',')
                .map(str::trim)
                .filter(|topic| !topic.is_empty()),
        )
    }

    pub fn deadline(mut self, task: impl Into<String>, date: impl Into<String>) -> Self {
        self.deadlines.insert(task.into(), date.into());
        self
    }

    pub fn hours_per_day(mut self, hours: f64) -> Self {
        self.hours_per_day = Some(hours);
        self
    }

    pub fn starting(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }
}

/// Builds study plans and records them in the memory bank.
#[derive(Clone)]
pub struct PlannerAgent {
    memory: Arc<dyn MemoryBank>,
    model: Arc<dyn StudyModel>,
    config: PlannerConfig,
}

impl PlannerAgent {
    pub fn new(
        memory: Arc<dyn MemoryBank>,
        model: Arc<dyn StudyModel>,
        config: PlannerConfig,
    ) -> Self {
        Self {
            memory,
            model,
            config,
        }
    }

    /// Create a plan and save its digest under `past_study_plans`.
    pub async fn create_study_plan(&self, request: &PlanRequest) -> Result<StudyPlan, StudyError> {
        let input = self.resolve(request)?;
        let past = self.memory.recall(memory_keys::PAST_STUDY_PLANS);
        info!(
            "creating study plan (subjects={}, horizon_days={}, past_plans={}, model={})",
            input.subjects.len(),
            input.horizon_days,
            past.len(),
            self.model.name()
        );
        let plan = self.model.plan(&input).await;
        save_json(
            self.memory.as_ref(),
            memory_keys::PAST_STUDY_PLANS,
            &json!({
                "created_at": plan.created_at,
                "subjects": plan.subjects,
                "deadlines": plan.deadlines,
                "total_days": input.horizon_days,
                "scheduled_days": plan.total_days(),
                "hours_per_day": plan.hours_per_day,
                "previous_plans": past.len(),
            }),
        )?;
        info!("study plan created (scheduled_days={})", plan.total_days());
        Ok(plan)
    }

    /// Apply "more time" / "less time" feedback to `plan`.
    ///
    /// More time adds an hour per day; less time removes one but never goes
    /// below one hour. Each day's hours are split evenly again.
    pub fn adjust_plan(&self, feedback: &str, plan: &StudyPlan) -> Result<StudyPlan, StudyError> {
        let feedback = feedback.to_lowercase();
        let current = plan.hours_per_day;
        let hours_per_day = if feedback.contains("more time") {
            current + 1.0
        } else if feedback.contains("less time") {
            if current > 1.0 {
                (current - 1.0).max(1.0)
            } else {
                current
            }
        } else {
            current
        };
        info!("adjusting study plan (hours_per_day={current} -> {hours_per_day})");

        let mut adjusted = plan.clone();
        adjusted.hours_per_day = hours_per_day;
        for entries in adjusted.daily_allocation.values_mut() {
            let share = hours_per_day / entries.len().max(1) as f64;
            for entry in entries.iter_mut() {
                entry.hours = share;
            }
        }
        adjusted.adjusted_at = Some(Utc::now());
        save_json(
            self.memory.as_ref(),
            memory_keys::ADJUSTED_STUDY_PLAN,
            &adjusted,
        )?;
        Ok(adjusted)
    }

    fn resolve(&self, request: &PlanRequest) -> Result<PlanInput, StudyError> {
        let mut subjects: Vec<String> = Vec::new();
        for subject in request.subjects.iter().map(|s| s.trim()) {
            if !subject.is_empty() && !subjects.iter().any(|known| known == subject) {
                subjects.push(subject.to_string());
            }
        }
        if subjects.is_empty() {
            return Err(StudyError::invalid("at least one subject is required"));
        }

        let hours_per_day = request
            .hours_per_day
            .unwrap_or(self.config.default_hours_per_day);
        if !(hours_per_day.is_finite() && hours_per_day > 0.0) {
            return Err(StudyError::invalid(format!(
                "hours_per_day must be positive, got {hours_per_day}"
            )));
        }

        let mut deadlines = BTreeMap::new();
        for (task, value) in &request.deadlines {
            let date = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|err| {
                StudyError::invalid(format!("deadline for {task} is not YYYY-MM-DD ({value}): {err}"))
            })?;
            deadlines.insert(task.trim().to_string(), date);
        }

        let start = request
            .start_date
            .unwrap_or_else(|| Local::now().date_naive());
        let horizon_days = if deadlines.is_empty() {
            self.config.default_horizon_days.max(1)
        } else {
            let latest = deadlines
                .values()
                .map(|deadline| (*deadline - start).num_days())
                .max()
                .unwrap_or(1);
            u32::try_from(latest.max(1)).unwrap_or(u32::MAX)
        };
        if horizon_days > MAX_HORIZON_DAYS {
            return Err(StudyError::invalid(format!(
                "plan spans {horizon_days} days; at most {MAX_HORIZON_DAYS} are supported"
            )));
        }
        debug!("resolved plan window (start={start}, horizon_days={horizon_days})");

        Ok(PlanInput {
            subjects,
            deadlines,
            hours_per_day,
            start,
            horizon_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TemplateModel;
    use chrono::Days;
    use pretty_assertions::assert_eq;
    use studyconcierge_memory::{InMemoryBank, MemoryRecord};
    use studyconcierge_test_utils::StubMemory;
    use uuid::Uuid;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, DATE_FORMAT).expect("date")
    }

    fn planner(memory: Arc<dyn MemoryBank>) -> PlannerAgent {
        PlannerAgent::new(
            memory,
            Arc::new(TemplateModel::default()),
            PlannerConfig::default(),
        )
    }

    #[test]
    fn syllabus_is_split_on_commas() {
        let request = PlanRequest::from_syllabus(" Limits, Derivatives ,, Integrals ");
        assert_eq!(request.subjects, vec!["Limits", "Derivatives", "Integrals"]);
    }

    #[tokio::test]
    async fn two_subjects_three_days_two_hours() {
        let memory = Arc::new(InMemoryBank::new());
        let request = PlanRequest::new(["A", "B"])
            .deadline("Exam", "2025-03-04")
            .hours_per_day(2.0)
            .starting(date("2025-03-01"));
        let plan = planner(memory.clone())
            .create_study_plan(&request)
            .await
            .expect("plan");

        assert_eq!(plan.total_days(), 3);
        for day in ["2025-03-01", "2025-03-02", "2025-03-03"] {
            assert_eq!(plan.hours_on(date(day)), 2.0);
        }
        assert_eq!(plan.hours_for("A"), 3.0);
        assert_eq!(plan.hours_for("B"), 3.0);
        assert_eq!(memory.recall(memory_keys::PAST_STUDY_PLANS).len(), 1);
    }

    #[tokio::test]
    async fn no_deadlines_use_default_horizon() {
        let request = PlanRequest::new(["Chemistry"]).starting(date("2025-03-01"));
        let plan = planner(Arc::new(InMemoryBank::new()))
            .create_study_plan(&request)
            .await
            .expect("plan");
        assert_eq!(plan.total_days(), 7);
        assert_eq!(plan.hours_per_day, 2.0);
    }

    #[tokio::test]
    async fn past_deadline_still_plans_one_day() {
        let request = PlanRequest::new(["History"])
            .deadline("Essay", "2025-02-01")
            .starting(date("2025-03-01"));
        let plan = planner(Arc::new(InMemoryBank::new()))
            .create_study_plan(&request)
            .await
            .expect("plan");
        assert_eq!(plan.total_days(), 1);
    }

    #[tokio::test]
    async fn invalid_requests_are_rejected() {
        let planner = planner(Arc::new(StubMemory::new()));
        let cases = [
            PlanRequest::new(["  "]),
            PlanRequest::new(["A"]).hours_per_day(0.0),
            PlanRequest::new(["A"]).hours_per_day(f64::NAN),
            PlanRequest::new(["A"]).deadline("Exam", "15/12/2025"),
            PlanRequest::new(["A"])
                .deadline("Exam", "9999-12-31")
                .starting(date("2025-03-01")),
        ];
        for request in cases {
            let err = planner.create_study_plan(&request).await.unwrap_err();
            assert!(matches!(err, StudyError::InvalidArgument(_)), "{request:?}");
        }
    }

    #[tokio::test]
    async fn horizon_limit_is_inclusive() {
        let start = date("2025-03-01");
        let beyond = start + Days::new(u64::from(MAX_HORIZON_DAYS) + 1);
        let request = PlanRequest::new(["A"])
            .deadline("Exam", beyond.format(DATE_FORMAT).to_string())
            .starting(start);
        let err = planner(Arc::new(StubMemory::new()))
            .create_study_plan(&request)
            .await
            .unwrap_err();
        assert!(matches!(err, StudyError::InvalidArgument(_)));

        let last = start + Days::new(u64::from(MAX_HORIZON_DAYS));
        let request = PlanRequest::new(["A"])
            .deadline("Exam", last.format(DATE_FORMAT).to_string())
            .starting(start);
        let plan = planner(Arc::new(StubMemory::new()))
            .create_study_plan(&request)
            .await
            .expect("plan");
        assert_eq!(plan.total_days(), MAX_HORIZON_DAYS as usize);
    }

    #[tokio::test]
    async fn digest_counts_previous_plans() {
        let previous = |subject: &str| MemoryRecord {
            id: Uuid::new_v4(),
            key: memory_keys::PAST_STUDY_PLANS.to_string(),
            value: json!({ "subjects": [subject] }),
            created_at: Utc::now(),
            sequence: 0,
        };
        let memory = Arc::new(StubMemory::with_recall(vec![
            previous("Algebra"),
            previous("Physics"),
        ]));
        planner(memory.clone())
            .create_study_plan(&PlanRequest::new(["Chemistry"]).starting(date("2025-03-01")))
            .await
            .expect("plan");

        let saved = memory.saved_under(memory_keys::PAST_STUDY_PLANS);
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0]["previous_plans"], json!(2));
        assert_eq!(saved[0]["subjects"], json!(["Chemistry"]));
    }

    #[tokio::test]
    async fn adjust_plan_changes_daily_hours() {
        let memory = Arc::new(StubMemory::new());
        let planner = planner(memory.clone());
        let request = PlanRequest::new(["A", "B"])
            .hours_per_day(2.0)
            .starting(date("2025-03-01"));
        let plan = planner.create_study_plan(&request).await.expect("plan");

        let more = planner
            .adjust_plan("I need MORE TIME please", &plan)
            .expect("adjust");
        assert_eq!(more.hours_per_day, 3.0);
        assert_eq!(more.hours_on(date("2025-03-01")), 3.0);
        assert!(more.adjusted_at.is_some());

        let less = planner.adjust_plan("less time", &plan).expect("adjust");
        assert_eq!(less.hours_per_day, 1.0);
        let floor = planner.adjust_plan("less time", &less).expect("adjust");
        assert_eq!(floor.hours_per_day, 1.0);

        let same = planner.adjust_plan("looks good", &plan).expect("adjust");
        assert_eq!(same.daily_allocation, plan.daily_allocation);
        assert_eq!(memory.saved_under(memory_keys::ADJUSTED_STUDY_PLAN).len(), 4);
    }
}
