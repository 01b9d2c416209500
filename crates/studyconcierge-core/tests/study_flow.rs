//! End-to-end flows through the StudyConcierge facade.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::fs;
use studyconcierge_config::StudyConciergeConfig;
use studyconcierge_core::{
    ContentKind, PdfStatus, PlanRequest, StudyConcierge, memory_keys,
};
use tempfile::tempdir;

fn concierge() -> StudyConcierge {
    let config = StudyConciergeConfig::builder().without_latency().build();
    StudyConcierge::new(config, None).expect("concierge")
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("date")
}

/// A full study session leaves a plan, quiz, summary and digest in memory.
#[tokio::test]
async fn study_session_records_every_step() {
    let concierge = concierge();
    let session = concierge.start_session("student_1").expect("session");

    let request = PlanRequest::from_syllabus("Algebra, Physics")
        .deadline("Algebra", "2025-06-04")
        .deadline("Final", "2025-06-08")
        .hours_per_day(3.0)
        .starting(date("2025-06-01"));
    let plan = concierge.create_study_plan(&request).await.expect("plan");
    assert_eq!(plan.total_days(), 7);
    assert_eq!(plan.hours_for("Algebra"), 4.5);
    assert_eq!(plan.hours_for("Physics"), 16.5);

    let notes = "Linear equations have one variable. The key idea is balancing both sides. \
        Quadratic equations have two roots. Factoring simplifies quadratic expressions";
    let summary = concierge
        .summarize_content(notes, ContentKind::Text, None)
        .await
        .expect("summary");
    assert_eq!(summary.key_points.len(), 1);

    let quiz = concierge
        .generate_quiz("Algebra", notes, Some(3))
        .await
        .expect("quiz");
    assert_eq!(quiz.questions.len(), 3);

    concierge.update_progress(&session, "Algebra", 2);
    let state = concierge.update_progress(&session, "Algebra", 3);
    assert_eq!(state.progress["Algebra"], 5);
    assert!(concierge.end_session(&session).await);
    assert_eq!(concierge.session(&session), None);

    let memory = concierge.memory();
    for key in [
        memory_keys::PAST_STUDY_PLANS,
        memory_keys::CONTENT_SUMMARIES,
        memory_keys::QUIZZES,
        memory_keys::SESSION_SUMMARY,
    ] {
        assert_eq!(memory.recall(key).len(), 1, "{key}");
    }
    let history = concierge.user_history("student_1");
    assert_eq!(history.sessions_count, 1);
    assert_eq!(history.total_progress, 5);
}

/// Plans for two subjects over three days split two hours evenly.
#[tokio::test]
async fn two_subject_plan_splits_hours() {
    let request = PlanRequest::new(["A", "B"])
        .deadline("Exam", "2025-01-04")
        .hours_per_day(2.0)
        .starting(date("2025-01-01"));
    let plan = concierge().create_study_plan(&request).await.expect("plan");
    assert_eq!(plan.daily_allocation.len(), 3);
    for entries in plan.daily_allocation.values() {
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|entry| entry.hours == 1.0));
    }
    assert_eq!(plan.weekly_goals.values().flatten().collect::<HashSet<_>>().len(), 2);
}

/// Summaries chunk by the configured size and cover every character.
#[tokio::test]
async fn summarize_uses_configured_chunk_size() {
    let config = StudyConciergeConfig::builder()
        .without_latency()
        .chunk_size(50)
        .build();
    let concierge = StudyConcierge::new(config, None).expect("concierge");
    let text = "Graphs have vertices and edges. Trees are acyclic graphs. ".repeat(5);
    let summary = concierge.summarize(&text).await.expect("summary");
    assert_eq!(summary.chunk_count, text.chars().count().div_ceil(50));
    assert_eq!(
        summary.chunks.iter().map(|chunk| chunk.chars).sum::<usize>(),
        text.chars().count()
    );
    assert!(!summary.summary.is_empty());

    let empty = concierge.summarize("").await.expect("summary");
    assert_eq!(empty.chunk_count, 0);
    assert_eq!(empty.summary, "");
}

/// PDF runs are reported and recorded whether they succeed or fail.
#[tokio::test]
async fn pdf_reports_are_recorded() {
    let concierge = concierge();
    let ok = concierge.process_pdf("lectures/week1.pdf").await;
    assert_eq!(ok.status, PdfStatus::Completed);
    assert!(ok.total_chunks > 0);

    let failed = concierge.process_pdf("").await;
    assert_eq!(failed.status, PdfStatus::Failed);
    assert_eq!(
        concierge
            .memory()
            .recall(memory_keys::LARGE_PDF_PROCESSING)
            .len(),
        2
    );
}

/// Memory search ranks overlapping records and skips unrelated ones.
#[tokio::test]
async fn memory_search_finds_saved_quizzes() {
    let concierge = concierge();
    concierge
        .generate_quiz("Thermodynamics", "Entropy always increases in isolated systems.", Some(2))
        .await
        .expect("quiz");
    concierge
        .generate_quiz("Botany", "Chlorophyll absorbs sunlight in leaves.", Some(2))
        .await
        .expect("quiz");

    let hits = concierge.search_memory("entropy thermodynamics");
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|hit| hit.score > 0.0));
    assert!(hits.windows(2).all(|pair| pair[0].score >= pair[1].score));
    assert_eq!(hits[0].record.value["topic"], "Thermodynamics");
    assert!(concierge.search_memory("volcano").is_empty());
}

/// A config file on disk drives the facade.
#[tokio::test]
async fn config_file_drives_the_facade() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("studyconcierge.json5");
    fs::write(
        &path,
        r#"{
            // tuned for quick runs
            chunk_size: 20,
            summarizer: { chunk_delay_ms: 0 },
            planner: { default_hours_per_day: 4 },
            quiz: { default_num_questions: 2 },
            tools: { latency_ms: 0 },
        }"#,
    )
    .expect("write config");
    let config = StudyConciergeConfig::load_from_path(&path).expect("config");
    let concierge = StudyConcierge::new(config, None).expect("concierge");

    let plan = concierge
        .create_study_plan(&PlanRequest::new(["Chemistry"]).starting(date("2025-02-01")))
        .await
        .expect("plan");
    assert_eq!(plan.hours_per_day, 4.0);
    let quiz = concierge
        .generate_quiz("Chemistry", "", None)
        .await
        .expect("quiz");
    assert_eq!(quiz.questions.len(), 2);
    let summary = concierge.summarize(&"a".repeat(45)).await.expect("summary");
    assert_eq!(summary.chunk_count, 3);
}
