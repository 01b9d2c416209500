//! Demo run of the StudyConcierge agents.

use anyhow::{Context, Result};
use autoagents_llm::LLMProvider;
use autoagents_llm::backends::openai::OpenAI;
use autoagents_llm::builder::LLMBuilder;
use clap::Parser;
use log::{debug, info, warn};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use studyconcierge::config::StudyConciergeConfig;
use studyconcierge::core::ContentKind;
use studyconcierge::{PlanRequest, StudyConcierge, init_logging};

const SAMPLE_NOTES: &str = "Photosynthesis converts light energy into chemical energy. \
    The key pigment is chlorophyll, found in the chloroplasts of plant cells. \
    Light reactions split water and release oxygen. \
    The Calvin cycle fixes carbon dioxide into glucose. \
    An important limiting factor is light intensity";

/// Command-line options for the demo run.
#[derive(Parser)]
#[command(name = "studyconcierge", version)]
struct Cli {
    /// Optional path to a studyconcierge.json5 config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Learner id used for the demo session
    #[arg(long, default_value = "student_1")]
    user: String,
    /// Comma-separated subjects to plan for
    #[arg(long, default_value = "Biology, Chemistry, Mathematics")]
    syllabus: String,
    /// Exam date (YYYY-MM-DD) applied to every subject
    #[arg(long)]
    exam: Option<String>,
    /// PDF path to run through chunked summarization
    #[arg(long, default_value = "notes/biology.pdf")]
    pdf: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let llm = external_provider(&config)?;
    let concierge = StudyConcierge::new(config, llm).context("failed to build concierge")?;
    info!("running demo (user={}, model={})", cli.user, concierge.model_name());

    let session = concierge
        .start_session(&cli.user)
        .context("failed to start session")?;

    let mut request = PlanRequest::from_syllabus(&cli.syllabus);
    if let Some(exam) = &cli.exam {
        for subject in request.subjects.clone() {
            request = request.deadline(subject, exam.clone());
        }
    }
    let plan = concierge
        .create_study_plan(&request)
        .await
        .context("failed to create study plan")?;
    print_section("Study plan", &plan)?;

    let summary = concierge
        .summarize_content(SAMPLE_NOTES, ContentKind::Text, None)
        .await
        .context("failed to summarize notes")?;
    print_section("Notes summary", &summary)?;

    let quiz = concierge
        .generate_quiz("Photosynthesis", SAMPLE_NOTES, None)
        .await
        .context("failed to generate quiz")?;
    print_section("Quiz", &quiz)?;

    let report = concierge.process_pdf(&cli.pdf).await;
    print_section("PDF report", &report)?;

    for subject in &plan.subjects {
        concierge.update_progress(&session, subject, 1);
    }
    if let Some(state) = concierge.session(&session) {
        print_section("Session progress", &state)?;
    }
    concierge.end_session(&session).await;

    print_section("History", &concierge.user_history(&cli.user))?;
    let memory = concierge.memory();
    print_section(
        "Memory bank",
        &json!({ "keys": memory.keys(), "records": memory.len() }),
    )?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<StudyConciergeConfig> {
    debug!("cli args parsed (config={})", cli.config.is_some());
    if let Some(path) = cli.config.as_ref() {
        return StudyConciergeConfig::load_from_path(path).context("failed to load config");
    }
    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    let layered =
        StudyConciergeConfig::load_layered(&cwd).context("failed to load layered config")?;
    debug!("layered config loaded (layers={})", layered.layers.len());
    Ok(layered.config)
}

/// OpenAI provider when external generation is enabled and a key is present.
fn external_provider(config: &StudyConciergeConfig) -> Result<Option<Arc<dyn LLMProvider>>> {
    if !config.use_external_llm {
        return Ok(None);
    }
    let Ok(api_key) = std::env::var("OPENAI_API_KEY") else {
        warn!("use_external_llm is set but OPENAI_API_KEY is missing; using templates");
        return Ok(None);
    };
    let llm: Arc<dyn LLMProvider> = LLMBuilder::<OpenAI>::new()
        .api_key(api_key)
        .model(&config.model_name)
        .build()
        .context("failed to build OpenAI LLM provider")?;
    Ok(Some(llm))
}

fn print_section<T: serde::Serialize + ?Sized>(title: &str, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to render {title}"))?;
    println!("== {title} ==\n{body}\n");
    Ok(())
}
