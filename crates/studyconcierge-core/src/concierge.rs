//! StudyConcierge facade.

use crate::agents::{PlanRequest, PlannerAgent, QuizAgent, SessionManager, SummarizerAgent};
use crate::error::StudyError;
use crate::model::{StudyModel, select_model};
use crate::sessions::SessionStore;
use crate::types::{
    ContentKind, ContentSummary, PdfReport, Quiz, SessionId, SessionState, StudyPlan, Summary,
    UserHistory,
};
use autoagents_llm::LLMProvider;
use log::info;
use serde_json::Value;
use std::sync::Arc;
use studyconcierge_config::StudyConciergeConfig;
use studyconcierge_memory::{InMemoryBank, MemoryBank, MemoryRecord, ScoredRecord, SearchOptions};
use studyconcierge_tools::{PdfTool, SearchTool, ToolRegistry, builtin_tool_registry};

/// Entry point wiring the memory bank, tools and the four agents together.
///
/// Every agent shares one memory bank and one generation strategy, both
/// chosen at construction.
pub struct StudyConcierge {
    config: Arc<StudyConciergeConfig>,
    memory: Arc<dyn MemoryBank>,
    model: Arc<dyn StudyModel>,
    tools: ToolRegistry,
    planner: PlannerAgent,
    quiz: QuizAgent,
    summarizer: SummarizerAgent,
    sessions: SessionManager,
}

impl StudyConcierge {
    /// Build a concierge with a fresh in-memory bank.
    ///
    /// `llm` is only used when `config.use_external_llm` is set.
    pub fn new(
        config: StudyConciergeConfig,
        llm: Option<Arc<dyn LLMProvider>>,
    ) -> Result<Self, StudyError> {
        Self::with_memory(config, llm, Arc::new(InMemoryBank::new()))
    }

    /// Build a concierge around an existing memory bank.
    pub fn with_memory(
        config: StudyConciergeConfig,
        llm: Option<Arc<dyn LLMProvider>>,
        memory: Arc<dyn MemoryBank>,
    ) -> Result<Self, StudyError> {
        config.validate()?;
        let model = select_model(&config, llm);
        let latency = config.tools.latency();
        let search = Arc::new(SearchTool::with_latency(latency));
        let pdf = Arc::new(PdfTool::with_latency(latency));
        let tools = builtin_tool_registry(search.clone(), pdf.clone());

        let planner = PlannerAgent::new(memory.clone(), model.clone(), config.planner.clone());
        let quiz = QuizAgent::new(memory.clone(), model.clone(), config.quiz.clone());
        let summarizer = SummarizerAgent::new(
            memory.clone(),
            model.clone(),
            search,
            pdf,
            config.summarizer.clone(),
            config.chunk_size,
        );
        let sessions = SessionManager::new(SessionStore::new(), memory.clone(), model.clone());
        info!(
            "study concierge ready (model={}, tools={})",
            model.name(),
            tools.list().len()
        );

        Ok(Self {
            config: Arc::new(config),
            memory,
            model,
            tools,
            planner,
            quiz,
            summarizer,
            sessions,
        })
    }

    pub fn config(&self) -> &StudyConciergeConfig {
        &self.config
    }

    pub fn memory(&self) -> Arc<dyn MemoryBank> {
        self.memory.clone()
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Name of the active generation strategy.
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn start_session(&self, user_id: &str) -> Result<SessionId, StudyError> {
        self.sessions.start_session(user_id)
    }

    pub async fn end_session(&self, session_id: &str) -> bool {
        self.sessions.end_session(session_id).await
    }

    pub fn update_progress(&self, session_id: &str, topic: &str, delta: i64) -> SessionState {
        self.sessions.update_progress(session_id, topic, delta)
    }

    pub fn session(&self, session_id: &str) -> Option<SessionState> {
        self.sessions.get_session(session_id)
    }

    pub fn list_sessions(&self) -> Vec<SessionState> {
        self.sessions.list_sessions()
    }

    pub fn user_history(&self, user_id: &str) -> UserHistory {
        self.sessions.user_history(user_id)
    }

    pub async fn create_study_plan(&self, request: &PlanRequest) -> Result<StudyPlan, StudyError> {
        self.planner.create_study_plan(request).await
    }

    pub fn adjust_plan(&self, feedback: &str, plan: &StudyPlan) -> Result<StudyPlan, StudyError> {
        self.planner.adjust_plan(feedback, plan)
    }

    /// Chunked summary using the configured chunk size.
    pub async fn summarize(&self, text: &str) -> Result<Summary, StudyError> {
        self.summarizer.summarize(text, self.config.chunk_size).await
    }

    pub async fn summarize_content(
        &self,
        content: &str,
        kind: ContentKind,
        max_chars: Option<usize>,
    ) -> Result<ContentSummary, StudyError> {
        self.summarizer
            .summarize_content(content, kind, max_chars)
            .await
    }

    pub async fn generate_quiz(
        &self,
        topic: &str,
        content: &str,
        num_questions: Option<usize>,
    ) -> Result<Quiz, StudyError> {
        self.quiz
            .generate_quiz(topic, content, num_questions)
            .await
    }

    pub async fn process_pdf(&self, pdf_path: &str) -> PdfReport {
        self.summarizer.process_pdf(pdf_path).await
    }

    /// Keyword search over every record, limited to `memory.search_top_k` hits.
    pub fn search_memory(&self, query: &str) -> Vec<ScoredRecord> {
        self.memory.search_with_options(
            query,
            SearchOptions::top_k(self.config.memory.search_top_k),
        )
    }

    /// Newest records under `key`, limited to `memory.recall_limit`.
    pub fn recent_memory(&self, key: &str) -> Vec<MemoryRecord> {
        self.memory.recall_recent(key, self.config.memory.recall_limit)
    }

    /// Invoke a registered tool by name with JSON arguments.
    pub async fn call_tool(&self, name: &str, args: Value) -> Result<Value, StudyError> {
        Ok(self.tools.call(name, args).await?)
    }
}
