//! Configuration schema for StudyConcierge.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root config for the StudyConcierge SDK.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConciergeConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    /// Route generation through an external LLM provider when one is available.
    #[serde(default)]
    pub use_external_llm: bool,
    /// Model identifier passed to the external provider.
    #[serde(default = "default_model_name")]
    pub model_name: String,
    /// Maximum characters per chunk for long-running summarization.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

impl Default for StudyConciergeConfig {
    fn default() -> Self {
        Self {
            schema: None,
            use_external_llm: false,
            model_name: default_model_name(),
            chunk_size: default_chunk_size(),
            summarizer: SummarizerConfig::default(),
            planner: PlannerConfig::default(),
            quiz: QuizConfig::default(),
            memory: MemoryConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

impl StudyConciergeConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> StudyConciergeConfigBuilder {
        StudyConciergeConfigBuilder::new()
    }
}

fn default_model_name() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_chunk_size() -> usize {
    1000
}

/// Builder for assembling a `StudyConciergeConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct StudyConciergeConfigBuilder {
    config: StudyConciergeConfig,
}

impl StudyConciergeConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: StudyConciergeConfig::default(),
        }
    }

    /// Enable or disable the external LLM path.
    pub fn use_external_llm(mut self, enabled: bool) -> Self {
        self.config.use_external_llm = enabled;
        self
    }

    /// Set the external model identifier.
    pub fn model_name(mut self, model_name: impl Into<String>) -> Self {
        self.config.model_name = model_name.into();
        self
    }

    /// Set the summarization chunk size in characters.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// Replace the summarizer configuration.
    pub fn summarizer(mut self, summarizer: SummarizerConfig) -> Self {
        self.config.summarizer = summarizer;
        self
    }

    /// Replace the planner configuration.
    pub fn planner(mut self, planner: PlannerConfig) -> Self {
        self.config.planner = planner;
        self
    }

    /// Replace the quiz configuration.
    pub fn quiz(mut self, quiz: QuizConfig) -> Self {
        self.config.quiz = quiz;
        self
    }

    /// Replace the memory configuration.
    pub fn memory(mut self, memory: MemoryConfig) -> Self {
        self.config.memory = memory;
        self
    }

    /// Replace the simulated tool configuration.
    pub fn tools(mut self, tools: ToolsConfig) -> Self {
        self.config.tools = tools;
        self
    }

    /// Drop every simulated delay; used by tests and scripted runs.
    pub fn without_latency(mut self) -> Self {
        self.config.summarizer.chunk_delay_ms = 0;
        self.config.tools.latency_ms = 0;
        self
    }

    /// Finalize and return the built config.
    pub fn build(self) -> StudyConciergeConfig {
        self.config
    }
}

/// Summarizer tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Maximum characters of each per-chunk summary.
    #[serde(default = "default_chunk_summary_chars")]
    pub chunk_summary_chars: usize,
    /// Maximum characters of a final content summary.
    #[serde(default = "default_final_summary_chars")]
    pub final_summary_chars: usize,
    /// Simulated processing time between chunks.
    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,
}

impl SummarizerConfig {
    /// Delay applied after each processed chunk.
    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            chunk_summary_chars: default_chunk_summary_chars(),
            final_summary_chars: default_final_summary_chars(),
            chunk_delay_ms: default_chunk_delay_ms(),
        }
    }
}

fn default_chunk_summary_chars() -> usize {
    200
}

fn default_final_summary_chars() -> usize {
    500
}

fn default_chunk_delay_ms() -> u64 {
    100
}

/// Planner defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Study hours per day when the caller does not specify any.
    #[serde(default = "default_hours_per_day")]
    pub default_hours_per_day: f64,
    /// Planning horizon in days when no deadline is given.
    #[serde(default = "default_horizon_days")]
    pub default_horizon_days: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_hours_per_day: default_hours_per_day(),
            default_horizon_days: default_horizon_days(),
        }
    }
}

fn default_hours_per_day() -> f64 {
    2.0
}

fn default_horizon_days() -> u32 {
    7
}

/// Quiz generation tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Question count when the caller does not specify any.
    #[serde(default = "default_num_questions")]
    pub default_num_questions: usize,
    /// Upper bound on extracted key terms.
    #[serde(default = "default_max_key_terms")]
    pub max_key_terms: usize,
    /// Desired choices per question, including the correct one.
    #[serde(default = "default_choices_per_question")]
    pub choices_per_question: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            default_num_questions: default_num_questions(),
            max_key_terms: default_max_key_terms(),
            choices_per_question: default_choices_per_question(),
        }
    }
}

fn default_num_questions() -> usize {
    5
}

fn default_max_key_terms() -> usize {
    10
}

fn default_choices_per_question() -> usize {
    4
}

/// Memory bank read defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Records returned by recent-history lookups.
    #[serde(default = "default_recall_limit")]
    pub recall_limit: usize,
    /// Hits returned by facade searches.
    #[serde(default = "default_search_top_k")]
    pub search_top_k: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            recall_limit: default_recall_limit(),
            search_top_k: default_search_top_k(),
        }
    }
}

fn default_recall_limit() -> usize {
    10
}

fn default_search_top_k() -> usize {
    5
}

/// Simulated tool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Simulated network / extraction latency.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

impl ToolsConfig {
    /// Latency applied by simulated tools.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

fn default_latency_ms() -> u64 {
    100
}
