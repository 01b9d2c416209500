//! Chunked summarization of text, PDFs and web search results.

use super::record;
use crate::error::StudyError;
use crate::model::StudyModel;
use crate::text;
use crate::types::{
    ChunkSummary, ContentKind, ContentSummary, PdfReport, PdfStatus, Summary, memory_keys,
};
use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;
use studyconcierge_config::SummarizerConfig;
use studyconcierge_memory::{MemoryBank, save_json};
use studyconcierge_tools::{PdfTool, SearchResult, SearchTool, chunk_text};

/// Search results requested for web content.
const WEB_RESULTS: usize = 5;

/// Summarizes material chunk by chunk and records the results.
#[derive(Clone)]
pub struct SummarizerAgent {
    memory: Arc<dyn MemoryBank>,
    model: Arc<dyn StudyModel>,
    search: Arc<SearchTool>,
    pdf: Arc<PdfTool>,
    config: SummarizerConfig,
    chunk_size: usize,
}

impl SummarizerAgent {
    /// `chunk_size` is used by [`SummarizerAgent::process_pdf`].
    pub fn new(
        memory: Arc<dyn MemoryBank>,
        model: Arc<dyn StudyModel>,
        search: Arc<SearchTool>,
        pdf: Arc<PdfTool>,
        config: SummarizerConfig,
        chunk_size: usize,
    ) -> Self {
        Self {
            memory,
            model,
            search,
            pdf,
            config,
            chunk_size,
        }
    }

    /// Summarize `text` in chunks of at most `chunk_size` characters.
    ///
    /// Chunks are handled in order with a pause between them. Empty text
    /// yields an empty summary.
    pub async fn summarize(&self, text: &str, chunk_size: usize) -> Result<Summary, StudyError> {
        if chunk_size == 0 {
            return Err(StudyError::invalid("chunk_size must be greater than zero"));
        }
        let chunks = chunk_text(text, chunk_size)?;
        let total_chars = text.chars().count();
        info!(
            "summarizing text (chars={total_chars}, chunk_size={chunk_size}, chunks={})",
            chunks.len()
        );
        let summaries = self.summarize_chunks(&chunks).await;
        Ok(Summary {
            summary: join_summaries(&summaries),
            chunk_count: summaries.len(),
            chunks: summaries,
            total_chars,
        })
    }

    /// Summarize raw text, a PDF path or a web search query.
    ///
    /// `max_chars` defaults to the configured final summary length. The
    /// result is saved under `content_summaries`.
    pub async fn summarize_content(
        &self,
        content: &str,
        kind: ContentKind,
        max_chars: Option<usize>,
    ) -> Result<ContentSummary, StudyError> {
        let max_chars = max_chars.unwrap_or(self.config.final_summary_chars);
        if max_chars == 0 {
            return Err(StudyError::invalid("max_chars must be greater than zero"));
        }
        info!("summarizing content (kind={kind}, max_chars={max_chars})");
        let (source, results) = match kind {
            ContentKind::Text => (content.to_string(), Vec::new()),
            ContentKind::Pdf => (self.pdf.extract_text(content).await?, Vec::new()),
            ContentKind::Web => {
                let results = self.search.search(content, WEB_RESULTS).await?;
                let snippets = results
                    .iter()
                    .map(|result| result.snippet.as_str())
                    .collect::<Vec<_>>()
                    .join("\n");
                (snippets, results)
            }
        };
        self.finish(kind, &source, max_chars, results).await
    }

    /// Extract, chunk and summarize a PDF, reporting progress.
    ///
    /// Failures end up in the returned report; the report is saved under
    /// `large_pdf_processing` either way.
    pub async fn process_pdf(&self, pdf_path: &str) -> PdfReport {
        let started_at = Utc::now();
        let mut report = PdfReport {
            pdf_path: pdf_path.to_string(),
            status: PdfStatus::Failed,
            chunks_processed: 0,
            total_chunks: 0,
            summary: None,
            error: None,
            started_at,
            completed_at: started_at,
        };
        info!("processing pdf (path={pdf_path}, chunk_size={})", self.chunk_size);

        match self.pdf.split_into_chunks(pdf_path, self.chunk_size).await {
            Ok(chunks) => {
                report.total_chunks = chunks.len();
                let chunks: Vec<&str> = chunks.iter().map(String::as_str).collect();
                let summaries = self.summarize_chunks(&chunks).await;
                report.chunks_processed = summaries.len();
                let combined = join_summaries(&summaries);
                match self
                    .finish(
                        ContentKind::Pdf,
                        &combined,
                        self.config.final_summary_chars,
                        Vec::new(),
                    )
                    .await
                {
                    Ok(summary) => {
                        report.status = PdfStatus::Completed;
                        report.summary = Some(summary);
                    }
                    Err(err) => report.error = Some(err.to_string()),
                }
            }
            Err(err) => report.error = Some(err.to_string()),
        }

        report.completed_at = Utc::now();
        if let Some(err) = &report.error {
            warn!("pdf processing failed (path={pdf_path}): {err}");
        } else {
            info!(
                "pdf processing completed (path={pdf_path}, chunks={})",
                report.chunks_processed
            );
        }
        record(
            self.memory.as_ref(),
            memory_keys::LARGE_PDF_PROCESSING,
            &report,
        );
        report
    }

    async fn summarize_chunks(&self, chunks: &[&str]) -> Vec<ChunkSummary> {
        let mut summaries = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            if index > 0 {
                self.pause().await;
            }
            let summary = self
                .model
                .summarize(chunk, self.config.chunk_summary_chars)
                .await;
            debug!(
                "summarized chunk {}/{} (chars={})",
                index + 1,
                chunks.len(),
                chunk.chars().count()
            );
            summaries.push(ChunkSummary {
                index,
                chars: chunk.chars().count(),
                summary,
            });
        }
        summaries
    }

    async fn pause(&self) {
        let delay = self.config.chunk_delay();
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }
    }

    async fn finish(
        &self,
        kind: ContentKind,
        source: &str,
        max_chars: usize,
        search_results: Vec<SearchResult>,
    ) -> Result<ContentSummary, StudyError> {
        let summary = ContentSummary {
            kind,
            summary: self.model.summarize(source, max_chars).await,
            key_points: text::key_points(source),
            original_chars: source.chars().count(),
            search_results,
            summarized_at: Utc::now(),
        };
        save_json(
            self.memory.as_ref(),
            memory_keys::CONTENT_SUMMARIES,
            &summary,
        )?;
        Ok(summary)
    }
}

fn join_summaries(summaries: &[ChunkSummary]) -> String {
    summaries
        .iter()
        .map(|chunk| chunk.summary.as_str())
        .filter(|summary| !summary.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
