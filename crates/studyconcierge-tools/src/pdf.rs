//! Simulated PDF extraction.

use crate::{ToolError, chunk_text};
use log::info;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Words assumed per page when estimating page counts.
const WORDS_PER_PAGE: usize = 250;

/// Document metadata derived from the extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfMetadata {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub creator: String,
    pub producer: String,
    pub creation_date: String,
    pub modified_date: String,
    pub pages: usize,
    pub words: usize,
}

/// Simulated PDF reader. Every path yields the same structured course notes.
#[derive(Debug, Clone, Default)]
pub struct PdfTool {
    latency: Duration,
}

impl PdfTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a PDF tool that sleeps `latency` before each extraction.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// Extract the text content of `pdf_path`.
    pub async fn extract_text(&self, pdf_path: &str) -> Result<String, ToolError> {
        let pdf_path = validate_path(pdf_path)?;
        info!("extracting pdf text (path={pdf_path})");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(simulated_text(pdf_path))
    }

    /// Extract `pdf_path` and split it into chunks of at most `chunk_size` characters.
    pub async fn split_into_chunks(
        &self,
        pdf_path: &str,
        chunk_size: usize,
    ) -> Result<Vec<String>, ToolError> {
        if chunk_size == 0 {
            return Err(ToolError::InvalidArguments(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        let text = self.extract_text(pdf_path).await?;
        let chunks = chunk_text(&text, chunk_size)?;
        info!(
            "split pdf into chunks (path={}, chunks={})",
            pdf_path.trim(),
            chunks.len()
        );
        Ok(chunks.into_iter().map(str::to_string).collect())
    }

    /// Describe `pdf_path`. Word and page counts come from the extracted text.
    pub async fn metadata(&self, pdf_path: &str) -> Result<PdfMetadata, ToolError> {
        let text = self.extract_text(pdf_path).await?;
        let pdf_path = pdf_path.trim();
        let words = text.split_whitespace().count();
        Ok(PdfMetadata {
            title: format!("Sample Document - {pdf_path}"),
            author: "Sample Author".to_string(),
            subject: "Educational Content".to_string(),
            creator: "StudyConcierge PDF Tool".to_string(),
            producer: format!("StudyConcierge v{}", env!("CARGO_PKG_VERSION")),
            creation_date: "2025-11-15".to_string(),
            modified_date: "2025-11-15".to_string(),
            pages: words.div_ceil(WORDS_PER_PAGE).max(1),
            words,
        })
    }
}

fn validate_path(pdf_path: &str) -> Result<&str, ToolError> {
    let trimmed = pdf_path.trim();
    if trimmed.is_empty() {
        return Err(ToolError::InvalidArguments(
            "pdf_path cannot be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

fn simulated_text(pdf_path: &str) -> String {
    format!(
        "This is simulated text extracted from the PDF file: {pdf_path}.

Chapter 1: Introduction
This chapter introduces the fundamental concepts that will be covered in this document.
Key topics include background information, objectives, and methodology.

Chapter 2: Main Content
The main content of the document goes here. This would typically include detailed explanations,
examples, diagrams, and other educational material relevant to the subject matter.

Chapter 3: Advanced Topics
More advanced topics are discussed in this chapter, building upon the foundational knowledge
established in the previous sections.

Chapter 4: Conclusion
This chapter summarizes the key points covered in the document and provides recommendations
for further study or application of the concepts presented.

References:
1. Author A. (2025). Sample Reference 1. Journal of Examples.
2. Author B. (2024). Sample Reference 2. International Conference on Education.
"
    )
}
