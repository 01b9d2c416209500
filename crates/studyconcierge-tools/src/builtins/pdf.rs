//! `extract_pdf_text` tool adapter.

use super::parse_args;
use crate::{PdfTool, Tool, ToolError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct ExtractPdfTextArgs {
    pdf_path: String,
}

/// Tool that extracts the text of a PDF document.
#[derive(Debug, Clone)]
pub struct ExtractPdfTextTool {
    pdf: Arc<PdfTool>,
}

impl ExtractPdfTextTool {
    pub fn new(pdf: Arc<PdfTool>) -> Self {
        Self { pdf }
    }
}

#[async_trait]
impl Tool for ExtractPdfTextTool {
    fn name(&self) -> &str {
        "extract_pdf_text"
    }

    fn description(&self) -> &str {
        "Extract the text content of a PDF document"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "pdf_path": { "type": "string", "description": "Path to the PDF file" }
            },
            "required": ["pdf_path"]
        })
    }

    async fn call(&self, args: Value) -> Result<Value, ToolError> {
        let input: ExtractPdfTextArgs = parse_args(args)?;
        let text = self.pdf.extract_text(&input.pdf_path).await?;
        Ok(json!({
            "pdf_path": input.pdf_path,
            "chars": text.chars().count(),
            "text": text,
        }))
    }
}
