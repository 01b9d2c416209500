//! Built-in tool adapters over the simulated search and PDF tools.

mod pdf;
mod web;

pub use pdf::ExtractPdfTextTool;
pub use web::SearchWebTool;

use crate::{PdfTool, SearchTool, ToolError, ToolRegistry};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Build a registry holding every built-in tool.
pub fn builtin_tool_registry(search: Arc<SearchTool>, pdf: Arc<PdfTool>) -> ToolRegistry {
    let registry = ToolRegistry::new();
    registry.register(Arc::new(SearchWebTool::new(search)));
    registry.register(Arc::new(ExtractPdfTextTool::new(pdf)));
    registry
}

/// Parse JSON args into a typed struct for tool calls.
fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|err| ToolError::InvalidArguments(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::builtin_tool_registry;
    use crate::{PdfTool, SearchTool, ToolError};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn registry() -> crate::ToolRegistry {
        builtin_tool_registry(Arc::new(SearchTool::new()), Arc::new(PdfTool::new()))
    }

    #[test]
    fn registers_both_builtins() {
        assert_eq!(registry().list(), vec!["extract_pdf_text", "search_web"]);
    }

    #[tokio::test]
    async fn search_web_defaults_to_five_requested_results() {
        let output = registry()
            .call("search_web", json!({"query": "calculus"}))
            .await
            .expect("search");
        assert_eq!(output["query"], "calculus");
        assert_eq!(output["results"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn search_web_respects_num_results() {
        let output = registry()
            .call("search_web", json!({"query": "calculus", "num_results": 2}))
            .await
            .expect("search");
        assert_eq!(output["results"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn extract_pdf_text_returns_text() {
        let output = registry()
            .call("extract_pdf_text", json!({"pdf_path": "ml.pdf"}))
            .await
            .expect("extract");
        assert_eq!(output["pdf_path"], "ml.pdf");
        assert!(
            output["text"]
                .as_str()
                .is_some_and(|text| text.contains("Chapter 1"))
        );
    }

    #[tokio::test]
    async fn malformed_args_are_invalid() {
        let err = registry()
            .call("extract_pdf_text", json!({"path": 3}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
