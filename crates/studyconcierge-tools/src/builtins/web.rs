//! `search_web` tool adapter.

use super::parse_args;
use crate::{SearchTool, Tool, ToolError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Default number of requested search results.
const DEFAULT_NUM_RESULTS: usize = 5;

#[derive(Debug, Deserialize)]
struct SearchWebArgs {
    query: String,
    #[serde(default)]
    num_results: Option<usize>,
}

/// Tool that searches the web for study material.
#[derive(Debug, Clone)]
pub struct SearchWebTool {
    search: Arc<SearchTool>,
}

impl SearchWebTool {
    pub fn new(search: Arc<SearchTool>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for SearchWebTool {
    fn name(&self) -> &str {
        "search_web"
    }

    fn description(&self) -> &str {
        "Search the web for study material on a topic"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Search query" },
                "num_results": { "type": "integer", "minimum": 0, "description": "Maximum results to return" }
            },
            "required": ["query"]
        })
    }

    async fn call(&self, args: Value) -> Result<Value, ToolError> {
        let input: SearchWebArgs = parse_args(args)?;
        let limit = input.num_results.unwrap_or(DEFAULT_NUM_RESULTS);
        let results = self.search.search(&input.query, limit).await?;
        Ok(json!({
            "query": input.query,
            "results": results,
        }))
    }
}
