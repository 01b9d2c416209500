//! Registry for tool implementations.

use crate::ToolError;
use crate::tool::{Tool, ToolSpec};
use log::debug;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// In-memory registry for tool implementations, keyed by tool name.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Arc<RwLock<BTreeMap<String, Arc<dyn Tool>>>>,
}

impl ToolRegistry {
    /// Create an empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool by name, replacing any previous tool with that name.
    pub fn register(&self, tool: Arc<dyn Tool>) {
        debug!("registering tool (name={})", tool.name());
        self.tools.write().insert(tool.name().to_string(), tool);
    }

    /// Fetch a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.read().get(name).cloned()
    }

    /// Registered tool names in sorted order.
    pub fn list(&self) -> Vec<String> {
        self.tools.read().keys().cloned().collect()
    }

    /// Return tool specs for all registered tools.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.read().values().map(|tool| tool.spec()).collect()
    }

    /// Invoke a registered tool by name.
    pub async fn call(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::ToolNotFound(name.to_string()))?;
        debug!("calling tool (name={name})");
        tool.call(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::ToolRegistry;
    use crate::{Tool, ToolError};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[derive(Debug)]
    struct EchoTool {
        name: &'static str,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "echo"
        }

        fn args_schema(&self) -> Value {
            json!({})
        }

        async fn call(&self, args: Value) -> Result<Value, ToolError> {
            Ok(json!({ "tool": self.name, "args": args }))
        }
    }

    #[test]
    fn registry_tracks_tools_and_specs() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "search_web" }));
        registry.register(Arc::new(EchoTool { name: "extract_pdf_text" }));

        assert_eq!(registry.list(), vec!["extract_pdf_text", "search_web"]);
        let spec_names = registry
            .specs()
            .into_iter()
            .map(|spec| spec.name)
            .collect::<Vec<_>>();
        assert_eq!(spec_names, vec!["extract_pdf_text", "search_web"]);
    }

    #[tokio::test]
    async fn call_dispatches_by_name() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "echo" }));
        let output = registry.call("echo", json!({"x": 1})).await.expect("call");
        assert_eq!(output, json!({"tool": "echo", "args": {"x": 1}}));

        let err = registry.call("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::ToolNotFound(name) if name == "missing"));
    }
}
