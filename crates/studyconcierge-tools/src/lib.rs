//! Simulated study tools and the tool registry for StudyConcierge.

pub mod builtins;
pub mod chunking;
pub mod error;
pub mod pdf;
pub mod registry;
pub mod search;
pub mod tool;

/// Built-in tool adapters and registry helper.
pub use builtins::{ExtractPdfTextTool, SearchWebTool, builtin_tool_registry};
/// Character-based text chunking.
pub use chunking::chunk_text;
/// Tool error type.
pub use error::ToolError;
/// Simulated PDF extraction.
pub use pdf::{PdfMetadata, PdfTool};
/// Tool registry type.
pub use registry::ToolRegistry;
/// Simulated web search.
pub use search::{SearchResult, SearchTool, WebPage};
/// Tool trait and spec type.
pub use tool::{Tool, ToolSpec};
