//! Tool trait — the abstraction over agent capabilities.
//!
//! A tool takes exactly one string argument and returns a string. Tools are
//! stateless; the registry is built once at startup and is read-only while
//! the agent runs.

use crate::error::ToolError;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// The core Tool trait.
///
/// Each tool (web_search, fetch_page, ...) implements this trait and is
/// registered in the [`ToolRegistry`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name the model uses to call this tool (e.g., "web_search").
    fn name(&self) -> &str;

    /// The call signature shown to the model, e.g. `web_search(query: str)`.
    fn signature(&self) -> String {
        format!("{}(input: str)", self.name())
    }

    /// A one-line description of what this tool does (sent to the LLM).
    fn description(&self) -> &str;

    /// Execute the tool with its single argument.
    async fn execute(&self, input: &str) -> std::result::Result<String, ToolError>;
}

/// A registry of available tools, keyed by name.
///
/// Iteration order is the name order, so anything rendered from the
/// registry is stable across runs.
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, tool: Box<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Execute a tool by name.
    pub async fn execute(&self, name: &str, input: &str) -> std::result::Result<String, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.execute(input).await
    }

    /// List all registered tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// `- signature: description` lines for prompt rendering.
    pub fn describe(&self) -> String {
        self.tools
            .values()
            .map(|t| format!("- {}: {}", t.signature(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple test tool for unit tests.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn signature(&self) -> String {
            "echo(text: str)".into()
        }
        fn description(&self) -> &str {
            "Echoes back the input"
        }
        async fn execute(&self, input: &str) -> std::result::Result<String, ToolError> {
            Ok(input.to_string())
        }
    }

    struct Upper;

    #[async_trait]
    impl Tool for Upper {
        fn name(&self) -> &str {
            "upper"
        }
        fn description(&self) -> &str {
            "Uppercases the input"
        }
        async fn execute(&self, input: &str) -> std::result::Result<String, ToolError> {
            Ok(input.to_uppercase())
        }
    }

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        assert!(registry.get("echo").is_some());
        assert!(registry.contains("echo"));
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn names_are_sorted() {
        let registry = ToolRegistry::new()
            .with(Box::new(Upper))
            .with(Box::new(EchoTool));
        assert_eq!(registry.names(), vec!["echo", "upper"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn describe_lists_signatures() {
        let registry = ToolRegistry::new()
            .with(Box::new(Upper))
            .with(Box::new(EchoTool));
        assert_eq!(
            registry.describe(),
            "- echo(text: str): Echoes back the input\n- upper(input: str): Uppercases the input"
        );
    }

    #[tokio::test]
    async fn registry_execute_tool() {
        let registry = ToolRegistry::new().with(Box::new(EchoTool));
        let output = registry.execute("echo", "hello world").await.unwrap();
        assert_eq!(output, "hello world");
    }

    #[tokio::test]
    async fn registry_execute_missing_tool() {
        let registry = ToolRegistry::new();
        let err = registry.execute("nonexistent", "x").await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }
}
