//! Built-in tool implementations for Scout.
//!
//! Tools give the agent its view of the world: a web search and a page
//! reader. Each takes one string and returns one string.

pub mod fetch_page;
pub mod web_search;

use scout_config::AppConfig;
use scout_core::tool::ToolRegistry;

pub use fetch_page::FetchPageTool;
pub use web_search::WebSearchTool;

/// Create the default tool registry from configuration.
pub fn default_registry(config: &AppConfig) -> ToolRegistry {
    ToolRegistry::new()
        .with(Box::new(WebSearchTool::new(&config.search)))
        .with(Box::new(FetchPageTool::new(&config.fetch)))
}
