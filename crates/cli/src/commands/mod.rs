pub mod ask;
pub mod chat;
pub mod doctor;
pub mod memory;
pub mod onboard;

use scout_agent::ResearchAgent;
use scout_config::{AppConfig, ReplyPolicy, TemplateKind};
use scout_core::memory::MemoryStore;
use scout_memory::{FileMemoryStore, InMemoryStore};
use scout_providers::ModelClient;
use std::sync::Arc;

/// Command-line settings that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub max_steps: Option<usize>,
    pub policy: Option<ReplyPolicy>,
    pub no_memory: bool,
}

/// Load config and apply command-line overrides.
pub fn load_config(overrides: &Overrides) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(max_steps) = overrides.max_steps {
        config.agent.max_steps = max_steps;
    }
    if let Some(policy) = overrides.policy {
        config.agent.reply_policy = policy;
    }
    if overrides.no_memory {
        config.memory.enabled = false;
    }

    config.validate()?;
    Ok(config)
}

/// The configured summary store; an empty in-memory one when memory is off.
pub fn memory_store(config: &AppConfig) -> Arc<dyn MemoryStore> {
    if config.memory.enabled {
        Arc::new(FileMemoryStore::new(config.memory.resolved_path()))
    } else {
        Arc::new(InMemoryStore::new())
    }
}

pub fn build_agent(
    config: &AppConfig,
    client: ModelClient,
    template: TemplateKind,
) -> ResearchAgent {
    let tools = Arc::new(scout_tools::default_registry(config));
    ResearchAgent::from_config(client, tools, &config.agent).with_template(template)
}

/// The startup checks: the model backend answers and a search key is set.
/// Prints one line per check.
pub async fn preflight(
    config: &AppConfig,
    client: &ModelClient,
) -> Result<(), Box<dyn std::error::Error>> {
    let provider = client.provider();
    let url = &config.model.base_url;
    match provider.health_check().await {
        Ok(true) => println!("  ✅ Model backend reachable ({} at {url})", provider.name()),
        Ok(false) => {
            println!("  ❌ Model backend at {url} answered with an error");
            return Err("model backend is not ready".into());
        }
        Err(e) => {
            println!("  ❌ Model backend at {url} is not reachable: {e}");
            if config.model.provider == "ollama" {
                println!("     Start Ollama with `ollama serve`.");
            }
            return Err("model backend is not reachable".into());
        }
    }

    let model = client.model();
    match client.model_available().await {
        Ok(true) => println!("  ✅ Model `{model}` is available"),
        Ok(false) => {
            println!("  ❌ Model `{model}` is not served at {url}");
            if config.model.provider == "ollama" {
                println!("     Pull it with `ollama pull {model}`.");
            }
            return Err(format!("model `{model}` is not available").into());
        }
        Err(e) => {
            println!("  ❌ Could not list models at {url}: {e}");
            return Err("model list is unavailable".into());
        }
    }

    if config.has_search_key() {
        println!("  ✅ Search API key loaded");
    } else {
        println!("  ❌ TAVILY_API_KEY not found");
        println!("     Add it to a .env file or the environment.");
        println!("     Get a free key at https://tavily.com");
        return Err("search API key is missing".into());
    }

    Ok(())
}
