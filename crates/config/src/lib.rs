//! Configuration loading, validation, and management for Scout.
//!
//! Loads configuration from `~/.scout/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.scout/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Language model backend
    #[serde(default)]
    pub model: ModelConfig,

    /// Web search tool
    #[serde(default)]
    pub search: SearchConfig,

    /// Page fetch tool
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Agent loop settings
    #[serde(default)]
    pub agent: AgentConfig,

    /// Session summary persistence
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

fn default_true() -> bool {
    true
}

// ── Model ─────────────────────────────────────────────────────────────────

#[derive(Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider name, used for logging and the `doctor` report
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_model_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature; pinned to 0.0 for reproducible runs
    #[serde(default)]
    pub temperature: f32,

    /// Per-call timeout
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,

    /// API key (not needed for a local Ollama)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_provider() -> String {
    "ollama".into()
}
fn default_model_url() -> String {
    "http://localhost:11434/v1".into()
}
fn default_model() -> String {
    "gemma".into()
}
fn default_model_timeout() -> u64 {
    120
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_model_url(),
            model: default_model(),
            temperature: 0.0,
            timeout_secs: default_model_timeout(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

// ── Search ────────────────────────────────────────────────────────────────

#[derive(Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Tavily search endpoint
    #[serde(default = "default_search_url")]
    pub api_url: String,

    /// Tavily API key (usually from `TAVILY_API_KEY`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Results per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_tool_timeout")]
    pub timeout_secs: u64,
}

fn default_search_url() -> String {
    "https://api.tavily.com/search".into()
}
fn default_max_results() -> usize {
    3
}
fn default_tool_timeout() -> u64 {
    20
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_url: default_search_url(),
            api_key: None,
            max_results: default_max_results(),
            timeout_secs: default_tool_timeout(),
        }
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &redact(&self.api_key))
            .field("max_results", &self.max_results)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// ── Fetch ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Maximum characters of page text returned to the model
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    #[serde(default = "default_tool_timeout")]
    pub timeout_secs: u64,
}

fn default_max_chars() -> usize {
    4000
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            timeout_secs: default_tool_timeout(),
        }
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────

/// What the loop does with a model response that has neither an action nor
/// a final answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyPolicy {
    /// Treat it as a direct reply to the user and stop successfully.
    #[default]
    Conversational,
    /// Stop with "Agent failed to produce a valid action."
    Strict,
}

impl std::str::FromStr for ReplyPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conversational" => Ok(Self::Conversational),
            "strict" => Ok(Self::Strict),
            other => Err(ConfigError::ValidationError(format!(
                "unknown reply policy '{other}' (expected 'conversational' or 'strict')"
            ))),
        }
    }
}

/// Which prompt template the composer renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Single-shot research assistant, no memory block.
    Research,
    /// Memory-aware assistant with a numbered research strategy.
    #[default]
    Conversational,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum model invocations per query
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    #[serde(default)]
    pub reply_policy: ReplyPolicy,

    #[serde(default)]
    pub template: TemplateKind,

    /// Upper bound on a single tool call, in seconds
    #[serde(default = "default_step_timeout")]
    pub tool_timeout_secs: u64,
}

fn default_max_steps() -> usize {
    7
}

fn default_step_timeout() -> u64 {
    60
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            reply_policy: ReplyPolicy::default(),
            template: TemplateKind::default(),
            tool_timeout_secs: default_step_timeout(),
        }
    }
}

// ── Memory ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Load and save the session summary
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Summary file; defaults to `~/.scout/memory/summary.md`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl MemoryConfig {
    /// The configured path, or the default under the config directory.
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| AppConfig::config_dir().join("memory").join("summary.md"))
    }
}

// ── Loading ───────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from the default path (~/.scout/config.toml),
    /// then apply environment overrides:
    /// - `TAVILY_API_KEY` — search credential
    /// - `SCOUT_MODEL`, `SCOUT_MODEL_URL`, `SCOUT_API_KEY` — model backend
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok().filter(|v| !v.is_empty()));
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("TAVILY_API_KEY") {
            self.search.api_key = Some(key);
        }
        if let Some(model) = lookup("SCOUT_MODEL") {
            self.model.model = model;
        }
        if let Some(url) = lookup("SCOUT_MODEL_URL") {
            self.model.base_url = url;
        }
        if let Some(key) = lookup("SCOUT_API_KEY") {
            self.model.api_key = Some(key);
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".scout")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(ConfigError::ValidationError(
                "model.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.agent.max_steps == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_steps must be at least 1".into(),
            ));
        }
        if self.agent.tool_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "agent.tool_timeout_secs must be at least 1".into(),
            ));
        }
        if !(1..=20).contains(&self.search.max_results) {
            return Err(ConfigError::ValidationError(
                "search.max_results must be between 1 and 20".into(),
            ));
        }
        if self.fetch.max_chars == 0 {
            return Err(ConfigError::ValidationError(
                "fetch.max_chars must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Check if the search credential is available.
    pub fn has_search_key(&self) -> bool {
        self.search.api_key.is_some()
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
