//! End-to-end integration tests for the Scout research agent.
//!
//! These tests run the full pipeline from user input to agent output and
//! persisted memory, with a scripted model and a canned search tool in
//! place of the network.

use std::sync::{Arc, Mutex};

use scout_agent::{
    EXHAUSTED_MESSAGE, INVALID_ACTION_MESSAGE, OutcomeKind, ResearchAgent, Session,
};
use scout_config::{AppConfig, ReplyPolicy, TemplateKind};
use scout_core::error::{ProviderError, ToolError};
use scout_core::memory::MemoryStore;
use scout_core::provider::{Provider, ProviderRequest, ProviderResponse};
use scout_core::tool::{Tool, ToolRegistry};
use scout_memory::FileMemoryStore;
use scout_providers::ModelClient;

// ── Mock Provider ────────────────────────────────────────────────────────

/// A mock provider that returns scripted responses in sequence and keeps
/// every prompt it was sent.
struct ScriptedProvider {
    responses: Vec<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new(responses: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            responses: responses.iter().map(|r| r.to_string()).collect(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn prompt(&self, index: usize) -> String {
        self.prompts.lock().unwrap()[index].clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut prompts = self.prompts.lock().unwrap();
        let idx = prompts.len();
        prompts.push(request.messages.last().map(|m| m.content.clone()).unwrap_or_default());

        let content = self
            .responses
            .get(idx)
            .cloned()
            .ok_or_else(|| ProviderError::ApiError {
                status_code: 500,
                message: "script exhausted".into(),
            })?;

        Ok(ProviderResponse {
            content,
            usage: None,
            model: "e2e-model".into(),
        })
    }
}

// ── Mock Search Tool ─────────────────────────────────────────────────────

struct CannedSearch {
    calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl Tool for CannedSearch {
    fn name(&self) -> &str {
        "web_search"
    }

    fn signature(&self) -> String {
        "web_search(query: str)".into()
    }

    fn description(&self) -> &str {
        "Search the web"
    }

    async fn execute(&self, input: &str) -> Result<String, ToolError> {
        self.calls.lock().unwrap().push(input.to_string());
        Ok(format!(
            "Title: France\nURL: https://example.org/france\nSnippet: Paris is the capital of France. ({input})\n\n"
        ))
    }
}

fn agent_with_search(
    provider: Arc<ScriptedProvider>,
    template: TemplateKind,
) -> (ResearchAgent, Arc<Mutex<Vec<String>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let tools = ToolRegistry::new().with(Box::new(CannedSearch {
        calls: calls.clone(),
    }));
    let agent = ResearchAgent::new(
        ModelClient::new(provider, "e2e-model"),
        Arc::new(tools),
        template,
    );
    (agent, calls)
}

const PARIS_SCRIPT: [&str; 2] = [
    "Thought: I need to search for this.\nAction: web_search(\"capital of France\")",
    "Thought: The search says Paris.\nFinal Answer: Paris.",
];

// ── Single-query runs ────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_capital_of_france() {
    let provider = ScriptedProvider::new(&PARIS_SCRIPT);
    let (agent, calls) = agent_with_search(provider.clone(), TemplateKind::Research);

    let outcome = agent.run("What is the capital of France?", "").await;

    assert_eq!(outcome.answer, "Paris.");
    assert_eq!(outcome.kind, OutcomeKind::FinalAnswer);
    assert_eq!(outcome.steps, 2);
    assert_eq!(outcome.tool_calls, 1);
    assert_eq!(provider.calls(), 2);
    assert_eq!(*calls.lock().unwrap(), vec!["capital of France".to_string()]);

    // The observation is fed back into the second prompt.
    let second = provider.prompt(1);
    assert!(second.contains("Action: web_search(\"capital of France\")"));
    assert!(second.contains("Observation: Title: France"));
    assert!(second.contains("User's Question: What is the capital of France?"));
}

#[tokio::test]
async fn e2e_concatenation_is_rejected_and_recovers() {
    let provider = ScriptedProvider::new(&[
        "Action: web_search(\"a\" + \"b\")",
        "Action: web_search(\"ab\")",
        "Final Answer: done",
    ]);
    let (agent, calls) = agent_with_search(provider.clone(), TemplateKind::Research);

    let outcome = agent.run("q", "").await;

    assert_eq!(outcome.answer, "done");
    assert_eq!(outcome.tool_calls, 1);
    assert_eq!(*calls.lock().unwrap(), vec!["ab".to_string()]);
    assert!(provider.prompt(1).contains("Error parsing or executing tool:"));
}

#[tokio::test]
async fn e2e_unknown_tool_then_answer() {
    let provider = ScriptedProvider::new(&["Action: calculator(\"2+2\")", "Final Answer: 4"]);
    let (agent, calls) = agent_with_search(provider.clone(), TemplateKind::Research);

    let outcome = agent.run("2+2?", "").await;

    assert_eq!(outcome.answer, "4");
    assert_eq!(outcome.tool_calls, 0);
    assert!(calls.lock().unwrap().is_empty());
    assert!(provider.prompt(1).contains("Error: Unknown tool 'calculator'."));
}

#[tokio::test]
async fn e2e_budget_exhaustion() {
    let provider = ScriptedProvider::new(&[
        "Action: web_search(\"one\")",
        "Action: web_search(\"two\")",
        "Action: web_search(\"three\")",
    ]);
    let (agent, calls) = agent_with_search(provider.clone(), TemplateKind::Research);
    let agent = agent.with_max_steps(3);

    let outcome = agent.run("never ends", "").await;

    assert_eq!(outcome.answer, EXHAUSTED_MESSAGE);
    assert_eq!(outcome.kind, OutcomeKind::Exhausted);
    assert_eq!(provider.calls(), 3);
    assert_eq!(calls.lock().unwrap().len(), 3);
    assert_eq!(outcome.scratchpad.len(), 3);
}

#[tokio::test]
async fn e2e_reply_policies() {
    let provider = ScriptedProvider::new(&["Hello there!"]);
    let (agent, _) = agent_with_search(provider, TemplateKind::Conversational);
    let outcome = agent.run("hi", "").await;
    assert_eq!(outcome.answer, "Hello there!");
    assert_eq!(outcome.kind, OutcomeKind::Reply);

    let provider = ScriptedProvider::new(&["Hello there!"]);
    let (agent, _) = agent_with_search(provider, TemplateKind::Research);
    let outcome = agent.with_reply_policy(ReplyPolicy::Strict).run("hi", "").await;
    assert_eq!(outcome.answer, INVALID_ACTION_MESSAGE);
    assert_eq!(outcome.kind, OutcomeKind::InvalidAction);
}

// ── Sessions with persisted memory ───────────────────────────────────────

#[tokio::test]
async fn e2e_session_memory_carries_over() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memory").join("summary.md");

    // First session: one researched question, then summarize.
    let provider = ScriptedProvider::new(&[
        PARIS_SCRIPT[0],
        PARIS_SCRIPT[1],
        "The user asked for the capital of France; it is Paris.",
    ]);
    let (agent, _) = agent_with_search(provider.clone(), TemplateKind::Conversational);
    let mut session = Session::new(agent, Arc::new(FileMemoryStore::new(&path)));

    let outcome = session.handle_turn("What is the capital of France?").await;
    assert_eq!(outcome.answer, "Paris.");

    let summary = session.finish().await.unwrap();
    assert_eq!(
        summary.as_deref(),
        Some("The user asked for the capital of France; it is Paris.")
    );
    assert!(provider.prompt(2).contains("User: What is the capital of France?\nAgent: Paris."));

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(on_disk, "The user asked for the capital of France; it is Paris.");

    // Second session: a fresh store on the same file sees the summary.
    let provider = ScriptedProvider::new(&["Final Answer: You asked about Paris."]);
    let (agent, _) = agent_with_search(provider.clone(), TemplateKind::Conversational);
    let mut session = Session::new(agent, Arc::new(FileMemoryStore::new(&path)));

    let outcome = session.handle_turn("What did I ask last time?").await;

    assert_eq!(outcome.answer, "You asked about Paris.");
    assert!(provider.prompt(0).contains("it is Paris."));
}

#[tokio::test]
async fn e2e_failed_summary_keeps_previous_memory() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileMemoryStore::new(dir.path().join("summary.md"));
    store.save("Earlier: likes rivers.").await.unwrap();

    // One answer, then the script runs out so summarization fails.
    let provider = ScriptedProvider::new(&["Final Answer: The Seine."]);
    let (agent, _) = agent_with_search(provider.clone(), TemplateKind::Conversational);
    let mut session = Session::new(agent, Arc::new(store.clone()));

    session.handle_turn("Which river runs through Paris?").await;
    assert!(provider.prompt(0).contains("Earlier: likes rivers."));

    assert!(session.finish().await.is_err());
    assert_eq!(store.load().await.unwrap(), "Earlier: likes rivers.");
}

// ── Config-driven wiring ─────────────────────────────────────────────────

#[tokio::test]
async fn e2e_config_file_drives_agent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[agent]\nmax_steps = 2\nreply_policy = \"strict\"\ntemplate = \"research\"\n",
    )
    .unwrap();
    let config = AppConfig::load_from(&path).unwrap();

    // The real tool set is advertised in the prompt.
    let tools = Arc::new(scout_tools::default_registry(&config));
    let provider = ScriptedProvider::new(&["Action: nowhere(\"x\")", "Action: nowhere(\"y\")"]);
    let agent = ResearchAgent::from_config(
        ModelClient::new(provider.clone(), "e2e-model"),
        tools,
        &config.agent,
    );

    let outcome = agent.run("q", "").await;

    assert_eq!(outcome.answer, EXHAUSTED_MESSAGE);
    assert_eq!(provider.calls(), 2);
    let first = provider.prompt(0);
    assert!(first.contains("web_search"));
    assert!(first.contains("fetch_page"));
}
