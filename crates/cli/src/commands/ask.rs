//! `scout ask` — Answer one question and exit.

use scout_config::{ReplyPolicy, TemplateKind};

use super::Overrides;

pub async fn run(question: &str, overrides: &Overrides) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(overrides)?;
    // One-shot questions demand a final answer unless told otherwise.
    config.agent.reply_policy = overrides.policy.unwrap_or(ReplyPolicy::Strict);

    let client = scout_providers::build_client(&config.model);
    super::preflight(&config, &client).await?;

    let agent = super::build_agent(&config, client, TemplateKind::Research);
    let outcome = agent.run(question, "").await;

    tracing::debug!(
        steps = outcome.steps,
        tool_calls = outcome.tool_calls,
        outcome = ?outcome.kind,
        "Question answered"
    );
    println!("\n{}", outcome.answer);
    Ok(())
}
