//! `scout chat` — Interactive research session with memory.

use scout_agent::{Session, is_exit_command};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::Overrides;

pub async fn run(overrides: &Overrides) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(overrides)?;

    println!("🔎 Scout — research agent");
    println!("=========================\n");

    let client = scout_providers::build_client(&config.model);
    super::preflight(&config, &client).await?;

    let agent = super::build_agent(&config, client, config.agent.template);
    let mut session = Session::new(agent, super::memory_store(&config));

    println!("\nAsk me anything. Type 'quit' or 'exit' to end the session.\n");

    let turns = converse(&mut session, BufReader::new(tokio::io::stdin())).await;
    tracing::debug!(turns, "Input loop ended");

    match end_session(session, config.memory.enabled).await {
        Ok(Some(_)) => println!("🧠 Memory updated."),
        Ok(None) => {}
        Err(e) => eprintln!("⚠️  Could not update memory: {e}"),
    }
    println!("Goodbye!");
    Ok(())
}

/// Summarize the session into memory, unless memory is off.
async fn end_session(
    session: Session,
    memory_enabled: bool,
) -> scout_core::Result<Option<String>> {
    if !memory_enabled {
        tracing::debug!("Memory disabled, session not summarized");
        return Ok(None);
    }
    session.finish().await
}

/// Read lines until an exit command or end of input, running each through
/// the session. A read error ends the loop like end of input. Returns the
/// number of turns taken.
async fn converse<R>(session: &mut Session, input: R) -> usize
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut turns = 0;

    loop {
        print!("You > ");
        std::io::stdout().flush().ok();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                println!();
                break;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read input, ending session");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_exit_command(line) {
            break;
        }

        let outcome = session.handle_turn(line).await;
        turns += 1;
        println!("Agent > {}\n", outcome.answer);
    }

    turns
}
