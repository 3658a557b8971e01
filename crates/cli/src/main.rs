//! Scout CLI — the main entry point.
//!
//! Commands:
//! - `ask`     — Answer one question and exit
//! - `chat`    — Interactive session with memory
//! - `doctor`  — Check the model backend and search credential
//! - `memory`  — Show or clear the stored summary
//! - `onboard` — Write a default config file

use clap::{Parser, Subcommand};
use scout_config::ReplyPolicy;

mod commands;

use commands::Overrides;

#[derive(Parser)]
#[command(
    name = "scout",
    about = "Scout — a local research agent that searches the web for you",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Maximum model calls per question
    #[arg(long, global = true)]
    max_steps: Option<usize>,

    /// What to do with a response that has no action or final answer
    /// (conversational | strict)
    #[arg(long, global = true)]
    policy: Option<ReplyPolicy>,

    /// Neither read nor write the stored summary
    #[arg(long, global = true)]
    no_memory: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single question
    Ask {
        /// The question to research
        #[arg(required = true, trailing_var_arg = true)]
        question: Vec<String>,
    },

    /// Start an interactive session
    Chat,

    /// Check that the model backend and search API are ready
    Doctor,

    /// Inspect or reset the stored session summary
    Memory {
        #[command(subcommand)]
        action: MemoryAction,
    },

    /// Write a default configuration file
    Onboard,
}

#[derive(Subcommand)]
enum MemoryAction {
    /// Print the stored summary
    Show,
    /// Forget the stored summary
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Before config loading, so TAVILY_API_KEY may come from .env.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let overrides = Overrides {
        max_steps: cli.max_steps,
        policy: cli.policy,
        no_memory: cli.no_memory,
    };

    match cli.command {
        Commands::Ask { question } => commands::ask::run(&question.join(" "), &overrides).await?,
        Commands::Chat => commands::chat::run(&overrides).await?,
        Commands::Doctor => commands::doctor::run().await?,
        Commands::Memory { action } => match action {
            MemoryAction::Show => commands::memory::show().await?,
            MemoryAction::Clear => commands::memory::clear().await?,
        },
        Commands::Onboard => commands::onboard::run().await?,
    }

    Ok(())
}
