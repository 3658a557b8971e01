//! `scout doctor` — Check that everything Scout needs is in place.

use scout_config::AppConfig;

use super::Overrides;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Scout Doctor");
    println!("===============\n");

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  ✅ Config file: {}", config_path.display());
    } else {
        println!("  ⚠️  No config file, using defaults (run `scout onboard`)");
    }

    let config = super::load_config(&Overrides::default())?;
    println!("  Model:      {} via {}", config.model.model, config.model.provider);
    println!("  Max steps:  {}", config.agent.max_steps);
    println!("  Policy:     {:?}", config.agent.reply_policy);
    if config.memory.enabled {
        println!("  Memory:     {}", config.memory.resolved_path().display());
    } else {
        println!("  Memory:     disabled");
    }
    println!();

    let client = scout_providers::build_client(&config.model);
    super::preflight(&config, &client).await?;

    println!("\n  All checks passed.");
    Ok(())
}
