//! `scout memory` — Inspect or reset the stored session summary.

use super::Overrides;

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(&Overrides::default())?;
    if !config.memory.enabled {
        println!("Memory is disabled in the config.");
        return Ok(());
    }

    let store = super::memory_store(&config);
    let summary = store.load().await?;

    println!("🧠 Stored summary ({})", config.memory.resolved_path().display());
    println!("====================");
    if summary.trim().is_empty() {
        println!("(empty)");
    } else {
        println!("{summary}");
    }
    Ok(())
}

pub async fn clear() -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(&Overrides::default())?;
    let store = super::memory_store(&config);
    store.clear().await?;
    println!("✅ Memory cleared");
    Ok(())
}
