//! The `run` command.

use herald::HeraldConfig;
use herald_audit::LogChannelCache;
use herald_discord::HeraldBot;
use std::sync::Arc;
use tracing::info;

/// Connect to Discord and report events until interrupted.
pub async fn run_bot(config: &HeraldConfig) -> Result<(), Box<dyn std::error::Error>> {
    let token = config.token()?;
    let store = config.guild_store()?;
    let timekeeper = config.timekeeper()?;
    info!(
        guilds = store.len(),
        message_cache_size = *config.discord().message_cache_size(),
        "Configuration loaded"
    );

    let channels = Arc::new(LogChannelCache::new(store, config.cache().clone()));
    let mut bot = HeraldBot::new(
        &token,
        channels,
        timekeeper,
        *config.discord().message_cache_size(),
    )
    .await?;
    bot.start().await?;

    info!("Herald stopped");
    Ok(())
}
