//! The `check-config` command.

use herald::HeraldConfig;
use tracing::warn;

/// Validate the configuration and print what the bot would use.
pub fn check_config(config: &HeraldConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = config.guild_store()?;
    let timekeeper = config.timekeeper()?;

    println!("Timestamp format: {}", timekeeper.stamp());
    println!(
        "Channel cache: enabled={} ttl={}s max_entries={}",
        config.cache().enabled(),
        config.cache().ttl_seconds(),
        config.cache().max_entries()
    );

    let mut guilds: Vec<_> = store.iter().collect();
    guilds.sort_by_key(|(id, _)| **id);
    if guilds.is_empty() {
        println!("No guilds configured; nothing will be reported");
    }
    for (guild, settings) in guilds {
        match settings.mod_log_channel() {
            Some(channel) => println!("Guild {} -> channel {}", guild, channel),
            None => println!("Guild {} -> audit logging disabled", guild),
        }
    }

    let token_env = config.discord().token_env();
    match config.token() {
        Ok(_) => println!("Token: found in {}", token_env),
        Err(e) => {
            warn!(error = %e, "Bot token missing");
            println!("Token: {} is not set", token_env);
        }
    }

    Ok(())
}
