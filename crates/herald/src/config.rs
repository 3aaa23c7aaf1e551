//! Layered bot configuration.

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use herald_audit::{
    AuditSettings, ChannelCacheConfig, GuildSettings, StaticGuildConfigStore, Timekeeper,
};
use herald_error::{ConfigError, HeraldResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Bundled defaults, lowest precedence.
const DEFAULT_CONFIG: &str = include_str!("../herald.toml");

/// Gateway connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct DiscordSettings {
    /// Name of the environment variable holding the bot token
    #[serde(default = "default_token_env")]
    token_env: String,

    /// Recent messages kept for describing deletions and edits
    #[serde(default = "default_message_cache_size")]
    message_cache_size: usize,
}

fn default_token_env() -> String {
    "DISCORD_TOKEN".to_string()
}

fn default_message_cache_size() -> usize {
    500
}

impl Default for DiscordSettings {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
            message_cache_size: default_message_cache_size(),
        }
    }
}

/// Complete Herald configuration.
///
/// # Example
///
/// ```no_run
/// use herald::HeraldConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = HeraldConfig::load(None)?;
/// let store = config.guild_store()?;
/// println!("Audit logging configured for {} guilds", store.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, Getters)]
pub struct HeraldConfig {
    /// Gateway settings
    #[serde(default)]
    discord: DiscordSettings,

    /// Card rendering settings
    #[serde(default)]
    audit: AuditSettings,

    /// Audit channel cache settings
    #[serde(default)]
    cache: ChannelCacheConfig,

    /// Per-guild settings keyed by guild id
    #[serde(default)]
    guilds: HashMap<String, GuildSettings>,
}

impl HeraldConfig {
    /// Load configuration with precedence, later sources overriding earlier:
    /// 1. Bundled defaults
    /// 2. `~/.config/herald/herald.toml`
    /// 3. `./herald.toml`
    /// 4. `explicit`, if given (must exist)
    /// 5. `HERALD__<SECTION>__<KEY>` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> HeraldResult<Self> {
        let mut builder = Self::defaults();

        if let Some(config_dir) = dirs::config_dir() {
            let home_config = config_dir.join("herald/herald.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }
        builder = builder.add_source(File::with_name("herald").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("HERALD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Load the bundled defaults overridden by a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> HeraldResult<Self> {
        let builder = Self::defaults().add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> HeraldResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        tracing::debug!(
            guilds = config.guilds.len(),
            cache_enabled = *config.cache.enabled(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Bot token from the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or empty.
    pub fn token(&self) -> HeraldResult<String> {
        match std::env::var(&self.discord.token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(ConfigError::new(format!(
                "Environment variable {} is not set",
                self.discord.token_env
            ))
            .with_key("discord.token_env")
            .into()),
        }
    }

    /// Guild settings as a store.
    ///
    /// # Errors
    ///
    /// Returns an error if a guild key is not a numeric id.
    pub fn guild_store(&self) -> HeraldResult<StaticGuildConfigStore> {
        StaticGuildConfigStore::from_table(&self.guilds)
    }

    /// Wall-clock timekeeper for the configured timestamp format and offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the format or offset is invalid.
    pub fn timekeeper(&self) -> HeraldResult<Timekeeper> {
        Timekeeper::system(&self.audit)
    }
}
