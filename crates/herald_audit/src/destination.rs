//! Destination resolution seams.

use crate::GuildSettings;
use async_trait::async_trait;
use herald_core::{ChannelId, GuildId, UserId};
use herald_error::{ConfigError, HeraldResult};
use std::collections::HashMap;

/// Resolves the audit channel configured for a guild.
#[async_trait]
pub trait LogChannelSource: Send + Sync {
    /// Audit channel for `guild`, or `None` when logging is not configured there.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    async fn log_channel(&self, guild: GuildId) -> HeraldResult<Option<ChannelId>>;
}

/// Persistent per-guild settings.
#[async_trait]
pub trait GuildConfigStore: Send + Sync {
    /// Settings for `guild`. Unknown guilds get [`GuildSettings::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable or the stored settings
    /// cannot be decoded.
    async fn fetch(&self, guild: GuildId) -> HeraldResult<GuildSettings>;
}

/// Lists the guilds a user currently belongs to, as far as the bot can see.
pub trait MembershipDirectory: Send + Sync {
    /// Guilds shared between the bot and `user`.
    fn shared_guilds(&self, user: UserId) -> Vec<GuildId>;
}

impl MembershipDirectory for HashMap<UserId, Vec<GuildId>> {
    fn shared_guilds(&self, user: UserId) -> Vec<GuildId> {
        self.get(&user).cloned().unwrap_or_default()
    }
}

/// Guild settings fixed at startup, typically from the configuration file.
///
/// # Examples
///
/// ```
/// use herald_audit::{GuildSettings, StaticGuildConfigStore};
/// use herald_core::ChannelId;
/// use std::collections::HashMap;
///
/// let mut table = HashMap::new();
/// table.insert(
///     "1234".to_string(),
///     GuildSettings::default().with_mod_log_channel(Some(ChannelId(99))),
/// );
///
/// let store = StaticGuildConfigStore::from_table(&table).unwrap();
/// assert_eq!(store.len(), 1);
/// assert!(StaticGuildConfigStore::from_table(&HashMap::from([
///     ("general".to_string(), GuildSettings::default()),
/// ])).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticGuildConfigStore {
    guilds: HashMap<GuildId, GuildSettings>,
}

impl StaticGuildConfigStore {
    /// Create a store from already-parsed guild ids.
    pub fn new(guilds: HashMap<GuildId, GuildSettings>) -> Self {
        Self { guilds }
    }

    /// Create a store from a table keyed by guild id strings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a key is not a numeric snowflake.
    pub fn from_table(table: &HashMap<String, GuildSettings>) -> HeraldResult<Self> {
        let mut guilds = HashMap::with_capacity(table.len());
        for (key, settings) in table {
            let id: u64 = key.trim().parse().map_err(|_| {
                ConfigError::new(format!("Guild key '{}' is not a numeric id", key))
                    .with_key(format!("guilds.{}", key))
            })?;
            guilds.insert(GuildId(id), *settings);
        }
        Ok(Self { guilds })
    }

    /// Number of guilds with stored settings.
    pub fn len(&self) -> usize {
        self.guilds.len()
    }

    /// True when no guild has stored settings.
    pub fn is_empty(&self) -> bool {
        self.guilds.is_empty()
    }

    /// Stored settings, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&GuildId, &GuildSettings)> {
        self.guilds.iter()
    }
}

#[async_trait]
impl GuildConfigStore for StaticGuildConfigStore {
    async fn fetch(&self, guild: GuildId) -> HeraldResult<GuildSettings> {
        Ok(self.guilds.get(&guild).copied().unwrap_or_default())
    }
}
