//! Read-through cache of guild audit channels.

use crate::{GuildConfigStore, LogChannelSource};
use async_trait::async_trait;
use derive_getters::Getters;
use herald_core::{ChannelId, GuildId};
use herald_error::HeraldResult;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

/// Configuration for the audit channel cache.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct ChannelCacheConfig {
    /// Time-to-live for cached lookups (seconds)
    #[serde(default = "default_ttl")]
    ttl_seconds: u64,

    /// Maximum number of cached guilds
    #[serde(default = "default_max_entries")]
    max_entries: usize,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_ttl() -> u64 {
    300 // 5 minutes
}

fn default_max_entries() -> usize {
    1000
}

fn default_enabled() -> bool {
    true
}

impl Default for ChannelCacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
            max_entries: default_max_entries(),
            enabled: default_enabled(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    channel: Option<ChannelId>,
    created_at: Instant,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<GuildId, CacheEntry>,
    access_order: VecDeque<GuildId>,
}

impl CacheState {
    fn touch(&mut self, guild: GuildId) {
        if let Some(pos) = self.access_order.iter().position(|g| *g == guild) {
            self.access_order.remove(pos);
        }
        self.access_order.push_back(guild);
    }

    fn forget(&mut self, guild: GuildId) {
        self.entries.remove(&guild);
        if let Some(pos) = self.access_order.iter().position(|g| *g == guild) {
            self.access_order.remove(pos);
        }
    }
}

/// Caches each guild's audit channel in front of a [`GuildConfigStore`].
///
/// Lookups that miss or find an expired entry go to the store, and the answer
/// is cached, including "no channel configured". The least recently used
/// guild is evicted once `max_entries` is reached, and a `max_entries` of
/// zero caches nothing. The lock is never held
/// while the store is queried.
///
/// # Example
///
/// ```
/// use herald_audit::{
///     ChannelCacheConfig, GuildSettings, LogChannelCache, LogChannelSource, StaticGuildConfigStore,
/// };
/// use herald_core::{ChannelId, GuildId};
/// use std::collections::HashMap;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = StaticGuildConfigStore::new(HashMap::from([(
///     GuildId(1),
///     GuildSettings::default().with_mod_log_channel(Some(ChannelId(10))),
/// )]));
/// let cache = LogChannelCache::new(store, ChannelCacheConfig::default());
///
/// assert_eq!(cache.log_channel(GuildId(1)).await.unwrap(), Some(ChannelId(10)));
/// assert_eq!(cache.log_channel(GuildId(2)).await.unwrap(), None);
/// assert_eq!(cache.len(), 2);
/// # }
/// ```
pub struct LogChannelCache<S> {
    store: S,
    config: ChannelCacheConfig,
    state: Mutex<CacheState>,
}

impl<S: GuildConfigStore> LogChannelCache<S> {
    /// Wrap a store with a cache.
    pub fn new(store: S, config: ChannelCacheConfig) -> Self {
        tracing::debug!(
            ttl_seconds = config.ttl_seconds,
            max_entries = config.max_entries,
            enabled = config.enabled,
            "Creating audit channel cache"
        );
        Self {
            store,
            config,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(self.config.ttl_seconds)
    }

    fn cached(&self, guild: GuildId) -> Option<Option<ChannelId>> {
        let mut state = self.state.lock();
        let entry = *state.entries.get(&guild)?;
        if entry.created_at.elapsed() > self.ttl() {
            tracing::debug!(guild_id = %guild, "Cached audit channel expired");
            state.forget(guild);
            return None;
        }
        state.touch(guild);
        Some(entry.channel)
    }

    fn insert(&self, guild: GuildId, channel: Option<ChannelId>) {
        if self.config.max_entries == 0 {
            return;
        }
        let mut state = self.state.lock();
        if state.entries.len() >= self.config.max_entries
            && !state.entries.contains_key(&guild)
            && let Some(oldest) = state.access_order.pop_front()
        {
            tracing::debug!(guild_id = %oldest, "Evicting least recently used guild");
            state.entries.remove(&oldest);
        }
        state.entries.insert(
            guild,
            CacheEntry {
                channel,
                created_at: Instant::now(),
            },
        );
        state.touch(guild);
    }

    /// Drop the cached entry for one guild, e.g. after its settings change.
    pub fn invalidate(&self, guild: GuildId) {
        self.state.lock().forget(guild);
        tracing::debug!(guild_id = %guild, "Invalidated cached audit channel");
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let count = state.entries.len();
        state.entries.clear();
        state.access_order.clear();
        tracing::info!(cleared = count, "Cleared audit channel cache");
    }

    /// Number of cached guilds.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }
}

#[async_trait]
impl<S: GuildConfigStore> LogChannelSource for LogChannelCache<S> {
    #[tracing::instrument(skip(self), fields(guild_id = %guild))]
    async fn log_channel(&self, guild: GuildId) -> HeraldResult<Option<ChannelId>> {
        if self.config.enabled
            && let Some(channel) = self.cached(guild)
        {
            tracing::trace!("Cache hit");
            return Ok(channel);
        }

        let channel = *self.store.fetch(guild).await?.mod_log_channel();
        if self.config.enabled {
            self.insert(guild, channel);
        }
        Ok(channel)
    }
}
