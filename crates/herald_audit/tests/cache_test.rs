//! Tests for the audit channel cache.

use async_trait::async_trait;
use herald_audit::{
    ChannelCacheConfig, GuildConfigStore, GuildSettings, LogChannelCache, LogChannelSource,
};
use herald_core::{ChannelId, GuildId};
use herald_error::{HeraldResult, StoreError, StoreErrorKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Maps guild `n` to channel `n * 10` and counts fetches.
#[derive(Default)]
struct CountingStore {
    fetches: AtomicUsize,
}

impl CountingStore {
    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GuildConfigStore for CountingStore {
    async fn fetch(&self, guild: GuildId) -> HeraldResult<GuildSettings> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if guild.get() == 0 {
            return Ok(GuildSettings::default());
        }
        Ok(GuildSettings::default().with_mod_log_channel(Some(ChannelId(guild.get() * 10))))
    }
}

struct BrokenStore;

#[async_trait]
impl GuildConfigStore for BrokenStore {
    async fn fetch(&self, _guild: GuildId) -> HeraldResult<GuildSettings> {
        Err(StoreError::new(StoreErrorKind::Unavailable("offline".to_string())).into())
    }
}

#[tokio::test]
async fn test_cache_hit() {
    let cache = LogChannelCache::new(CountingStore::default(), ChannelCacheConfig::default());

    assert_eq!(cache.log_channel(GuildId(1)).await.unwrap(), Some(ChannelId(10)));
    assert_eq!(cache.log_channel(GuildId(1)).await.unwrap(), Some(ChannelId(10)));
    assert_eq!(cache.store().fetches(), 1);
}

#[tokio::test]
async fn test_unconfigured_guild_is_cached() {
    let cache = LogChannelCache::new(CountingStore::default(), ChannelCacheConfig::default());

    assert_eq!(cache.log_channel(GuildId(0)).await.unwrap(), None);
    assert_eq!(cache.log_channel(GuildId(0)).await.unwrap(), None);
    assert_eq!(cache.store().fetches(), 1);
}

#[tokio::test]
async fn test_cache_expiration() {
    let config = ChannelCacheConfig::default().with_ttl_seconds(1);
    let cache = LogChannelCache::new(CountingStore::default(), config);

    cache.log_channel(GuildId(1)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1100)).await;
    cache.log_channel(GuildId(1)).await.unwrap();

    assert_eq!(cache.store().fetches(), 2);
}

#[tokio::test]
async fn test_lru_eviction() {
    let config = ChannelCacheConfig::default().with_max_entries(2);
    let cache = LogChannelCache::new(CountingStore::default(), config);

    cache.log_channel(GuildId(1)).await.unwrap();
    cache.log_channel(GuildId(2)).await.unwrap();
    // Touch 1 so that 2 becomes least recently used
    cache.log_channel(GuildId(1)).await.unwrap();
    cache.log_channel(GuildId(3)).await.unwrap();
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.store().fetches(), 3);

    cache.log_channel(GuildId(1)).await.unwrap();
    assert_eq!(cache.store().fetches(), 3);

    cache.log_channel(GuildId(2)).await.unwrap();
    assert_eq!(cache.store().fetches(), 4);
}

#[tokio::test]
async fn test_invalidate_and_clear() {
    let cache = LogChannelCache::new(CountingStore::default(), ChannelCacheConfig::default());

    cache.log_channel(GuildId(1)).await.unwrap();
    cache.log_channel(GuildId(2)).await.unwrap();
    cache.invalidate(GuildId(1));
    assert_eq!(cache.len(), 1);

    cache.log_channel(GuildId(1)).await.unwrap();
    assert_eq!(cache.store().fetches(), 3);

    cache.clear();
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_disabled_cache_always_fetches() {
    let config = ChannelCacheConfig::default().with_enabled(false);
    let cache = LogChannelCache::new(CountingStore::default(), config);

    cache.log_channel(GuildId(1)).await.unwrap();
    cache.log_channel(GuildId(1)).await.unwrap();

    assert_eq!(cache.store().fetches(), 2);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_store_errors_are_not_cached() {
    let cache = LogChannelCache::new(BrokenStore, ChannelCacheConfig::default());

    let err = cache.log_channel(GuildId(1)).await.unwrap_err();
    assert!(err.to_string().contains("offline"));
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_zero_capacity_caches_nothing() {
    let config = ChannelCacheConfig::default().with_max_entries(0);
    let cache = LogChannelCache::new(CountingStore::default(), config);

    for _ in 0..5 {
        assert_eq!(cache.log_channel(GuildId(1)).await.unwrap(), Some(ChannelId(10)));
    }

    assert!(cache.is_empty());
    assert_eq!(cache.store().fetches(), 5);
}
