//! Guild membership from the gateway cache.

use crate::conversions::serenity_user_id;
use herald_audit::MembershipDirectory;
use herald_core::{GuildId, UserId};
use serenity::cache::Cache;
use std::sync::Arc;

/// Answers shared-guild queries from serenity's cache.
///
/// Only guilds whose member lists the cache holds are visible, which requires
/// the guild members intent.
#[derive(Clone)]
pub struct CacheMembership {
    cache: Arc<Cache>,
}

impl CacheMembership {
    /// Wrap a gateway cache.
    pub fn new(cache: Arc<Cache>) -> Self {
        Self { cache }
    }
}

impl MembershipDirectory for CacheMembership {
    fn shared_guilds(&self, user: UserId) -> Vec<GuildId> {
        let Some(user) = serenity_user_id(user) else {
            return Vec::new();
        };
        self.cache
            .guilds()
            .into_iter()
            .filter(|guild| self.cache.member(*guild, user).is_some())
            .map(|guild| GuildId(guild.get()))
            .collect()
    }
}
