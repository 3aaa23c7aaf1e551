//! Property-diff dispatch.

use crate::{
    CardTransport, LogChannelSource, MembershipDirectory, Scope, Timekeeper, WATCHED_PROPERTIES,
    render_change,
};
use herald_core::{ChannelId, Entity};
use herald_error::HeraldResult;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Diffs user and member snapshots and delivers one card per changed property.
///
/// Nickname and role changes go to the audit channel of the guild the change
/// happened in. Avatar, username and discriminator changes go to the audit
/// channel of every guild the user shares with the bot. Guilds without an
/// audit channel are skipped.
#[derive(Clone)]
pub struct PropertyDiffNotifier {
    channels: Arc<dyn LogChannelSource>,
    transport: Arc<dyn CardTransport>,
    timekeeper: Timekeeper,
}

impl PropertyDiffNotifier {
    /// Create a notifier.
    pub fn new(
        channels: Arc<dyn LogChannelSource>,
        transport: Arc<dyn CardTransport>,
        timekeeper: Timekeeper,
    ) -> Self {
        Self {
            channels,
            transport,
            timekeeper,
        }
    }

    /// Report every watched property that differs between `before` and `after`.
    ///
    /// Returns the number of cards delivered. Identical snapshots deliver
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns the first channel lookup or delivery error. Cards already sent
    /// stay sent; the remaining properties are not processed.
    #[instrument(skip_all, fields(user_id = %after.id(), member = after.is_member()))]
    pub async fn notify_changes(
        &self,
        before: &Entity,
        after: &Entity,
        membership: &dyn MembershipDirectory,
    ) -> HeraldResult<usize> {
        let mut delivered = 0;

        for property in WATCHED_PROPERTIES.iter() {
            let Some(mut card) = render_change(property, before, after) else {
                continue;
            };
            card.set_footer(self.timekeeper.stamp());

            let destinations = self
                .destinations(property.scope(), before, after, membership)
                .await?;
            if destinations.is_empty() {
                debug!(property = %property.key(), "No audit channel configured");
                continue;
            }

            for channel in destinations {
                self.transport.send_card(channel, &card).await?;
                delivered += 1;
                info!(property = %property.key(), channel_id = %channel, "Delivered change card");
            }
        }

        Ok(delivered)
    }

    async fn destinations(
        &self,
        scope: Scope,
        before: &Entity,
        after: &Entity,
        membership: &dyn MembershipDirectory,
    ) -> HeraldResult<Vec<ChannelId>> {
        match scope {
            Scope::Guild => match before.guild_id() {
                Some(guild) => Ok(self.channels.log_channel(guild).await?.into_iter().collect()),
                None => Ok(Vec::new()),
            },
            Scope::Entity => {
                let mut channels = Vec::new();
                for guild in membership.shared_guilds(after.id()) {
                    if let Some(channel) = self.channels.log_channel(guild).await?
                        && !channels.contains(&channel)
                    {
                        channels.push(channel);
                    }
                }
                Ok(channels)
            }
        }
    }
}
