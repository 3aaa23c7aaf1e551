//! Entry points for platform events.

use crate::{
    CardTransport, LogChannelSource, MembershipDirectory, PropertyDiffNotifier, Timekeeper, events,
};
use herald_core::{
    BulkDeletion, Card, Entity, GuildId, MemberSnapshot, MessageSnapshot, UserSnapshot,
};
use herald_error::HeraldResult;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Audit logging for one bot.
///
/// Each method handles one kind of platform event and returns the number of
/// cards delivered. Events from guilds without an audit channel, and from
/// direct messages, deliver nothing.
#[derive(Clone)]
pub struct AuditLog {
    channels: Arc<dyn LogChannelSource>,
    transport: Arc<dyn CardTransport>,
    timekeeper: Timekeeper,
    notifier: PropertyDiffNotifier,
}

impl AuditLog {
    /// Create an audit log over the given collaborators.
    pub fn new(
        channels: Arc<dyn LogChannelSource>,
        transport: Arc<dyn CardTransport>,
        timekeeper: Timekeeper,
    ) -> Self {
        let notifier =
            PropertyDiffNotifier::new(channels.clone(), transport.clone(), timekeeper.clone());
        Self {
            channels,
            transport,
            timekeeper,
            notifier,
        }
    }

    /// The property-diff notifier behind the update handlers.
    pub fn notifier(&self) -> &PropertyDiffNotifier {
        &self.notifier
    }

    /// Timekeeper used for footers.
    pub fn timekeeper(&self) -> &Timekeeper {
        &self.timekeeper
    }

    async fn deliver(&self, guild: Option<GuildId>, cards: Vec<Card>) -> HeraldResult<usize> {
        let Some(guild) = guild else {
            debug!("Event has no guild, skipping");
            return Ok(0);
        };
        let Some(channel) = self.channels.log_channel(guild).await? else {
            debug!(guild_id = %guild, "No audit channel configured");
            return Ok(0);
        };

        let mut delivered = 0;
        for card in &cards {
            self.transport.send_card(channel, card).await?;
            delivered += 1;
        }
        info!(guild_id = %guild, channel_id = %channel, delivered, "Delivered event cards");
        Ok(delivered)
    }

    /// A message was deleted. A second card describes the message it replied
    /// to, when known.
    #[instrument(skip_all, fields(message_id = %message.id(), channel_id = %message.channel_id()))]
    pub async fn message_deleted(&self, message: &MessageSnapshot) -> HeraldResult<usize> {
        let mut cards = vec![events::message_deleted(message, &self.timekeeper)];
        if let Some(reference) = message.referenced() {
            cards.push(events::deleted_reference(reference));
        }
        self.deliver(*message.guild_id(), cards).await
    }

    /// Several messages were deleted at once.
    #[instrument(skip_all, fields(channel_id = %deletion.channel_id(), count = deletion.message_ids().len()))]
    pub async fn messages_bulk_deleted(&self, deletion: &BulkDeletion) -> HeraldResult<usize> {
        let card = events::bulk_deleted(deletion, &self.timekeeper);
        self.deliver(*deletion.guild_id(), vec![card]).await
    }

    /// A message was edited. Edits that leave the text unchanged are ignored.
    #[instrument(skip_all, fields(message_id = %after.id()))]
    pub async fn message_edited(
        &self,
        before: &MessageSnapshot,
        after: &MessageSnapshot,
    ) -> HeraldResult<usize> {
        let Some(card) = events::message_edited(before, after, &self.timekeeper) else {
            debug!("Message text unchanged, skipping");
            return Ok(0);
        };
        self.deliver(*after.guild_id(), vec![card]).await
    }

    /// A member's guild profile changed.
    #[instrument(skip_all, fields(guild_id = %after.guild_id(), user_id = %after.user().id()))]
    pub async fn member_updated(
        &self,
        before: MemberSnapshot,
        after: MemberSnapshot,
        membership: &dyn MembershipDirectory,
    ) -> HeraldResult<usize> {
        self.notifier
            .notify_changes(&Entity::Member(before), &Entity::Member(after), membership)
            .await
    }

    /// A user's account profile changed.
    #[instrument(skip_all, fields(user_id = %after.id()))]
    pub async fn user_updated(
        &self,
        before: UserSnapshot,
        after: UserSnapshot,
        membership: &dyn MembershipDirectory,
    ) -> HeraldResult<usize> {
        self.notifier
            .notify_changes(&Entity::User(before), &Entity::User(after), membership)
            .await
    }

    /// A member joined a guild.
    #[instrument(skip_all, fields(guild_id = %member.guild_id(), user_id = %member.user().id()))]
    pub async fn member_joined(&self, member: &MemberSnapshot) -> HeraldResult<usize> {
        let card = events::member_joined(member, &self.timekeeper);
        self.deliver(Some(*member.guild_id()), vec![card]).await
    }

    /// A member left or was removed from a guild.
    #[instrument(skip_all, fields(guild_id = %member.guild_id(), user_id = %member.user().id()))]
    pub async fn member_left(&self, member: &MemberSnapshot) -> HeraldResult<usize> {
        let card = events::member_left(member, &self.timekeeper);
        self.deliver(Some(*member.guild_id()), vec![card]).await
    }
}
