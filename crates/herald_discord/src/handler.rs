//! Serenity event handler feeding the audit log.
//!
//! Every gateway callback converts serenity models to snapshots and hands
//! them to [`AuditLog`]. Failures are logged and never escape the callback.

use crate::{
    CacheMembership, DiscordResult, RecentMessages, UserSnapshotTracker, conversions::RoleNames,
    departed_member_snapshot, member_snapshot, message_snapshot, user_snapshot,
};
use herald_audit::{AuditLog, MembershipDirectory};
use herald_core::{
    BulkDeletion, ChannelId as HeraldChannelId, GuildId as HeraldGuildId, MemberSnapshot,
};
use serenity::all::{
    ChannelId, Context, CurrentUser, EventHandler, GatewayIntents, Guild, GuildId,
    GuildMemberUpdateEvent, Member, Message, MessageId, MessageUpdateEvent, Ready, User,
};
use serenity::async_trait;
use tracing::{debug, error, info, instrument, warn};

fn herald_message_id(id: MessageId) -> herald_core::MessageId {
    herald_core::MessageId(id.get())
}

fn role_names(ctx: &Context, guild_id: GuildId) -> RoleNames {
    ctx.cache
        .guild(guild_id)
        .map(|guild| {
            guild
                .roles
                .iter()
                .map(|(id, role)| (*id, role.name.clone()))
                .collect()
        })
        .unwrap_or_default()
}

async fn fetch_message(ctx: &Context, channel: ChannelId, id: MessageId) -> DiscordResult<Message> {
    Ok(ctx.http.get_message(channel, id).await?)
}

fn report(event: &str, result: DiscordResult<usize>) {
    match result {
        Ok(0) => debug!(event, "Nothing to report"),
        Ok(delivered) => debug!(event, delivered, "Handled event"),
        Err(e) => error!(event, error = %e, "Failed to handle event"),
    }
}

/// Event handler for the Herald audit-log bot.
pub struct HeraldHandler {
    audit: AuditLog,
    users: UserSnapshotTracker,
    messages: RecentMessages<Message>,
}

impl HeraldHandler {
    /// Create a handler that keeps up to `message_capacity` recent messages.
    pub fn new(audit: AuditLog, message_capacity: usize) -> Self {
        Self {
            audit,
            users: UserSnapshotTracker::new(),
            messages: RecentMessages::new(message_capacity),
        }
    }

    /// Required gateway intents for the bot.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }

    /// The audit log events are delivered to.
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    async fn resolve_reference(&self, ctx: &Context, message: &Message) -> Option<Message> {
        if let Some(referenced) = &message.referenced_message {
            return Some(Message::clone(referenced));
        }

        let reference = message.message_reference.as_ref()?;
        let id = reference.message_id?;
        if let Some(cached) = self.messages.get(herald_message_id(id)) {
            return Some(cached);
        }

        match fetch_message(ctx, reference.channel_id, id).await {
            Ok(fetched) => Some(fetched),
            Err(e) => {
                warn!(message_id = %id, error = %e, "Failed to fetch referenced message");
                None
            }
        }
    }

    #[instrument(skip_all, fields(channel_id = %channel_id, message_id = %message_id))]
    async fn on_message_delete(
        &self,
        ctx: &Context,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> DiscordResult<usize> {
        let Some(message) = self.messages.remove(herald_message_id(message_id)) else {
            debug!("Deleted message was not cached");
            return Ok(0);
        };

        let reference = self.resolve_reference(ctx, &message).await;
        let snapshot = message_snapshot(&message, reference.as_ref())?;
        Ok(self.audit.message_deleted(&snapshot).await?)
    }

    #[instrument(skip_all, fields(channel_id = %channel_id, count = ids.len()))]
    async fn on_message_delete_bulk(
        &self,
        channel_id: ChannelId,
        ids: Vec<MessageId>,
        guild_id: Option<GuildId>,
    ) -> DiscordResult<usize> {
        let ids: Vec<_> = ids.into_iter().map(herald_message_id).collect();
        for id in &ids {
            self.messages.remove(*id);
        }

        let deletion = BulkDeletion::new(
            guild_id.map(|g| HeraldGuildId(g.get())),
            HeraldChannelId(channel_id.get()),
            ids,
        );
        Ok(self.audit.messages_bulk_deleted(&deletion).await?)
    }

    #[instrument(skip_all, fields(message_id = %event.id))]
    async fn on_message_update(
        &self,
        new: Option<Message>,
        event: MessageUpdateEvent,
    ) -> DiscordResult<usize> {
        let id = herald_message_id(event.id);
        let Some(old) = self.messages.get(id) else {
            debug!("Edited message was not cached");
            return Ok(0);
        };

        let new = match new {
            Some(new) => new,
            None => {
                let mut patched = old.clone();
                if let Some(content) = event.content {
                    patched.content = content;
                }
                patched
            }
        };
        self.messages.insert(id, new.clone());

        let before = message_snapshot(&old, None)?;
        let after = message_snapshot(&new, None)?;
        Ok(self.audit.message_edited(&before, &after).await?)
    }

    /// Report a member change seen in one guild.
    ///
    /// Account-level changes (avatar, username, discriminator) are reported
    /// once, however many guilds relay the same update. Nickname and role
    /// changes are reported for the guild they happened in. Without a previous
    /// member state only the account diff can run.
    ///
    /// # Errors
    ///
    /// Returns the first channel lookup or delivery error.
    pub async fn member_changed(
        &self,
        before: Option<MemberSnapshot>,
        after: MemberSnapshot,
        membership: &dyn MembershipDirectory,
    ) -> DiscordResult<usize> {
        let mut delivered = 0;

        if let Some(before) = &before {
            self.users.seed(before.user().clone());
        }
        if let Some((user_before, user_after)) = self.users.observe(after.user().clone()) {
            delivered += self
                .audit
                .user_updated(user_before, user_after, membership)
                .await?;
        }

        match before {
            Some(before) => {
                delivered += self.audit.member_updated(before, after, membership).await?;
            }
            None => debug!("Previous member state was not cached"),
        }

        Ok(delivered)
    }

    #[instrument(skip_all, fields(guild_id = %new.guild_id, user_id = %new.user.id))]
    async fn on_member_update(
        &self,
        ctx: &Context,
        old: Option<Member>,
        new: Member,
    ) -> DiscordResult<usize> {
        let names = role_names(ctx, new.guild_id);
        let before = old
            .as_ref()
            .map(|old| member_snapshot(old, &names))
            .transpose()?;
        let after = member_snapshot(&new, &names)?;
        let membership = CacheMembership::new(ctx.cache.clone());
        self.member_changed(before, after, &membership).await
    }

    #[instrument(skip_all, fields(user_id = %new.id))]
    async fn on_user_update(
        &self,
        ctx: &Context,
        old: Option<CurrentUser>,
        new: CurrentUser,
    ) -> DiscordResult<usize> {
        let after = user_snapshot(&new)?;
        self.users.remember(after.clone());

        let Some(old) = old else {
            debug!("Previous bot user state was not cached");
            return Ok(0);
        };
        let before = user_snapshot(&old)?;
        let membership = CacheMembership::new(ctx.cache.clone());
        Ok(self.audit.user_updated(before, after, &membership).await?)
    }

    #[instrument(skip_all, fields(guild_id = %member.guild_id, user_id = %member.user.id))]
    async fn on_member_addition(&self, ctx: &Context, member: Member) -> DiscordResult<usize> {
        self.users.seed(user_snapshot(&member.user)?);
        let snapshot = member_snapshot(&member, &role_names(ctx, member.guild_id))?;
        Ok(self.audit.member_joined(&snapshot).await?)
    }

    #[instrument(skip_all, fields(guild_id = %guild_id, user_id = %user.id))]
    async fn on_member_removal(
        &self,
        ctx: &Context,
        guild_id: GuildId,
        user: User,
        member: Option<Member>,
    ) -> DiscordResult<usize> {
        let snapshot = match &member {
            Some(member) => member_snapshot(member, &role_names(ctx, guild_id))?,
            None => departed_member_snapshot(guild_id, &user)?,
        };

        let delivered = self.audit.member_left(&snapshot).await?;

        let membership = CacheMembership::new(ctx.cache.clone());
        if membership.shared_guilds(*snapshot.user().id()).is_empty() {
            self.users.forget(*snapshot.user().id());
        }
        Ok(delivered)
    }
}

#[async_trait]
impl EventHandler for HeraldHandler {
    /// Called when the bot successfully connects to Discord.
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            bot_user = %ready.user.name,
            bot_id = %ready.user.id,
            guilds = ready.guilds.len(),
            "Bot connected to Discord"
        );
    }

    /// Remember every member's account so the first change can be diffed.
    async fn guild_create(&self, _ctx: Context, guild: Guild, _is_new: Option<bool>) {
        let mut seeded = 0;
        for member in guild.members.values() {
            match user_snapshot(&member.user) {
                Ok(snapshot) => {
                    self.users.seed(snapshot);
                    seeded += 1;
                }
                Err(e) => warn!(user_id = %member.user.id, error = %e, "Skipping member"),
            }
        }
        info!(guild_id = %guild.id, guild_name = %guild.name, seeded, "Guild available");
    }

    async fn message(&self, _ctx: Context, new_message: Message) {
        if new_message.guild_id.is_none() {
            return;
        }
        self.messages
            .insert(herald_message_id(new_message.id), new_message);
    }

    async fn message_delete(
        &self,
        ctx: Context,
        channel_id: ChannelId,
        deleted_message_id: MessageId,
        _guild_id: Option<GuildId>,
    ) {
        let result = self
            .on_message_delete(&ctx, channel_id, deleted_message_id)
            .await;
        report("message_delete", result);
    }

    async fn message_delete_bulk(
        &self,
        _ctx: Context,
        channel_id: ChannelId,
        multiple_deleted_messages_ids: Vec<MessageId>,
        guild_id: Option<GuildId>,
    ) {
        let result = self
            .on_message_delete_bulk(channel_id, multiple_deleted_messages_ids, guild_id)
            .await;
        report("message_delete_bulk", result);
    }

    async fn message_update(
        &self,
        _ctx: Context,
        _old_if_available: Option<Message>,
        new: Option<Message>,
        event: MessageUpdateEvent,
    ) {
        let result = self.on_message_update(new, event).await;
        report("message_update", result);
    }

    async fn guild_member_update(
        &self,
        ctx: Context,
        old_if_available: Option<Member>,
        new: Option<Member>,
        _event: GuildMemberUpdateEvent,
    ) {
        let Some(new) = new else {
            debug!("Updated member was not cached");
            return;
        };
        let result = self.on_member_update(&ctx, old_if_available, new).await;
        report("guild_member_update", result);
    }

    async fn user_update(&self, ctx: Context, old_data: Option<CurrentUser>, new: CurrentUser) {
        let result = self.on_user_update(&ctx, old_data, new).await;
        report("user_update", result);
    }

    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        let result = self.on_member_addition(&ctx, new_member).await;
        report("guild_member_addition", result);
    }

    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        member_data_if_available: Option<Member>,
    ) {
        let result = self
            .on_member_removal(&ctx, guild_id, user, member_data_if_available)
            .await;
        report("guild_member_removal", result);
    }
}
