//! Conversions from serenity models to Herald snapshots.

use crate::{DiscordError, DiscordErrorKind, DiscordResult};
use chrono::{DateTime, Utc};
use herald_core::{
    ChannelId, GuildId, MemberSnapshot, MemberSnapshotBuilder, MessageId, MessageSnapshot,
    MessageSnapshotBuilder, RoleId, RoleRef, UserId, UserSnapshot, UserSnapshotBuilder,
};
use serenity::all::{Member, Message, Timestamp, User};
use std::collections::HashMap;
use std::num::NonZeroU64;

/// Role names of one guild, keyed by serenity role id.
pub type RoleNames = HashMap<serenity::all::RoleId, String>;

fn conversion_error(what: &str, err: impl std::fmt::Display) -> DiscordError {
    DiscordError::new(DiscordErrorKind::Conversion(format!(
        "Failed to build {} snapshot: {}",
        what, err
    )))
}

fn to_utc(timestamp: Timestamp) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.unix_timestamp(), 0)
}

/// Snapshot a user account.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be assembled.
pub fn user_snapshot(user: &User) -> DiscordResult<UserSnapshot> {
    UserSnapshotBuilder::default()
        .id(UserId(user.id.get()))
        .name(user.name.clone())
        .global_name(user.global_name.clone())
        .discriminator(user.discriminator.map(|d| d.get()))
        .avatar_url(user.face())
        .build()
        .map_err(|e| conversion_error("user", e))
}

/// Snapshot a guild membership.
///
/// Roles missing from `role_names` are named after their id.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be assembled.
pub fn member_snapshot(member: &Member, role_names: &RoleNames) -> DiscordResult<MemberSnapshot> {
    let roles = member
        .roles
        .iter()
        .map(|id| {
            let name = role_names
                .get(id)
                .cloned()
                .unwrap_or_else(|| id.to_string());
            RoleRef::new(RoleId(id.get()), name)
        })
        .collect::<Vec<_>>();

    MemberSnapshotBuilder::default()
        .guild_id(GuildId(member.guild_id.get()))
        .user(user_snapshot(&member.user)?)
        .nickname(member.nick.clone())
        .roles(roles)
        .joined_at(member.joined_at.and_then(to_utc))
        .build()
        .map_err(|e| conversion_error("member", e))
}

/// Snapshot a membership known only by its user, e.g. a member that left
/// before the cache saw them.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be assembled.
pub fn departed_member_snapshot(
    guild_id: serenity::all::GuildId,
    user: &User,
) -> DiscordResult<MemberSnapshot> {
    MemberSnapshotBuilder::default()
        .guild_id(GuildId(guild_id.get()))
        .user(user_snapshot(user)?)
        .build()
        .map_err(|e| conversion_error("member", e))
}

/// Snapshot a message, attaching the message it replied to when known.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be assembled.
pub fn message_snapshot(
    message: &Message,
    reference: Option<&Message>,
) -> DiscordResult<MessageSnapshot> {
    let referenced = match reference {
        Some(reference) => Some(Box::new(message_snapshot(reference, None)?)),
        None => None,
    };

    MessageSnapshotBuilder::default()
        .id(MessageId(message.id.get()))
        .channel_id(ChannelId(message.channel_id.get()))
        .guild_id(message.guild_id.map(|g| GuildId(g.get())))
        .author(user_snapshot(&message.author)?)
        .content(message.content.clone())
        .referenced(referenced)
        .build()
        .map_err(|e| conversion_error("message", e))
}

/// Serenity id for a Herald user id, `None` for the invalid id zero.
pub fn serenity_user_id(id: UserId) -> Option<serenity::all::UserId> {
    NonZeroU64::new(id.get()).map(serenity::all::UserId::from)
}

/// Serenity id for a Herald channel id, `None` for the invalid id zero.
pub fn serenity_channel_id(id: ChannelId) -> Option<serenity::all::ChannelId> {
    NonZeroU64::new(id.get()).map(serenity::all::ChannelId::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_ids_have_no_serenity_counterpart() {
        assert!(serenity_user_id(UserId(0)).is_none());
        assert!(serenity_channel_id(ChannelId(0)).is_none());
        assert_eq!(
            serenity_channel_id(ChannelId(42)).map(|id| id.get()),
            Some(42)
        );
    }
}
