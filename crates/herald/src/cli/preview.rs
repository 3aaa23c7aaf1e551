//! The `preview` command.

use super::PreviewEvent;
use chrono::Duration;
use herald::HeraldConfig;
use herald_audit::{
    AuditLog, GuildSettings, JsonTransport, LogChannelCache, StaticGuildConfigStore,
};
use herald_core::{
    ChannelId, GuildId, MemberSnapshot, MemberSnapshotBuilder, MessageSnapshotBuilder, RoleRef,
    UserId, UserSnapshot, UserSnapshotBuilder,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

const SAMPLE_GUILD: u64 = 81384788765712384;
const SAMPLE_CHANNEL: u64 = 381870553235193857;
const SAMPLE_USER: u64 = 175928847299117063;

fn sample_user(name: &str, avatar: u8) -> Result<UserSnapshot, Box<dyn std::error::Error>> {
    Ok(UserSnapshotBuilder::default()
        .id(SAMPLE_USER)
        .name(name)
        .avatar_url(format!(
            "https://cdn.discordapp.com/embed/avatars/{}.png",
            avatar
        ))
        .build()?)
}

fn sample_member(
    user: UserSnapshot,
    nickname: Option<&str>,
    roles: Vec<RoleRef>,
    config: &HeraldConfig,
) -> Result<MemberSnapshot, Box<dyn std::error::Error>> {
    let joined_at = config.timekeeper()?.now() - Duration::days(23) - Duration::hours(4);
    Ok(MemberSnapshotBuilder::default()
        .guild_id(SAMPLE_GUILD)
        .user(user)
        .nickname(nickname.map(str::to_string))
        .roles(roles)
        .joined_at(Some(joined_at))
        .build()?)
}

/// Render sample cards through the real formatters and print them as JSON.
pub async fn preview(
    config: &HeraldConfig,
    event: PreviewEvent,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = StaticGuildConfigStore::new(HashMap::from([(
        GuildId(SAMPLE_GUILD),
        GuildSettings::default().with_mod_log_channel(Some(ChannelId(SAMPLE_CHANNEL))),
    )]));
    let audit = AuditLog::new(
        Arc::new(LogChannelCache::new(store, config.cache().clone())),
        Arc::new(JsonTransport::stdout()),
        config.timekeeper()?,
    );
    let membership = HashMap::from([(UserId(SAMPLE_USER), vec![GuildId(SAMPLE_GUILD)])]);

    let moderator = RoleRef::new(1u64 << 40, "Moderator");
    let helper = RoleRef::new((1u64 << 40) + 1, "Helper");
    let ferris = sample_user("ferris", 0)?;
    let mut delivered = 0;

    if event.includes(PreviewEvent::Deleted) {
        let question = MessageSnapshotBuilder::default()
            .id(1u64 << 42)
            .channel_id(SAMPLE_CHANNEL)
            .guild_id(Some(GuildId(SAMPLE_GUILD)))
            .author(sample_user("corro", 1)?)
            .content("Does anyone know why my borrow checker hates me?")
            .build()?;
        let reply = MessageSnapshotBuilder::default()
            .id((1u64 << 42) + 1)
            .channel_id(SAMPLE_CHANNEL)
            .guild_id(Some(GuildId(SAMPLE_GUILD)))
            .author(ferris.clone())
            .content("It doesn't hate you, it just has boundaries.")
            .referenced(Some(Box::new(question)))
            .build()?;
        delivered += audit.message_deleted(&reply).await?;
    }

    if event.includes(PreviewEvent::Edited) {
        let message = |content: &str| {
            MessageSnapshotBuilder::default()
                .id((1u64 << 42) + 2)
                .channel_id(SAMPLE_CHANNEL)
                .guild_id(Some(GuildId(SAMPLE_GUILD)))
                .author(ferris.clone())
                .content(content)
                .build()
        };
        delivered += audit
            .message_edited(&message("lifetimes are easy")?, &message("lifetimes are fine")?)
            .await?;
    }

    if event.includes(PreviewEvent::Joined) {
        let member = sample_member(ferris.clone(), None, Vec::new(), config)?;
        delivered += audit.member_joined(&member).await?;
    }

    if event.includes(PreviewEvent::Left) {
        let member = sample_member(ferris.clone(), None, vec![moderator.clone()], config)?;
        delivered += audit.member_left(&member).await?;
    }

    if event.includes(PreviewEvent::Profile) {
        let before = sample_member(ferris.clone(), None, vec![moderator.clone()], config)?;
        let after = sample_member(ferris.clone(), Some("crab"), vec![helper], config)?;
        delivered += audit.member_updated(before, after, &membership).await?;

        let renamed = sample_user("corro", 3)?;
        delivered += audit
            .user_updated(ferris.clone(), renamed, &membership)
            .await?;
    }

    info!(delivered, "Rendered preview cards");
    Ok(())
}
