//! Shared fixtures for audit tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use herald_audit::{AuditSettings, CardTransport, FixedClock, LogChannelSource, Timekeeper};
use herald_core::{
    Card, ChannelId, GuildId, MemberSnapshot, MemberSnapshotBuilder, RoleRef, UserSnapshot,
    UserSnapshotBuilder,
};
use herald_error::{HeraldResult, TransportError, TransportErrorKind};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Records every card instead of sending it.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(ChannelId, Card)>>,
    fail_on: Option<ChannelId>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every send to `channel`.
    pub fn failing_on(channel: ChannelId) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_on: Some(channel),
        }
    }

    pub fn sent(&self) -> Vec<(ChannelId, Card)> {
        self.sent.lock().clone()
    }

    pub fn channels(&self) -> Vec<ChannelId> {
        self.sent.lock().iter().map(|(c, _)| *c).collect()
    }
}

#[async_trait]
impl CardTransport for RecordingTransport {
    async fn send_card(&self, channel: ChannelId, card: &Card) -> HeraldResult<()> {
        if self.fail_on == Some(channel) {
            return Err(TransportError::new(TransportErrorKind::SendFailed(
                "Mock failure".to_string(),
            ))
            .into());
        }
        self.sent.lock().push((channel, card.clone()));
        Ok(())
    }
}

/// Fixed guild to channel mapping.
#[derive(Default)]
pub struct MapChannels(pub HashMap<GuildId, ChannelId>);

impl MapChannels {
    pub fn with(mut self, guild: u64, channel: u64) -> Self {
        self.0.insert(GuildId(guild), ChannelId(channel));
        self
    }
}

#[async_trait]
impl LogChannelSource for MapChannels {
    async fn log_channel(&self, guild: GuildId) -> HeraldResult<Option<ChannelId>> {
        Ok(self.0.get(&guild).copied())
    }
}

/// Timekeeper frozen at 2024-01-15 14:30:00 UTC.
pub fn frozen_timekeeper() -> Timekeeper {
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
    Timekeeper::new(Arc::new(FixedClock(now)), &AuditSettings::default()).unwrap()
}

pub fn user(id: u64, name: &str) -> UserSnapshot {
    UserSnapshotBuilder::default()
        .id(id)
        .name(name)
        .avatar_url(format!("https://cdn.example/avatars/{}/a.png", id))
        .build()
        .unwrap()
}

pub fn member(guild: u64, user: UserSnapshot) -> MemberSnapshotBuilder {
    let mut builder = MemberSnapshotBuilder::default();
    builder.guild_id(guild).user(user);
    builder
}

pub fn roles(ids: &[(u64, &str)]) -> Vec<RoleRef> {
    ids.iter().map(|(id, name)| RoleRef::new(*id, *name)).collect()
}

pub fn member_with_roles(guild: u64, user: UserSnapshot, held: &[(u64, &str)]) -> MemberSnapshot {
    member(guild, user).roles(roles(held)).build().unwrap()
}
