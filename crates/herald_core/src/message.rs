//! Message snapshots.

use crate::{ChannelId, GuildId, MessageId, UserSnapshot};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A message as last seen before it was deleted or edited.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct MessageSnapshot {
    /// Message id
    id: MessageId,
    /// Channel the message was posted in
    channel_id: ChannelId,
    /// Guild, absent for direct messages
    #[builder(default)]
    #[serde(default)]
    guild_id: Option<GuildId>,
    /// Author account
    author: UserSnapshot,
    /// Text content, possibly empty for attachment-only messages
    #[builder(default)]
    #[serde(default)]
    content: String,
    /// Message this one replied to, when the platform could resolve it
    #[builder(default)]
    #[serde(default)]
    referenced: Option<Box<MessageSnapshot>>,
}

impl MessageSnapshot {
    /// Permalink to the message.
    pub fn jump_url(&self) -> String {
        let guild = self
            .guild_id
            .map(|g| g.to_string())
            .unwrap_or_else(|| "@me".to_string());
        format!(
            "https://discord.com/channels/{}/{}/{}",
            guild, self.channel_id, self.id
        )
    }
}

/// A batch of messages removed at once, e.g. by a purge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct BulkDeletion {
    guild_id: Option<GuildId>,
    channel_id: ChannelId,
    message_ids: Vec<MessageId>,
}

impl BulkDeletion {
    /// Describe a bulk deletion.
    pub fn new(
        guild_id: Option<GuildId>,
        channel_id: ChannelId,
        message_ids: Vec<MessageId>,
    ) -> Self {
        Self {
            guild_id,
            channel_id,
            message_ids,
        }
    }
}
