//! Notifier settings.

use derive_getters::Getters;
use herald_core::ChannelId;
use serde::{Deserialize, Serialize};

/// Card rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct AuditSettings {
    /// strftime pattern for card footers and join/creation dates
    #[serde(default = "default_timestamp_format")]
    timestamp_format: String,

    /// Offset from UTC applied before formatting, in minutes
    #[serde(default)]
    utc_offset_minutes: i32,
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            utc_offset_minutes: 0,
        }
    }
}

/// Per-guild settings.
///
/// A guild with no stored settings behaves as if it had the defaults, which
/// disable audit logging.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct GuildSettings {
    /// Channel receiving audit cards
    #[serde(default)]
    mod_log_channel: Option<ChannelId>,
}
