//! Snowflake identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds between the Unix epoch and the first second of 2015, the
/// platform's snowflake epoch.
pub const DISCORD_EPOCH_MILLIS: i64 = 1_420_070_400_000;

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            derive_more::Display,
            derive_more::From,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw snowflake value.
            pub fn get(self) -> u64 {
                self.0
            }

            /// Moment the snowflake was minted.
            pub fn created_at(self) -> DateTime<Utc> {
                let millis = (self.0 >> 22) as i64 + DISCORD_EPOCH_MILLIS;
                DateTime::from_timestamp_millis(millis).unwrap_or_default()
            }
        }
    };
}

snowflake!(
    /// Server (guild) identifier.
    GuildId
);
snowflake!(
    /// Channel identifier.
    ChannelId
);
snowflake!(
    /// User identifier, shared by a user and all of their memberships.
    UserId
);
snowflake!(
    /// Message identifier.
    MessageId
);
snowflake!(
    /// Role identifier.
    RoleId
);

impl ChannelId {
    /// Channel mention markup, e.g. `<#1234>`.
    pub fn mention(self) -> String {
        format!("<#{}>", self.0)
    }
}

impl UserId {
    /// User mention markup, e.g. `<@1234>`.
    pub fn mention(self) -> String {
        format!("<@{}>", self.0)
    }
}

impl RoleId {
    /// Role mention markup, e.g. `<@&1234>`.
    pub fn mention(self) -> String {
        format!("<@&{}>", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowflake_timestamp() {
        // Snowflake from the platform's developer documentation
        let id = UserId(175928847299117063);
        assert_eq!(id.created_at().timestamp_millis(), 1462015105796);
    }

    #[test]
    fn test_zero_snowflake_is_epoch() {
        assert_eq!(
            GuildId(0).created_at().timestamp_millis(),
            DISCORD_EPOCH_MILLIS
        );
    }

    #[test]
    fn test_mentions() {
        assert_eq!(ChannelId(5).mention(), "<#5>");
        assert_eq!(UserId(6).mention(), "<@6>");
        assert_eq!(RoleId(7).mention(), "<@&7>");
    }
}
