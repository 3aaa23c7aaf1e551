//! Core data types for Herald.
//!
//! Snapshots describe what the chat platform reported about a user, member or
//! message at one point in time. Cards describe what Herald sends back. Nothing
//! in this crate talks to the platform.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod card;
mod colour;
mod entity;
mod ids;
mod message;

pub use card::{Card, CardField};
pub use colour::Colour;
pub use entity::{
    Entity, MemberSnapshot, MemberSnapshotBuilder, RoleRef, UserSnapshot, UserSnapshotBuilder,
};
pub use ids::{ChannelId, DISCORD_EPOCH_MILLIS, GuildId, MessageId, RoleId, UserId};
pub use message::{BulkDeletion, MessageSnapshot, MessageSnapshotBuilder};
