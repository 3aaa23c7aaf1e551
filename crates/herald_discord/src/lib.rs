//! Serenity gateway adapter for Herald.
//!
//! Converts gateway events into snapshots for [`herald_audit::AuditLog`] and
//! implements card delivery and guild membership on top of serenity's HTTP
//! client and cache.
//!
//! - [`HeraldHandler`] receives gateway events
//! - [`SerenityTransport`] sends cards as embeds
//! - [`CacheMembership`] lists the guilds a user shares with the bot
//! - [`UserSnapshotTracker`] collapses per-guild reports of an account change
//!   into one diff
//! - [`HeraldBot`] wires it all into a client

#![warn(missing_docs)]

mod client;
mod conversions;
mod error;
mod handler;
mod membership;
mod recent;
mod tracker;
mod transport;

pub use client::HeraldBot;
pub use conversions::{
    RoleNames, departed_member_snapshot, member_snapshot, message_snapshot, serenity_channel_id,
    serenity_user_id, user_snapshot,
};
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use handler::HeraldHandler;
pub use membership::CacheMembership;
pub use recent::RecentMessages;
pub use tracker::UserSnapshotTracker;
pub use transport::{SerenityTransport, embed_from_card};
