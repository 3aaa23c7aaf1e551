//! Audit-log notifications for Herald.
//!
//! This crate turns chat platform events into notification cards and
//! delivers them to each server's configured audit channel.
//!
//! # Architecture
//!
//! - **property**: the table of watched user/member attributes and how a change
//!   to each one is rendered
//! - **handlers**: custom comparators for nickname, roles and avatar changes
//! - **notifier**: the dispatch loop that diffs two snapshots and routes cards
//!   to server-scoped or entity-scoped destinations
//! - **events**: one-shot card layouts for deletes, edits, joins and leaves
//! - **audit_log**: the facade the gateway adapter calls, one method per event
//!
//! Collaborators sit behind traits so the notifier never touches the platform
//! directly:
//! - `LogChannelSource` resolves a guild's audit channel
//! - `MembershipDirectory` lists the guilds a user currently shares with the bot
//! - `CardTransport` delivers a rendered card
//!
//! # Example
//!
//! ```rust,ignore
//! use herald_audit::{AuditLog, LogChannelCache, StaticGuildConfigStore, Timekeeper};
//!
//! let channels = Arc::new(LogChannelCache::new(store, ChannelCacheConfig::default()));
//! let audit = AuditLog::new(channels, transport, Timekeeper::system(&settings)?);
//! audit.member_updated(before, after, &membership).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audit_log;
mod cache;
mod clock;
mod config;
mod destination;
pub mod events;
mod handlers;
mod notifier;
mod property;
mod transport;

pub use audit_log::AuditLog;
pub use cache::{ChannelCacheConfig, LogChannelCache};
pub use clock::{Clock, FixedClock, SystemClock, Timekeeper};
pub use config::{AuditSettings, GuildSettings};
pub use destination::{
    GuildConfigStore, LogChannelSource, MembershipDirectory, StaticGuildConfigStore,
};
pub use handlers::{DiffResult, RoleDiff, avatar_handler, nickname_handler, roles_handler};
pub use notifier::PropertyDiffNotifier;
pub use property::{
    Attribute, DiffHandler, PropertyKey, Renderer, Scope, USER_UPDATED_COLOUR,
    WATCHED_PROPERTIES, WatchedProperty, render_change,
};
pub use transport::{CardTransport, JsonTransport};
