//! Herald, a Discord audit-log bot.
//!
//! The binary wires the configuration loaded here into
//! [`herald_discord::HeraldBot`]. The library half exists so the
//! configuration layering and logging setup can be tested.

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::{DiscordSettings, HeraldConfig};
pub use logging::{LoggingConfig, init_logging};
