//! Command-line interface module.

mod check;
mod commands;
mod preview;
mod run;

pub use check::check_config;
pub use commands::{Cli, Commands, PreviewEvent};
pub use preview::preview;
pub use run::run_bot;
