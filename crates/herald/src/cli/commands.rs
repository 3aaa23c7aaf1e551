//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Herald - Discord audit-log bot
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(about = "Discord audit-log bot reporting message, membership and profile changes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the defaults
    #[arg(short, long, global = true, env = "HERALD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Discord and start reporting events
    Run,

    /// Validate the configuration and print the resolved audit channels
    CheckConfig,

    /// Print sample cards as JSON lines without connecting
    Preview {
        /// Which event to render
        #[arg(long, value_enum, default_value = "all")]
        event: PreviewEvent,
    },
}

/// Events available for preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreviewEvent {
    /// Every event below
    All,
    /// Message deleted, with the message it replied to
    Deleted,
    /// Message edited
    Edited,
    /// Member joined
    Joined,
    /// Member left
    Left,
    /// Nickname, roles, avatar and username changes
    Profile,
}

impl PreviewEvent {
    /// Whether `self` selects `event`.
    pub fn includes(self, event: PreviewEvent) -> bool {
        self == PreviewEvent::All || self == event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["herald", "check-config", "--config", "bot.toml", "-v"])
            .unwrap();
        assert!(matches!(cli.command, Commands::CheckConfig));
        assert_eq!(cli.config, Some(PathBuf::from("bot.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_preview_defaults_to_all() {
        let cli = Cli::try_parse_from(["herald", "preview"]).unwrap();
        match cli.command {
            Commands::Preview { event } => {
                assert_eq!(event, PreviewEvent::All);
                assert!(event.includes(PreviewEvent::Left));
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_preview_single_event() {
        let cli = Cli::try_parse_from(["herald", "preview", "--event", "profile"]).unwrap();
        let Commands::Preview { event } = cli.command else {
            panic!("Expected preview");
        };
        assert!(event.includes(PreviewEvent::Profile));
        assert!(!event.includes(PreviewEvent::Joined));
    }
}
