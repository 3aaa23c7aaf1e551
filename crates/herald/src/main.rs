//! Herald CLI binary.
//!
//! - Run the audit-log bot
//! - Validate configuration
//! - Preview card layouts

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, check_config, preview, run_bot};
    use herald::{HeraldConfig, LoggingConfig, init_logging};

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(
        &LoggingConfig::default()
            .with_verbose(cli.verbose)
            .with_json(cli.json_logs),
    )?;

    let config = HeraldConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run => run_bot(&config).await?,
        Commands::CheckConfig => check_config(&config)?,
        Commands::Preview { event } => preview(&config, event).await?,
    }

    Ok(())
}
