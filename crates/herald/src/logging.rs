//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output settings.
#[derive(Debug, Clone, Default, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct LoggingConfig {
    /// Default to debug level instead of info
    verbose: bool,
    /// Emit JSON lines instead of human-readable text
    json: bool,
}

impl LoggingConfig {
    /// Filter applied when `RUST_LOG` is unset.
    pub fn default_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout stays free for command output. `RUST_LOG`
/// takes precedence over the configured level.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(config.default_level()))?;

    let fmt_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(LoggingConfig::default().default_level(), "info");
        assert_eq!(
            LoggingConfig::default().with_verbose(true).default_level(),
            "debug"
        );
    }
}
