//! Discord client setup and lifecycle management.

use crate::{DiscordError, DiscordErrorKind, DiscordResult, HeraldHandler, SerenityTransport};
use herald_audit::{AuditLog, LogChannelSource, Timekeeper};
use serenity::Client;
use serenity::cache::Settings as CacheSettings;
use serenity::http::Http;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The Herald audit-log bot.
///
/// # Example
/// ```no_run
/// use herald_audit::{
///     AuditSettings, ChannelCacheConfig, LogChannelCache, StaticGuildConfigStore, Timekeeper,
/// };
/// use herald_discord::HeraldBot;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("DISCORD_TOKEN")?;
///     let channels = Arc::new(LogChannelCache::new(
///         StaticGuildConfigStore::default(),
///         ChannelCacheConfig::default(),
///     ));
///     let timekeeper = Timekeeper::system(&AuditSettings::default())?;
///
///     let mut bot = HeraldBot::new(&token, channels, timekeeper, 500).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct HeraldBot {
    client: Client,
}

impl HeraldBot {
    /// Build the client.
    ///
    /// `message_cache_size` bounds how many recent messages are kept so that
    /// deletions and edits can be described.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is malformed or the client cannot be built.
    #[instrument(skip(token, channels, timekeeper), fields(token_len = token.len()))]
    pub async fn new(
        token: &str,
        channels: Arc<dyn LogChannelSource>,
        timekeeper: Timekeeper,
        message_cache_size: usize,
    ) -> DiscordResult<Self> {
        serenity::utils::validate_token(token)
            .map_err(|_| DiscordError::new(DiscordErrorKind::InvalidToken))?;

        let transport = Arc::new(SerenityTransport::new(Arc::new(Http::new(token))));
        let audit = AuditLog::new(channels, transport, timekeeper);
        let handler = HeraldHandler::new(audit, message_cache_size);
        let intents = HeraldHandler::intents();

        let mut cache_settings = CacheSettings::default();
        // Recent messages are kept by the handler itself.
        cache_settings.max_messages = 0;

        info!("Building Serenity client with intents: {:?}", intents);
        let client = Client::builder(token, intents)
            .event_handler(handler)
            .cache_settings(cache_settings)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        Ok(Self { client })
    }

    /// Connect to the gateway and process events until shut down.
    ///
    /// Ctrl+C stops every shard and returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the client fails to start or hits a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> DiscordResult<()> {
        let shard_manager = self.client.shard_manager.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for Ctrl+C");
                return;
            }
            info!("Shutting down");
            shard_manager.shutdown_all().await;
        });

        info!("Starting Discord bot");
        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })?;
        Ok(())
    }
}
