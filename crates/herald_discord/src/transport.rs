//! Card delivery over the Discord HTTP API.

use crate::conversions::serenity_channel_id;
use async_trait::async_trait;
use herald_audit::CardTransport;
use herald_core::{Card, ChannelId};
use herald_error::{HeraldResult, TransportError, TransportErrorKind};
use serenity::all::{Colour, CreateEmbed, CreateEmbedFooter, CreateMessage, Http};
use serenity::http::HttpError;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Render a card as a Discord embed.
pub fn embed_from_card(card: &Card) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(card.title())
        .colour(Colour::new(card.colour().value()));

    if let Some(description) = card.description() {
        embed = embed.description(description);
    }
    for field in card.fields() {
        embed = embed.field(field.name(), field.value(), *field.inline());
    }
    if let Some(thumbnail) = card.thumbnail() {
        embed = embed.thumbnail(thumbnail);
    }
    if let Some(image) = card.image() {
        embed = embed.image(image);
    }
    if let Some(footer) = card.footer() {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    embed
}

fn classify(channel: ChannelId, err: serenity::Error) -> TransportError {
    if let serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) = &err {
        match response.status_code.as_u16() {
            403 => return TransportError::new(TransportErrorKind::PermissionDenied(channel.get())),
            404 => return TransportError::new(TransportErrorKind::ChannelNotFound(channel.get())),
            _ => {}
        }
    }
    TransportError::new(TransportErrorKind::SendFailed(err.to_string()))
}

/// Sends cards as embeds through serenity's HTTP client.
#[derive(Clone)]
pub struct SerenityTransport {
    http: Arc<Http>,
}

impl SerenityTransport {
    /// Create a transport over an HTTP client.
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CardTransport for SerenityTransport {
    #[instrument(skip(self, card), fields(channel_id = %channel, title = %card.title()))]
    async fn send_card(&self, channel: ChannelId, card: &Card) -> HeraldResult<()> {
        let target = serenity_channel_id(channel)
            .ok_or_else(|| TransportError::new(TransportErrorKind::ChannelNotFound(channel.get())))?;

        let message = CreateMessage::new().embed(embed_from_card(card));
        target
            .send_message(&self.http, message)
            .await
            .map_err(|e| classify(channel, e))?;

        debug!("Sent card");
        Ok(())
    }
}
