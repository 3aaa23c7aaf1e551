//! Notification cards.

use crate::Colour;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One labelled value on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CardField {
    name: String,
    value: String,
    inline: bool,
}

impl CardField {
    /// Create a field.
    pub fn new(name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline,
        }
    }
}

/// A rendered notification, ready to be sent to a channel.
///
/// Cards are built up field by field and then handed to a transport. Fields
/// are inline unless added with [`Card::add_block_field`].
///
/// # Examples
///
/// ```
/// use herald_core::{Card, Colour};
///
/// let mut card = Card::new(":information_source: Username Updated", Colour::from_rgb(214, 174, 50));
/// card.add_field("Old username", "ferris");
/// card.add_field("New username", "corro");
/// card.set_thumbnail("https://cdn.example/a.png");
///
/// assert_eq!(card.fields().len(), 2);
/// assert!(*card.fields()[0].inline());
/// assert_eq!(card.thumbnail().as_deref(), Some("https://cdn.example/a.png"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Card {
    title: String,
    colour: Colour,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    fields: Vec<CardField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

impl Card {
    /// Start an empty card.
    pub fn new(title: impl Into<String>, colour: Colour) -> Self {
        Self {
            title: title.into(),
            colour,
            description: None,
            fields: Vec::new(),
            footer: None,
            thumbnail: None,
            image: None,
        }
    }

    /// Append an inline field.
    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.push(CardField::new(name, value, true));
        self
    }

    /// Append a field that takes a full row.
    pub fn add_block_field(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.fields.push(CardField::new(name, value, false));
        self
    }

    /// Set the body text.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Set the footer text.
    pub fn set_footer(&mut self, footer: impl Into<String>) -> &mut Self {
        self.footer = Some(footer.into());
        self
    }

    /// Set the small corner image.
    pub fn set_thumbnail(&mut self, url: impl Into<String>) -> &mut Self {
        self.thumbnail = Some(url.into());
        self
    }

    /// Set the large image.
    pub fn set_image(&mut self, url: impl Into<String>) -> &mut Self {
        self.image = Some(url.into());
        self
    }

    /// Look up the first field with the given name.
    pub fn field(&self, name: &str) -> Option<&CardField> {
        self.fields.iter().find(|f| f.name == name)
    }
}
