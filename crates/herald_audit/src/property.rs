//! Watched properties and change rendering.
//!
//! Each [`WatchedProperty`] names one attribute of a user or member snapshot,
//! how to label it on a card, and whether a change is rendered by the default
//! old/new layout or by a custom [`DiffHandler`]. The table is fixed and
//! evaluated in order for every update event.

use crate::handlers::{DiffResult, avatar_handler, nickname_handler, roles_handler};
use herald_core::{Card, Colour, Entity, RoleId};
use std::collections::BTreeSet;
use std::fmt;

/// Accent colour shared by every profile-change card.
pub const USER_UPDATED_COLOUR: Colour = Colour::from_rgb(214, 174, 50);

/// Compare a snapshot pair and describe the change, or `None` to suppress the card.
pub type DiffHandler = fn(&Entity, &Entity) -> Option<DiffResult>;

/// Attributes Herald watches for changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PropertyKey {
    /// Name shown in the member list
    Nickname,
    /// Roles held in a guild
    Roles,
    /// Avatar image
    Avatar,
    /// Account name
    Username,
    /// Legacy discriminator
    Discriminator,
}

/// Where a change to a property is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Only the audit channel of the guild the change happened in
    Guild,
    /// The audit channel of every guild the user belongs to
    Entity,
}

impl PropertyKey {
    /// Delivery scope for changes to this property.
    pub fn scope(self) -> Scope {
        match self {
            Self::Nickname | Self::Roles => Scope::Guild,
            Self::Avatar | Self::Username | Self::Discriminator => Scope::Entity,
        }
    }

    /// Read this attribute from a snapshot.
    ///
    /// Returns `None` when the snapshot variant does not carry the attribute:
    /// roles exist only on members, and account attributes only on users.
    pub fn lookup(self, entity: &Entity) -> Option<Attribute> {
        match (self, entity) {
            (Self::Nickname, entity) => Some(Attribute::Text(entity.display_name().to_string())),
            (Self::Roles, Entity::Member(member)) => Some(Attribute::Roles(
                member.roles().iter().map(|role| *role.id()).collect(),
            )),
            (Self::Avatar, Entity::User(user)) => Some(Attribute::Text(user.avatar_url().clone())),
            (Self::Username, Entity::User(user)) => Some(Attribute::Text(user.name().clone())),
            (Self::Discriminator, Entity::User(user)) => {
                Some(Attribute::Text(user.discriminator_label()))
            }
            _ => None,
        }
    }
}

/// A comparable attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    /// Plain text value
    Text(String),
    /// Set of role ids; order on the member is irrelevant
    Roles(BTreeSet<RoleId>),
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Roles(roles) => {
                let mentions: Vec<_> = roles.iter().map(|id| id.mention()).collect();
                f.write_str(&mentions.join(", "))
            }
        }
    }
}

/// How a detected change becomes card content.
#[derive(Debug, Clone, Copy)]
pub enum Renderer {
    /// `Old <name>` / `New <name>` fields with the raw values
    Default,
    /// Property-specific comparator
    Custom(DiffHandler),
}

/// One row of the watched property table.
#[derive(Debug, Clone, Copy)]
pub struct WatchedProperty {
    key: PropertyKey,
    display_name: &'static str,
    colour: Colour,
    renderer: Renderer,
}

impl WatchedProperty {
    /// Attribute this row watches.
    pub fn key(&self) -> PropertyKey {
        self.key
    }

    /// Human-readable attribute name used in titles and field labels.
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Card accent colour.
    pub fn colour(&self) -> Colour {
        self.colour
    }

    /// Render strategy.
    pub fn renderer(&self) -> Renderer {
        self.renderer
    }

    /// Delivery scope, see [`PropertyKey::scope`].
    pub fn scope(&self) -> Scope {
        self.key.scope()
    }
}

/// Every watched property, in evaluation order.
pub static WATCHED_PROPERTIES: [WatchedProperty; 5] = [
    WatchedProperty {
        key: PropertyKey::Nickname,
        display_name: "Nickname",
        colour: USER_UPDATED_COLOUR,
        renderer: Renderer::Custom(nickname_handler),
    },
    WatchedProperty {
        key: PropertyKey::Roles,
        display_name: "Roles",
        colour: USER_UPDATED_COLOUR,
        renderer: Renderer::Custom(roles_handler),
    },
    WatchedProperty {
        key: PropertyKey::Avatar,
        display_name: "Avatar",
        colour: USER_UPDATED_COLOUR,
        renderer: Renderer::Custom(avatar_handler),
    },
    WatchedProperty {
        key: PropertyKey::Username,
        display_name: "Username",
        colour: USER_UPDATED_COLOUR,
        renderer: Renderer::Default,
    },
    WatchedProperty {
        key: PropertyKey::Discriminator,
        display_name: "Discriminator",
        colour: USER_UPDATED_COLOUR,
        renderer: Renderer::Default,
    },
];

/// Render the card for one property, if it changed between the snapshots.
///
/// Returns `None` when either snapshot lacks the attribute, when the values
/// are equal, or when a custom handler suppresses the card. The footer is left
/// unset for the caller to stamp.
pub fn render_change(property: &WatchedProperty, before: &Entity, after: &Entity) -> Option<Card> {
    let old = property.key.lookup(before)?;
    let new = property.key.lookup(after)?;
    if old == new {
        return None;
    }

    let mut card = Card::new(
        format!(":information_source: {} Updated", property.display_name),
        property.colour,
    );
    card.add_field("User", format!("{} ({})", after.tag(), after.id()));

    let mut thumbnail_set = false;
    match property.renderer {
        Renderer::Default => {
            let label = property.display_name.to_lowercase();
            card.add_field(format!("Old {}", label), old.to_string());
            card.add_field(format!("New {}", label), new.to_string());
        }
        Renderer::Custom(handler) => {
            let diff = handler(before, after)?;
            thumbnail_set = diff.thumbnail().is_some();
            diff.apply_to(&mut card);
        }
    }

    if !thumbnail_set {
        card.set_thumbnail(after.avatar_url());
    }
    Some(card)
}
