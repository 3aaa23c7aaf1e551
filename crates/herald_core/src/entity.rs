//! User and member snapshots.

use crate::{GuildId, RoleId, UserId};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A role as seen on a member at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct RoleRef {
    id: RoleId,
    name: String,
}

impl RoleRef {
    /// Create a role reference.
    pub fn new(id: impl Into<RoleId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Role mention markup.
    pub fn mention(&self) -> String {
        self.id.mention()
    }
}

/// Account-level view of a user, shared across every server they belong to.
///
/// # Examples
///
/// ```
/// use herald_core::UserSnapshotBuilder;
///
/// let user = UserSnapshotBuilder::default()
///     .id(42u64)
///     .name("ferris")
///     .discriminator(1u16)
///     .avatar_url("https://cdn.example/avatars/42.png")
///     .build()
///     .unwrap();
///
/// assert_eq!(user.tag(), "ferris#0001");
/// assert_eq!(user.display_name(), "ferris");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct UserSnapshot {
    /// User id
    id: UserId,
    /// Unique account name
    name: String,
    /// Optional global display name
    #[builder(default)]
    #[serde(default)]
    global_name: Option<String>,
    /// Legacy four-digit discriminator; absent or zero on migrated accounts
    #[builder(default)]
    #[serde(default)]
    discriminator: Option<u16>,
    /// Effective avatar URL (custom avatar or the platform default)
    avatar_url: String,
}

impl UserSnapshot {
    /// `name#discriminator`, or just `name` for accounts without one.
    pub fn tag(&self) -> String {
        match self.discriminator {
            Some(d) if d != 0 => format!("{}#{:04}", self.name, d),
            _ => self.name.clone(),
        }
    }

    /// Name shown in the member list when no nickname applies.
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.name)
    }

    /// Discriminator as shown in profile cards, `"0"` when absent.
    pub fn discriminator_label(&self) -> String {
        match self.discriminator {
            Some(d) if d != 0 => format!("{:04}", d),
            _ => "0".to_string(),
        }
    }

    /// User mention markup.
    pub fn mention(&self) -> String {
        self.id.mention()
    }
}

/// Server-level view of a user: their membership in one guild.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct MemberSnapshot {
    /// Guild the membership belongs to
    guild_id: GuildId,
    /// Underlying account
    user: UserSnapshot,
    /// Server nickname, if set
    #[builder(default)]
    #[serde(default)]
    nickname: Option<String>,
    /// Roles held, excluding the implicit everyone role
    #[builder(default)]
    #[serde(default)]
    roles: Vec<RoleRef>,
    /// When the member joined, if known
    #[builder(default)]
    #[serde(default)]
    joined_at: Option<DateTime<Utc>>,
}

impl MemberSnapshot {
    /// Nickname if set, otherwise the account's display name.
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .unwrap_or_else(|| self.user.display_name())
    }
}

/// A before/after snapshot subject.
///
/// Member snapshots come from per-server events and carry server-scoped
/// attributes. User snapshots come from account-level events and carry
/// entity-scoped attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::From)]
pub enum Entity {
    /// Membership in a single guild
    Member(MemberSnapshot),
    /// Bare account
    User(UserSnapshot),
}

impl Entity {
    /// Account behind the snapshot.
    pub fn user(&self) -> &UserSnapshot {
        match self {
            Self::Member(member) => member.user(),
            Self::User(user) => user,
        }
    }

    /// Account id.
    pub fn id(&self) -> UserId {
        *self.user().id()
    }

    /// Guild of a member snapshot.
    pub fn guild_id(&self) -> Option<GuildId> {
        match self {
            Self::Member(member) => Some(*member.guild_id()),
            Self::User(_) => None,
        }
    }

    /// Name shown to other users.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Member(member) => member.display_name(),
            Self::User(user) => user.display_name(),
        }
    }

    /// See [`UserSnapshot::tag`].
    pub fn tag(&self) -> String {
        self.user().tag()
    }

    /// Effective avatar URL.
    pub fn avatar_url(&self) -> &str {
        self.user().avatar_url()
    }

    /// Whether this is a server membership snapshot.
    pub fn is_member(&self) -> bool {
        matches!(self, Self::Member(_))
    }
}
