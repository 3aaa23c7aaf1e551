//! Custom comparators for watched properties.

use derive_getters::Getters;
use herald_core::{Card, Entity, RoleRef};
use std::collections::HashSet;

/// Card content produced by a custom handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct DiffResult {
    fields: Vec<(String, String)>,
    description: Option<String>,
    image: Option<String>,
    thumbnail: Option<String>,
}

impl DiffResult {
    /// Append a labelled value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Set the body text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the large image.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Set the corner thumbnail.
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    /// Copy everything this result describes onto a card.
    pub fn apply_to(self, card: &mut Card) {
        for (name, value) in self.fields {
            card.add_field(name, value);
        }
        if let Some(description) = self.description {
            card.set_description(description);
        }
        if let Some(image) = self.image {
            card.set_image(image);
        }
        if let Some(thumbnail) = self.thumbnail {
            card.set_thumbnail(thumbnail);
        }
    }
}

/// Roles gained and lost between two member snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct RoleDiff {
    added: Vec<RoleRef>,
    removed: Vec<RoleRef>,
}

impl RoleDiff {
    /// Compare role lists by id, keeping each list's original order.
    pub fn between(before: &[RoleRef], after: &[RoleRef]) -> Self {
        let before_ids: HashSet<_> = before.iter().map(|role| *role.id()).collect();
        let after_ids: HashSet<_> = after.iter().map(|role| *role.id()).collect();

        Self {
            added: after
                .iter()
                .filter(|role| !before_ids.contains(role.id()))
                .cloned()
                .collect(),
            removed: before
                .iter()
                .filter(|role| !after_ids.contains(role.id()))
                .cloned()
                .collect(),
        }
    }

    /// True when no role was gained or lost.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Nickname changes are only reported for guild members.
///
/// Account-level snapshots also expose a display name, and a username change
/// on a member without a nickname would otherwise be reported twice.
pub fn nickname_handler(before: &Entity, after: &Entity) -> Option<DiffResult> {
    match (before, after) {
        (Entity::Member(old), Entity::Member(new)) => Some(
            DiffResult::default()
                .with_field("Old Nickname", old.display_name())
                .with_field("New Nickname", new.display_name()),
        ),
        _ => None,
    }
}

/// Lists added and removed roles in separate fields.
pub fn roles_handler(before: &Entity, after: &Entity) -> Option<DiffResult> {
    let (Entity::Member(old), Entity::Member(new)) = (before, after) else {
        return None;
    };

    let diff = RoleDiff::between(old.roles(), new.roles());
    if diff.is_empty() {
        return None;
    }

    let mut result = DiffResult::default();
    if !diff.added.is_empty() {
        let value: String = diff
            .added
            .iter()
            .map(|role| format!(":white_check_mark: {} ({})\n", role.mention(), role.name()))
            .collect();
        result = result.with_field("Added Roles", value);
    }
    if !diff.removed.is_empty() {
        let value: String = diff
            .removed
            .iter()
            .map(|role| format!(":x: {} ({})\n", role.mention(), role.name()))
            .collect();
        result = result.with_field("Removed Roles", value);
    }
    Some(result)
}

/// Shows the old avatar as the thumbnail and the new one as the main image.
pub fn avatar_handler(before: &Entity, after: &Entity) -> Option<DiffResult> {
    Some(
        DiffResult::default()
            .with_thumbnail(before.avatar_url())
            .with_image(after.avatar_url())
            .with_description(":arrow_right: Old Avatar\n:arrow_down: New Avatar"),
    )
}
