//! One-shot cards for message and membership events.
//!
//! Unlike profile updates these are not diffed: each event maps to a single
//! fixed layout. Every builder stamps the footer with the current time except
//! [`deleted_reference`], which accompanies a deletion card.

use crate::Timekeeper;
use chrono::Duration;
use herald_core::{BulkDeletion, Card, Colour, MemberSnapshot, MessageSnapshot};

/// Colour of deletion cards.
pub const DELETED_COLOUR: Colour = Colour::from_rgb(172, 32, 31);
/// Colour of edit cards.
pub const EDITED_COLOUR: Colour = Colour::from_rgb(118, 37, 171);
/// Colour of join cards.
pub const JOINED_COLOUR: Colour = Colour::from_rgb(52, 215, 189);
/// Colour of leave cards.
pub const LEFT_COLOUR: Colour = Colour::from_rgb(218, 118, 39);

const NO_TEXT: &str = "(No detected text content)";

fn text_or_placeholder(content: &str) -> &str {
    if content.is_empty() { NO_TEXT } else { content }
}

/// A single deleted message.
pub fn message_deleted(message: &MessageSnapshot, timekeeper: &Timekeeper) -> Card {
    let author = message.author();
    let mut card = Card::new(":information_source: Message Deleted", DELETED_COLOUR);
    card.add_field("User", format!("{} ({})", author.tag(), author.id()))
        .add_field("Message ID", message.id().to_string())
        .add_field("Channel", message.channel_id().mention())
        .add_block_field("Message", text_or_placeholder(message.content()))
        .set_footer(timekeeper.stamp());
    card
}

/// The message a deleted reply pointed at.
pub fn deleted_reference(reference: &MessageSnapshot) -> Card {
    let author = reference.author();
    let mut card = Card::new(
        ":arrow_upper_left: Reference of deleted message",
        DELETED_COLOUR,
    );
    card.add_field(
        "Author of reference",
        format!("{} ({})", author.tag(), author.id()),
    )
    .add_field("Message ID", reference.id().to_string())
    .add_field("Channel", reference.channel_id().mention())
    .add_field("Jump Link", reference.jump_url());
    card
}

/// Messages removed in one batch.
pub fn bulk_deleted(deletion: &BulkDeletion, timekeeper: &Timekeeper) -> Card {
    let mut card = Card::new(":information_source: Bulk Message Deleted", DELETED_COLOUR);
    card.add_field("Count", deletion.message_ids().len().to_string())
        .add_field("Channel", deletion.channel_id().mention())
        .set_footer(timekeeper.stamp());
    card
}

/// An edited message, or `None` when the text did not change.
///
/// The platform also reports edits when an embed or attachment preview is
/// resolved; those leave the text untouched and are not logged.
pub fn message_edited(
    before: &MessageSnapshot,
    after: &MessageSnapshot,
    timekeeper: &Timekeeper,
) -> Option<Card> {
    if before.content() == after.content() {
        return None;
    }

    let author = after.author();
    let mut card = Card::new(":information_source: Message Updated", EDITED_COLOUR);
    card.add_field("User", format!("{} ({})", author.tag(), author.id()))
        .add_field("Message ID", after.id().to_string())
        .add_field("Channel", after.channel_id().mention())
        .add_block_field("Old Message", text_or_placeholder(before.content()))
        .add_block_field("New Message", text_or_placeholder(after.content()))
        .set_footer(timekeeper.stamp());
    Some(card)
}

/// A member joining a guild.
pub fn member_joined(member: &MemberSnapshot, timekeeper: &Timekeeper) -> Card {
    let user = member.user();
    let mut card = Card::new(":information_source: User Joined", JOINED_COLOUR);
    card.add_field(
        "User",
        format!("{} ({})\n | {}", user.tag(), user.id(), user.mention()),
    )
    .add_field("Created", timekeeper.format(user.id().created_at()))
    .set_thumbnail(user.avatar_url())
    .set_footer(timekeeper.stamp());
    card
}

/// A member leaving or being removed from a guild.
pub fn member_left(member: &MemberSnapshot, timekeeper: &Timekeeper) -> Card {
    let user = member.user();
    let joined = match member.joined_at() {
        Some(joined_at) => format!(
            "{} ({} ago)",
            timekeeper.format(*joined_at),
            format_elapsed(timekeeper.now() - *joined_at)
        ),
        None => "Undetected".to_string(),
    };
    let roles = if member.roles().is_empty() {
        "None".to_string()
    } else {
        member
            .roles()
            .iter()
            .map(|role| role.mention())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut card = Card::new(":information_source: User Left", LEFT_COLOUR);
    card.add_field(
        "User",
        format!("{} ({})\n {}", user.tag(), user.id(), user.mention()),
    )
    .add_field("Joined", joined)
    .add_block_field("Roles", roles)
    .set_thumbnail(user.avatar_url())
    .set_footer(timekeeper.stamp());
    card
}

/// Render a duration as its non-zero weeks, days, hours, minutes and seconds.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use herald_audit::events::format_elapsed;
///
/// let elapsed = Duration::days(9) + Duration::minutes(1) + Duration::seconds(5);
/// assert_eq!(format_elapsed(elapsed), "1 week 2 days 1 minute 5 seconds");
/// assert_eq!(format_elapsed(Duration::zero()), "0 seconds");
/// ```
pub fn format_elapsed(elapsed: Duration) -> String {
    const UNITS: [(&str, i64); 5] = [
        ("week", 7 * 24 * 60 * 60),
        ("day", 24 * 60 * 60),
        ("hour", 60 * 60),
        ("minute", 60),
        ("second", 1),
    ];

    let mut remaining = elapsed.num_seconds().max(0);
    let mut parts = Vec::new();
    for (unit, seconds) in UNITS {
        let count = remaining / seconds;
        remaining %= seconds;
        if count > 0 {
            let plural = if count == 1 { "" } else { "s" };
            parts.push(format!("{} {}{}", count, unit, plural));
        }
    }

    if parts.is_empty() {
        "0 seconds".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_singular_units() {
        let elapsed = Duration::weeks(1) + Duration::days(1) + Duration::hours(1);
        assert_eq!(format_elapsed(elapsed), "1 week 1 day 1 hour");
    }

    #[test]
    fn test_elapsed_skips_zero_units() {
        assert_eq!(format_elapsed(Duration::hours(50)), "2 days 2 hours");
    }

    #[test]
    fn test_elapsed_clamps_negative() {
        assert_eq!(format_elapsed(Duration::seconds(-30)), "0 seconds");
    }
}
