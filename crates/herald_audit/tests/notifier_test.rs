//! Tests for property-diff dispatch.

mod test_utils;

use herald_audit::{PropertyDiffNotifier, USER_UPDATED_COLOUR};
use herald_core::{ChannelId, Entity, GuildId, UserId, UserSnapshotBuilder};
use std::collections::HashMap;
use std::sync::Arc;
use test_utils::*;

fn notifier(channels: MapChannels, transport: Arc<RecordingTransport>) -> PropertyDiffNotifier {
    PropertyDiffNotifier::new(Arc::new(channels), transport, frozen_timekeeper())
}

fn no_guilds() -> HashMap<UserId, Vec<GuildId>> {
    HashMap::new()
}

#[tokio::test]
async fn test_identical_members_deliver_nothing() {
    let transport = Arc::new(RecordingTransport::new());
    let notifier = notifier(MapChannels::default().with(1, 100), transport.clone());

    let snapshot = Entity::Member(member_with_roles(1, user(10, "ferris"), &[(5, "mod")]));
    let delivered = notifier
        .notify_changes(&snapshot, &snapshot, &no_guilds())
        .await
        .unwrap();

    assert_eq!(delivered, 0);
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_nickname_change_on_member() {
    let transport = Arc::new(RecordingTransport::new());
    let notifier = notifier(MapChannels::default().with(1, 100), transport.clone());

    let before = Entity::Member(member(1, user(10, "ferris")).build().unwrap());
    let after = Entity::Member(
        member(1, user(10, "ferris"))
            .nickname(Some("crab".to_string()))
            .build()
            .unwrap(),
    );

    let delivered = notifier
        .notify_changes(&before, &after, &no_guilds())
        .await
        .unwrap();
    assert_eq!(delivered, 1);

    let sent = transport.sent();
    let (channel, card) = &sent[0];
    assert_eq!(*channel, ChannelId(100));
    assert_eq!(card.title(), ":information_source: Nickname Updated");
    assert_eq!(card.colour(), &USER_UPDATED_COLOUR);
    assert_eq!(card.field("User").unwrap().value(), "ferris (10)");
    assert_eq!(card.field("Old Nickname").unwrap().value(), "ferris");
    assert_eq!(card.field("New Nickname").unwrap().value(), "crab");
    assert_eq!(
        card.thumbnail().as_deref(),
        Some("https://cdn.example/avatars/10/a.png")
    );
    assert_eq!(card.footer().as_deref(), Some("2024-01-15 14:30:00"));
}

#[tokio::test]
async fn test_display_name_change_on_bare_user_is_suppressed() {
    let transport = Arc::new(RecordingTransport::new());
    let notifier = notifier(MapChannels::default().with(1, 100), transport.clone());

    let before = Entity::User(user(10, "ferris"));
    let after = Entity::User(
        UserSnapshotBuilder::default()
            .id(10u64)
            .name("ferris")
            .global_name(Some("Ferris".to_string()))
            .avatar_url("https://cdn.example/avatars/10/a.png")
            .build()
            .unwrap(),
    );
    let guilds = HashMap::from([(UserId(10), vec![GuildId(1)])]);

    let delivered = notifier
        .notify_changes(&before, &after, &guilds)
        .await
        .unwrap();
    assert_eq!(delivered, 0);
}

#[tokio::test]
async fn test_role_change_lists_added_and_removed() {
    let transport = Arc::new(RecordingTransport::new());
    let notifier = notifier(MapChannels::default().with(1, 100), transport.clone());

    let before = Entity::Member(member_with_roles(
        1,
        user(10, "ferris"),
        &[(1, "A"), (2, "B"), (3, "C")],
    ));
    let after = Entity::Member(member_with_roles(
        1,
        user(10, "ferris"),
        &[(2, "B"), (3, "C"), (4, "D")],
    ));

    let delivered = notifier
        .notify_changes(&before, &after, &no_guilds())
        .await
        .unwrap();
    assert_eq!(delivered, 1);

    let (_, card) = &transport.sent()[0];
    assert_eq!(card.title(), ":information_source: Roles Updated");
    assert_eq!(
        card.field("Added Roles").unwrap().value(),
        ":white_check_mark: <@&4> (D)\n"
    );
    assert_eq!(
        card.field("Removed Roles").unwrap().value(),
        ":x: <@&1> (A)\n"
    );
}

#[tokio::test]
async fn test_reordered_roles_are_not_a_change() {
    let transport = Arc::new(RecordingTransport::new());
    let notifier = notifier(MapChannels::default().with(1, 100), transport.clone());

    let before = Entity::Member(member_with_roles(1, user(10, "ferris"), &[(1, "A"), (2, "B")]));
    let after = Entity::Member(member_with_roles(1, user(10, "ferris"), &[(2, "B"), (1, "A")]));

    let delivered = notifier
        .notify_changes(&before, &after, &no_guilds())
        .await
        .unwrap();
    assert_eq!(delivered, 0);
}

#[tokio::test]
async fn test_avatar_change_shows_both_images() {
    let transport = Arc::new(RecordingTransport::new());
    let notifier = notifier(MapChannels::default().with(1, 100), transport.clone());

    let before = Entity::User(user(10, "ferris"));
    let after = Entity::User(
        UserSnapshotBuilder::default()
            .id(10u64)
            .name("ferris")
            .avatar_url("https://cdn.example/avatars/10/b.png")
            .build()
            .unwrap(),
    );
    let guilds = HashMap::from([(UserId(10), vec![GuildId(1)])]);

    let delivered = notifier
        .notify_changes(&before, &after, &guilds)
        .await
        .unwrap();
    assert_eq!(delivered, 1);

    let (_, card) = &transport.sent()[0];
    assert_eq!(card.title(), ":information_source: Avatar Updated");
    assert_eq!(
        card.thumbnail().as_deref(),
        Some("https://cdn.example/avatars/10/a.png")
    );
    assert_eq!(
        card.image().as_deref(),
        Some("https://cdn.example/avatars/10/b.png")
    );
    assert_eq!(
        card.description().as_deref(),
        Some(":arrow_right: Old Avatar\n:arrow_down: New Avatar")
    );
}

#[tokio::test]
async fn test_username_change_reaches_every_configured_guild() {
    let transport = Arc::new(RecordingTransport::new());
    let channels = MapChannels::default().with(1, 100).with(2, 200);
    let notifier = notifier(channels, transport.clone());

    let before = Entity::User(user(10, "ferris"));
    let after = Entity::User(user(10, "corro"));
    let guilds = HashMap::from([(UserId(10), vec![GuildId(1), GuildId(2), GuildId(3)])]);

    let delivered = notifier
        .notify_changes(&before, &after, &guilds)
        .await
        .unwrap();
    assert_eq!(delivered, 2);

    let mut channels = transport.channels();
    channels.sort();
    assert_eq!(channels, vec![ChannelId(100), ChannelId(200)]);

    for (_, card) in transport.sent() {
        assert_eq!(card.field("Old username").unwrap().value(), "ferris");
        assert_eq!(card.field("New username").unwrap().value(), "corro");
    }
}

#[tokio::test]
async fn test_shared_channel_receives_one_card() {
    let transport = Arc::new(RecordingTransport::new());
    let channels = MapChannels::default().with(1, 100).with(2, 100);
    let notifier = notifier(channels, transport.clone());

    let guilds = HashMap::from([(UserId(10), vec![GuildId(1), GuildId(2)])]);
    let delivered = notifier
        .notify_changes(
            &Entity::User(user(10, "ferris")),
            &Entity::User(user(10, "corro")),
            &guilds,
        )
        .await
        .unwrap();

    assert_eq!(delivered, 1);
}

#[tokio::test]
async fn test_discriminator_change_uses_default_layout() {
    let transport = Arc::new(RecordingTransport::new());
    let notifier = notifier(MapChannels::default().with(1, 100), transport.clone());

    let with_discriminator = |d: u16| {
        UserSnapshotBuilder::default()
            .id(10u64)
            .name("ferris")
            .discriminator(d)
            .avatar_url("https://cdn.example/avatars/10/a.png")
            .build()
            .unwrap()
    };
    let guilds = HashMap::from([(UserId(10), vec![GuildId(1)])]);

    let delivered = notifier
        .notify_changes(
            &Entity::User(with_discriminator(1)),
            &Entity::User(with_discriminator(42)),
            &guilds,
        )
        .await
        .unwrap();
    assert_eq!(delivered, 1);

    let (_, card) = &transport.sent()[0];
    assert_eq!(card.field("Old discriminator").unwrap().value(), "0001");
    assert_eq!(card.field("New discriminator").unwrap().value(), "0042");
    assert_eq!(card.field("User").unwrap().value(), "ferris#0042 (10)");
}

#[tokio::test]
async fn test_unconfigured_guild_is_skipped() {
    let transport = Arc::new(RecordingTransport::new());
    let notifier = notifier(MapChannels::default(), transport.clone());

    let before = Entity::Member(member(1, user(10, "ferris")).build().unwrap());
    let after = Entity::Member(
        member(1, user(10, "ferris"))
            .nickname(Some("crab".to_string()))
            .build()
            .unwrap(),
    );

    let delivered = notifier
        .notify_changes(&before, &after, &no_guilds())
        .await
        .unwrap();
    assert_eq!(delivered, 0);
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let transport = Arc::new(RecordingTransport::failing_on(ChannelId(100)));
    let notifier = notifier(MapChannels::default().with(1, 100), transport.clone());

    let before = Entity::Member(member_with_roles(1, user(10, "ferris"), &[(1, "A")]));
    let after = Entity::Member(
        member(1, user(10, "ferris"))
            .nickname(Some("crab".to_string()))
            .roles(roles(&[(2, "B")]))
            .build()
            .unwrap(),
    );

    let result = notifier
        .notify_changes(&before, &after, &no_guilds())
        .await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Mock failure"));
    assert!(transport.sent().is_empty());
}
