//! Tests for rendering cards as embeds.

use herald_core::{Card, Colour};
use herald_discord::embed_from_card;

#[test]
fn test_embed_carries_card_content() {
    let mut card = Card::new(
        ":information_source: Avatar Updated",
        Colour::from_rgb(214, 174, 50),
    );
    card.add_field("User", "ferris (10)")
        .add_block_field("Roles", "None")
        .set_description(":arrow_right: Old Avatar")
        .set_footer("2024-01-15 14:30:00");

    let embed = serde_json::to_value(embed_from_card(&card)).unwrap();

    assert_eq!(embed["title"], ":information_source: Avatar Updated");
    assert_eq!(embed["description"], ":arrow_right: Old Avatar");
    assert_eq!(embed["fields"][0]["name"], "User");
    assert_eq!(embed["fields"][0]["inline"], true);
    assert_eq!(embed["fields"][1]["inline"], false);
    assert_eq!(embed["footer"]["text"], "2024-01-15 14:30:00");
}
