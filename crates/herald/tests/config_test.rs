//! Tests for configuration loading.

use herald::HeraldConfig;
use herald_core::{ChannelId, GuildId};
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_bundled_defaults() {
    let file = config_file("");
    let config = HeraldConfig::from_file(file.path()).unwrap();

    assert_eq!(config.discord().token_env(), "DISCORD_TOKEN");
    assert_eq!(*config.discord().message_cache_size(), 500);
    assert_eq!(config.audit().timestamp_format(), "%Y-%m-%d %H:%M:%S");
    assert_eq!(*config.cache().ttl_seconds(), 300);
    assert!(*config.cache().enabled());
    assert!(config.guilds().is_empty());
}

#[test]
fn test_file_overrides_defaults() {
    let file = config_file(
        r#"
[discord]
token_env = "HERALD_TEST_TOKEN"

[audit]
utc_offset_minutes = 120

[cache]
ttl_seconds = 30
"#,
    );
    let config = HeraldConfig::from_file(file.path()).unwrap();

    assert_eq!(config.discord().token_env(), "HERALD_TEST_TOKEN");
    assert_eq!(*config.discord().message_cache_size(), 500);
    assert_eq!(*config.audit().utc_offset_minutes(), 120);
    assert_eq!(*config.cache().ttl_seconds(), 30);
    assert_eq!(*config.cache().max_entries(), 1000);
}

#[tokio::test]
async fn test_guild_channels_resolve() {
    use herald_audit::GuildConfigStore;

    let file = config_file(
        r#"
[guilds."123456789012345678"]
mod_log_channel = 234567890123456789

[guilds."345678901234567890"]
mod_log_channel = 345678901234567891
"#,
    );
    let config = HeraldConfig::from_file(file.path()).unwrap();
    let store = config.guild_store().unwrap();
    assert_eq!(store.len(), 2);

    let configured = store.fetch(GuildId(123456789012345678)).await.unwrap();
    assert_eq!(
        *configured.mod_log_channel(),
        Some(ChannelId(234567890123456789))
    );

    let other = store.fetch(GuildId(345678901234567890)).await.unwrap();
    assert_eq!(*other.mod_log_channel(), Some(ChannelId(345678901234567891)));

    let unknown = store.fetch(GuildId(1)).await.unwrap();
    assert_eq!(*unknown.mod_log_channel(), None);
}

#[test]
fn test_non_numeric_guild_key_is_rejected() {
    let file = config_file(
        r#"
[guilds.general]
mod_log_channel = 1
"#,
    );
    let config = HeraldConfig::from_file(file.path()).unwrap();
    assert!(config.guild_store().is_err());
}

#[test]
fn test_invalid_timestamp_format_is_rejected() {
    let file = config_file(
        r#"
[audit]
timestamp_format = "%Q"
"#,
    );
    let config = HeraldConfig::from_file(file.path()).unwrap();
    assert!(config.timekeeper().is_err());
}

#[test]
fn test_missing_token_variable() {
    let file = config_file(
        r#"
[discord]
token_env = "HERALD_TEST_TOKEN_THAT_IS_NEVER_SET"
"#,
    );
    let config = HeraldConfig::from_file(file.path()).unwrap();

    let err = config.token().unwrap_err();
    assert!(err.to_string().contains("HERALD_TEST_TOKEN_THAT_IS_NEVER_SET"));
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(HeraldConfig::from_file("/nonexistent/herald.toml").is_err());
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = config_file("[cache]\nttl_seconds = \"soon\"\n");
    assert!(HeraldConfig::from_file(file.path()).is_err());
}
