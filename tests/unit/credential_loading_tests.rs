//! Unit tests for credential loading.
//!
//! Validates the env-var fallback path and missing-credential error
//! message quality. These tests mutate process-global env vars and must
//! run serially.

use lc_herald::config::GlobalConfig;
use lc_herald::AppError;

const SAMPLE_TOML: &str = r#"
[discord]
guild_id = 1
channel_id = 2
"#;

fn make_config() -> GlobalConfig {
    GlobalConfig::from_toml_str(SAMPLE_TOML).expect("config parses")
}

/// Env-var-only credential loading works when the keychain has no
/// entries for the `lc-herald` service (the usual CI situation).
#[tokio::test]
#[serial_test::serial]
async fn env_var_fallback_populates_credentials() {
    std::env::set_var("LC_COOKIE", "csrftoken=abc;LEETCODE_SESSION=def");
    std::env::set_var("DISCORD_BOT_TOKEN", "bot-token-123");

    let mut config = make_config();
    config
        .load_credentials()
        .await
        .expect("credentials load from env");

    assert_eq!(
        config.upstream.session_cookie,
        "csrftoken=abc;LEETCODE_SESSION=def"
    );
    assert_eq!(config.discord.bot_token, "bot-token-123");

    std::env::remove_var("LC_COOKIE");
    std::env::remove_var("DISCORD_BOT_TOKEN");
}

/// A missing credential names both the keychain key and the env var so
/// the operator knows where to put it.
#[tokio::test]
#[serial_test::serial]
async fn missing_credential_error_names_both_sources() {
    std::env::remove_var("LC_COOKIE");
    std::env::remove_var("DISCORD_BOT_TOKEN");

    let mut config = make_config();
    let err = config
        .load_credentials()
        .await
        .expect_err("credentials missing");

    match err {
        AppError::Config(msg) => {
            assert!(msg.contains("lc_session_cookie"));
            assert!(msg.contains("LC_COOKIE"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
