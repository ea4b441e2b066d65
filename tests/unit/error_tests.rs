//! Unit tests for error display formats and retry classification.

use lc_herald::errors::{AppError, FetchError, PublishError};

#[test]
fn app_error_display_uses_prefixes() {
    assert_eq!(
        AppError::Config("bad value".into()).to_string(),
        "config: bad value"
    );
    assert_eq!(
        AppError::Gateway("socket closed".into()).to_string(),
        "gateway: socket closed"
    );
}

#[test]
fn fetch_error_display_uses_prefixes() {
    assert_eq!(
        FetchError::Unauthorized("cookie expired".into()).to_string(),
        "unauthorized: cookie expired"
    );
    assert_eq!(
        FetchError::Transport("timeout".into()).to_string(),
        "transport: timeout"
    );
    assert_eq!(
        FetchError::Malformed("missing field".into()).to_string(),
        "malformed: missing field"
    );
    assert_eq!(
        FetchError::NotFound("nope".into()).to_string(),
        "not found: nope"
    );
}

#[test]
fn only_transport_failures_are_transient() {
    assert!(FetchError::Transport("timeout".into()).is_transient());
    assert!(!FetchError::Unauthorized("cookie".into()).is_transient());
    assert!(!FetchError::Malformed("shape".into()).is_transient());
    assert!(!FetchError::NotFound("slug".into()).is_transient());
}

#[test]
fn publish_error_display_uses_prefixes() {
    assert_eq!(
        PublishError::ChannelNotFound("42".into()).to_string(),
        "channel not found: 42"
    );
    assert_eq!(
        PublishError::PermissionDenied("threads".into()).to_string(),
        "permission denied: threads"
    );
    assert_eq!(
        PublishError::PlatformError("rate limited".into()).to_string(),
        "platform error: rate limited"
    );
}
