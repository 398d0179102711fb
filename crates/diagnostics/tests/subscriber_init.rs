//! Integration tests for subscriber installation failures
//!
//! Installing a global subscriber can only happen once per process, so the
//! double-install scenario lives in a single test of its own binary.

use sdk_diagnostics::{AdvancedLogging, LogError, LoggingConfig, init};

#[test]
fn test_second_init_is_rejected() {
    let facade = AdvancedLogging::from_config(LoggingConfig::silent());

    let first = init(&facade);
    assert!(first.is_ok(), "first install failed: {:?}", first.err());

    let second = init(&facade);
    assert!(
        matches!(second, Err(LogError::Init(_))),
        "second install was not rejected"
    );
}

#[cfg(feature = "file")]
#[test]
fn test_file_appender_fails_when_directory_is_replaced() {
    use std::fs;

    use sdk_diagnostics::{Sinks, SubscriberBuilder, resolve_file_directory};

    let outer = tempfile::tempdir().unwrap();
    let logs = outer.path().join("logs");
    fs::create_dir(&logs).unwrap();

    let resolved = resolve_file_directory(Some(&logs));
    assert!(!resolved.is_fallback());

    // The appender recreates a missing directory, so put a file in its place.
    fs::remove_dir(&logs).unwrap();
    fs::write(&logs, b"").unwrap();

    let sinks = Sinks {
        file: true,
        ..Sinks::default()
    };
    let result = SubscriberBuilder::new(sinks, Some(&resolved)).build();

    match result {
        Err(LogError::Init(reason)) => assert!(reason.contains("logs"), "reason: {reason}"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("appender built over a regular file"),
    }
}
