//! Configuration loading from files and environment variables.

use std::io::Write;
use std::time::Duration;

use astro_api::config::{AppConfig, ConfigError};

mod support;
use support::with_scoped_env;

const ENV_KEYS: [&str; 6] = [
    "HOST",
    "PORT",
    "EPHEMERIS_BINARY",
    "EPHEMERIS_TIMEOUT_SECS",
    "RATE_LIMIT_MAX",
    "RATE_LIMIT_WINDOW_SECS",
];

fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
    ENV_KEYS.iter().map(|k| (*k, None)).collect()
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[server]
port = 9100

[ephemeris]
binary = "/usr/local/bin/swetest"
timeout_secs = 20
suppress_header = false

[rate_limit]
enabled = false
"#
    )
    .unwrap();

    let config = AppConfig::from_file(file.path()).unwrap();
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.ephemeris.binary, "/usr/local/bin/swetest");
    assert_eq!(config.ephemeris.timeout(), Some(Duration::from_secs(20)));
    assert!(!config.ephemeris.suppress_header);
    assert!(!config.rate_limit.enabled);
    assert_eq!(config.rate_limit.max_requests, 300);
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server]\nport = \"eighty\"").unwrap();
    let err = AppConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_env_overrides() {
    let mut changes = cleared();
    changes.extend([
        ("PORT", Some("8123")),
        ("EPHEMERIS_BINARY", Some("/opt/swetest")),
        ("EPHEMERIS_TIMEOUT_SECS", Some("5")),
        ("RATE_LIMIT_MAX", Some("10")),
    ]);

    with_scoped_env(&changes, || {
        let mut config = AppConfig::default();
        config.apply_env().unwrap();
        assert_eq!(config.server.port, 8123);
        assert_eq!(config.ephemeris.binary, "/opt/swetest");
        assert_eq!(config.ephemeris.timeout_secs, Some(5));
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.window_secs, 86400);
    });
}

#[test]
fn test_zero_timeout_disables_deadline() {
    let mut changes = cleared();
    changes.push(("EPHEMERIS_TIMEOUT_SECS", Some("0")));

    with_scoped_env(&changes, || {
        let mut config = AppConfig::default();
        config.ephemeris.timeout_secs = Some(30);
        config.apply_env().unwrap();
        assert_eq!(config.ephemeris.timeout(), None);
    });
}

#[test]
fn test_invalid_env_value_rejected() {
    let mut changes = cleared();
    changes.push(("PORT", Some("not-a-port")));

    with_scoped_env(&changes, || {
        let mut config = AppConfig::default();
        match config.apply_env() {
            Err(ConfigError::InvalidEnv { name, value, .. }) => {
                assert_eq!(name, "PORT");
                assert_eq!(value, "not-a-port");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    });
}
