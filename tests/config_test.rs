//! Tests for environment-driven configuration.

use std::path::PathBuf;

use feedback_board::config::{BackendSettings, Config, ConfigError};
use serial_test::serial;

const VARS: &[&str] = &[
    "WEB_HOST",
    "WEB_PORT",
    "BACKEND_URL",
    "BACKEND_API_KEY",
    "DATABASE_PATH",
    "STATIC_DIR",
    "COOKIE_SECURE",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_backend() {
    clear_env();

    let config = Config::from_env().expect("Failed to load config");
    assert_eq!(config.web_host, "0.0.0.0");
    assert_eq!(config.web_port, 8080);
    assert_eq!(config.static_dir, PathBuf::from("./static"));
    assert!(config.cookie_secure);
    assert_eq!(config.backend, BackendSettings::Unconfigured);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_hosted_backend_requires_api_key() {
    clear_env();
    std::env::set_var("BACKEND_URL", "https://db.example.com");

    let err = Config::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::MissingEnvVar(ref name) if name == "BACKEND_API_KEY"));

    std::env::set_var("BACKEND_API_KEY", "anon-key");
    let config = Config::from_env().expect("Failed to load config");
    assert_eq!(
        config.backend,
        BackendSettings::Hosted {
            url: "https://db.example.com".to_string(),
            api_key: "anon-key".to_string(),
        }
    );
    assert!(config.validate().is_ok());

    clear_env();
}

#[test]
#[serial]
fn test_sqlite_backend_and_overrides() {
    clear_env();
    std::env::set_var("DATABASE_PATH", "/tmp/board.sqlite");
    std::env::set_var("WEB_PORT", "3000");
    std::env::set_var("COOKIE_SECURE", "false");

    let config = Config::from_env().expect("Failed to load config");
    assert_eq!(
        config.backend,
        BackendSettings::Sqlite {
            path: PathBuf::from("/tmp/board.sqlite"),
        }
    );
    assert_eq!(config.web_port, 3000);
    assert!(!config.cookie_secure);

    clear_env();
}

#[test]
#[serial]
fn test_conflicting_backends_rejected() {
    clear_env();
    std::env::set_var("BACKEND_URL", "https://db.example.com");
    std::env::set_var("BACKEND_API_KEY", "anon-key");
    std::env::set_var("DATABASE_PATH", "/tmp/board.sqlite");

    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::InvalidValue { ref name, .. }) if name == "DATABASE_PATH"
    ));

    clear_env();
}

#[test]
#[serial]
fn test_invalid_values_rejected() {
    clear_env();

    std::env::set_var("WEB_PORT", "eighty");
    assert!(matches!(Config::from_env(), Err(ConfigError::ParseInt { .. })));
    std::env::remove_var("WEB_PORT");

    std::env::set_var("COOKIE_SECURE", "maybe");
    assert!(matches!(Config::from_env(), Err(ConfigError::ParseBool { .. })));

    clear_env();
}
