use healthcare_assistant_ui::config::{AppConfig, DEFAULT_BACKEND_URL, DisplayMode, LogFormat};
use serial_test::serial;
use std::env;
use std::fs;

const BIN: &str = "healthcare-assistant-ui";

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        for key in [
            "GTG_SERVER__PORT",
            "GTG_BACKEND__BASE_URL",
            "GTG_BACKEND__TIMEOUT_SECS",
            "GTG_UI__DISPLAY_MODE",
            "CONFIG_FILE",
            "PORT",
            "BACKEND_URL",
            "DISPLAY_MODE",
        ] {
            env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args([BIN]).expect("defaults should load");

    assert_eq!(config.server.port, 3000);
    assert_eq!(config.backend.base_url, DEFAULT_BACKEND_URL);
    assert_eq!(config.backend.timeout_secs, 120);
    assert_eq!(config.ui.display_mode, DisplayMode::Stacked);
    assert_eq!(config.ui.static_dir, "static");
    assert_eq!(config.log.format, LogFormat::Compact);
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("GTG_SERVER__PORT", "9090");
        env::set_var("GTG_BACKEND__BASE_URL", "https://assistant.example.com");
    }

    let config = AppConfig::load_from_args([BIN]).expect("Failed to load config");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.backend.base_url, "https://assistant.example.com");

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("gtg.yaml");
    fs::write(
        &file_path,
        r#"
server:
  port: 7070
backend:
  base_url: "http://assistant.internal:8080/"
ui:
  display_mode: tabbed
"#,
    )
    .expect("Failed to write temp config");

    unsafe {
        env::set_var("CONFIG_FILE", &file_path);
    }

    let config = AppConfig::load_from_args([BIN]).expect("Failed to load config from file");
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.backend.base_url, "http://assistant.internal:8080/");
    assert_eq!(config.ui.display_mode, DisplayMode::Tabbed);

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_flags_win_over_env() {
    clear_env_vars();
    unsafe {
        env::set_var("GTG_SERVER__PORT", "9090");
    }

    let config = AppConfig::load_from_args([
        BIN,
        "--port",
        "4000",
        "--backend-url",
        "http://10.0.0.5:8080",
        "--display-mode",
        "Tabbed",
    ])
    .expect("Failed to load config");

    assert_eq!(config.server.port, 4000);
    assert_eq!(config.backend.base_url, "http://10.0.0.5:8080");
    assert_eq!(config.ui.display_mode, DisplayMode::Tabbed);

    clear_env_vars();
}

#[test]
#[serial]
fn test_invalid_backend_url_rejected() {
    clear_env_vars();

    let err = AppConfig::load_from_args([BIN, "--backend-url", "not a url"]).unwrap_err();
    assert!(err.to_string().contains("backend.base_url"));

    let err = AppConfig::load_from_args([BIN, "--backend-url", "ftp://files.example.com"])
        .unwrap_err();
    assert!(err.to_string().contains("http or https"));
}

#[test]
#[serial]
fn test_unknown_display_mode_rejected() {
    clear_env_vars();

    assert!(AppConfig::load_from_args([BIN, "--display-mode", "grid"]).is_err());
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.yaml");
    let missing = missing.to_string_lossy().into_owned();

    assert!(AppConfig::load_from_args([BIN, "--config", missing.as_str()]).is_err());
}
