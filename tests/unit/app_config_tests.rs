/*!
 * Tests for application configuration functionality
 */

use std::time::Duration;

use tilawa::app_config::{Config, LogLevel};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.api.endpoint, "https://api.alquran.cloud/v1");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.editions.recitation, "ar.alafasy");
    assert_eq!(config.editions.transliteration, "en.transliteration");
    assert_eq!(config.editions.translation, "en.sahih");
    assert_eq!(config.playback.item_delay(), Duration::from_secs(1));
    assert_eq!(config.playback.section_delay(), Duration::from_secs(2));
    assert_eq!(config.playback.player_command, "mpv");
    assert!(!config.display.reduced_motion);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.api.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
    config.api.endpoint = "ftp://example.org/v1".to_string();
    assert!(config.validate().is_err());
    config.api.endpoint = "http://localhost:8080/v1".to_string();
    assert!(config.validate().is_ok());

    config.editions.translation = "  ".to_string();
    assert!(config.validate().is_err());
    config.editions.translation = "en.asad".to_string();

    config.display.viewport_rows = 0;
    assert!(config.validate().is_err());
    config.display.viewport_rows = 12;

    config.playback.player_command = String::new();
    assert!(config.validate().is_err());
    config.playback.player_command = "ffplay".to_string();

    config.api.timeout_secs = 0;
    assert!(config.validate().is_err());
    config.api.timeout_secs = 5;

    assert!(config.validate().is_ok());
}

/// Missing config files are created with defaults and read back unchanged
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("conf.json");

    let created = Config::load_or_create(&path).unwrap();
    assert!(path.exists());

    let reloaded = Config::from_file(&path).unwrap();
    assert_eq!(reloaded.editions.recitation, created.editions.recitation);
    assert_eq!(reloaded.playback.item_delay_ms, 1000);
    assert_eq!(reloaded.playback.section_delay_ms, 2000);
}

#[test]
fn test_fromFile_withCustomValues_shouldOverrideDefaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(
        &path,
        r#"{
            "editions": {"translation": "en.asad"},
            "playback": {"item_delay_ms": 250, "player_command": "ffplay", "player_args": ["-nodisp", "-autoexit"]},
            "log_level": "debug"
        }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.editions.translation, "en.asad");
    assert_eq!(config.editions.recitation, "ar.alafasy");
    assert_eq!(config.playback.item_delay(), Duration::from_millis(250));
    assert_eq!(config.playback.section_delay(), Duration::from_secs(2));
    assert_eq!(config.playback.player_args, vec!["-nodisp", "-autoexit"]);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
}

#[test]
fn test_fromFile_withInvalidJson_shouldFail() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::from_file(&path).is_err());
}
