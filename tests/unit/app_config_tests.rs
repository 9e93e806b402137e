/*!
 * App configuration tests
 */

use termlock::app_config::Config;

use crate::common;

#[test]
fn test_config_saveAndLoad_shouldRoundTrip() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("termlock.conf.json");

    let mut config = Config::default();
    config.target_language = "ee".to_string();
    config.pivot.enabled = false;
    config.save(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.target_language, "ee");
    assert!(!loaded.pivot.enabled);
    assert_eq!(loaded.source_language, config.source_language);
}

#[test]
fn test_config_fromFile_missing_shouldError() {
    let dir = common::create_temp_dir().unwrap();
    assert!(Config::from_file(dir.path().join("absent.json")).is_err());
}

#[test]
fn test_config_fromFile_invalidLanguage_shouldFailValidation() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        dir.path(),
        "bad.json",
        r#"{"target_language": "not-a-language"}"#,
    )
    .unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_config_defaults_shouldMatchDocumentedSession() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "twi");
    assert!(config.pivot.enabled);
    assert_eq!(config.pivot.language, "th");
    assert!(config.terminology.use_builtin);
    assert!(config.terminology.user_file.is_none());
    assert_eq!(config.engine.timeout_secs, 30);
}
