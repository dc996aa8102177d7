//! Configuration Module Tests

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use test_case::test_case;

use super::*;

#[test]
fn bridge_config_defaults() {
    let config = BridgeConfig::default();

    assert_eq!(config.publish_file, None);
    assert_eq!(config.publish_topic, None);
    assert_eq!(config.subscribe_topic, None);
    assert_eq!(config.subscribe_file, None);
    assert_eq!(config.qos, 1);
    assert!(config.enabled);
}

#[test]
fn empty_bridge_config_is_valid() {
    // Neither side configured is a valid deployment (feature idles)
    assert!(BridgeConfig::default().validate().is_ok());
}

#[test_case(Some("/tmp/p.txt"), None ; "file without topic")]
#[test_case(None, Some("t/pub") ; "topic without file")]
#[test_case(Some(""), Some("t/pub") ; "empty file path")]
#[test_case(Some("/tmp/p.txt"), Some("") ; "empty topic")]
fn partial_publish_side_is_rejected(file: Option<&str>, topic: Option<&str>) {
    let config = BridgeConfig {
        publish_file: file.map(PathBuf::from),
        publish_topic: topic.map(String::from),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Validation(_))
    ));
}

#[test_case(Some("t/sub"), None ; "topic without file")]
#[test_case(None, Some("/tmp/s.txt") ; "file without topic")]
#[test_case(Some(""), Some("/tmp/s.txt") ; "empty topic")]
#[test_case(Some("t/sub"), Some("") ; "empty file path")]
fn partial_subscribe_side_is_rejected(topic: Option<&str>, file: Option<&str>) {
    let config = BridgeConfig {
        subscribe_topic: topic.map(String::from),
        subscribe_file: file.map(PathBuf::from),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn qos_out_of_range_is_rejected() {
    let config = BridgeConfig {
        qos: 3,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn publish_pair_requires_both_fields() {
    let config = BridgeConfig {
        publish_file: Some(PathBuf::from("/tmp/p.txt")),
        publish_topic: Some("t/pub".to_string()),
        ..Default::default()
    };
    let (file, topic) = config.publish_pair().unwrap();
    assert_eq!(file, Path::new("/tmp/p.txt"));
    assert_eq!(topic, "t/pub");

    let partial = BridgeConfig {
        publish_file: Some(PathBuf::from("/tmp/p.txt")),
        ..Default::default()
    };
    assert!(partial.publish_pair().is_none());
}

#[test]
fn subscribe_pair_treats_empty_as_missing() {
    let config = BridgeConfig {
        subscribe_topic: Some(String::new()),
        subscribe_file: Some(PathBuf::from("")),
        ..Default::default()
    };
    assert!(config.subscribe_pair().is_none());
}

#[test]
fn config_toml_parsing() {
    let toml_str = r#"
        identity = "device-01"

        [log]
        level = "debug"

        [bridge]
        publish_file = "/tmp/p.txt"
        publish_topic = "t/pub"
        subscribe_topic = "t/sub"
        subscribe_file = "/tmp/s.txt"
        qos = 2
    "#;

    let config = Config::from_toml(toml_str).unwrap();

    assert_eq!(config.identity, "device-01");
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.bridge.publish_file, Some(PathBuf::from("/tmp/p.txt")));
    assert_eq!(config.bridge.publish_topic, Some("t/pub".to_string()));
    assert_eq!(config.bridge.subscribe_topic, Some("t/sub".to_string()));
    assert_eq!(
        config.bridge.subscribe_file,
        Some(PathBuf::from("/tmp/s.txt"))
    );
    assert_eq!(config.bridge.qos, 2);
    assert!(config.bridge.enabled);
}

#[test]
fn config_toml_minimal() {
    let toml_str = r#"
        identity = "device-02"
    "#;

    let config = Config::from_toml(toml_str).unwrap();

    assert_eq!(config.identity, "device-02");
    assert_eq!(config.log.level, "info"); // Default
    assert_eq!(config.bridge.qos, 1); // Default
    assert!(config.bridge.publish_pair().is_none());
    assert!(config.bridge.subscribe_pair().is_none());
}

#[test]
fn config_toml_partial_side_fails_validation() {
    let toml_str = r#"
        identity = "device-03"

        [bridge]
        publish_file = "/tmp/p.txt"
    "#;

    assert!(matches!(
        Config::from_toml(toml_str),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn env_var_substitution() {
    std::env::set_var("FILEBRIDGE_TEST_IDENTITY", "env-device");

    let toml_str = r#"
        identity = "${FILEBRIDGE_TEST_IDENTITY}"

        [bridge]
        publish_file = "${FILEBRIDGE_TEST_PUBFILE:-/tmp/fallback.txt}"
        publish_topic = "t/pub"
    "#;

    let config = Config::from_toml(toml_str).unwrap();

    assert_eq!(config.identity, "env-device");
    assert_eq!(
        config.bridge.publish_file,
        Some(PathBuf::from("/tmp/fallback.txt"))
    );

    std::env::remove_var("FILEBRIDGE_TEST_IDENTITY");
}

#[test]
fn default_identity_is_process_scoped() {
    let config = Config::default();
    assert!(config.identity.is_empty()); // plain Default derive

    let parsed = Config::from_toml("").unwrap();
    assert!(parsed.identity.starts_with("filebridge-"));
}
