//! Bridge Configuration
//!
//! Configuration for the file-backed pub/sub bridge. The publish and
//! subscribe sides are independently optional; a side that is only
//! partially configured is rejected at validation time, never at runtime.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration for the pub/sub bridge endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// File whose contents are published once on start
    pub publish_file: Option<PathBuf>,

    /// Topic the publish file contents are sent to
    pub publish_topic: Option<String>,

    /// Topic to receive messages on
    pub subscribe_topic: Option<String>,

    /// File received messages are appended to (created if absent)
    pub subscribe_file: Option<PathBuf>,

    /// QoS level for the publish and the subscription (0, 1, or 2)
    #[serde(default = "default_qos")]
    pub qos: u8,

    /// Whether this feature is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_qos() -> u8 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            publish_file: None,
            publish_topic: None,
            subscribe_topic: None,
            subscribe_file: None,
            qos: default_qos(),
            enabled: true,
        }
    }
}

fn present_path(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.as_os_str().is_empty())
}

fn present_str(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

impl BridgeConfig {
    /// Check whether a publish side is fully configured
    ///
    /// Empty strings count as missing.
    pub fn publish_pair(&self) -> Option<(&Path, &str)> {
        match (
            present_path(&self.publish_file),
            present_str(&self.publish_topic),
        ) {
            (Some(file), Some(topic)) => Some((file, topic)),
            _ => None,
        }
    }

    /// Check whether a subscribe side is fully configured
    pub fn subscribe_pair(&self) -> Option<(&str, &Path)> {
        match (
            present_str(&self.subscribe_topic),
            present_path(&self.subscribe_file),
        ) {
            (Some(topic), Some(file)) => Some((topic, file)),
            _ => None,
        }
    }

    /// Validate the configuration
    ///
    /// Each side must be configured completely or not at all, and the QoS
    /// level must be 0, 1, or 2.
    pub fn validate(&self) -> Result<(), super::ConfigError> {
        let publish_file = present_path(&self.publish_file);
        let publish_topic = present_str(&self.publish_topic);
        if publish_file.is_some() != publish_topic.is_some() {
            return Err(super::ConfigError::Validation(
                "publish_file and publish_topic must be configured together".to_string(),
            ));
        }

        let subscribe_topic = present_str(&self.subscribe_topic);
        let subscribe_file = present_path(&self.subscribe_file);
        if subscribe_topic.is_some() != subscribe_file.is_some() {
            return Err(super::ConfigError::Validation(
                "subscribe_topic and subscribe_file must be configured together".to_string(),
            ));
        }

        if self.qos > 2 {
            return Err(super::ConfigError::Validation(format!(
                "qos must be 0, 1, or 2, got {}",
                self.qos
            )));
        }

        Ok(())
    }
}
