//! FileBridge - File-backed pub/sub bridge feature
//!
//! Connects a managed MQTT-style connection to two local file endpoints:
//! a publish file whose contents are sent to a topic on start, and a
//! subscribe file to which messages received on a topic are appended.
//! The feature is driven by an external orchestrator through a uniform
//! lifecycle contract and reports transitions to an external notifier.

pub mod bridge;
pub mod config;
pub mod connection;
pub mod feature;
pub mod logging;

pub use bridge::{Bridge, BridgeError, PubSubBridge, PubSubFeature};
pub use config::{BridgeConfig, Config, ConfigError};
pub use connection::{Connection, ConnectionError, MessageHandler, QoS, SubscriptionToken};
pub use feature::{
    CompositeNotifier, Feature, FeatureError, FeatureEvent, LifecycleState, Notifier,
    NotifyPolicy, NullNotifier,
};
