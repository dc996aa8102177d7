//! Pub/Sub Bridge Module
//!
//! Moves bytes between local files and a remote pub/sub topic pair over
//! an externally managed connection. On start, the contents of a
//! configured publish file are sent once to a publish topic; a configured
//! subscribe topic is then watched for the feature's running lifetime,
//! with every received payload appended to a subscribe file.
//!
//! The module has two layers: [`PubSubBridge`] owns the behavior, and
//! [`PubSubFeature`] is the thin lifecycle façade the orchestrator drives.
//! The façade depends on the [`Bridge`] trait rather than the concrete
//! type, so a fake bridge can stand in for tests.
//!
//! # Example Configuration
//!
//! ```toml
//! identity = "device-01"
//!
//! [bridge]
//! publish_file = "/var/lib/filebridge/hello.txt"
//! publish_topic = "devices/{identity}/out"
//! subscribe_topic = "devices/{identity}/in"
//! subscribe_file = "/var/lib/filebridge/inbox.txt"
//! qos = 1
//! ```

use std::fmt;

use async_trait::async_trait;

use crate::connection::ConnectionError;
use crate::feature::LifecycleState;

mod controller;
mod pubsub;


pub use controller::PubSubFeature;
pub use pubsub::PubSubBridge;

/// Fixed human-readable name of the pub/sub bridge feature
pub const FEATURE_NAME: &str = "PubSubBridge";

/// Error type for bridge operations
#[derive(Debug)]
pub enum BridgeError {
    /// The publish file could not be opened or read
    PublishFile(std::io::Error),
    /// The connection rejected the publish
    PublishRejected(ConnectionError),
    /// The connection rejected the subscription
    SubscribeRejected(ConnectionError),
    /// The connection failed to unsubscribe; local cleanup still happened
    UnsubscribeFailed(ConnectionError),
    /// The requested transition is not valid from the current state
    InvalidState(LifecycleState),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::PublishFile(e) => write!(f, "Publish file unavailable: {}", e),
            BridgeError::PublishRejected(e) => write!(f, "Publish rejected: {}", e),
            BridgeError::SubscribeRejected(e) => write!(f, "Subscribe rejected: {}", e),
            BridgeError::UnsubscribeFailed(e) => write!(f, "Unsubscribe failed: {}", e),
            BridgeError::InvalidState(state) => {
                write!(f, "Invalid transition from state '{}'", state)
            }
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BridgeError::PublishFile(e) => Some(e),
            BridgeError::PublishRejected(e)
            | BridgeError::SubscribeRejected(e)
            | BridgeError::UnsubscribeFailed(e) => Some(e),
            BridgeError::InvalidState(_) => None,
        }
    }
}

/// Behavior contract between the lifecycle façade and the bridge core
#[async_trait]
pub trait Bridge: Send + Sync {
    /// Name of the feature this bridge backs
    fn name(&self) -> &str;

    /// Current lifecycle state
    fn state(&self) -> LifecycleState;

    /// Perform the configured publish, then register the configured
    /// subscription
    async fn start(&self) -> Result<(), BridgeError>;

    /// Unregister the subscription and release file handles
    async fn stop(&self) -> Result<(), BridgeError>;
}
