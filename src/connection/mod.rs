//! Connection Seam
//!
//! Abstractions for the externally managed pub/sub connection. The bridge
//! borrows an already-open connection; establishing, authenticating, and
//! closing the transport is owned by the external connection manager.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

/// Quality of service level for a publish or subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum QoS {
    /// At most once delivery
    #[default]
    AtMostOnce = 0,
    /// At least once delivery
    AtLeastOnce = 1,
    /// Exactly once delivery
    ExactlyOnce = 2,
}

impl QoS {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(QoS::AtMostOnce),
            1 => Some(QoS::AtLeastOnce),
            2 => Some(QoS::ExactlyOnce),
            _ => None,
        }
    }
}

/// Error type for connection operations
#[derive(Debug)]
pub enum ConnectionError {
    /// Connection to the broker failed or was lost
    ConnectionLost(String),
    /// The broker rejected the operation
    Rejected(String),
    /// Operation timed out
    Timeout,
    /// Other error
    Other(String),
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::ConnectionLost(msg) => write!(f, "Connection lost: {}", msg),
            ConnectionError::Rejected(msg) => write!(f, "Rejected: {}", msg),
            ConnectionError::Timeout => write!(f, "Operation timed out"),
            ConnectionError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConnectionError {}

/// Handle for an active subscription, returned by [`Connection::subscribe`]
/// and consumed by [`Connection::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

impl SubscriptionToken {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Callback invoked for each message delivered on a subscribed topic.
///
/// Invoked from the connection's own dispatch context, possibly
/// concurrently with lifecycle calls. Arguments are the topic the message
/// arrived on, its raw payload, and the delivery QoS.
pub type MessageHandler = Arc<dyn Fn(String, Bytes, QoS) + Send + Sync>;

/// Trait for an established pub/sub connection
///
/// Implemented by the external connection manager and handed to the
/// bridge already connected or connectable. The bridge never closes it;
/// ownership stays with the manager for the whole process lifetime.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Publish a payload to a topic
    async fn publish(&self, topic: &str, payload: Bytes, qos: QoS) -> Result<(), ConnectionError>;

    /// Register a handler for messages arriving on a topic
    ///
    /// The handler stays registered until the returned token is passed to
    /// [`Connection::unsubscribe`].
    async fn subscribe(
        &self,
        topic: &str,
        qos: QoS,
        handler: MessageHandler,
    ) -> Result<SubscriptionToken, ConnectionError>;

    /// Remove a previously registered handler
    async fn unsubscribe(&self, token: SubscriptionToken) -> Result<(), ConnectionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qos_from_u8() {
        assert_eq!(QoS::from_u8(0), Some(QoS::AtMostOnce));
        assert_eq!(QoS::from_u8(1), Some(QoS::AtLeastOnce));
        assert_eq!(QoS::from_u8(2), Some(QoS::ExactlyOnce));
        assert_eq!(QoS::from_u8(3), None);
    }

    #[test]
    fn token_identity() {
        let a = SubscriptionToken::new(7);
        let b = SubscriptionToken::new(7);
        assert_eq!(a, b);
        assert_eq!(a.id(), 7);
        assert_ne!(a, SubscriptionToken::new(8));
    }
}
