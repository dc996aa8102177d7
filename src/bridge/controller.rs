//! Feature Lifecycle Façade
//!
//! Thin controller the orchestrator drives. Owns no bridge behavior
//! itself: it validates configuration, sequences the bridge core, logs
//! each transition, and reports lifecycle events to the notifier.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::BridgeConfig;
use crate::connection::Connection;
use crate::feature::{Feature, FeatureError, FeatureEvent, Notifier, NotifyPolicy};

use super::pubsub::PubSubBridge;
use super::{Bridge, BridgeError};

/// Lifecycle façade for the pub/sub bridge feature
pub struct PubSubFeature {
    bridge: Arc<dyn Bridge>,
    notifier: Arc<dyn Notifier>,
    notify_policy: NotifyPolicy,
}

impl PubSubFeature {
    /// Build the feature from its collaborators and configuration
    ///
    /// Fails with [`FeatureError::InvalidConfig`] if either bridge side is
    /// only partially configured. Construction and initialization are
    /// fused, so an instance that exists is always safe to start.
    pub fn init(
        identity: impl Into<String>,
        connection: Arc<dyn Connection>,
        notifier: Arc<dyn Notifier>,
        config: BridgeConfig,
    ) -> Result<Self, FeatureError> {
        config
            .validate()
            .map_err(|e| FeatureError::InvalidConfig(e.to_string()))?;
        let bridge = Arc::new(PubSubBridge::init(identity, config, connection));
        Ok(Self {
            bridge,
            notifier,
            notify_policy: NotifyPolicy::default(),
        })
    }

    /// Build the feature around an existing bridge implementation
    ///
    /// Used to substitute the bridge core, e.g. a recording fake in tests.
    pub fn with_bridge(bridge: Arc<dyn Bridge>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            bridge,
            notifier,
            notify_policy: NotifyPolicy::default(),
        }
    }

    /// Set when lifecycle events are reported to the notifier
    ///
    /// The default is [`NotifyPolicy::Always`]: the notifier hears about
    /// every transition attempt whether or not it succeeded.
    pub fn with_notify_policy(mut self, policy: NotifyPolicy) -> Self {
        self.notify_policy = policy;
        self
    }

    async fn finish(
        &self,
        event: FeatureEvent,
        result: Result<(), BridgeError>,
    ) -> Result<(), FeatureError> {
        let code = i32::from(result.is_err());
        info!("Feature '{}': {} (result={})", self.name(), event, code);

        if self.notify_policy.should_notify(result.is_ok()) {
            self.notifier.on_event(self.name(), event).await;
        }

        result.map_err(|e| match event {
            FeatureEvent::Started => FeatureError::Start(e.to_string()),
            FeatureEvent::Stopped => FeatureError::Stop(e.to_string()),
        })
    }
}

impl std::fmt::Debug for PubSubFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PubSubFeature")
            .field("name", &self.bridge.name())
            .field("notify_policy", &self.notify_policy)
            .finish()
    }
}

#[async_trait]
impl Feature for PubSubFeature {
    fn name(&self) -> &str {
        self.bridge.name()
    }

    async fn start(&self) -> Result<(), FeatureError> {
        let result = self.bridge.start().await;
        self.finish(FeatureEvent::Started, result).await
    }

    async fn stop(&self) -> Result<(), FeatureError> {
        let result = self.bridge.stop().await;
        self.finish(FeatureEvent::Stopped, result).await
    }
}
