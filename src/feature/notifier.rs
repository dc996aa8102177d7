//! Lifecycle Event Notifier
//!
//! Interface the controller reports lifecycle transitions to. The
//! notifier is always an explicitly passed dependency, never a global,
//! so features stay independently testable.

use async_trait::async_trait;

use super::FeatureEvent;

/// Receiver for feature lifecycle events
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Called once per lifecycle transition attempt
    ///
    /// `feature` is the name of the feature the event belongs to.
    async fn on_event(&self, feature: &str, event: FeatureEvent);
}

/// Notifier that discards all events
#[derive(Default)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn on_event(&self, _feature: &str, _event: FeatureEvent) {}
}

/// Implement Notifier for Arc<T> where T: Notifier
/// This allows Arc-wrapped notifiers to be used directly
#[async_trait]
impl<T: Notifier + ?Sized> Notifier for std::sync::Arc<T> {
    async fn on_event(&self, feature: &str, event: FeatureEvent) {
        (**self).on_event(feature, event).await;
    }
}

/// Composite notifier that fans events out to multiple receivers in order
pub struct CompositeNotifier {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl CompositeNotifier {
    pub fn new() -> Self {
        Self {
            notifiers: Vec::new(),
        }
    }

    /// Add a notifier
    pub fn add<N: Notifier + 'static>(&mut self, notifier: N) {
        self.notifiers.push(Box::new(notifier));
    }

    /// Add a notifier and return self for chaining
    pub fn with<N: Notifier + 'static>(mut self, notifier: N) -> Self {
        self.add(notifier);
        self
    }
}

impl Default for CompositeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for CompositeNotifier {
    async fn on_event(&self, feature: &str, event: FeatureEvent) {
        for notifier in &self.notifiers {
            notifier.on_event(feature, event).await;
        }
    }
}
