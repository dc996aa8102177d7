//! Feature Lifecycle Module
//!
//! The uniform lifecycle contract an external orchestrator uses to manage
//! independently pluggable features, and the notifier interface lifecycle
//! transitions are reported to.

use std::fmt;

use async_trait::async_trait;

mod notifier;

pub use notifier::{CompositeNotifier, Notifier, NullNotifier};

/// Feature error types
#[derive(Debug)]
pub enum FeatureError {
    /// The feature configuration violates an invariant
    InvalidConfig(String),
    /// Starting the feature failed
    Start(String),
    /// Stopping the feature failed
    Stop(String),
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            FeatureError::Start(msg) => write!(f, "Start failed: {}", msg),
            FeatureError::Stop(msg) => write!(f, "Stop failed: {}", msg),
        }
    }
}

impl std::error::Error for FeatureError {}

/// Lifecycle state of a feature or bridge
///
/// `Created` is the pre-bind phase; the fallible constructors move
/// through it atomically, so a freshly built instance already reports
/// `Initialized`. A `Stopped` instance may be started again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed, not yet bound to a connection
    Created,
    /// Bound and ready to start
    Initialized,
    /// Started and operational
    Running,
    /// Stopped, resources released
    Stopped,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Created => write!(f, "created"),
            LifecycleState::Initialized => write!(f, "initialized"),
            LifecycleState::Running => write!(f, "running"),
            LifecycleState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Lifecycle event reported to the notifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureEvent {
    /// The feature finished a start attempt
    Started,
    /// The feature finished a stop attempt
    Stopped,
}

impl fmt::Display for FeatureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureEvent::Started => write!(f, "started"),
            FeatureEvent::Stopped => write!(f, "stopped"),
        }
    }
}

/// When lifecycle events are emitted to the notifier
///
/// `Always` reports every transition attempt regardless of outcome;
/// `OnSuccess` reports only transitions that actually succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyPolicy {
    /// Notify after every attempt
    #[default]
    Always,
    /// Notify only when the underlying transition succeeded
    OnSuccess,
}

impl NotifyPolicy {
    pub fn should_notify(self, success: bool) -> bool {
        match self {
            NotifyPolicy::Always => true,
            NotifyPolicy::OnSuccess => success,
        }
    }
}

/// Lifecycle contract for a pluggable feature
///
/// The orchestrator drives every feature through this trait. All calls
/// are serialized per feature by the orchestrator's lifecycle task;
/// implementations must not panic across this boundary.
#[async_trait]
pub trait Feature: Send + Sync {
    /// Fixed human-readable identifier for this feature instance
    fn name(&self) -> &str;

    /// Start the feature
    async fn start(&self) -> Result<(), FeatureError>;

    /// Stop the feature and release its resources
    async fn stop(&self) -> Result<(), FeatureError>;
}
