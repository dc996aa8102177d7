//! PubSub Bridge Core
//!
//! Owns the publish-on-start and subscribe-to-file behavior. Lifecycle
//! calls run on the caller's task; message delivery arrives on the
//! connection's own dispatch context, so every touch of the subscribe
//! file goes through a mutex-guarded append sink.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::config::BridgeConfig;
use crate::connection::{Connection, MessageHandler, QoS, SubscriptionToken};
use crate::feature::LifecycleState;

use super::{Bridge, BridgeError, FEATURE_NAME};

/// Replace `{identity}` placeholders in a configured topic
fn render_topic(template: &str, identity: &str) -> String {
    template.replace("{identity}", identity)
}

/// Append-only sink for received messages
///
/// Serializes appends from the connection's dispatch context. The closed
/// flag is flipped under the same lock the appends take, so once `close`
/// returns no further append can land.
struct AppendSink {
    path: PathBuf,
    inner: Mutex<SinkState>,
}

struct SinkState {
    file: Option<File>,
    closed: bool,
}

impl AppendSink {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            inner: Mutex::new(SinkState {
                file: None,
                closed: true,
            }),
        }
    }

    /// Accept appends again; the file itself is opened lazily
    fn open(&self) {
        self.inner.lock().closed = false;
    }

    /// Append one payload, opening the file in append mode if needed
    ///
    /// Returns `Ok(false)` if the sink is closed and the payload was
    /// ignored.
    fn append(&self, payload: &[u8]) -> std::io::Result<bool> {
        let mut inner = self.inner.lock();
        if inner.closed {
            return Ok(false);
        }
        if inner.file.is_none() {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(&self.path)?;
            inner.file = Some(file);
        }
        if let Some(file) = inner.file.as_mut() {
            file.write_all(payload)?;
            file.flush()?;
        }
        Ok(true)
    }

    /// Reject further appends and drop the file handle
    fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        inner.file = None;
    }
}

/// File-backed pub/sub bridge
///
/// On start, publishes the publish file's bytes once to the publish
/// topic, then registers a handler appending every message received on
/// the subscribe topic to the subscribe file. Either side may be absent.
pub struct PubSubBridge {
    /// Device identity namespacing logs and topic templates
    identity: String,
    /// Bridge endpoint configuration
    config: BridgeConfig,
    /// Borrowed connection; never closed by the bridge
    connection: Arc<dyn Connection>,
    /// Current lifecycle state
    state: RwLock<LifecycleState>,
    /// Guard ensuring at most one start/stop transition in flight
    transition: tokio::sync::Mutex<()>,
    /// Active subscription, if any
    subscription: Mutex<Option<SubscriptionToken>>,
    /// Append sink, present iff a subscribe side is configured
    sink: Option<Arc<AppendSink>>,
}

impl PubSubBridge {
    /// Bind the bridge to its identity and connection
    ///
    /// Allocates no I/O resources; the publish file is read and the
    /// subscribe file opened only on start.
    pub fn init(
        identity: impl Into<String>,
        config: BridgeConfig,
        connection: Arc<dyn Connection>,
    ) -> Self {
        let sink = config
            .subscribe_pair()
            .map(|(_, path)| Arc::new(AppendSink::new(path.to_path_buf())));
        Self {
            identity: identity.into(),
            config,
            connection,
            state: RwLock::new(LifecycleState::Initialized),
            transition: tokio::sync::Mutex::new(()),
            subscription: Mutex::new(None),
            sink,
        }
    }

    fn qos(&self) -> QoS {
        QoS::from_u8(self.config.qos).unwrap_or(QoS::AtLeastOnce)
    }

    fn make_handler(identity: String, sink: Arc<AppendSink>) -> MessageHandler {
        Arc::new(move |topic, payload, _qos| match sink.append(&payload) {
            Ok(true) => {}
            Ok(false) => debug!(
                "Bridge '{}': sink closed, ignoring message on '{}'",
                identity, topic
            ),
            Err(e) => warn!(
                "Bridge '{}': dropping message from '{}': {}",
                identity, topic, e
            ),
        })
    }
}

#[async_trait]
impl Bridge for PubSubBridge {
    fn name(&self) -> &str {
        FEATURE_NAME
    }

    fn state(&self) -> LifecycleState {
        *self.state.read()
    }

    async fn start(&self) -> Result<(), BridgeError> {
        let _transition = self.transition.lock().await;

        let state = *self.state.read();
        if !matches!(
            state,
            LifecycleState::Initialized | LifecycleState::Stopped
        ) {
            return Err(BridgeError::InvalidState(state));
        }

        if !self.config.enabled {
            info!("Bridge '{}': disabled, not starting", self.identity);
            return Ok(());
        }

        if let Some((file, topic)) = self.config.publish_pair() {
            let topic = render_topic(topic, &self.identity);
            let payload = tokio::fs::read(file)
                .await
                .map_err(BridgeError::PublishFile)?;
            let len = payload.len();
            self.connection
                .publish(&topic, Bytes::from(payload), self.qos())
                .await
                .map_err(BridgeError::PublishRejected)?;
            info!(
                "Bridge '{}': published {} bytes to '{}'",
                self.identity, len, topic
            );
        }

        if let (Some((topic, _)), Some(sink)) =
            (self.config.subscribe_pair(), self.sink.as_ref())
        {
            let topic = render_topic(topic, &self.identity);
            sink.open();
            let handler = Self::make_handler(self.identity.clone(), Arc::clone(sink));
            match self.connection.subscribe(&topic, self.qos(), handler).await {
                Ok(token) => {
                    *self.subscription.lock() = Some(token);
                    info!("Bridge '{}': subscribed to '{}'", self.identity, topic);
                }
                Err(e) => {
                    // the publish has already happened and is not rolled back
                    sink.close();
                    return Err(BridgeError::SubscribeRejected(e));
                }
            }
        }

        *self.state.write() = LifecycleState::Running;
        Ok(())
    }

    async fn stop(&self) -> Result<(), BridgeError> {
        let _transition = self.transition.lock().await;

        // Closing the sink before unsubscribing guarantees that a message
        // still in flight on the dispatch context cannot append after
        // stop returns.
        if let Some(sink) = self.sink.as_ref() {
            sink.close();
        }

        let token = self.subscription.lock().take();
        let result = match token {
            Some(token) => {
                let r = self
                    .connection
                    .unsubscribe(token)
                    .await
                    .map_err(BridgeError::UnsubscribeFailed);
                if r.is_ok() {
                    info!("Bridge '{}': unsubscribed", self.identity);
                }
                r
            }
            None => Ok(()),
        };

        *self.state.write() = LifecycleState::Stopped;
        result
    }
}
