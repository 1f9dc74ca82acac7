use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

use crate::core::error::BrokerError;
use crate::core::queue::{QueueName, QueueState};

/// Interval between re-checks while a retrieve waits on an empty queue.
///
/// Cancellation is observed within one interval at worst.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// [`Broker`] owns the queue table and serializes access to it.
///
/// Uses DashMap internally, so operations lock only the entry they touch
/// and never hold a lock across an await point. Queues are created solely
/// by [`Broker::subscribe`] and live for the lifetime of the process.
#[derive(Debug, Default)]
pub struct Broker {
    queues: DashMap<QueueName, QueueState>,
}

impl Broker {
    /// Creates a new broker with no queues.
    pub fn new() -> Self {
        Self {
            queues: DashMap::new(),
        }
    }

    /// Appends a copy of `payload` to every queue subscribed to `topic`
    /// and returns how many queues that was.
    ///
    /// Fails with [`BrokerError::NoSubscribers`] when no queue is
    /// subscribed; the message is not stored anywhere in that case.
    pub fn publish(&self, topic: &str, payload: Bytes) -> Result<usize, BrokerError> {
        let mut subscribers = 0;

        for mut entry in self.queues.iter_mut() {
            if entry.value().is_subscribed(topic) {
                entry.value_mut().push(payload.clone());
                subscribers += 1;
            }
        }

        if subscribers == 0 {
            return Err(BrokerError::NoSubscribers(topic.to_string()));
        }

        debug!(topic, subscribers, bytes = payload.len(), "published");
        Ok(subscribers)
    }

    /// Subscribes `queue` to `topic`, creating the queue on first mention.
    ///
    /// Idempotent: re-subscribing an existing pairing changes nothing and
    /// never causes duplicate delivery.
    pub fn subscribe(&self, queue: &str, topic: &str) {
        let added = self
            .queues
            .entry(queue.to_string())
            .or_insert_with(|| {
                debug!(queue, "queue not found; creating");
                QueueState::new()
            })
            .add_topic(topic);

        if added {
            debug!(queue, topic, "subscribed");
        }
    }

    /// Removes `topic` from `queue`'s subscription set.
    ///
    /// The queue and its backlog are unaffected; only future publishes to
    /// `topic` stop reaching it. Removing a topic that was not subscribed
    /// is a silent no-op. Fails with [`BrokerError::NoSuchQueue`] when the
    /// queue was never created.
    pub fn unsubscribe(&self, queue: &str, topic: &str) -> Result<(), BrokerError> {
        match self.queues.get_mut(queue) {
            Some(mut entry) => {
                if entry.remove_topic(topic) {
                    debug!(queue, topic, "unsubscribed");
                }
                Ok(())
            }
            None => Err(BrokerError::NoSuchQueue(queue.to_string())),
        }
    }

    /// Removes and returns the head message of `queue`, waiting while the
    /// queue is empty.
    ///
    /// Fails immediately with [`BrokerError::NoSuchQueue`] when the queue
    /// was never created. While empty, the queue is re-checked every
    /// [`POLL_INTERVAL`] with no lock held in between, so any number of
    /// retrieves can wait concurrently without blocking writers. When
    /// `cancel` completes first the wait ends with
    /// [`BrokerError::NoMessage`] and the queue is left untouched.
    ///
    /// Racing retrieves on the same queue each pop under the entry lock,
    /// so every message goes to exactly one caller.
    pub async fn retrieve(
        &self,
        queue: &str,
        cancel: impl Future<Output = ()>,
    ) -> Result<Bytes, BrokerError> {
        if !self.queues.contains_key(queue) {
            return Err(BrokerError::NoSuchQueue(queue.to_string()));
        }

        tokio::pin!(cancel);

        loop {
            // Entry guard dropped before the await below.
            if let Some(mut entry) = self.queues.get_mut(queue) {
                if let Some(payload) = entry.value_mut().pop() {
                    debug!(queue, bytes = payload.len(), "retrieved");
                    return Ok(payload);
                }
            }

            tokio::select! {
                _ = &mut cancel => {
                    return Err(BrokerError::NoMessage(queue.to_string()));
                }
                _ = tokio::time::sleep(POLL_INTERVAL) => {}
            }
        }
    }

    /// Number of messages currently backlogged in `queue`.
    ///
    /// Inspection helper for tests and diagnostics; not one of the broker
    /// operations and not exposed over the wire.
    pub fn queue_len(&self, queue: &str) -> Option<usize> {
        self.queues.get(queue).map(|entry| entry.value().len())
    }
}
