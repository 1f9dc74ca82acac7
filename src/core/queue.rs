use std::collections::{HashSet, VecDeque};

use bytes::Bytes;

/// Alias for a queue name.
pub type QueueName = String;

/// Alias for a topic name.
pub type TopicName = String;

/// Per-queue state: a FIFO message backlog plus the set of topics the
/// queue is subscribed to.
///
/// Messages are opaque byte payloads with no envelope. The topic set and
/// the backlog are orthogonal: unsubscribing never touches the backlog,
/// and an empty backlog never removes the queue.
#[derive(Debug, Default)]
pub struct QueueState {
    messages: VecDeque<Bytes>,
    topics: HashSet<TopicName>,
}

impl QueueState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message at the tail.
    pub fn push(&mut self, payload: Bytes) {
        self.messages.push_back(payload);
    }

    /// Removes and returns the head message, if any.
    pub fn pop(&mut self) -> Option<Bytes> {
        self.messages.pop_front()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Adds `topic` to the subscription set. Returns `false` if it was
    /// already present (duplicates collapse).
    pub fn add_topic(&mut self, topic: impl Into<TopicName>) -> bool {
        self.topics.insert(topic.into())
    }

    /// Removes `topic` from the subscription set. Removing a non-member
    /// is a harmless no-op.
    pub fn remove_topic(&mut self, topic: &str) -> bool {
        self.topics.remove(topic)
    }

    pub fn is_subscribed(&self, topic: &str) -> bool {
        self.topics.contains(topic)
    }
}
