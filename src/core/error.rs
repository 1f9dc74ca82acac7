use std::fmt;

/// Expected, non-fatal outcomes of the broker operations.
///
/// The `Display` text doubles as the client-facing response body, so the
/// wording is part of the wire contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokerError {
    /// Publish found no queue subscribed to the topic; the message is dropped.
    NoSubscribers(String),
    /// The named queue was never created by a prior subscribe.
    NoSuchQueue(String),
    /// A retrieve was cancelled before a message arrived.
    NoMessage(String),
}

impl std::error::Error for BrokerError {}

impl fmt::Display for BrokerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrokerError::NoSubscribers(topic) => {
                write!(f, "There are no subscribers for topic: {topic}")
            }
            BrokerError::NoSuchQueue(queue) => {
                write!(f, "There is no queue named: {queue}")
            }
            BrokerError::NoMessage(queue) => {
                write!(f, "There are no messages for queue: {queue}")
            }
        }
    }
}
