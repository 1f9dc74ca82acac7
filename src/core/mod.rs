//! FanMQ broker core.
//!
//! Owns all queue and subscription state and exposes the four broker
//! operations (publish, retrieve, subscribe, unsubscribe). Everything else
//! in the crate is transport glue around this module.

pub mod broker;
pub mod error;
pub mod queue;

pub use broker::Broker;
pub use error::BrokerError;
