//! FanMQ – an in-memory topic-to-queue message broker served over HTTP.
//!
//! This crate exports
//!  * `core`    – queue, subscription and fan-out logic
//!  * `server`  – HTTP server-side engine (axum)
//!  * `config`  – TOML-driven runtime configuration
//!
//! Producers `PUT /topic/{topic}` to fan a message out, by copy, into every
//! queue subscribed to that topic. Consumers `GET /queue/{queue}` to pull
//! one message in FIFO order, long-polling while the queue is empty.
//!
//! Downstream applications can embed the broker engine (`serve`) or build
//! their own binaries on top of the library.

// ───────────────────────────────────────────────────────────
// Public modules
// ───────────────────────────────────────────────────────────
pub mod config;
pub mod core;
pub mod logging;
pub mod server;

// ───────────────────────────────────────────────────────────
// Re-exports
// ───────────────────────────────────────────────────────────
pub use config::{load_config, Config};
pub use core::{Broker, BrokerError};
pub use server::{serve, serve_on};
