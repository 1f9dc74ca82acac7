//! Blocking-retrieve semantics: waiting, cancellation and races.
//!
//! Uses a paused tokio clock so the 1s poll interval costs no wall time.

#[path = "common.rs"]
mod common;

use std::future::pending;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use fanmq::core::{Broker, BrokerError};
use tokio::time::{sleep, timeout};

#[tokio::test(start_paused = true)]
async fn blocked_retrieve_wakes_on_publish() {
    common::init_logging();
    let broker = Arc::new(Broker::new());
    broker.subscribe("_queue", "_topic");

    let waiter = {
        let broker = Arc::clone(&broker);
        tokio::spawn(async move { broker.retrieve("_queue", pending()).await })
    };

    // Let the waiter reach its empty-queue poll before publishing.
    sleep(Duration::from_millis(10)).await;
    broker
        .publish("_topic", Bytes::from_static(b"wake up"))
        .unwrap();

    let payload = waiter.await.unwrap().unwrap();
    assert_eq!(payload, Bytes::from_static(b"wake up"));
}

#[tokio::test(start_paused = true)]
async fn retrieve_stays_pending_until_cancelled() {
    common::init_logging();
    let broker = Broker::new();
    broker.subscribe("_queue", "_topic");

    // Cancellation fires after 3 time units; for the first 2 the call must
    // stay pending rather than return a spurious empty result.
    let fut = broker.retrieve("_queue", sleep(Duration::from_secs(3)));
    tokio::pin!(fut);

    assert!(timeout(Duration::from_secs(2), &mut fut).await.is_err());

    let err = fut.await.unwrap_err();
    assert_eq!(err, BrokerError::NoMessage("_queue".to_string()));
}

#[tokio::test(start_paused = true)]
async fn cancelled_retrieve_leaves_queue_usable() {
    common::init_logging();
    let broker = Broker::new();
    broker.subscribe("_queue", "_topic");

    let err = broker
        .retrieve("_queue", sleep(Duration::from_secs(1)))
        .await
        .unwrap_err();
    assert_eq!(err, BrokerError::NoMessage("_queue".to_string()));

    broker
        .publish("_topic", Bytes::from_static(b"later"))
        .unwrap();
    let payload = broker.retrieve("_queue", pending()).await.unwrap();
    assert_eq!(payload, Bytes::from_static(b"later"));
}

#[tokio::test(start_paused = true)]
async fn racing_retrieves_each_get_a_distinct_message() {
    common::init_logging();
    let broker = Arc::new(Broker::new());
    broker.subscribe("q", "t");

    let spawn_waiter = |broker: Arc<Broker>| {
        tokio::spawn(async move { broker.retrieve("q", sleep(Duration::from_secs(30))).await })
    };
    let first = spawn_waiter(Arc::clone(&broker));
    let second = spawn_waiter(Arc::clone(&broker));

    sleep(Duration::from_millis(10)).await;
    broker.publish("t", Bytes::from_static(b"m1")).unwrap();
    broker.publish("t", Bytes::from_static(b"m2")).unwrap();

    let mut got = vec![
        first.await.unwrap().unwrap(),
        second.await.unwrap().unwrap(),
    ];
    got.sort();

    assert_eq!(got, vec![Bytes::from_static(b"m1"), Bytes::from_static(b"m2")]);
    assert_eq!(broker.queue_len("q"), Some(0));
}

#[tokio::test(start_paused = true)]
async fn already_fired_cancellation_fails_fast_on_empty_queue() {
    common::init_logging();
    let broker = Broker::new();
    broker.subscribe("q", "t");

    let err = broker
        .retrieve("q", std::future::ready(()))
        .await
        .unwrap_err();
    assert_eq!(err, BrokerError::NoMessage("q".to_string()));
}
