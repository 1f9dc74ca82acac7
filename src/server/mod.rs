//! HTTP transport for the broker.
//!
//! Maps the REST surface onto the four broker operations:
//!
//! ```text
//! PUT     /topic/{topic}                Publish message to {topic}.
//! GET     /queue/{queue}                Retrieve one message from {queue}.
//! PUT     /subscription/{queue}/{topic} Subscribe {queue} to {topic}.
//! DELETE  /subscription/{queue}/{topic} Unsubscribe {queue} from {topic}.
//! ```
//!
//! Responses are plain text lines with a trailing newline; failures map to
//! 404 with the error message as the body.

use std::future::Future;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::Router;
use bytes::Bytes;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::core::{Broker, BrokerError};

/// Shared state for the request handlers.
///
/// `stop` flips to `true` during graceful shutdown so in-flight long-polls
/// terminate instead of pinning their connections open.
#[derive(Clone)]
struct AppState {
    broker: Arc<Broker>,
    stop: watch::Receiver<bool>,
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/topic/:topic", put(publish))
        .route("/queue/:queue", get(retrieve))
        .route(
            "/subscription/:queue/:topic",
            put(subscribe).delete(unsubscribe),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the broker on the configured address and serves until ctrl-c or
/// SIGTERM.
///
/// Failure to bind the listener is the one fatal error and propagates to
/// the caller.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = config.server.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("fanmq broker listening on {addr}");

    serve_on(listener, Arc::new(Broker::new()), shutdown_signal()).await
}

/// Serves `broker` on an already-bound listener until `shutdown` completes.
///
/// Split out from [`serve`] so tests can use an ephemeral port and drive
/// shutdown themselves.
pub async fn serve_on(
    listener: TcpListener,
    broker: Arc<Broker>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let (stop_tx, stop_rx) = watch::channel(false);
    let app = router(AppState {
        broker,
        stop: stop_rx,
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("shutting down");
            let _ = stop_tx.send(true);
        })
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

// ───────────────────────────────────────────────────────────
// Handlers
// ───────────────────────────────────────────────────────────

async fn publish(
    State(state): State<AppState>,
    Path(topic): Path<String>,
    body: Bytes,
) -> Response {
    let bytes = body.len();

    match state.broker.publish(&topic, body) {
        Ok(subscribers) => confirm(format!(
            "Published message ({bytes} bytes) to {subscribers} subscribers of {topic}\n"
        )),
        Err(err) => not_found(err),
    }
}

async fn retrieve(State(state): State<AppState>, Path(queue): Path<String>) -> Response {
    let mut stop = state.stop.clone();
    let cancel = async move {
        let _ = stop.wait_for(|stopping| *stopping).await;
    };

    match state.broker.retrieve(&queue, cancel).await {
        Ok(payload) => payload.into_response(),
        Err(err) => not_found(err),
    }
}

async fn subscribe(
    State(state): State<AppState>,
    Path((queue, topic)): Path<(String, String)>,
) -> Response {
    state.broker.subscribe(&queue, &topic);
    confirm(format!("Subscribed queue ({queue}) to topic ({topic})\n"))
}

async fn unsubscribe(
    State(state): State<AppState>,
    Path((queue, topic)): Path<(String, String)>,
) -> Response {
    match state.broker.unsubscribe(&queue, &topic) {
        Ok(()) => confirm(format!("Unsubscribed queue ({queue}) from topic ({topic})\n")),
        Err(err) => not_found(err),
    }
}

fn confirm(message: String) -> Response {
    info!("{}", message.trim_end());
    message.into_response()
}

fn not_found(err: BrokerError) -> Response {
    (StatusCode::NOT_FOUND, format!("{err}\n")).into_response()
}
