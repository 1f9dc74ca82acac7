//! fanmq – one binary that can start the broker *or* act as a
//! command-line client.
//
//  $ fanmq start --config fanmq.toml
//  $ fanmq sub 127.0.0.1:9620 _queue _topic
//  $ fanmq pub 127.0.0.1:9620 _topic "hello"
//  $ fanmq get 127.0.0.1:9620 _queue
use fanmq::{load_config, logging::init_logging, serve, Config};

use clap::{Parser, Subcommand};

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

#[derive(Debug, Parser)]
#[command(name = "fanmq", version, about = "FanMQ broker & CLI")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the broker daemon.
    Start {
        /// Path to config TOML (env FANMQ_CONFIG overrides)
        #[arg(short, long)]
        config: Option<String>,
        /// Address to listen on (overrides config)
        #[arg(long)]
        address: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
        /// Enable debug logging
        #[arg(long)]
        debug: bool,
    },
    /// Publish a message to a topic.
    Pub {
        /// Broker address (host:port)
        addr: SocketAddr,
        topic: String,
        message: String,
    },
    /// Subscribe a queue to a topic.
    Sub {
        addr: SocketAddr,
        queue: String,
        topic: String,
    },
    /// Unsubscribe a queue from a topic.
    Unsub {
        addr: SocketAddr,
        queue: String,
        topic: String,
    },
    /// Retrieve one message from a queue (waits until one is available).
    Get {
        addr: SocketAddr,
        queue: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Start {
            config,
            address,
            port,
            debug,
        } => {
            let cfg_path = std::env::var("FANMQ_CONFIG").ok().or(config);
            let mut cfg: Config = match cfg_path {
                Some(path) => load_config(path)?,
                None => Config::default(),
            };

            if let Some(address) = address {
                cfg.server.bind_addr = address;
            }
            if let Some(port) = port {
                cfg.server.port = port;
            }
            if debug {
                cfg.log.debug = true;
            }

            init_logging(cfg.log.debug);
            serve(cfg).await?;
        }
        Command::Pub {
            addr,
            topic,
            message,
        } => {
            request(addr, "PUT", &format!("/topic/{topic}"), Some(message.as_bytes())).await?;
        }
        Command::Sub { addr, queue, topic } => {
            request(addr, "PUT", &format!("/subscription/{queue}/{topic}"), None).await?;
        }
        Command::Unsub { addr, queue, topic } => {
            request(addr, "DELETE", &format!("/subscription/{queue}/{topic}"), None).await?;
        }
        Command::Get { addr, queue } => {
            request(addr, "GET", &format!("/queue/{queue}"), None).await?;
        }
    }

    Ok(())
}

// ───────────────────────────────────────────────────────────
// Minimal HTTP/1.0 client
// ───────────────────────────────────────────────────────────

/// Writes one HTTP/1.0 request and prints the response body.
///
/// HTTP/1.0 means the broker closes the connection after responding, so
/// the response is simply everything up to EOF.
async fn request(
    addr: SocketAddr,
    method: &str,
    uri: &str,
    body: Option<&[u8]>,
) -> anyhow::Result<()> {
    let mut stream = TcpStream::connect(addr).await?;

    let mut head = format!("{method} {uri} HTTP/1.0\r\n");
    match body {
        Some(body) => {
            head.push_str(&format!("Content-Length: {}\r\n\r\n", body.len()));
        }
        None => head.push_str("\r\n"),
    }

    stream.write_all(head.as_bytes()).await?;
    if let Some(body) = body {
        stream.write_all(body).await?;
    }
    stream.flush().await?;

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await?;

    let text = String::from_utf8_lossy(&response);
    match text.split_once("\r\n\r\n") {
        Some((_, body)) => print!("{body}"),
        None => print!("{text}"),
    }

    Ok(())
}
