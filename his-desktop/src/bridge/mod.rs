//! Bridge between the main process and the UI process.
//!
//! The UI writes one JSON message per line to our stdin and reads events and
//! navigation requests from our stdout. Each command is dispatched on its own
//! task, so a slow remote call never blocks the next command.

mod protocol;
mod window;

pub use protocol::{Inbound, Outbound};
pub use window::{BridgeEventSink, BridgeNavigator};

use std::sync::Arc;

use anyhow::Result;
use his_application::CommandDispatcher;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::{JoinHandle, JoinSet};

/// Reads inbound messages until EOF, then waits for in-flight commands.
pub async fn run<R>(
    input: R,
    dispatcher: CommandDispatcher,
    navigator: Arc<BridgeNavigator>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut in_flight = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let inbound = match serde_json::from_str::<Inbound>(&line) {
            Ok(inbound) => inbound,
            Err(e) => {
                tracing::warn!("[Bridge] Malformed message ignored: {}", e);
                continue;
            }
        };

        match inbound {
            Inbound::ScreenLoaded { screen } => navigator.screen_loaded(screen),
            Inbound::Command { command, payload } => {
                let dispatcher = dispatcher.clone();
                in_flight.spawn(async move {
                    if let Err(e) = dispatcher.dispatch_message(&command, payload).await {
                        tracing::error!("[Bridge] Unhandled failure in {}: {}", command, e);
                    }
                });
            }
        }

        // Reap finished commands so the set does not grow without bound.
        while let Some(joined) = in_flight.try_join_next() {
            if let Err(e) = joined {
                tracing::error!("[Bridge] Command task panicked: {}", e);
            }
        }
    }

    // No screen can report in once the UI is gone.
    navigator.close();
    tracing::info!(
        "[Bridge] Input closed, waiting for {} command(s)",
        in_flight.len()
    );
    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            tracing::error!("[Bridge] Command task panicked: {}", e);
        }
    }
    Ok(())
}

/// Writes outbound messages as JSON lines until every sender is dropped.
pub fn spawn_writer<W>(mut rx: UnboundedReceiver<Outbound>, mut output: W) -> JoinHandle<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let line = match message.to_line() {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!("[Bridge] Failed to serialize outbound message: {}", e);
                    continue;
                }
            };
            if let Err(e) = output.write_all(line.as_bytes()).await {
                tracing::error!("[Bridge] Output write failed, stopping writer: {}", e);
                break;
            }
            if let Err(e) = output.flush().await {
                tracing::error!("[Bridge] Output flush failed, stopping writer: {}", e);
                break;
            }
        }
    })
}
