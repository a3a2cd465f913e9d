//! Window capabilities backed by the bridge's outbound channel.

use std::sync::Mutex;

use his_core::command::{Screen, UiEvent};
use his_core::window::{EventSink, ScreenLoad, ScreenLoadHandle, ViewNavigator};
use tokio::sync::mpsc::UnboundedSender;

use super::protocol::Outbound;

/// Sends events to the UI process.
#[derive(Clone)]
pub struct BridgeEventSink {
    tx: UnboundedSender<Outbound>,
}

impl BridgeEventSink {
    pub fn new(tx: UnboundedSender<Outbound>) -> Self {
        Self { tx }
    }
}

impl EventSink for BridgeEventSink {
    fn emit(&self, event: UiEvent) {
        if self.tx.send(Outbound::Event(event)).is_err() {
            tracing::warn!("[Bridge] Output closed, event dropped");
        }
    }
}

/// Asks the UI process to load screens and tracks the load in flight.
///
/// Only the latest navigation can complete. Navigating again abandons the
/// previous load, so nothing is pushed into a screen that was replaced.
pub struct BridgeNavigator {
    tx: UnboundedSender<Outbound>,
    loads: Mutex<Loads>,
}

#[derive(Default)]
struct Loads {
    pending: Option<(Screen, ScreenLoadHandle)>,
    /// Set once the UI is gone; no load can complete after that.
    closed: bool,
}

impl BridgeNavigator {
    pub fn new(tx: UnboundedSender<Outbound>) -> Self {
        Self {
            tx,
            loads: Mutex::new(Loads::default()),
        }
    }

    /// Called when the UI reports that `screen` has finished loading.
    pub fn screen_loaded(&self, screen: Screen) {
        let mut loads = self.loads.lock().unwrap_or_else(|e| e.into_inner());
        match loads.pending.take() {
            Some((expected, handle)) if expected == screen => handle.finish(),
            Some(other) => {
                tracing::debug!(
                    "[Bridge] {} loaded while waiting for {}, ignoring",
                    screen,
                    other.0
                );
                loads.pending = Some(other);
            }
            None => tracing::debug!("[Bridge] {} loaded, nothing waiting", screen),
        }
    }

    /// Abandons the load in flight and every later one.
    ///
    /// Called when the UI input closes, so commands waiting on a screen give
    /// up instead of waiting forever.
    pub fn close(&self) {
        let mut loads = self.loads.lock().unwrap_or_else(|e| e.into_inner());
        loads.closed = true;
        if let Some((screen, _handle)) = loads.pending.take() {
            tracing::debug!("[Bridge] Abandoning pending load of {}", screen);
        }
    }
}

impl ViewNavigator for BridgeNavigator {
    fn navigate(&self, screen: Screen) -> ScreenLoad {
        let (handle, load) = ScreenLoad::pending();
        {
            let mut loads = self.loads.lock().unwrap_or_else(|e| e.into_inner());
            if loads.closed {
                tracing::debug!("[Bridge] Window closed, load of {} abandoned", screen);
                drop(handle);
            } else {
                loads.pending = Some((screen, handle));
            }
        }
        if self.tx.send(Outbound::Navigate { screen }).is_err() {
            tracing::warn!("[Bridge] Output closed, navigation to {} dropped", screen);
        }
        load
    }
}
