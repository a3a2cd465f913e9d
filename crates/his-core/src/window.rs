//! Capabilities of the application window the core drives.
//!
//! The core never renders anything. It asks a [`ViewNavigator`] to show a
//! screen and hands events to an [`EventSink`]; the host decides how both
//! reach the UI.

use tokio::sync::oneshot;

use crate::command::{Screen, UiEvent};

/// Resolves once the screen requested by a navigation has finished loading.
#[derive(Debug)]
pub struct ScreenLoad {
    rx: oneshot::Receiver<()>,
}

impl ScreenLoad {
    /// Creates a pending load and the handle used to complete it.
    pub fn pending() -> (ScreenLoadHandle, Self) {
        let (tx, rx) = oneshot::channel();
        (ScreenLoadHandle { tx }, Self { rx })
    }

    /// A load that has already completed.
    pub fn ready() -> Self {
        let (handle, load) = Self::pending();
        handle.finish();
        load
    }

    /// Waits for the screen to finish loading.
    ///
    /// Returns `false` when the load was abandoned, e.g. the window navigated
    /// elsewhere before the screen reported in.
    pub async fn finished(self) -> bool {
        self.rx.await.is_ok()
    }
}

/// Completes a [`ScreenLoad`]. Dropping it abandons the load.
#[derive(Debug)]
pub struct ScreenLoadHandle {
    tx: oneshot::Sender<()>,
}

impl ScreenLoadHandle {
    pub fn finish(self) {
        let _ = self.tx.send(());
    }
}

/// Loads screens into the single application window.
pub trait ViewNavigator: Send + Sync {
    /// Starts loading `screen` and returns its load signal.
    fn navigate(&self, screen: Screen) -> ScreenLoad;
}

/// Delivers events to the window.
///
/// Replies and pushes share one sink: the process drives exactly one window.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: UiEvent);
}
