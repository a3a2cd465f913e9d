mod app;
mod bridge;
mod logging;

use anyhow::{Result, anyhow};
use his_core::command::Screen;
use his_core::window::ViewNavigator;
use his_infrastructure::{ConfigService, HisPaths};
use tokio::io::BufReader;
use tokio::sync::mpsc;

use crate::app::{AppBootstrap, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config_service = ConfigService::new();
    let config = config_service
        .get_config()
        .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    let log_dir = match HisPaths::logs_dir() {
        Ok(dir) => Some(dir),
        Err(e) => {
            eprintln!("No log directory available, logging to stderr only: {}", e);
            None
        }
    };
    let _log_guard = logging::init(&config.logging.level, log_dir.as_deref())?;

    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    let writer = bridge::spawn_writer(outbound_rx, tokio::io::stdout());

    let AppBootstrap { app_state } = app::bootstrap(config, outbound_tx);
    let AppState {
        dispatcher,
        navigator,
        config,
    } = app_state;
    tracing::info!(
        "[Bootstrap] Ready (config {:?}, level {})",
        config_service.path(),
        config.logging.level
    );

    // The window always opens on the login screen.
    drop(navigator.navigate(Screen::Login));

    let result = bridge::run(BufReader::new(tokio::io::stdin()), dispatcher, navigator).await;

    // All senders are gone once the bridge returns, so the writer drains and exits.
    if let Err(e) = writer.await {
        tracing::error!("[Bootstrap] Output writer panicked: {}", e);
    }
    tracing::info!("[Bootstrap] Shutting down");
    result
}
