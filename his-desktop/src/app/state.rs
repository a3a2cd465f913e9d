use std::sync::Arc;

use his_application::CommandDispatcher;
use his_core::config::ClientConfig;

use crate::bridge::BridgeNavigator;

/// Everything the bridge needs once the process is wired up.
pub struct AppState {
    pub dispatcher: CommandDispatcher,
    /// Concrete navigator, kept so `screen-loaded` messages can reach it.
    pub navigator: Arc<BridgeNavigator>,
    pub config: ClientConfig,
}
