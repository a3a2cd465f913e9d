use std::sync::Arc;

use his_application::{CommandDispatcher, DispatchPolicy};
use his_core::config::ClientConfig;
use his_core::gateway::RemoteGateway;
use his_core::window::{EventSink, ViewNavigator};
use his_core::SessionState;
use his_infrastructure::HttpGateway;
use tokio::sync::mpsc::UnboundedSender;

use crate::app::AppState;
use crate::bridge::{BridgeEventSink, BridgeNavigator, Outbound};

pub struct AppBootstrap {
    pub app_state: AppState,
}

/// Composition root: wires the session, record API and window together.
///
/// Every outbound message, event or navigation, goes through `outbound_tx`
/// so the UI sees them in the order they were produced.
pub fn bootstrap(config: ClientConfig, outbound_tx: UnboundedSender<Outbound>) -> AppBootstrap {
    tracing::info!("[Bootstrap] Record API at {}", config.api.base_url);
    let gateway: Arc<dyn RemoteGateway> = Arc::new(HttpGateway::new(&config.api.base_url));

    let navigator = Arc::new(BridgeNavigator::new(outbound_tx.clone()));
    let navigator_dyn: Arc<dyn ViewNavigator> = navigator.clone();
    let events: Arc<dyn EventSink> = Arc::new(BridgeEventSink::new(outbound_tx));

    let policy = DispatchPolicy::from_config(&config);
    tracing::info!(
        "[Bootstrap] Gate scope {:?}, admin error replies {}",
        policy.gate_scope,
        policy.admin_error_replies
    );

    let dispatcher = CommandDispatcher::new(
        SessionState::new(),
        gateway,
        navigator_dyn,
        events,
        policy,
    );

    AppBootstrap {
        app_state: AppState {
            dispatcher,
            navigator,
            config,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use his_core::GateScope;
    use his_core::command::Screen;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_bootstrap_starts_logged_out() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut config = ClientConfig::default();
        config.authorization.gate_scope = GateScope::AllMutations;

        let AppBootstrap { app_state } = bootstrap(config, tx);

        assert!(app_state.dispatcher.session().identity().await.is_none());
        assert_eq!(app_state.config.authorization.gate_scope, GateScope::AllMutations);

        let _load = app_state.navigator.navigate(Screen::Login);
        assert_eq!(
            rx.recv().await,
            Some(Outbound::Navigate {
                screen: Screen::Login
            })
        );
    }
}
