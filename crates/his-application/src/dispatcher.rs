//! Command dispatcher.
//!
//! Each command from the window is resolved to a handler that may consult the
//! authorization gate, call the record API, update the session, navigate the
//! window and emit reply events. Handlers never hold the session lock across a
//! remote call, so the dispatcher can be cloned into one task per command.

use std::sync::Arc;

use his_core::chart::{NewChartRecord, SaveChartPayload};
use his_core::command::{Command, Credentials, Screen, UiEvent};
use his_core::config::ClientConfig;
use his_core::error::Result;
use his_core::gateway::{AdminEntity, RemoteGateway};
use his_core::messages;
use his_core::patient::{AssignmentUpdate, Patient};
use his_core::session::{Role, SessionState};
use his_core::window::{EventSink, ViewNavigator};
use his_core::{AuthorizationGate, GateScope, HisError};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

/// Dispatch behavior chosen by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPolicy {
    /// Which commands the authorization gate checks.
    pub gate_scope: GateScope,
    /// Reply `action-result` when an admin add/list/delete call fails. When
    /// false the failure is returned from [`CommandDispatcher::dispatch`]
    /// without any reply.
    pub admin_error_replies: bool,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            gate_scope: GateScope::ChartWrites,
            admin_error_replies: true,
        }
    }
}

impl DispatchPolicy {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            gate_scope: config.authorization.gate_scope,
            admin_error_replies: config.admin.error_replies,
        }
    }
}

/// Mediates between the window and the record API for the single session.
#[derive(Clone)]
pub struct CommandDispatcher {
    session: SessionState,
    gateway: Arc<dyn RemoteGateway>,
    navigator: Arc<dyn ViewNavigator>,
    events: Arc<dyn EventSink>,
    gate: AuthorizationGate,
    admin_error_replies: bool,
}

impl CommandDispatcher {
    /// Creates a dispatcher over an existing session handle.
    ///
    /// # Arguments
    ///
    /// * `session` - The process-wide session
    /// * `gateway` - Record API access
    /// * `navigator` - Screen loading for the window
    /// * `events` - Delivery of replies and pushes to the window
    /// * `policy` - Gate scope and admin failure handling
    pub fn new(
        session: SessionState,
        gateway: Arc<dyn RemoteGateway>,
        navigator: Arc<dyn ViewNavigator>,
        events: Arc<dyn EventSink>,
        policy: DispatchPolicy,
    ) -> Self {
        Self {
            session,
            gateway,
            navigator,
            events,
            gate: AuthorizationGate::new(policy.gate_scope),
            admin_error_replies: policy.admin_error_replies,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Decodes a command arriving on `channel` and handles it.
    ///
    /// An unknown channel is logged and ignored. A known channel whose payload
    /// does not decode gets that command's failure reply.
    pub async fn dispatch_message(&self, channel: &str, payload: Value) -> Result<()> {
        match Command::from_parts(channel, payload) {
            Ok(command) => self.dispatch(command).await,
            Err(e) if e.is_unknown_command() => {
                tracing::warn!("[Dispatcher] {}, ignoring", e);
                Ok(())
            }
            Err(e) => self.reject_payload(channel, e),
        }
    }

    /// Handles one command to completion.
    ///
    /// Designed failures (denials, server rejections, silent no-ops) are
    /// reported to the window and return `Ok`. `Err` is only returned for an
    /// admin call that failed while admin error replies are disabled.
    pub async fn dispatch(&self, command: Command) -> Result<()> {
        let channel = command.channel().to_string();
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("command", channel = %channel, %request_id);

        async move {
            tracing::debug!("[Dispatcher] Received {}", channel);

            let session = self.session.snapshot().await;
            if !self.gate.permits(&session, &command) {
                self.deny(&command, session.role);
                return Ok(());
            }

            match command {
                Command::RequestLogin(credentials) => self.login(credentials).await,
                Command::RequestMetadata => self.metadata().await,
                Command::PatientSelected(patient) => self.patient_selected(patient).await,
                Command::RequestPatientData => self.resend_patient_context().await,
                Command::SaveSoapSigned(payload) => self.save_chart(payload).await,
                Command::RequestHistory(patient_id) => self.history(patient_id).await,
                Command::AdminAddDept(body) => {
                    return self.admin_create(AdminEntity::Department, body).await;
                }
                Command::AdminAddPatient(body) => {
                    return self.admin_create(AdminEntity::Patient, body).await;
                }
                Command::AdminAddUser(body) => {
                    return self.admin_create(AdminEntity::User, body).await;
                }
                Command::AdminGetCharts => return self.admin_list_charts().await,
                Command::AdminDeleteChart(chart_id) => {
                    return self.admin_delete_chart(chart_id).await;
                }
                Command::AdminUpdatePatient(update) => self.admin_update_patient(update).await,
            }
            Ok(())
        }
        .instrument(span)
        .await
    }

    fn emit(&self, event: UiEvent) {
        tracing::debug!("[Dispatcher] Emitting {}", event.channel());
        self.events.emit(event);
    }

    fn reject_payload(&self, channel: &str, error: HisError) -> Result<()> {
        tracing::warn!("[Dispatcher] {}", error);
        match channel {
            "request-login" => self.emit(UiEvent::LoginFailed(messages::LOGIN_FAILED.to_string())),
            "save-soap-signed" => self.emit(UiEvent::SaveFailed(messages::SAVE_FAILED.to_string())),
            "admin-update-patient" => {
                self.emit(UiEvent::ActionResult(messages::update_failed(&error.to_string())))
            }
            "admin-add-dept" | "admin-add-patient" | "admin-add-user" | "admin-delete-chart" => {
                return self.admin_failure(error);
            }
            // Reads and navigation-only commands have no failure reply.
            _ => {}
        }
        Ok(())
    }

    fn deny(&self, command: &Command, role: Role) {
        let denial = HisError::permission_denied(role.to_string(), command.channel());
        tracing::warn!("[Dispatcher] {}", denial);
        let reply = messages::NO_WRITE_PERMISSION.to_string();
        match command {
            Command::SaveSoapSigned(_) => self.emit(UiEvent::SaveFailed(reply)),
            _ => self.emit(UiEvent::ActionResult(reply)),
        }
    }

    async fn login(&self, credentials: Credentials) {
        match self.gateway.login(&credentials).await {
            Ok(response) if response.success => {
                let role = Role::from_login(response.role.as_deref());
                self.session.set_identity(credentials.id.as_str(), role).await;
                let screen = Screen::home_for(role);
                tracing::info!(
                    "[Dispatcher] {} logged in as {}, showing {}",
                    credentials.id,
                    role,
                    screen
                );
                // Nothing is pushed to the landing screen, so its load is not awaited.
                drop(self.navigator.navigate(screen));
            }
            Ok(response) => {
                tracing::info!("[Dispatcher] Login rejected for {}", credentials.id);
                let message = response
                    .message
                    .unwrap_or_else(|| messages::LOGIN_FAILED.to_string());
                self.emit(UiEvent::LoginFailed(message));
            }
            Err(e) => {
                tracing::warn!("[Dispatcher] Login request failed: {}", e);
                self.emit(UiEvent::LoginFailed(
                    messages::SERVER_CONNECTION_FAILED.to_string(),
                ));
            }
        }
    }

    async fn metadata(&self) {
        match self.gateway.fetch_metadata().await {
            Ok(metadata) => self.emit(UiEvent::ReceiveMetadata(metadata)),
            Err(e) => tracing::warn!("[Dispatcher] Metadata fetch failed, dropping: {}", e),
        }
    }

    async fn patient_selected(&self, patient: Patient) {
        tracing::info!("[Dispatcher] Patient {} selected", patient.id);
        self.session.select_patient(patient).await;

        let load = self.navigator.navigate(Screen::Chart);
        if !load.finished().await {
            tracing::debug!("[Dispatcher] Chart screen load abandoned, nothing pushed");
            return;
        }
        self.resend_patient_context().await;
    }

    /// Pushes the open patient and the session role to the chart screen.
    async fn resend_patient_context(&self) {
        let session = self.session.snapshot().await;
        let Some(patient) = session.selected_patient else {
            tracing::debug!("[Dispatcher] No patient selected, nothing to push");
            return;
        };
        self.emit(UiEvent::InitPatientData(patient));
        self.emit(UiEvent::InitUserRole(session.role));
    }

    async fn save_chart(&self, payload: SaveChartPayload) {
        let session = self.session.snapshot().await;
        let Some(patient_id) = session.resolve_patient_id(payload.patient_id.as_deref()) else {
            tracing::debug!("[Dispatcher] Save without a patient, ignoring");
            return;
        };
        let Some(doctor_id) = session.doctor_id else {
            tracing::warn!("[Dispatcher] Save before login, ignoring");
            return;
        };

        let record = NewChartRecord::signed(payload.soap_data, &doctor_id, &patient_id);
        match self.gateway.save_chart(&record).await {
            Ok(ack) if ack.success => {
                tracing::info!("[Dispatcher] Chart saved for patient {}", patient_id);
                self.emit(UiEvent::SaveSuccess(messages::SAVED.to_string()));
            }
            Ok(ack) => {
                let message = ack
                    .message
                    .unwrap_or_else(|| messages::SAVE_FAILED.to_string());
                tracing::info!("[Dispatcher] Chart save rejected: {}", message);
                self.emit(UiEvent::SaveFailed(message));
            }
            Err(e) => {
                tracing::warn!("[Dispatcher] Chart save failed: {}", e);
                self.emit(UiEvent::SaveFailed(
                    messages::SERVER_COMMUNICATION_ERROR.to_string(),
                ));
            }
        }
    }

    async fn history(&self, explicit_patient_id: Option<String>) {
        let session = self.session.snapshot().await;
        let Some(patient_id) = session.resolve_patient_id(explicit_patient_id.as_deref()) else {
            tracing::debug!("[Dispatcher] History without a patient, ignoring");
            return;
        };

        match self.gateway.chart_history(&patient_id).await {
            Ok(records) => self.emit(UiEvent::LoadHistory(records)),
            Err(e) => tracing::warn!(
                "[Dispatcher] History fetch for {} failed, dropping: {}",
                patient_id,
                e
            ),
        }
    }

    async fn admin_create(&self, entity: AdminEntity, body: Value) -> Result<()> {
        match self.gateway.admin_create(entity, &body).await {
            Ok(()) => {
                self.emit(UiEvent::ActionResult(messages::DONE.to_string()));
                Ok(())
            }
            Err(e) => self.admin_failure(e),
        }
    }

    async fn admin_list_charts(&self) -> Result<()> {
        match self.gateway.list_charts().await {
            Ok(records) => {
                self.emit(UiEvent::AdminChartsData(records));
                Ok(())
            }
            Err(e) => self.admin_failure(e),
        }
    }

    async fn admin_delete_chart(&self, chart_id: String) -> Result<()> {
        match self.gateway.delete_chart(&chart_id).await {
            Ok(()) => {
                tracing::info!("[Dispatcher] Chart {} deleted", chart_id);
                self.emit(UiEvent::ActionResult(messages::DELETED.to_string()));
                Ok(())
            }
            Err(e) => self.admin_failure(e),
        }
    }

    fn admin_failure(&self, error: HisError) -> Result<()> {
        tracing::warn!("[Dispatcher] Admin request failed: {}", error);
        if self.admin_error_replies {
            self.emit(UiEvent::ActionResult(messages::request_failed(
                &error.to_string(),
            )));
            Ok(())
        } else {
            Err(error)
        }
    }

    async fn admin_update_patient(&self, update: AssignmentUpdate) {
        if let Err(e) = self.gateway.update_patient_assignment(&update).await {
            tracing::warn!("[Dispatcher] Assignment update for {} failed: {}", update.id, e);
            self.emit(UiEvent::ActionResult(messages::update_failed(&e.to_string())));
            return;
        }

        if let Some(patient) = self
            .session
            .patch_selected_patient_assignment(&update.id, &update.in_charge_id)
            .await
        {
            tracing::info!("[Dispatcher] Open patient {} reassigned, re-rendering", patient.id);
            self.emit(UiEvent::InitPatientData(patient));
        }
        self.emit(UiEvent::ActionResult(
            messages::ASSIGNMENT_UPDATED.to_string(),
        ));
    }
}
