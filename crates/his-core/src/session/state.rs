use std::sync::Arc;

use tokio::sync::RwLock;

use super::model::{Identity, Role, Session};
use crate::patient::{Patient, normalize_in_charge_id};

/// Shared handle to the process-wide session.
///
/// Clones point at the same session. The lock is only held for the length of
/// a single read or write; handlers never keep it across a remote call, so
/// concurrent handlers interleave freely.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    inner: Arc<RwLock<Session>>,
}

impl SessionState {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle around an existing session value.
    pub fn from_session(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    /// Replaces the identity fields. The selected patient is kept.
    pub async fn set_identity(&self, doctor_id: impl Into<String>, role: Role) {
        let mut session = self.inner.write().await;
        session.doctor_id = Some(doctor_id.into());
        session.role = role;
    }

    /// Replaces the selected patient wholesale.
    pub async fn select_patient(&self, patient: Patient) {
        self.inner.write().await.selected_patient = Some(patient);
    }

    /// Applies an assignment change made elsewhere to the open patient.
    ///
    /// Returns the updated patient when `patient_id` is the selected patient,
    /// so the caller can re-render the chart view. Returns `None` and changes
    /// nothing otherwise.
    pub async fn patch_selected_patient_assignment(
        &self,
        patient_id: &str,
        new_in_charge_id: &str,
    ) -> Option<Patient> {
        let mut session = self.inner.write().await;
        let patient = session
            .selected_patient
            .as_mut()
            .filter(|p| p.id == patient_id)?;
        patient.in_charge_id = normalize_in_charge_id(new_in_charge_id);
        Some(patient.clone())
    }

    pub async fn snapshot(&self) -> Session {
        self.inner.read().await.clone()
    }

    pub async fn identity(&self) -> Option<Identity> {
        self.inner.read().await.identity()
    }

    pub async fn role(&self) -> Role {
        self.inner.read().await.role
    }

    pub async fn selected_patient(&self) -> Option<Patient> {
        self.inner.read().await.selected_patient.clone()
    }
}
