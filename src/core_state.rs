//! Transport-agnostic application state.
//!
//! `CoreState` is the single shared state behind the REST layer. The roster
//! is the only mutable collection, so it sits behind a `RwLock`; everything
//! else is read through the [`DataProvider`] on each request.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::AppConfig;
use crate::dashboard::{self, DashboardData, DashboardSummary};
use crate::error::TrackerError;
use crate::models::{MedicationLog, Patient, PatientDraft, PatientId};
use crate::provider::DataProvider;
use crate::reports::{self, AdherenceReport};
use crate::roster::{self, Roster};

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

/// Shared state, wrapped in `Arc` at startup and handed to every handler.
pub struct CoreState {
    roster: RwLock<Roster>,
    provider: Arc<dyn DataProvider>,
    pub config: AppConfig,
}

impl CoreState {
    /// Seed the roster from the provider's initial patient list.
    pub fn new(provider: Arc<dyn DataProvider>, config: AppConfig) -> Self {
        let roster = Roster::new(provider.fetch_patients());
        Self {
            roster: RwLock::new(roster),
            provider,
            config,
        }
    }

    // ── Roster access ───────────────────────────────────────

    pub fn read_roster(&self) -> Result<RwLockReadGuard<'_, Roster>, CoreError> {
        self.roster.read().map_err(|_| CoreError::LockPoisoned)
    }

    pub fn write_roster(&self) -> Result<RwLockWriteGuard<'_, Roster>, CoreError> {
        self.roster.write().map_err(|_| CoreError::LockPoisoned)
    }

    pub fn provider(&self) -> &dyn DataProvider {
        self.provider.as_ref()
    }

    // ── Patients ────────────────────────────────────────────

    /// Case-insensitive name/email search. Empty query returns everyone.
    pub fn search_patients(&self, query: &str) -> Result<Vec<Patient>, CoreError> {
        Ok(self.read_roster()?.search(query))
    }

    pub fn get_patient(&self, id: PatientId) -> Result<Patient, CoreError> {
        Ok(self.read_roster()?.get(id)?.clone())
    }

    pub fn register_patient(&self, draft: &PatientDraft) -> Result<Patient, CoreError> {
        let today = chrono::Local::now().date_naive();
        let patient = self.write_roster()?.register(
            draft,
            self.config.contact_validation,
            today,
        )?;
        tracing::info!(patient_id = patient.id, "Patient registered");
        Ok(patient)
    }

    pub fn remove_patient(&self, id: PatientId) -> Result<Patient, CoreError> {
        let removed = self.write_roster()?.remove(id)?;
        tracing::info!(patient_id = id, "Patient removed");
        Ok(removed)
    }

    /// Medication logs recorded under the patient's name, newest first.
    pub fn patient_logs(&self, id: PatientId) -> Result<Vec<MedicationLog>, CoreError> {
        let patient = self.get_patient(id)?;
        let logs = roster::logs_for_patient(&self.provider.fetch_medication_logs(), &patient);
        Ok(dashboard::recent_logs(&logs, logs.len()))
    }

    // ── Dashboard & reports ─────────────────────────────────

    pub fn dashboard(&self) -> DashboardData {
        dashboard::assemble_dashboard(self.provider(), &self.config)
    }

    pub fn dashboard_summary(&self) -> DashboardSummary {
        dashboard::summarize(
            &self.provider.fetch_daily_counters(),
            self.config.adherence_source,
        )
    }

    pub fn adherence_report(&self, patient: Option<&str>) -> Result<AdherenceReport, CoreError> {
        Ok(reports::build_report(
            self.provider(),
            &self.config.tiers,
            patient,
        )?)
    }
}

// ═══════════════════════════════════════════════════════════
// CoreError
// ═══════════════════════════════════════════════════════════

/// Errors from CoreState operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}
