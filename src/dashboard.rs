//! Dashboard overview: today's counters, recent logs and upcoming doses.
//!
//! Counters are passed through as supplied. The adherence rate is the only
//! derived figure, and which value is authoritative (stored or derived from
//! completed/scheduled) is chosen by configuration.

use serde::Serialize;

use crate::config::AppConfig;
use crate::error::IntegrityViolation;
use crate::models::{
    percent_rounded, AdherenceSource, DailyCounters, MedicationLog, ScheduledDose,
};
use crate::provider::DataProvider;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Stat cards for the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_patients: u32,
    pub medications_today: u32,
    pub completed_today: u32,
    pub missed_today: u32,
    /// Authoritative rate, per `adherence_source`.
    pub adherence_rate: u8,
    /// Rate exactly as supplied with the counters.
    pub reported_adherence_rate: u8,
    /// `round(100 * completed / scheduled)`; `None` when nothing was scheduled.
    pub derived_adherence_rate: Option<u8>,
    /// Source that actually produced `adherence_rate`.
    pub adherence_source: AdherenceSource,
    pub integrity_violations: Vec<IntegrityViolation>,
}

/// Everything the dashboard screen shows, in one fetch.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub summary: DashboardSummary,
    pub recent_logs: Vec<MedicationLog>,
    pub upcoming: Vec<ScheduledDose>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Build the stat cards from raw counters.
///
/// With `AdherenceSource::Derived` and zero scheduled doses the derived rate
/// is undefined, so the stored rate is used and reported as the source.
pub fn summarize(counters: &DailyCounters, source: AdherenceSource) -> DashboardSummary {
    let derived = percent_rounded(counters.completed_today, counters.medications_today);

    let (adherence_rate, effective_source) = match (source, derived) {
        (AdherenceSource::Derived, Some(rate)) => (rate, AdherenceSource::Derived),
        _ => (counters.adherence_rate, AdherenceSource::Stored),
    };

    let mut integrity_violations = Vec::new();
    let accounted = counters.completed_today.checked_add(counters.missed_today);
    if accounted != Some(counters.medications_today) {
        integrity_violations.push(IntegrityViolation::new(
            "daily counters",
            format!(
                "completed ({}) + missed ({}) != scheduled ({})",
                counters.completed_today, counters.missed_today, counters.medications_today
            ),
        ));
    }
    if let Some(rate) = derived {
        if rate != counters.adherence_rate {
            integrity_violations.push(IntegrityViolation::new(
                "daily counters",
                format!(
                    "reported rate {} differs from derived rate {rate}",
                    counters.adherence_rate
                ),
            ));
        }
    }

    for violation in &integrity_violations {
        tracing::warn!(detail = %violation.detail, "Dashboard counters inconsistent");
    }

    DashboardSummary {
        total_patients: counters.total_patients,
        medications_today: counters.medications_today,
        completed_today: counters.completed_today,
        missed_today: counters.missed_today,
        adherence_rate,
        reported_adherence_rate: counters.adherence_rate,
        derived_adherence_rate: derived,
        adherence_source: effective_source,
        integrity_violations,
    }
}

/// Newest logs first, at most `limit` entries.
pub fn recent_logs(logs: &[MedicationLog], limit: usize) -> Vec<MedicationLog> {
    let mut sorted = logs.to_vec();
    sorted.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
    sorted.truncate(limit);
    sorted
}

/// Scheduled doses in chronological order.
pub fn upcoming_doses(doses: &[ScheduledDose]) -> Vec<ScheduledDose> {
    let mut sorted = doses.to_vec();
    sorted.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at));
    sorted
}

/// Top-level assembly for the dashboard screen.
pub fn assemble_dashboard(provider: &dyn DataProvider, config: &AppConfig) -> DashboardData {
    let summary = summarize(&provider.fetch_daily_counters(), config.adherence_source);
    let recent_logs = recent_logs(&provider.fetch_medication_logs(), config.recent_log_limit);
    let upcoming = upcoming_doses(&provider.fetch_scheduled_doses());

    DashboardData {
        summary,
        recent_logs,
        upcoming,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
