use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::DoseStatus;

/// One recorded intake event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationLog {
    pub id: u32,
    pub patient: String,
    /// Name and strength, e.g. `"Lisinopril 10mg"`.
    pub medication: String,
    pub logged_at: NaiveDateTime,
    pub status: DoseStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledDose {
    pub id: u32,
    pub patient: String,
    pub medication: String,
    pub scheduled_at: NaiveDateTime,
}

/// Adherence for one medication across every patient it is prescribed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationStat {
    pub medication: String,
    pub prescribed: u32,
    pub adherence_rate: u8,
}
