pub mod adherence;
pub mod enums;
pub mod medication;
pub mod patient;

pub use adherence::{percent_rounded, AdherenceRecord, DailyCounters, WeeklyTrend};
pub use enums::*;
pub use medication::{MedicationLog, MedicationStat, ScheduledDose};
pub use patient::{Patient, PatientDraft, PatientId};
