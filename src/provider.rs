//! Data provider seam.
//!
//! Every screen reads its collections through [`DataProvider`], so the
//! aggregation code never depends on where the data lives.
//! [`SampleDataProvider`] ships the fixed demo collections.

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{
    AdherenceRecord, DailyCounters, DoseStatus, Gender, MedicationLog, MedicationStat, Patient,
    ScheduledDose, WeeklyTrend,
};

/// Source of the read-only collections behind the dashboard and reports.
pub trait DataProvider: Send + Sync {
    /// Initial roster contents.
    fn fetch_patients(&self) -> Vec<Patient>;

    fn fetch_medication_logs(&self) -> Vec<MedicationLog>;

    fn fetch_scheduled_doses(&self) -> Vec<ScheduledDose>;

    fn fetch_daily_counters(&self) -> DailyCounters;

    fn fetch_adherence_records(&self) -> Vec<AdherenceRecord>;

    fn fetch_medication_stats(&self) -> Vec<MedicationStat>;

    /// Chronological, oldest week first.
    fn fetch_weekly_trends(&self) -> Vec<WeeklyTrend>;
}

/// Hard-coded demo data for the MedTracker screens.
#[derive(Debug, Clone)]
pub struct SampleDataProvider {
    log_date: NaiveDate,
}

impl SampleDataProvider {
    pub fn new() -> Self {
        Self {
            log_date: date(2024, 1, 16),
        }
    }

    fn at(&self, hour: u32, minute: u32) -> NaiveDateTime {
        self.log_date
            .and_hms_opt(hour, minute, 0)
            .unwrap_or_else(|| self.log_date.and_time(chrono::NaiveTime::MIN))
    }
}

impl Default for SampleDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl DataProvider for SampleDataProvider {
    fn fetch_patients(&self) -> Vec<Patient> {
        vec![
            Patient {
                id: 1,
                name: "John Smith".into(),
                age: 65,
                gender: Some(Gender::Male),
                phone: "(555) 123-4567".into(),
                email: "john.smith@email.com".into(),
                date_of_birth: Some(date(1958, 3, 15)),
                address: "123 Main St, City, State 12345".into(),
                emergency_contact: "Jane Smith - (555) 987-6543".into(),
                medical_conditions: labels(&["Hypertension", "Diabetes Type 2"]),
                active_medications: 4,
                last_visit: date(2024, 1, 15),
            },
            Patient {
                id: 2,
                name: "Mary Johnson".into(),
                age: 72,
                gender: Some(Gender::Female),
                phone: "(555) 234-5678".into(),
                email: "mary.johnson@email.com".into(),
                date_of_birth: Some(date(1951, 8, 22)),
                address: "456 Oak Ave, City, State 12345".into(),
                emergency_contact: "Robert Johnson - (555) 876-5432".into(),
                medical_conditions: labels(&["Diabetes Type 2", "High Cholesterol"]),
                active_medications: 3,
                last_visit: date(2024, 1, 12),
            },
            Patient {
                id: 3,
                name: "Robert Davis".into(),
                age: 58,
                gender: Some(Gender::Male),
                phone: "(555) 345-6789".into(),
                email: "robert.davis@email.com".into(),
                date_of_birth: Some(date(1965, 11, 8)),
                address: "789 Pine St, City, State 12345".into(),
                emergency_contact: "Linda Davis - (555) 765-4321".into(),
                medical_conditions: labels(&["High Cholesterol", "Hypertension"]),
                active_medications: 2,
                last_visit: date(2024, 1, 10),
            },
        ]
    }

    fn fetch_medication_logs(&self) -> Vec<MedicationLog> {
        let log = |id, patient: &str, medication: &str, (h, m): (u32, u32), status| MedicationLog {
            id,
            patient: patient.into(),
            medication: medication.into(),
            logged_at: self.at(h, m),
            status,
        };
        vec![
            log(1, "John Smith", "Lisinopril 10mg", (8, 30), DoseStatus::Taken),
            log(2, "Mary Johnson", "Metformin 500mg", (8, 45), DoseStatus::Taken),
            log(3, "Robert Davis", "Atorvastatin 20mg", (9, 0), DoseStatus::Missed),
            log(4, "Sarah Wilson", "Amlodipine 5mg", (9, 15), DoseStatus::Taken),
        ]
    }

    fn fetch_scheduled_doses(&self) -> Vec<ScheduledDose> {
        let dose = |id, patient: &str, medication: &str, (h, m): (u32, u32)| ScheduledDose {
            id,
            patient: patient.into(),
            medication: medication.into(),
            scheduled_at: self.at(h, m),
        };
        vec![
            dose(1, "John Smith", "Metoprolol 25mg", (12, 0)),
            dose(2, "Mary Johnson", "Metformin 500mg", (12, 30)),
            dose(3, "Lisa Brown", "Levothyroxine 50mcg", (13, 0)),
        ]
    }

    fn fetch_daily_counters(&self) -> DailyCounters {
        DailyCounters {
            total_patients: 24,
            medications_today: 156,
            completed_today: 142,
            missed_today: 14,
            adherence_rate: 91,
        }
    }

    fn fetch_adherence_records(&self) -> Vec<AdherenceRecord> {
        let rec = |patient: &str, total_meds, taken, missed, adherence_rate| AdherenceRecord {
            patient: patient.into(),
            total_meds,
            taken,
            missed,
            adherence_rate,
        };
        vec![
            rec("John Smith", 60, 55, 5, 92),
            rec("Mary Johnson", 45, 42, 3, 93),
            rec("Robert Davis", 30, 25, 5, 83),
            rec("Sarah Wilson", 40, 38, 2, 95),
            rec("Lisa Brown", 35, 30, 5, 86),
        ]
    }

    fn fetch_medication_stats(&self) -> Vec<MedicationStat> {
        let stat = |medication: &str, prescribed, adherence_rate| MedicationStat {
            medication: medication.into(),
            prescribed,
            adherence_rate,
        };
        vec![
            stat("Lisinopril", 15, 89),
            stat("Metformin", 12, 94),
            stat("Atorvastatin", 10, 87),
            stat("Amlodipine", 8, 91),
            stat("Levothyroxine", 6, 96),
        ]
    }

    fn fetch_weekly_trends(&self) -> Vec<WeeklyTrend> {
        [("Week 1", 88), ("Week 2", 91), ("Week 3", 89), ("Week 4", 93)]
            .into_iter()
            .map(|(week, adherence_rate)| WeeklyTrend {
                week: week.into(),
                adherence_rate,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_patients_have_sequential_ids() {
        let ids: Vec<_> = SampleDataProvider::new()
            .fetch_patients()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn sample_adherence_records_are_consistent() {
        for record in SampleDataProvider::new().fetch_adherence_records() {
            assert!(
                record.check_integrity().is_empty(),
                "{} has inconsistent tallies",
                record.patient
            );
        }
    }

    #[test]
    fn sample_counters_add_up() {
        let c = SampleDataProvider::new().fetch_daily_counters();
        assert_eq!(c.completed_today + c.missed_today, c.medications_today);
    }

    #[test]
    fn sample_logs_share_one_day() {
        let logs = SampleDataProvider::new().fetch_medication_logs();
        assert_eq!(logs.len(), 4);
        assert!(logs.iter().all(|l| l.logged_at.date() == date(2024, 1, 16)));
        assert_eq!(logs[2].status, DoseStatus::Missed);
    }

    #[test]
    fn weekly_trends_are_chronological() {
        let weeks: Vec<_> = SampleDataProvider::new()
            .fetch_weekly_trends()
            .into_iter()
            .map(|w| w.week)
            .collect();
        assert_eq!(weeks, vec!["Week 1", "Week 2", "Week 3", "Week 4"]);
    }
}
