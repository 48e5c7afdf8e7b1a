//! Adherence reports: overall aggregates, tiers and weekly trend.
//!
//! `average_adherence` is the plain mean of per-patient rates. It is NOT
//! weighted by dose volume: a patient with 30 scheduled doses counts as much
//! as one with 60. A dose-weighted mean (total taken / total scheduled) can
//! differ materially whenever panel sizes and rates vary together.

use serde::Serialize;

use crate::config::TierThresholds;
use crate::error::{IntegrityViolation, TrackerError};
use crate::models::{AdherenceRecord, AdherenceTier, MedicationStat, TrendDirection, WeeklyTrend};
use crate::provider::DataProvider;

// ═══════════════════════════════════════════
// View types: serialised to frontend
// ═══════════════════════════════════════════

/// Overview cards at the top of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_patients: usize,
    /// `None` when there are no records.
    pub average_adherence: Option<u8>,
    pub total_medications: u64,
    pub total_missed: u64,
    pub integrity_violations: Vec<IntegrityViolation>,
}

/// Badge data attached to every rated row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierBadge {
    pub tier: AdherenceTier,
    pub label: &'static str,
    pub variant: &'static str,
}

impl From<AdherenceTier> for TierBadge {
    fn from(tier: AdherenceTier) -> Self {
        Self {
            tier,
            label: tier.label(),
            variant: tier.badge(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientAdherenceRow {
    #[serde(flatten)]
    pub record: AdherenceRecord,
    pub badge: TierBadge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicationPerformanceRow {
    #[serde(flatten)]
    pub stat: MedicationStat,
    pub badge: TierBadge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub week: String,
    pub adherence_rate: u8,
    /// Change from the previous week; `None` for the first week.
    pub direction: Option<TrendDirection>,
}

/// Full adherence report screen.
#[derive(Debug, Clone, Serialize)]
pub struct AdherenceReport {
    pub summary: ReportSummary,
    pub patients: Vec<PatientAdherenceRow>,
    pub medications: Vec<MedicationPerformanceRow>,
    pub weekly_trends: Vec<TrendPoint>,
    pub thresholds: TierThresholds,
}

// ═══════════════════════════════════════════
// Aggregation
// ═══════════════════════════════════════════

/// Overall figures across every record. Never fails; inconsistent tallies
/// are listed in `integrity_violations` and still counted as given.
pub fn aggregate(records: &[AdherenceRecord]) -> ReportSummary {
    let count = u64::try_from(records.len()).unwrap_or(u64::MAX);
    let rate_sum: u64 = records.iter().map(|r| u64::from(r.adherence_rate)).sum();
    let average_adherence = if count == 0 {
        None
    } else {
        // round(sum / count), halves up
        Some(u8::try_from((2 * rate_sum + count) / (2 * count)).unwrap_or(u8::MAX))
    };

    let integrity_violations: Vec<IntegrityViolation> = records
        .iter()
        .flat_map(|r| {
            r.check_integrity()
                .into_iter()
                .map(move |detail| IntegrityViolation::new(r.patient.clone(), detail))
        })
        .collect();

    for violation in &integrity_violations {
        tracing::warn!(
            patient = %violation.subject,
            detail = %violation.detail,
            "Adherence record inconsistent"
        );
    }

    ReportSummary {
        total_patients: records.len(),
        average_adherence,
        total_medications: records.iter().map(|r| u64::from(r.total_meds)).sum(),
        total_missed: records.iter().map(|r| u64::from(r.missed)).sum(),
        integrity_violations,
    }
}

/// Tier for a rate: `>= excellent` Excellent, `>= good` Good, else Needs Attention.
pub fn classify_tier(rate: u8, tiers: &TierThresholds) -> AdherenceTier {
    if rate >= tiers.excellent {
        AdherenceTier::Excellent
    } else if rate >= tiers.good {
        AdherenceTier::Good
    } else {
        AdherenceTier::NeedsAttention
    }
}

/// Direction of each week relative to the one before. Ties are `Flat`.
pub fn trend_directions(trends: &[WeeklyTrend]) -> Vec<Option<TrendDirection>> {
    let mut directions = Vec::with_capacity(trends.len());
    if trends.is_empty() {
        return directions;
    }
    directions.push(None);
    directions.extend(trends.windows(2).map(|pair| {
        Some(match pair[1].adherence_rate.cmp(&pair[0].adherence_rate) {
            std::cmp::Ordering::Greater => TrendDirection::Up,
            std::cmp::Ordering::Less => TrendDirection::Down,
            std::cmp::Ordering::Equal => TrendDirection::Flat,
        })
    }));
    directions
}

pub fn tier_patients(records: &[AdherenceRecord], tiers: &TierThresholds) -> Vec<PatientAdherenceRow> {
    records
        .iter()
        .map(|record| PatientAdherenceRow {
            record: record.clone(),
            badge: classify_tier(record.adherence_rate, tiers).into(),
        })
        .collect()
}

pub fn tier_medications(
    stats: &[MedicationStat],
    tiers: &TierThresholds,
) -> Vec<MedicationPerformanceRow> {
    stats
        .iter()
        .map(|stat| MedicationPerformanceRow {
            stat: stat.clone(),
            badge: classify_tier(stat.adherence_rate, tiers).into(),
        })
        .collect()
}

pub fn trend_points(trends: &[WeeklyTrend]) -> Vec<TrendPoint> {
    trends
        .iter()
        .zip(trend_directions(trends))
        .map(|(week, direction)| TrendPoint {
            week: week.week.clone(),
            adherence_rate: week.adherence_rate,
            direction,
        })
        .collect()
}

/// Top-level assembly: the whole report in a single call.
///
/// `patient` narrows the per-patient rows and the summary to one patient
/// (matched by name, ignoring case). Medication and weekly figures are
/// practice-wide and are returned unchanged.
pub fn build_report(
    provider: &dyn DataProvider,
    tiers: &TierThresholds,
    patient: Option<&str>,
) -> Result<AdherenceReport, TrackerError> {
    let mut records = provider.fetch_adherence_records();

    if let Some(name) = patient.map(str::trim).filter(|n| !n.is_empty()) {
        records.retain(|r| r.patient.trim().eq_ignore_ascii_case(name));
        if records.is_empty() {
            return Err(TrackerError::not_found("adherence record", name));
        }
    }

    Ok(AdherenceReport {
        summary: aggregate(&records),
        patients: tier_patients(&records, tiers),
        medications: tier_medications(&provider.fetch_medication_stats(), tiers),
        weekly_trends: trend_points(&provider.fetch_weekly_trends()),
        thresholds: *tiers,
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SampleDataProvider;

    fn rated(rates: &[u8]) -> Vec<AdherenceRecord> {
        rates
            .iter()
            .enumerate()
            .map(|(i, &rate)| AdherenceRecord {
                patient: format!("Patient {i}"),
                total_meds: 100,
                taken: u32::from(rate),
                missed: 100 - u32::from(rate),
                adherence_rate: rate,
            })
            .collect()
    }

    fn weeks(rates: &[u8]) -> Vec<WeeklyTrend> {
        rates
            .iter()
            .enumerate()
            .map(|(i, &rate)| WeeklyTrend {
                week: format!("Week {}", i + 1),
                adherence_rate: rate,
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // aggregate
    // -----------------------------------------------------------------------

    #[test]
    fn average_is_rounded_unweighted_mean() {
        let summary = aggregate(&rated(&[92, 93, 83, 95, 86]));
        // 449 / 5 = 89.8
        assert_eq!(summary.average_adherence, Some(90));
        assert_eq!(summary.total_patients, 5);
    }

    #[test]
    fn sample_totals() {
        let records = SampleDataProvider::new().fetch_adherence_records();
        let summary = aggregate(&records);
        assert_eq!(summary.average_adherence, Some(90));
        assert_eq!(summary.total_medications, 210);
        assert_eq!(summary.total_missed, 20);
        assert!(summary.integrity_violations.is_empty());
    }

    #[test]
    fn average_ignores_dose_volume() {
        let records = vec![
            AdherenceRecord {
                patient: "Large panel".into(),
                total_meds: 1000,
                taken: 500,
                missed: 500,
                adherence_rate: 50,
            },
            AdherenceRecord {
                patient: "Small panel".into(),
                total_meds: 10,
                taken: 10,
                missed: 0,
                adherence_rate: 100,
            },
        ];
        assert_eq!(aggregate(&records).average_adherence, Some(75));
    }

    #[test]
    fn average_rounds_half_up() {
        assert_eq!(aggregate(&rated(&[90, 91])).average_adherence, Some(91));
        assert_eq!(aggregate(&rated(&[90, 90, 91])).average_adherence, Some(90));
    }

    #[test]
    fn large_roster_counts_and_totals_are_exact() {
        let rates: Vec<u8> = (0..70_000).map(|i| if i % 2 == 0 { 100 } else { 81 }).collect();
        let summary = aggregate(&rated(&rates));
        assert_eq!(summary.total_patients, 70_000);
        assert_eq!(summary.total_medications, 7_000_000);
        // (100 + 81) / 2 = 90.5
        assert_eq!(summary.average_adherence, Some(91));
    }

    #[test]
    fn empty_records_have_no_average() {
        let summary = aggregate(&[]);
        assert_eq!(summary.average_adherence, None);
        assert_eq!(summary.total_patients, 0);
        assert_eq!(summary.total_medications, 0);
        assert_eq!(summary.total_missed, 0);
    }

    #[test]
    fn inconsistent_record_is_reported_and_still_counted() {
        let mut records = rated(&[92, 93]);
        records[1].missed = 10; // 93 + 10 != 100
        let summary = aggregate(&records);
        assert_eq!(summary.total_missed, 8 + 10);
        assert_eq!(summary.integrity_violations.len(), 1);
        assert_eq!(summary.integrity_violations[0].subject, "Patient 1");
    }

    // -----------------------------------------------------------------------
    // classify_tier
    // -----------------------------------------------------------------------

    #[test]
    fn tier_boundaries() {
        let tiers = TierThresholds::default();
        assert_eq!(classify_tier(100, &tiers), AdherenceTier::Excellent);
        assert_eq!(classify_tier(90, &tiers), AdherenceTier::Excellent);
        assert_eq!(classify_tier(89, &tiers), AdherenceTier::Good);
        assert_eq!(classify_tier(80, &tiers), AdherenceTier::Good);
        assert_eq!(classify_tier(79, &tiers), AdherenceTier::NeedsAttention);
        assert_eq!(classify_tier(0, &tiers), AdherenceTier::NeedsAttention);
    }

    #[test]
    fn tier_follows_configured_thresholds() {
        let tiers = TierThresholds::new(95, 85).unwrap();
        assert_eq!(classify_tier(94, &tiers), AdherenceTier::Good);
        assert_eq!(classify_tier(84, &tiers), AdherenceTier::NeedsAttention);
    }

    #[test]
    fn medication_stats_use_same_tiers() {
        let stats = SampleDataProvider::new().fetch_medication_stats();
        let rows = tier_medications(&stats, &TierThresholds::default());
        let tiers: Vec<_> = rows.iter().map(|r| r.badge.tier).collect();
        assert_eq!(
            tiers,
            vec![
                AdherenceTier::Good,      // Lisinopril 89
                AdherenceTier::Excellent, // Metformin 94
                AdherenceTier::Good,      // Atorvastatin 87
                AdherenceTier::Excellent, // Amlodipine 91
                AdherenceTier::Excellent, // Levothyroxine 96
            ]
        );
    }

    // -----------------------------------------------------------------------
    // trend_directions
    // -----------------------------------------------------------------------

    #[test]
    fn sample_trend_directions() {
        assert_eq!(
            trend_directions(&weeks(&[88, 91, 89, 93])),
            vec![
                None,
                Some(TrendDirection::Up),
                Some(TrendDirection::Down),
                Some(TrendDirection::Up),
            ]
        );
    }

    #[test]
    fn equal_weeks_are_flat() {
        assert_eq!(
            trend_directions(&weeks(&[90, 90])),
            vec![None, Some(TrendDirection::Flat)]
        );
    }

    #[test]
    fn short_trends() {
        assert!(trend_directions(&[]).is_empty());
        assert_eq!(trend_directions(&weeks(&[70])), vec![None]);
    }

    // -----------------------------------------------------------------------
    // build_report
    // -----------------------------------------------------------------------

    #[test]
    fn full_report_from_sample_data() {
        let report =
            build_report(&SampleDataProvider::new(), &TierThresholds::default(), None).unwrap();
        assert_eq!(report.summary.total_patients, 5);
        assert_eq!(report.patients.len(), 5);
        assert_eq!(report.medications.len(), 5);
        assert_eq!(report.weekly_trends.len(), 4);
        assert_eq!(report.weekly_trends[0].direction, None);
        assert_eq!(report.patients[2].badge.label, "Good"); // Robert Davis 83
    }

    #[test]
    fn report_narrowed_to_one_patient() {
        let report = build_report(
            &SampleDataProvider::new(),
            &TierThresholds::default(),
            Some("robert davis"),
        )
        .unwrap();
        assert_eq!(report.patients.len(), 1);
        assert_eq!(report.summary.average_adherence, Some(83));
        assert_eq!(report.summary.total_missed, 5);
        assert_eq!(report.medications.len(), 5);
    }

    #[test]
    fn blank_patient_filter_means_everyone() {
        let report = build_report(
            &SampleDataProvider::new(),
            &TierThresholds::default(),
            Some("  "),
        )
        .unwrap();
        assert_eq!(report.patients.len(), 5);
    }

    #[test]
    fn unknown_patient_is_not_found() {
        let err = build_report(
            &SampleDataProvider::new(),
            &TierThresholds::default(),
            Some("Nobody"),
        )
        .unwrap_err();
        assert_eq!(err, TrackerError::not_found("adherence record", "Nobody"));
    }

    #[test]
    fn report_serializes_flat_rows() {
        let report =
            build_report(&SampleDataProvider::new(), &TierThresholds::default(), None).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["patients"][0]["patient"], "John Smith");
        assert_eq!(json["patients"][0]["badge"]["tier"], "excellent");
        assert_eq!(json["weekly_trends"][1]["direction"], "up");
        assert!(json["weekly_trends"][0]["direction"].is_null());
    }
}
