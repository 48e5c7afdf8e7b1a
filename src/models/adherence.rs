use serde::{Deserialize, Serialize};

/// Per-patient dose tally over the reporting period.
///
/// Expected to satisfy `taken + missed == total_meds` and
/// `adherence_rate == round(100 * taken / total_meds)`; see
/// [`AdherenceRecord::check_integrity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdherenceRecord {
    pub patient: String,
    pub total_meds: u32,
    pub taken: u32,
    pub missed: u32,
    pub adherence_rate: u8,
}

impl AdherenceRecord {
    /// Rate implied by the counts, `None` when nothing was scheduled.
    pub fn derived_rate(&self) -> Option<u8> {
        percent_rounded(self.taken, self.total_meds)
    }

    /// Returns a description of every way this tally contradicts itself.
    pub fn check_integrity(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.taken.checked_add(self.missed) != Some(self.total_meds) {
            problems.push(format!(
                "taken ({}) + missed ({}) != total ({})",
                self.taken, self.missed, self.total_meds
            ));
        }
        if self.adherence_rate > 100 {
            problems.push(format!("rate {} exceeds 100", self.adherence_rate));
        }
        if let Some(derived) = self.derived_rate() {
            if derived != self.adherence_rate {
                problems.push(format!(
                    "stated rate {} differs from derived rate {derived}",
                    self.adherence_rate
                ));
            }
        }
        problems
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTrend {
    pub week: String,
    pub adherence_rate: u8,
}

/// Today's raw counters as supplied by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCounters {
    pub total_patients: u32,
    pub medications_today: u32,
    pub completed_today: u32,
    pub missed_today: u32,
    pub adherence_rate: u8,
}

/// `round(100 * part / whole)` with halves rounded up, in integer arithmetic.
pub fn percent_rounded(part: u32, whole: u32) -> Option<u8> {
    if whole == 0 {
        return None;
    }
    let scaled = (u64::from(part) * 200 + u64::from(whole)) / (2 * u64::from(whole));
    Some(u8::try_from(scaled).unwrap_or(u8::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(total: u32, taken: u32, missed: u32, rate: u8) -> AdherenceRecord {
        AdherenceRecord {
            patient: "Test Patient".into(),
            total_meds: total,
            taken,
            missed,
            adherence_rate: rate,
        }
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent_rounded(55, 60), Some(92)); // 91.67
        assert_eq!(percent_rounded(1, 8), Some(13)); // 12.5
        assert_eq!(percent_rounded(142, 156), Some(91));
        assert_eq!(percent_rounded(0, 10), Some(0));
        assert_eq!(percent_rounded(10, 10), Some(100));
    }

    #[test]
    fn percent_of_zero_is_undefined() {
        assert_eq!(percent_rounded(0, 0), None);
    }

    #[test]
    fn consistent_record_has_no_problems() {
        assert!(record(60, 55, 5, 92).check_integrity().is_empty());
        assert!(record(0, 0, 0, 0).check_integrity().is_empty());
    }

    #[test]
    fn count_mismatch_is_reported() {
        let problems = record(60, 50, 5, 83).check_integrity();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("!= total (60)"));
    }

    #[test]
    fn rate_mismatch_is_reported() {
        let problems = record(40, 38, 2, 90).check_integrity();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("derived rate 95"));
    }
}
