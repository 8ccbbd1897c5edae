//! Conjunctive filtering of the EV-fire dataset.
//!
//! The dashboard's multi-select controls map onto one [`FilterCriteria`]
//! value; every recomputation takes the current criteria as an explicit
//! argument. Filtering never mutates the base dataset.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use evf_records::ev_fire::EvFireRecord;

/// One user filter selection across all dimensions.
///
/// Non-year criteria are plain sets: empty means no restriction. The year
/// criterion is different because the UI always supplies an explicit
/// selection: `None` is the pre-checked "all known years" default and
/// restricts nothing, while `Some(set)` keeps only rows whose derived year
/// is a member, so an explicit empty set matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub years: Option<BTreeSet<i32>>,
    pub regions: HashSet<String>,
    pub statuses: HashSet<String>,
    pub causes: HashSet<String>,
    pub subcauses: HashSet<String>,
}

impl FilterCriteria {
    /// True when `record` satisfies every criterion (logical AND).
    ///
    /// A row without a derived year can never match an explicit year
    /// selection; under the `None` default it passes like any other row.
    pub fn matches(&self, record: &EvFireRecord) -> bool {
        if let Some(years) = &self.years {
            match record.year {
                Some(year) if years.contains(&year) => {}
                _ => return false,
            }
        }
        set_allows(&self.regions, &record.region)
            && set_allows(&self.statuses, &record.vehicle_status)
            && set_allows(&self.causes, &record.cause_major)
            && set_allows(&self.subcauses, &record.cause_minor)
    }
}

fn set_allows(selection: &HashSet<String>, value: &str) -> bool {
    selection.is_empty() || selection.contains(value)
}

/// Apply `criteria` to `records`, returning a fresh subset in source order.
pub fn apply(records: &[EvFireRecord], criteria: &FilterCriteria) -> Vec<EvFireRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: Option<i32>, region: &str, status: &str, cause: &str) -> EvFireRecord {
        EvFireRecord {
            fire_date: String::new(),
            region: region.to_string(),
            vehicle_status: status.to_string(),
            cause_major: cause.to_string(),
            cause_minor: format!("{cause} detail"),
            year,
        }
    }

    fn sample() -> Vec<EvFireRecord> {
        vec![
            record(Some(2021), "Seoul", "Charging", "Electrical"),
            record(Some(2022), "Busan", "Driving", "Mechanical"),
            record(Some(2022), "Seoul", "Parked", "Electrical"),
            record(None, "Incheon", "Driving", "Unknown"),
        ]
    }

    #[test]
    fn default_criteria_pass_everything_through() {
        let records = sample();
        let filtered = apply(&records, &FilterCriteria::default());
        assert_eq!(filtered, records);
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = sample();
        let criteria = FilterCriteria {
            regions: HashSet::from(["Seoul".to_string()]),
            ..FilterCriteria::default()
        };
        let once = apply(&records, &criteria);
        let twice = apply(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn criteria_combine_with_and() {
        let records = sample();
        let criteria = FilterCriteria {
            regions: HashSet::from(["Seoul".to_string()]),
            causes: HashSet::from(["Electrical".to_string()]),
            years: Some(BTreeSet::from([2022])),
            ..FilterCriteria::default()
        };
        let filtered = apply(&records, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].vehicle_status, "Parked");
    }

    #[test]
    fn explicit_year_selection_excludes_yearless_rows() {
        let records = sample();
        let criteria = FilterCriteria {
            years: Some(BTreeSet::from([2021, 2022])),
            ..FilterCriteria::default()
        };
        let filtered = apply(&records, &criteria);
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|r| r.year.is_some()));
    }

    #[test]
    fn empty_year_selection_matches_nothing() {
        let records = sample();
        let criteria = FilterCriteria {
            years: Some(BTreeSet::new()),
            ..FilterCriteria::default()
        };
        assert!(apply(&records, &criteria).is_empty());
    }

    #[test]
    fn base_set_is_untouched() {
        let records = sample();
        let snapshot = records.clone();
        let criteria = FilterCriteria {
            statuses: HashSet::from(["Charging".to_string()]),
            ..FilterCriteria::default()
        };
        let _ = apply(&records, &criteria);
        assert_eq!(records, snapshot);
    }
}
