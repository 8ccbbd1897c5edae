//! Year derivation and one-time dataset restriction.
//!
//! The sources carry free-text dates; every year-keyed series in the
//! dashboard works off a `year` derived here. A date that fails to parse
//! leaves `year` unset: the record stays in the dataset and only drops out
//! of year-keyed groupings.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::collections::HashSet;

use evf_records::ev_fire::EvFireRecord;
use evf_records::fire::FireRecord;
use evf_records::manufacturer::{ForeignFireRecord, ManufacturerFireRecord};

/// Date shapes accepted across the source exports.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Datetime shapes; some exports carry a time-of-day tail.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Derive a calendar year from a free-text date field.
///
/// Tries the known date shapes first, then the datetime shapes. Anything
/// unparseable, and any year outside 1000..=9999, yields `None`.
pub fn derive_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return valid_year(date.year());
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return valid_year(datetime.year());
        }
    }
    None
}

fn valid_year(year: i32) -> Option<i32> {
    (1000..=9999).contains(&year).then_some(year)
}

/// Place categories that count as vehicle fires in the total-fire dataset.
pub fn default_place_whitelist() -> HashSet<String> {
    ["Passenger car", "Cargo vehicle", "Bus"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Derive years for the total-fire dataset and keep only whitelisted place
/// categories. Applied once at load time; records dropped here are gone for
/// the rest of the session and no user filter can bring them back.
pub fn normalize_fires(records: Vec<FireRecord>, whitelist: &HashSet<String>) -> Vec<FireRecord> {
    let before = records.len();
    let mut kept: Vec<FireRecord> = records
        .into_iter()
        .filter(|r| whitelist.contains(&r.place_category))
        .collect();
    for record in &mut kept {
        record.year = derive_year(&record.date);
    }
    log::info!(
        "[EVF Debug] normalize: kept {} of {} fire records after place whitelist",
        kept.len(),
        before
    );
    kept
}

/// Derive years for the EV-fire dataset. No rows are dropped.
pub fn normalize_ev_fires(mut records: Vec<EvFireRecord>) -> Vec<EvFireRecord> {
    for record in &mut records {
        record.year = derive_year(&record.fire_date);
    }
    records
}

/// Derive years for the manufacturer-fire reference dataset.
pub fn normalize_manufacturer_fires(
    mut records: Vec<ManufacturerFireRecord>,
) -> Vec<ManufacturerFireRecord> {
    for record in &mut records {
        record.year = derive_year(&record.fire_date);
    }
    records
}

/// Derive years for the foreign-fire reference dataset.
pub fn normalize_foreign_fires(mut records: Vec<ForeignFireRecord>) -> Vec<ForeignFireRecord> {
    for record in &mut records {
        record.year = derive_year(&record.fire_date);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_year_accepts_known_shapes() {
        assert_eq!(derive_year("2022-07-15"), Some(2022));
        assert_eq!(derive_year("2022/07/15"), Some(2022));
        assert_eq!(derive_year("2022.07.15"), Some(2022));
        assert_eq!(derive_year("2022-07-15 13:45"), Some(2022));
        assert_eq!(derive_year("2022-07-15 13:45:10"), Some(2022));
        assert_eq!(derive_year("  2022-07-15  "), Some(2022));
    }

    #[test]
    fn derive_year_rejects_garbage() {
        assert_eq!(derive_year(""), None);
        assert_eq!(derive_year("unknown"), None);
        assert_eq!(derive_year("2022-13-40"), None);
        assert_eq!(derive_year("15/07/2022"), None);
    }

    fn fire(date: &str, place: &str) -> FireRecord {
        FireRecord {
            date: date.to_string(),
            place_category: place.to_string(),
            region: "Seoul".to_string(),
            year: None,
        }
    }

    #[test]
    fn whitelist_drops_other_categories_permanently() {
        let records = vec![
            fire("2021-01-01", "Passenger car"),
            fire("2021-02-01", "Motorcycle"),
            fire("2022-03-01", "Bus"),
            fire("2022-04-01", "Forklift"),
        ];
        let kept = normalize_fires(records, &default_place_whitelist());
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].place_category, "Passenger car");
        assert_eq!(kept[0].year, Some(2021));
        assert_eq!(kept[1].place_category, "Bus");
    }

    #[test]
    fn unparseable_dates_keep_the_record_without_a_year() {
        let records = vec![fire("bad date", "Passenger car")];
        let kept = normalize_fires(records, &default_place_whitelist());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].year, None);
    }
}
