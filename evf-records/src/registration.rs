use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::columns::{parse_count, resolve_column};
use crate::error::{LoadError, Result};

/// Vehicle registration totals for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub year: i32,
    /// All registered vehicles, regardless of powertrain.
    pub total_registered: u64,
    /// Registered electric vehicles.
    pub ev_registered: u64,
}

impl RegistrationRecord {
    /// EV share of the registered fleet, in percent, unrounded.
    ///
    /// Rounding is the output boundary's job; a zero fleet yields 0.
    pub fn ev_ratio_pct(&self) -> f64 {
        if self.total_registered == 0 {
            0.0
        } else {
            self.ev_registered as f64 / self.total_registered as f64 * 100.0
        }
    }

    /// Registered vehicles that are not EVs, saturating at 0.
    pub fn non_ev_registered(&self) -> u64 {
        self.total_registered.saturating_sub(self.ev_registered)
    }
}

/// Column-name mapping for the registration-count CSV.
#[derive(Debug, Clone)]
pub struct RegistrationColumns {
    pub year: String,
    pub total_registered: String,
    pub ev_registered: String,
}

impl Default for RegistrationColumns {
    fn default() -> Self {
        RegistrationColumns {
            year: "year".to_string(),
            total_registered: "total_registered".to_string(),
            ev_registered: "ev_registered".to_string(),
        }
    }
}

/// Parse the registration CSV.
///
/// `year` is this dataset's key, so a row whose year does not parse as a
/// 4-digit integer makes the source malformed rather than being skipped.
/// The count fields tolerate thousands separators and null-ish markers.
pub fn parse_registration_csv(
    csv_data: &str,
    columns: &RegistrationColumns,
) -> Result<Vec<RegistrationRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers = rdr.headers()?.clone();
    let year_idx = resolve_column(&headers, &columns.year, "registrations")?;
    let total_idx = resolve_column(&headers, &columns.total_registered, "registrations")?;
    let ev_idx = resolve_column(&headers, &columns.ev_registered, "registrations")?;

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let r = result?;
        let year_raw = r.get(year_idx).unwrap_or("").trim();
        let year = match year_raw.parse::<i32>() {
            Ok(y) if (1000..=9999).contains(&y) => y,
            _ => {
                return Err(LoadError::InvalidField {
                    source_name: "registrations".to_string(),
                    row: row + 1,
                    column: columns.year.clone(),
                    value: year_raw.to_string(),
                })
            }
        };
        records.push(RegistrationRecord {
            year,
            total_registered: parse_count(r.get(total_idx).unwrap_or("")),
            ev_registered: parse_count(r.get(ev_idx).unwrap_or("")),
        });
    }
    log::info!(
        "[EVF Debug] loader: parsed {} registration records",
        records.len()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_counts_with_separators() {
        let csv = "\
year,total_registered,ev_registered
2021,\"24,911,101\",\"231,443\"
2022,25269059,389855
";
        let records = parse_registration_csv(csv, &RegistrationColumns::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].total_registered, 24_911_101);
        assert_eq!(records[0].ev_registered, 231_443);
        assert_eq!(records[1].year, 2022);
    }

    #[test]
    fn parse_rejects_bad_year() {
        let csv = "year,total_registered,ev_registered\ntwenty,100,10\n";
        let err = parse_registration_csv(csv, &RegistrationColumns::default()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidField { .. }));
    }

    #[test]
    fn derived_fields_handle_zero_fleet() {
        let empty = RegistrationRecord {
            year: 2021,
            total_registered: 0,
            ev_registered: 0,
        };
        assert_eq!(empty.ev_ratio_pct(), 0.0);
        assert_eq!(empty.non_ev_registered(), 0);

        let some = RegistrationRecord {
            year: 2022,
            total_registered: 1000,
            ev_registered: 40,
        };
        assert!((some.ev_ratio_pct() - 4.0).abs() < f64::EPSILON);
        assert_eq!(some.non_ev_registered(), 960);
    }
}
