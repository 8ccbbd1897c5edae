use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::columns::resolve_column;
use crate::error::Result;

/// A single electric-vehicle fire incident.
///
/// This is the dataset the user-facing filters operate on: every field
/// except `fire_date` is a filterable dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvFireRecord {
    /// Raw incident date exactly as it appears in the source.
    pub fire_date: String,
    /// Province / metropolitan region name.
    pub region: String,
    /// Vehicle status at ignition time, e.g. "Driving", "Parked", "Charging".
    pub vehicle_status: String,
    /// Major ignition-cause category.
    pub cause_major: String,
    /// Minor ignition-cause category.
    pub cause_minor: String,
    /// Calendar year derived from `fire_date`; `None` when unparseable.
    pub year: Option<i32>,
}

/// Column-name mapping for the EV-fire CSV.
#[derive(Debug, Clone)]
pub struct EvFireColumns {
    pub fire_date: String,
    pub region: String,
    pub vehicle_status: String,
    pub cause_major: String,
    pub cause_minor: String,
}

impl Default for EvFireColumns {
    fn default() -> Self {
        EvFireColumns {
            fire_date: "fire_date".to_string(),
            region: "region".to_string(),
            vehicle_status: "vehicle_status".to_string(),
            cause_major: "cause_major".to_string(),
            cause_minor: "cause_minor".to_string(),
        }
    }
}

/// Parse the EV-fire CSV into records, preserving source row order.
pub fn parse_ev_fire_csv(csv_data: &str, columns: &EvFireColumns) -> Result<Vec<EvFireRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers = rdr.headers()?.clone();
    let date_idx = resolve_column(&headers, &columns.fire_date, "ev_fires")?;
    let region_idx = resolve_column(&headers, &columns.region, "ev_fires")?;
    let status_idx = resolve_column(&headers, &columns.vehicle_status, "ev_fires")?;
    let cause_idx = resolve_column(&headers, &columns.cause_major, "ev_fires")?;
    let subcause_idx = resolve_column(&headers, &columns.cause_minor, "ev_fires")?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let r = result?;
        records.push(EvFireRecord {
            fire_date: r.get(date_idx).unwrap_or("").trim().to_string(),
            region: r.get(region_idx).unwrap_or("").trim().to_string(),
            vehicle_status: r.get(status_idx).unwrap_or("").trim().to_string(),
            cause_major: r.get(cause_idx).unwrap_or("").trim().to_string(),
            cause_minor: r.get(subcause_idx).unwrap_or("").trim().to_string(),
            year: None,
        });
    }
    log::info!(
        "[EVF Debug] loader: parsed {} EV fire records",
        records.len()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;

    #[test]
    fn parse_reads_all_dimensions() {
        let csv = "\
fire_date,region,vehicle_status,cause_major,cause_minor
2022-05-02,Seoul,Charging,Electrical,Battery cell
2023-01-20,Busan,Driving,Mechanical,Overheating
";
        let records = parse_ev_fire_csv(csv, &EvFireColumns::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].vehicle_status, "Charging");
        assert_eq!(records[0].cause_minor, "Battery cell");
        assert_eq!(records[1].cause_major, "Mechanical");
    }

    #[test]
    fn parse_fails_on_missing_status_column() {
        let csv = "fire_date,region,cause_major,cause_minor\n2022-05-02,Seoul,Electrical,Battery cell\n";
        let err = parse_ev_fire_csv(csv, &EvFireColumns::default()).unwrap_err();
        match err {
            LoadError::MissingColumn { column, .. } => assert_eq!(column, "vehicle_status"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_short_row_fills_empty_fields() {
        let csv = "fire_date,region,vehicle_status,cause_major,cause_minor\n2022-05-02,Seoul\n";
        let records = parse_ev_fire_csv(csv, &EvFireColumns::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].region, "Seoul");
        assert_eq!(records[0].vehicle_status, "");
        assert_eq!(records[0].cause_minor, "");
    }
}
