//! Auxiliary datasets joined only for the reference charts: per-manufacturer
//! fire incidents, overseas incidents, and fleet sizes per manufacturer.
//! They share the loading conventions of the core datasets but are optional.

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::columns::{parse_count, resolve_column};
use crate::error::Result;

/// One EV fire incident attributed to a manufacturer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerFireRecord {
    pub manufacturer: String,
    /// Raw incident date; `year` is derived by the normalizer.
    pub fire_date: String,
    pub year: Option<i32>,
}

/// One EV fire incident reported abroad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignFireRecord {
    pub country: String,
    pub fire_date: String,
    pub year: Option<i32>,
}

/// Registered fleet size for one manufacturer, the per-unit base for
/// manufacturer fire rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerShareRecord {
    pub manufacturer: String,
    pub registered_count: u64,
}

/// Column-name mapping for the manufacturer-fire CSV.
#[derive(Debug, Clone)]
pub struct ManufacturerFireColumns {
    pub manufacturer: String,
    pub fire_date: String,
}

impl Default for ManufacturerFireColumns {
    fn default() -> Self {
        ManufacturerFireColumns {
            manufacturer: "manufacturer".to_string(),
            fire_date: "fire_date".to_string(),
        }
    }
}

/// Column-name mapping for the foreign-fire CSV.
#[derive(Debug, Clone)]
pub struct ForeignFireColumns {
    pub country: String,
    pub fire_date: String,
}

impl Default for ForeignFireColumns {
    fn default() -> Self {
        ForeignFireColumns {
            country: "country".to_string(),
            fire_date: "fire_date".to_string(),
        }
    }
}

/// Column-name mapping for the manufacturer-share CSV.
#[derive(Debug, Clone)]
pub struct ManufacturerShareColumns {
    pub manufacturer: String,
    pub registered_count: String,
}

impl Default for ManufacturerShareColumns {
    fn default() -> Self {
        ManufacturerShareColumns {
            manufacturer: "manufacturer".to_string(),
            registered_count: "registered_count".to_string(),
        }
    }
}

pub fn parse_manufacturer_fire_csv(
    csv_data: &str,
    columns: &ManufacturerFireColumns,
) -> Result<Vec<ManufacturerFireRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers = rdr.headers()?.clone();
    let maker_idx = resolve_column(&headers, &columns.manufacturer, "manufacturer_fires")?;
    let date_idx = resolve_column(&headers, &columns.fire_date, "manufacturer_fires")?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let r = result?;
        records.push(ManufacturerFireRecord {
            manufacturer: r.get(maker_idx).unwrap_or("").trim().to_string(),
            fire_date: r.get(date_idx).unwrap_or("").trim().to_string(),
            year: None,
        });
    }
    log::info!(
        "[EVF Debug] loader: parsed {} manufacturer fire records",
        records.len()
    );
    Ok(records)
}

pub fn parse_foreign_fire_csv(
    csv_data: &str,
    columns: &ForeignFireColumns,
) -> Result<Vec<ForeignFireRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers = rdr.headers()?.clone();
    let country_idx = resolve_column(&headers, &columns.country, "foreign_fires")?;
    let date_idx = resolve_column(&headers, &columns.fire_date, "foreign_fires")?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let r = result?;
        records.push(ForeignFireRecord {
            country: r.get(country_idx).unwrap_or("").trim().to_string(),
            fire_date: r.get(date_idx).unwrap_or("").trim().to_string(),
            year: None,
        });
    }
    log::info!(
        "[EVF Debug] loader: parsed {} foreign fire records",
        records.len()
    );
    Ok(records)
}

pub fn parse_manufacturer_share_csv(
    csv_data: &str,
    columns: &ManufacturerShareColumns,
) -> Result<Vec<ManufacturerShareRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers = rdr.headers()?.clone();
    let maker_idx = resolve_column(&headers, &columns.manufacturer, "manufacturer_shares")?;
    let count_idx = resolve_column(&headers, &columns.registered_count, "manufacturer_shares")?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let r = result?;
        records.push(ManufacturerShareRecord {
            manufacturer: r.get(maker_idx).unwrap_or("").trim().to_string(),
            registered_count: parse_count(r.get(count_idx).unwrap_or("")),
        });
    }
    log::info!(
        "[EVF Debug] loader: parsed {} manufacturer share records",
        records.len()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manufacturer_fires() {
        let csv = "\
manufacturer,fire_date
Hyundai,2022-06-01
Tesla,2023-02-11
";
        let records =
            parse_manufacturer_fire_csv(csv, &ManufacturerFireColumns::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].manufacturer, "Tesla");
    }

    #[test]
    fn parse_shares_reads_fleet_counts() {
        let csv = "\
manufacturer,registered_count
Hyundai,\"180,000\"
Tesla,60000
";
        let records =
            parse_manufacturer_share_csv(csv, &ManufacturerShareColumns::default()).unwrap();
        assert_eq!(records[0].registered_count, 180_000);
        assert_eq!(records[1].registered_count, 60_000);
    }
}
