use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::columns::resolve_column;
use crate::error::Result;

/// A single vehicle-fire incident from the nationwide fire statistics export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireRecord {
    /// Raw incident timestamp exactly as it appears in the source.
    pub date: String,
    /// Place sub-category, e.g. "Passenger car".
    pub place_category: String,
    /// Province / metropolitan region name.
    pub region: String,
    /// Calendar year derived from `date`; `None` when the date is unparseable.
    pub year: Option<i32>,
}

/// Column-name mapping for the total-fire CSV.
#[derive(Debug, Clone)]
pub struct FireColumns {
    pub date: String,
    pub place_category: String,
    pub region: String,
}

impl Default for FireColumns {
    fn default() -> Self {
        FireColumns {
            date: "date".to_string(),
            place_category: "place_category".to_string(),
            region: "region".to_string(),
        }
    }
}

/// Parse the total-fire CSV into records, preserving source row order.
///
/// `year` is left unset here; deriving it from `date` is the normalizer's
/// job, after which the place-category whitelist is applied.
pub fn parse_fire_csv(csv_data: &str, columns: &FireColumns) -> Result<Vec<FireRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers = rdr.headers()?.clone();
    let date_idx = resolve_column(&headers, &columns.date, "fires")?;
    let place_idx = resolve_column(&headers, &columns.place_category, "fires")?;
    let region_idx = resolve_column(&headers, &columns.region, "fires")?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let r = result?;
        records.push(FireRecord {
            date: r.get(date_idx).unwrap_or("").trim().to_string(),
            place_category: r.get(place_idx).unwrap_or("").trim().to_string(),
            region: r.get(region_idx).unwrap_or("").trim().to_string(),
            year: None,
        });
    }
    log::info!("[EVF Debug] loader: parsed {} fire records", records.len());
    Ok(records)
}
