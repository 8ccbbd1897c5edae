use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::columns::resolve_column;
use crate::error::Result;

/// One public charging station. The dashboard only needs where it is;
/// charger density per region is derived by counting rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargerRecord {
    /// Province / metropolitan region name.
    pub region: String,
}

/// Column-name mapping for the charging-station CSV.
#[derive(Debug, Clone)]
pub struct ChargerColumns {
    pub region: String,
}

impl Default for ChargerColumns {
    fn default() -> Self {
        ChargerColumns {
            region: "region".to_string(),
        }
    }
}

/// Parse the charging-station CSV, one record per station row.
pub fn parse_charger_csv(csv_data: &str, columns: &ChargerColumns) -> Result<Vec<ChargerRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers = rdr.headers()?.clone();
    let region_idx = resolve_column(&headers, &columns.region, "chargers")?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let r = result?;
        records.push(ChargerRecord {
            region: r.get(region_idx).unwrap_or("").trim().to_string(),
        });
    }
    log::info!(
        "[EVF Debug] loader: parsed {} charger records",
        records.len()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_counts_one_record_per_station() {
        let csv = "\
station_name,region,charger_type
Gangnam 1,Seoul,DC fast
Gangnam 2,Seoul,AC slow
Haeundae 1,Busan,DC fast
";
        let records = parse_charger_csv(csv, &ChargerColumns::default()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].region, "Seoul");
        assert_eq!(records[2].region, "Busan");
    }
}
