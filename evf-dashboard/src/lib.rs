//! Load-once data layer for the EV fire dashboard.
//!
//! [`Dashboard`] parses and normalizes every source CSV exactly once and is
//! immutable afterwards; each user interaction is a pure recomputation that
//! takes the current filter criteria as an explicit argument. Query methods
//! live in [`queries`] and return the serializable structs in [`models`].
//!
//! # Architecture
//!
//! - Required sources: total fires, EV fires, chargers, registrations.
//!   Any of them failing to load aborts construction; no partial
//!   dashboard is ever produced.
//! - Optional reference sources: manufacturer fires, foreign fires,
//!   manufacturer fleet sizes. When absent, the corresponding queries
//!   return empty series.
//! - Column names per source are configuration ([`DashboardConfig`]), not
//!   contract; defaults match the English fixture headers.
//!
//! # Usage
//!
//! ```rust
//! use evf_dashboard::{CsvBundle, Dashboard, DashboardConfig};
//!
//! let bundle = CsvBundle {
//!     fires: "date,place_category,region\n2022-01-05,Passenger car,Seoul\n",
//!     ev_fires: "fire_date,region,vehicle_status,cause_major,cause_minor\n\
//!                2022-03-09,Seoul,Charging,Electrical,Battery cell\n",
//!     chargers: "region\nSeoul\n",
//!     registrations: "year,total_registered,ev_registered\n2022,1000,40\n",
//!     ..CsvBundle::default()
//! };
//! let dashboard = Dashboard::from_csv(&bundle, &DashboardConfig::default()).unwrap();
//! assert_eq!(dashboard.kpis().ev_fires, 1);
//! ```

pub mod models;
mod queries;

use std::collections::HashSet;

use evf_data::normalize;
use evf_records::charger::{parse_charger_csv, ChargerColumns, ChargerRecord};
use evf_records::error::Result;
use evf_records::ev_fire::{parse_ev_fire_csv, EvFireColumns, EvFireRecord};
use evf_records::fire::{parse_fire_csv, FireColumns, FireRecord};
use evf_records::manufacturer::{
    parse_foreign_fire_csv, parse_manufacturer_fire_csv, parse_manufacturer_share_csv,
    ForeignFireColumns, ForeignFireRecord, ManufacturerFireColumns, ManufacturerFireRecord,
    ManufacturerShareColumns, ManufacturerShareRecord,
};
use evf_records::registration::{
    parse_registration_csv, RegistrationColumns, RegistrationRecord,
};

/// Column mappings and the place-category whitelist, one value per session.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub fire_columns: FireColumns,
    pub ev_fire_columns: EvFireColumns,
    pub charger_columns: ChargerColumns,
    pub registration_columns: RegistrationColumns,
    pub manufacturer_fire_columns: ManufacturerFireColumns,
    pub foreign_fire_columns: ForeignFireColumns,
    pub manufacturer_share_columns: ManufacturerShareColumns,
    /// Place categories retained from the total-fire dataset.
    pub place_whitelist: HashSet<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            fire_columns: FireColumns::default(),
            ev_fire_columns: EvFireColumns::default(),
            charger_columns: ChargerColumns::default(),
            registration_columns: RegistrationColumns::default(),
            manufacturer_fire_columns: ManufacturerFireColumns::default(),
            foreign_fire_columns: ForeignFireColumns::default(),
            manufacturer_share_columns: ManufacturerShareColumns::default(),
            place_whitelist: normalize::default_place_whitelist(),
        }
    }
}

/// Raw CSV text for each source. Required sources are `&str`; reference
/// sources are optional.
#[derive(Debug, Clone, Default)]
pub struct CsvBundle<'a> {
    pub fires: &'a str,
    pub ev_fires: &'a str,
    pub chargers: &'a str,
    pub registrations: &'a str,
    pub manufacturer_fires: Option<&'a str>,
    pub foreign_fires: Option<&'a str>,
    pub manufacturer_shares: Option<&'a str>,
}

/// The loaded, normalized, immutable datasets behind every query.
#[derive(Debug)]
pub struct Dashboard {
    fires: Vec<FireRecord>,
    ev_fires: Vec<EvFireRecord>,
    chargers: Vec<ChargerRecord>,
    registrations: Vec<RegistrationRecord>,
    manufacturer_fires: Vec<ManufacturerFireRecord>,
    foreign_fires: Vec<ForeignFireRecord>,
    manufacturer_shares: Vec<ManufacturerShareRecord>,
}

impl Dashboard {
    /// Parse and normalize every supplied source.
    ///
    /// The place whitelist and year derivation run here, once; nothing
    /// mutates the datasets afterwards.
    pub fn from_csv(bundle: &CsvBundle<'_>, config: &DashboardConfig) -> Result<Self> {
        let fires = normalize::normalize_fires(
            parse_fire_csv(bundle.fires, &config.fire_columns)?,
            &config.place_whitelist,
        );
        let ev_fires = normalize::normalize_ev_fires(parse_ev_fire_csv(
            bundle.ev_fires,
            &config.ev_fire_columns,
        )?);
        let chargers = parse_charger_csv(bundle.chargers, &config.charger_columns)?;
        let registrations =
            parse_registration_csv(bundle.registrations, &config.registration_columns)?;

        let manufacturer_fires = match bundle.manufacturer_fires {
            Some(csv) => normalize::normalize_manufacturer_fires(parse_manufacturer_fire_csv(
                csv,
                &config.manufacturer_fire_columns,
            )?),
            None => Vec::new(),
        };
        let foreign_fires = match bundle.foreign_fires {
            Some(csv) => normalize::normalize_foreign_fires(parse_foreign_fire_csv(
                csv,
                &config.foreign_fire_columns,
            )?),
            None => Vec::new(),
        };
        let manufacturer_shares = match bundle.manufacturer_shares {
            Some(csv) => parse_manufacturer_share_csv(csv, &config.manufacturer_share_columns)?,
            None => Vec::new(),
        };

        log::info!(
            "[EVF Debug] dashboard: loaded {} fires, {} EV fires, {} chargers, {} registration years",
            fires.len(),
            ev_fires.len(),
            chargers.len(),
            registrations.len()
        );

        Ok(Dashboard {
            fires,
            ev_fires,
            chargers,
            registrations,
            manufacturer_fires,
            foreign_fires,
            manufacturer_shares,
        })
    }

    /// The normalized EV-fire dataset, for callers that filter themselves.
    pub fn ev_fires(&self) -> &[EvFireRecord] {
        &self.ev_fires
    }

    /// The normalized (whitelisted) total-fire dataset.
    pub fn fires(&self) -> &[FireRecord] {
        &self.fires
    }

    pub(crate) fn chargers(&self) -> &[ChargerRecord] {
        &self.chargers
    }

    pub(crate) fn registrations(&self) -> &[RegistrationRecord] {
        &self.registrations
    }

    pub(crate) fn manufacturer_fires(&self) -> &[ManufacturerFireRecord] {
        &self.manufacturer_fires
    }

    pub(crate) fn foreign_fires(&self) -> &[ForeignFireRecord] {
        &self.foreign_fires
    }

    pub(crate) fn manufacturer_shares(&self) -> &[ManufacturerShareRecord] {
        &self.manufacturer_shares
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evf_records::error::LoadError;

    const FIRES: &str = "\
date,place_category,region
2021-04-01,Passenger car,Seoul
2021-05-02,Motorcycle,Seoul
2022-06-03,Bus,Busan
";
    const EV_FIRES: &str = "\
fire_date,region,vehicle_status,cause_major,cause_minor
2021-07-04,Seoul,Charging,Electrical,Battery cell
";
    const CHARGERS: &str = "region\nSeoul\nSeoul\n";
    const REGISTRATIONS: &str = "year,total_registered,ev_registered\n2021,1000,40\n";

    #[test]
    fn from_csv_applies_whitelist_and_years() {
        let bundle = CsvBundle {
            fires: FIRES,
            ev_fires: EV_FIRES,
            chargers: CHARGERS,
            registrations: REGISTRATIONS,
            ..CsvBundle::default()
        };
        let dashboard = Dashboard::from_csv(&bundle, &DashboardConfig::default()).unwrap();
        assert_eq!(dashboard.fires().len(), 2, "motorcycle row must be gone");
        assert_eq!(dashboard.fires()[0].year, Some(2021));
        assert_eq!(dashboard.ev_fires()[0].year, Some(2021));
        assert!(dashboard.manufacturer_fires().is_empty());
    }

    #[test]
    fn from_csv_fails_when_a_required_source_is_malformed() {
        let bundle = CsvBundle {
            fires: FIRES,
            ev_fires: "region\nSeoul\n",
            chargers: CHARGERS,
            registrations: REGISTRATIONS,
            ..CsvBundle::default()
        };
        let err = Dashboard::from_csv(&bundle, &DashboardConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { .. }));
    }
}
