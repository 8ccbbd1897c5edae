//! Query result model structs for the dashboard.
//!
//! All structs derive `Serialize` so any consuming surface (CLI tables,
//! JSON export, a chart frontend) can render them without touching the
//! raw record types.

use serde::Serialize;

/// Headline counters for the overview cards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FireKpis {
    /// Vehicle fires surviving the place-category whitelist.
    pub total_fires: u64,
    /// EV fire incidents.
    pub ev_fires: u64,
    /// EV share of all vehicle fires, percent, rounded to 2 decimals.
    pub ev_fire_ratio_pct: f64,
}

/// A single (year, count) data point.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

/// A single (year, percent) data point.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearRate {
    pub year: i32,
    pub pct: f64,
}

/// Yearly EV and total fire counts, as parallel series.
///
/// The two series are keyed independently: a year present in one dataset
/// but not the other appears only in its own series, so a cumulative line
/// never dips to a zero-filled hole.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FireTrend {
    pub ev: Vec<YearCount>,
    pub total: Vec<YearCount>,
}

/// A labeled count for categorical bar charts and Top-N tables.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

/// Charging-station density against EV fire incidence for one region.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionComparison {
    pub region: String,
    pub ev_fires: u64,
    pub chargers: u64,
}

/// EV fires normalized per 10,000 charging stations for one region.
///
/// Regions appear even when either side is 0; a region with fires but no
/// chargers reports a rate of 0 rather than infinity.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionRate {
    pub region: String,
    pub ev_fires: u64,
    pub chargers: u64,
    pub fires_per_10k_chargers: f64,
}

/// Before/after-filter EV fire counts for one year.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearComparison {
    pub year: i32,
    /// Count over the full EV-fire dataset.
    pub before: u64,
    /// Count over the filtered subset; 0 when the filter removed the year.
    pub after: u64,
}

/// Registration totals and derived EV-adoption fields for one year.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegistrationSummary {
    pub year: i32,
    pub total_registered: u64,
    pub ev_registered: u64,
    pub non_ev_registered: u64,
    /// EV share of the registered fleet, percent, rounded to 2 decimals.
    pub ev_ratio_pct: f64,
}

/// Manufacturer fire count normalized against fleet size.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ManufacturerRate {
    pub manufacturer: String,
    pub fires: u64,
    pub registered: u64,
    /// Fires per 10,000 registered vehicles; 0 when fleet size is unknown.
    pub fires_per_10k_registered: f64,
}

/// EV adoption share vs EV fire share for one year.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdoptionFireShare {
    pub year: i32,
    /// EV share of registered vehicles, percent.
    pub ev_registration_share_pct: f64,
    /// EV share of vehicle fires, percent.
    pub ev_fire_share_pct: f64,
}
