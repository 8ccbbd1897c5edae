//! Typed query methods over the loaded datasets.
//!
//! One method per chart or table. Methods that the dashboard recomputes on
//! every filter change take the current [`FilterCriteria`] explicitly; the
//! unfiltered variants of those charts are just `FilterCriteria::default()`.
//! Percentages and rates are rounded once, here, at the output boundary.

use std::collections::{BTreeMap, BTreeSet};

use evf_data::aggregate::{
    counts_by, cumulative_sum, join_with_fill_zero, per_unit_rate, percent_growth, ratio_pct,
    round2, to_series, top_n, SeriesOrder,
};
use evf_data::filter::{self, FilterCriteria};

use crate::models::{
    AdoptionFireShare, CategoryCount, FireKpis, FireTrend, ManufacturerRate, RegionComparison,
    RegionRate, RegistrationSummary, YearComparison, YearCount, YearRate,
};
use crate::Dashboard;

impl Dashboard {
    // ───────────────────── KPIs & registrations ─────────────────────

    /// Headline counters: total fires, EV fires, and the EV share of all
    /// vehicle fires.
    pub fn kpis(&self) -> FireKpis {
        let total_fires = self.fires().len() as u64;
        let ev_fires = self.ev_fires().len() as u64;
        let ev_fire_ratio_pct = if total_fires == 0 {
            0.0
        } else {
            round2(ev_fires as f64 / total_fires as f64 * 100.0)
        };
        FireKpis {
            total_fires,
            ev_fires,
            ev_fire_ratio_pct,
        }
    }

    /// Registration totals per year with the derived EV-adoption fields.
    pub fn registration_summary(&self) -> Vec<RegistrationSummary> {
        let rows: Vec<RegistrationSummary> = self
            .registrations()
            .iter()
            .map(|r| RegistrationSummary {
                year: r.year,
                total_registered: r.total_registered,
                ev_registered: r.ev_registered,
                non_ev_registered: r.non_ev_registered(),
                ev_ratio_pct: round2(r.ev_ratio_pct()),
            })
            .collect();
        log::info!(
            "[EVF Debug] query: registration_summary returned {} years",
            rows.len()
        );
        rows
    }

    // ───────────────────── Yearly trends ─────────────────────

    /// EV and total fire counts per year, as parallel series.
    pub fn fires_by_year(&self) -> FireTrend {
        let trend = FireTrend {
            ev: year_counts(&self.ev_by_year()),
            total: year_counts(&self.total_by_year()),
        };
        log::info!(
            "[EVF Debug] query: fires_by_year returned {} EV / {} total years",
            trend.ev.len(),
            trend.total.len()
        );
        trend
    }

    /// Cumulative EV and total fire counts per year (running totals).
    pub fn cumulative_fires_by_year(&self) -> FireTrend {
        let trend = FireTrend {
            ev: year_counts(&cumulative_sum(&self.ev_by_year())),
            total: year_counts(&cumulative_sum(&self.total_by_year())),
        };
        log::info!(
            "[EVF Debug] query: cumulative_fires_by_year returned {} EV / {} total years",
            trend.ev.len(),
            trend.total.len()
        );
        trend
    }

    /// EV fires as a percentage of all vehicle fires, per year.
    pub fn ev_share_of_fires_by_year(&self) -> Vec<YearRate> {
        let rows = year_rates(&ratio_pct(&self.ev_by_year(), &self.total_by_year()));
        log::info!(
            "[EVF Debug] query: ev_share_of_fires_by_year returned {} years",
            rows.len()
        );
        rows
    }

    /// Year-over-year percent change in EV fire counts.
    pub fn ev_fire_growth_by_year(&self) -> Vec<YearRate> {
        let rows = year_rates(&percent_growth(&self.ev_by_year()));
        log::info!(
            "[EVF Debug] query: ev_fire_growth_by_year returned {} years",
            rows.len()
        );
        rows
    }

    /// EV fires per 100,000 registered EVs, per year. Years with no
    /// registration data report 0 and stay in the series.
    pub fn fires_per_100k_ev_registrations(&self) -> Vec<YearRate> {
        let rows = year_rates(&per_unit_rate(
            &self.ev_by_year(),
            &self.ev_registrations_by_year(),
            100_000.0,
        ));
        log::info!(
            "[EVF Debug] query: fires_per_100k_ev_registrations returned {} years",
            rows.len()
        );
        rows
    }

    // ───────────────────── Regional ─────────────────────

    /// EV fire count against charging-station count, per region, over the
    /// union of both datasets' regions.
    pub fn fires_vs_chargers_by_region(&self) -> Vec<RegionComparison> {
        let joined = join_with_fill_zero(&self.ev_by_region(), &self.chargers_by_region());
        let rows: Vec<RegionComparison> = joined
            .into_iter()
            .map(|(region, (ev_fires, chargers))| RegionComparison {
                region,
                ev_fires,
                chargers,
            })
            .collect();
        log::info!(
            "[EVF Debug] query: fires_vs_chargers_by_region returned {} regions",
            rows.len()
        );
        rows
    }

    /// EV fires per 10,000 charging stations, per region. A region with no
    /// chargers reports a rate of 0 and stays in the series.
    pub fn fires_per_10k_chargers_by_region(&self) -> Vec<RegionRate> {
        let joined = join_with_fill_zero(&self.ev_by_region(), &self.chargers_by_region());
        let rows: Vec<RegionRate> = joined
            .into_iter()
            .map(|(region, (ev_fires, chargers))| RegionRate {
                region,
                ev_fires,
                chargers,
                fires_per_10k_chargers: if chargers == 0 {
                    0.0
                } else {
                    round2(ev_fires as f64 / chargers as f64 * 10_000.0)
                },
            })
            .collect();
        log::info!(
            "[EVF Debug] query: fires_per_10k_chargers_by_region returned {} regions",
            rows.len()
        );
        rows
    }

    /// The `n` regions with the most EV fires.
    pub fn top_regions(&self, n: usize) -> Vec<CategoryCount> {
        let rows = category_counts(top_n(&self.ev_by_region(), n));
        log::info!(
            "[EVF Debug] query: top_regions returned {} regions",
            rows.len()
        );
        rows
    }

    /// The `n` most common major ignition causes.
    pub fn top_causes(&self, n: usize) -> Vec<CategoryCount> {
        let causes = counts_by(self.ev_fires(), |r| Some(r.cause_major.clone()));
        let rows = category_counts(top_n(&causes, n));
        log::info!(
            "[EVF Debug] query: top_causes returned {} causes",
            rows.len()
        );
        rows
    }

    // ───────────────────── Filter-driven ─────────────────────

    /// Major-cause counts over the filtered subset, count-descending.
    pub fn cause_major_counts(&self, criteria: &FilterCriteria) -> Vec<CategoryCount> {
        let subset = filter::apply(self.ev_fires(), criteria);
        let counts = counts_by(&subset, |r| Some(r.cause_major.clone()));
        let rows = category_counts(to_series(&counts, SeriesOrder::CountDescending));
        log::info!(
            "[EVF Debug] query: cause_major_counts returned {} causes over {} rows",
            rows.len(),
            subset.len()
        );
        rows
    }

    /// Minor-cause counts over the filtered subset, count-descending.
    pub fn cause_minor_counts(&self, criteria: &FilterCriteria) -> Vec<CategoryCount> {
        let subset = filter::apply(self.ev_fires(), criteria);
        let counts = counts_by(&subset, |r| Some(r.cause_minor.clone()));
        let rows = category_counts(to_series(&counts, SeriesOrder::CountDescending));
        log::info!(
            "[EVF Debug] query: cause_minor_counts returned {} subcauses over {} rows",
            rows.len(),
            subset.len()
        );
        rows
    }

    /// Vehicle-status counts over the filtered subset, count-descending.
    pub fn vehicle_status_counts(&self, criteria: &FilterCriteria) -> Vec<CategoryCount> {
        let subset = filter::apply(self.ev_fires(), criteria);
        let counts = counts_by(&subset, |r| Some(r.vehicle_status.clone()));
        let rows = category_counts(to_series(&counts, SeriesOrder::CountDescending));
        log::info!(
            "[EVF Debug] query: vehicle_status_counts returned {} statuses over {} rows",
            rows.len(),
            subset.len()
        );
        rows
    }

    /// Per-year EV fire counts before vs after the filter. The after side
    /// is zero-filled onto every year the full dataset has.
    pub fn filter_comparison_by_year(&self, criteria: &FilterCriteria) -> Vec<YearComparison> {
        let before = self.ev_by_year();
        let subset = filter::apply(self.ev_fires(), criteria);
        let after = counts_by(&subset, |r| r.year);
        let rows: Vec<YearComparison> = join_with_fill_zero(&before, &after)
            .into_iter()
            .map(|(year, (before, after))| YearComparison {
                year,
                before,
                after,
            })
            .collect();
        log::info!(
            "[EVF Debug] query: filter_comparison_by_year returned {} years",
            rows.len()
        );
        rows
    }

    /// The filtered subset as a percentage of the full dataset, per year,
    /// over every year the full dataset has.
    pub fn filtered_share_by_year(&self, criteria: &FilterCriteria) -> Vec<YearRate> {
        let before = self.ev_by_year();
        let subset = filter::apply(self.ev_fires(), criteria);
        let after = counts_by(&subset, |r| r.year);
        // Zero-fill the after side onto the before index so missing years
        // report 0% instead of vanishing.
        let after_filled: BTreeMap<i32, u64> = join_with_fill_zero(&before, &after)
            .into_iter()
            .map(|(year, (_, after))| (year, after))
            .collect();
        let rows = year_rates(&ratio_pct(&after_filled, &before));
        log::info!(
            "[EVF Debug] query: filtered_share_by_year returned {} years",
            rows.len()
        );
        rows
    }

    // ───────────────────── Reference charts ─────────────────────

    /// EV registration share vs EV fire share, per year, over the union of
    /// both series' years.
    pub fn ev_adoption_vs_fire_share_by_year(&self) -> Vec<AdoptionFireShare> {
        let adoption: BTreeMap<i32, f64> = self
            .registrations()
            .iter()
            .map(|r| (r.year, round2(r.ev_ratio_pct())))
            .collect();
        let fire_share = ratio_pct(&self.ev_by_year(), &self.total_by_year());

        let years: BTreeSet<i32> = adoption.keys().chain(fire_share.keys()).copied().collect();
        let rows: Vec<AdoptionFireShare> = years
            .into_iter()
            .map(|year| AdoptionFireShare {
                year,
                ev_registration_share_pct: adoption.get(&year).copied().unwrap_or(0.0),
                ev_fire_share_pct: fire_share.get(&year).copied().unwrap_or(0.0),
            })
            .collect();
        log::info!(
            "[EVF Debug] query: ev_adoption_vs_fire_share_by_year returned {} years",
            rows.len()
        );
        rows
    }

    /// Fire counts per manufacturer, count-descending. Empty when the
    /// manufacturer dataset was not supplied.
    pub fn manufacturer_fire_counts(&self) -> Vec<CategoryCount> {
        let counts = counts_by(self.manufacturer_fires(), |r| Some(r.manufacturer.clone()));
        let rows = category_counts(to_series(&counts, SeriesOrder::CountDescending));
        log::info!(
            "[EVF Debug] query: manufacturer_fire_counts returned {} manufacturers",
            rows.len()
        );
        rows
    }

    /// Fires per 10,000 registered vehicles per manufacturer, over the
    /// union of the fire and fleet-size datasets. An unknown fleet size
    /// reports a rate of 0.
    pub fn manufacturer_fire_rates(&self) -> Vec<ManufacturerRate> {
        let fires = counts_by(self.manufacturer_fires(), |r| Some(r.manufacturer.clone()));
        let fleets: BTreeMap<String, u64> = self
            .manufacturer_shares()
            .iter()
            .map(|r| (r.manufacturer.clone(), r.registered_count))
            .collect();
        let rows: Vec<ManufacturerRate> = join_with_fill_zero(&fires, &fleets)
            .into_iter()
            .map(|(manufacturer, (fires, registered))| ManufacturerRate {
                manufacturer,
                fires,
                registered,
                fires_per_10k_registered: if registered == 0 {
                    0.0
                } else {
                    round2(fires as f64 / registered as f64 * 10_000.0)
                },
            })
            .collect();
        log::info!(
            "[EVF Debug] query: manufacturer_fire_rates returned {} manufacturers",
            rows.len()
        );
        rows
    }

    /// Overseas fire counts per country, count-descending. Empty when the
    /// foreign dataset was not supplied.
    pub fn foreign_fires_by_country(&self) -> Vec<CategoryCount> {
        let counts = counts_by(self.foreign_fires(), |r| Some(r.country.clone()));
        let rows = category_counts(to_series(&counts, SeriesOrder::CountDescending));
        log::info!(
            "[EVF Debug] query: foreign_fires_by_country returned {} countries",
            rows.len()
        );
        rows
    }

    // ───────────────────── Base series ─────────────────────

    fn ev_by_year(&self) -> BTreeMap<i32, u64> {
        counts_by(self.ev_fires(), |r| r.year)
    }

    fn total_by_year(&self) -> BTreeMap<i32, u64> {
        counts_by(self.fires(), |r| r.year)
    }

    fn ev_by_region(&self) -> BTreeMap<String, u64> {
        counts_by(self.ev_fires(), |r| Some(r.region.clone()))
    }

    fn chargers_by_region(&self) -> BTreeMap<String, u64> {
        counts_by(self.chargers(), |r| Some(r.region.clone()))
    }

    /// Registered EVs per year. Built from values, not row counts; a
    /// duplicated year keeps the last row.
    fn ev_registrations_by_year(&self) -> BTreeMap<i32, u64> {
        self.registrations()
            .iter()
            .map(|r| (r.year, r.ev_registered))
            .collect()
    }
}

fn year_counts(series: &BTreeMap<i32, u64>) -> Vec<YearCount> {
    series
        .iter()
        .map(|(year, count)| YearCount {
            year: *year,
            count: *count,
        })
        .collect()
}

fn year_rates(series: &BTreeMap<i32, f64>) -> Vec<YearRate> {
    series
        .iter()
        .map(|(year, pct)| YearRate {
            year: *year,
            pct: *pct,
        })
        .collect()
}

fn category_counts(series: Vec<(String, u64)>) -> Vec<CategoryCount> {
    series
        .into_iter()
        .map(|(label, count)| CategoryCount { label, count })
        .collect()
}
