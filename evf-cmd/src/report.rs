//! Report implementations behind each subcommand.
//!
//! Every report loads the dashboard, runs the relevant queries, and prints
//! either aligned text tables or a single JSON document.

use serde_json::json;

use evf_dashboard::models::{CategoryCount, YearRate};

use crate::filters::FilterArgs;
use crate::output::{pct, print_json, print_table};
use crate::sources::SourceArgs;

/// Headline KPIs plus the registration totals behind the adoption charts.
pub fn run_summary(sources: &SourceArgs, json: bool) -> anyhow::Result<()> {
    let dashboard = sources.load()?;
    let kpis = dashboard.kpis();
    let registrations = dashboard.registration_summary();

    if json {
        return print_json(&json!({
            "kpis": kpis,
            "registrations": registrations,
        }));
    }

    print_table(
        "Overview",
        &["metric", "value"],
        &[
            vec!["Vehicle fires".to_string(), kpis.total_fires.to_string()],
            vec!["EV fires".to_string(), kpis.ev_fires.to_string()],
            vec!["EV fire share (%)".to_string(), pct(kpis.ev_fire_ratio_pct)],
        ],
    );
    print_table(
        "Registrations by year",
        &["year", "total", "ev", "non_ev", "ev_share_pct"],
        &registrations
            .iter()
            .map(|r| {
                vec![
                    r.year.to_string(),
                    r.total_registered.to_string(),
                    r.ev_registered.to_string(),
                    r.non_ev_registered.to_string(),
                    pct(r.ev_ratio_pct),
                ]
            })
            .collect::<Vec<_>>(),
    );
    Ok(())
}

/// Yearly trend series: counts, running totals, growth, shares, rates.
pub fn run_yearly(sources: &SourceArgs, json: bool) -> anyhow::Result<()> {
    let dashboard = sources.load()?;
    let counts = dashboard.fires_by_year();
    let cumulative = dashboard.cumulative_fires_by_year();
    let share = dashboard.ev_share_of_fires_by_year();
    let growth = dashboard.ev_fire_growth_by_year();
    let per_100k = dashboard.fires_per_100k_ev_registrations();

    if json {
        return print_json(&json!({
            "counts": counts,
            "cumulative": cumulative,
            "ev_share_pct": share,
            "ev_growth_pct": growth,
            "fires_per_100k_ev_registrations": per_100k,
        }));
    }

    print_table(
        "EV fires by year",
        &["year", "count"],
        &counts
            .ev
            .iter()
            .map(|p| vec![p.year.to_string(), p.count.to_string()])
            .collect::<Vec<_>>(),
    );
    print_table(
        "Vehicle fires by year",
        &["year", "count"],
        &counts
            .total
            .iter()
            .map(|p| vec![p.year.to_string(), p.count.to_string()])
            .collect::<Vec<_>>(),
    );
    print_table(
        "Cumulative fires by year",
        &["year", "ev", "total"],
        &cumulative
            .ev
            .iter()
            .map(|p| {
                let total = cumulative
                    .total
                    .iter()
                    .find(|t| t.year == p.year)
                    .map(|t| t.count.to_string())
                    .unwrap_or_else(|| "-".to_string());
                vec![p.year.to_string(), p.count.to_string(), total]
            })
            .collect::<Vec<_>>(),
    );
    print_table("EV share of vehicle fires (%)", &["year", "pct"], &rate_rows(&share));
    print_table("EV fire growth (%)", &["year", "pct"], &rate_rows(&growth));
    print_table(
        "EV fires per 100k registered EVs",
        &["year", "rate"],
        &rate_rows(&per_100k),
    );
    Ok(())
}

/// Regional charger density and fire rates, plus Top-N tables.
pub fn run_regions(sources: &SourceArgs, top: usize, json: bool) -> anyhow::Result<()> {
    let dashboard = sources.load()?;
    let rates = dashboard.fires_per_10k_chargers_by_region();
    let top_regions = dashboard.top_regions(top);
    let top_causes = dashboard.top_causes(top);

    if json {
        return print_json(&json!({
            "regions": rates,
            "top_regions": top_regions,
            "top_causes": top_causes,
        }));
    }

    print_table(
        "EV fires vs charging stations by region",
        &["region", "ev_fires", "chargers", "fires_per_10k_chargers"],
        &rates
            .iter()
            .map(|r| {
                vec![
                    r.region.clone(),
                    r.ev_fires.to_string(),
                    r.chargers.to_string(),
                    pct(r.fires_per_10k_chargers),
                ]
            })
            .collect::<Vec<_>>(),
    );
    print_table(
        &format!("Top {top} regions by EV fires"),
        &["region", "count"],
        &category_rows(&top_regions),
    );
    print_table(
        &format!("Top {top} ignition causes"),
        &["cause", "count"],
        &category_rows(&top_causes),
    );
    Ok(())
}

/// Cause and status breakdowns for the supplied filter selection, with the
/// before/after-filter yearly comparison.
pub fn run_causes(sources: &SourceArgs, filters: &FilterArgs, json: bool) -> anyhow::Result<()> {
    let dashboard = sources.load()?;
    let criteria = filters.to_criteria();
    let causes = dashboard.cause_major_counts(&criteria);
    let subcauses = dashboard.cause_minor_counts(&criteria);
    let statuses = dashboard.vehicle_status_counts(&criteria);
    let comparison = dashboard.filter_comparison_by_year(&criteria);
    let share = dashboard.filtered_share_by_year(&criteria);

    if json {
        return print_json(&json!({
            "criteria": criteria,
            "causes": causes,
            "subcauses": subcauses,
            "statuses": statuses,
            "yearly_comparison": comparison,
            "filtered_share_pct": share,
        }));
    }

    print_table("Major causes", &["cause", "count"], &category_rows(&causes));
    print_table(
        "Minor causes",
        &["subcause", "count"],
        &category_rows(&subcauses),
    );
    print_table(
        "Vehicle status",
        &["status", "count"],
        &category_rows(&statuses),
    );
    print_table(
        "Fires by year, before vs after filter",
        &["year", "before", "after"],
        &comparison
            .iter()
            .map(|c| {
                vec![
                    c.year.to_string(),
                    c.before.to_string(),
                    c.after.to_string(),
                ]
            })
            .collect::<Vec<_>>(),
    );
    print_table("Filtered share by year (%)", &["year", "pct"], &rate_rows(&share));
    Ok(())
}

/// Reference tables: adoption vs fire share, manufacturers, overseas cases.
pub fn run_reference(sources: &SourceArgs, json: bool) -> anyhow::Result<()> {
    let dashboard = sources.load()?;
    let adoption = dashboard.ev_adoption_vs_fire_share_by_year();
    let manufacturer_counts = dashboard.manufacturer_fire_counts();
    let manufacturer_rates = dashboard.manufacturer_fire_rates();
    let foreign = dashboard.foreign_fires_by_country();

    if json {
        return print_json(&json!({
            "adoption_vs_fire_share": adoption,
            "manufacturer_fires": manufacturer_counts,
            "manufacturer_rates": manufacturer_rates,
            "foreign_fires": foreign,
        }));
    }

    print_table(
        "EV adoption vs EV fire share by year (%)",
        &["year", "ev_registration_share", "ev_fire_share"],
        &adoption
            .iter()
            .map(|r| {
                vec![
                    r.year.to_string(),
                    pct(r.ev_registration_share_pct),
                    pct(r.ev_fire_share_pct),
                ]
            })
            .collect::<Vec<_>>(),
    );
    print_table(
        "Fires by manufacturer",
        &["manufacturer", "count"],
        &category_rows(&manufacturer_counts),
    );
    print_table(
        "Fires per 10k registered vehicles by manufacturer",
        &["manufacturer", "fires", "registered", "rate"],
        &manufacturer_rates
            .iter()
            .map(|r| {
                vec![
                    r.manufacturer.clone(),
                    r.fires.to_string(),
                    r.registered.to_string(),
                    pct(r.fires_per_10k_registered),
                ]
            })
            .collect::<Vec<_>>(),
    );
    print_table(
        "Overseas EV fires by country",
        &["country", "count"],
        &category_rows(&foreign),
    );
    Ok(())
}

fn rate_rows(series: &[YearRate]) -> Vec<Vec<String>> {
    series
        .iter()
        .map(|r| vec![r.year.to_string(), pct(r.pct)])
        .collect()
}

fn category_rows(series: &[CategoryCount]) -> Vec<Vec<String>> {
    series
        .iter()
        .map(|c| vec![c.label.clone(), c.count.to_string()])
        .collect()
}
