//! Dataset path arguments shared by every subcommand.

use clap::Args;
use std::path::PathBuf;

use evf_dashboard::{CsvBundle, Dashboard, DashboardConfig};
use evf_records::read_source;

/// Paths to the source CSVs. The four core datasets are required; the
/// reference datasets are optional and default to empty series.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Path to the total-fire CSV
    #[arg(long)]
    pub fires: PathBuf,

    /// Path to the EV-fire CSV
    #[arg(long)]
    pub ev_fires: PathBuf,

    /// Path to the charging-station CSV
    #[arg(long)]
    pub chargers: PathBuf,

    /// Path to the registration-count CSV
    #[arg(long)]
    pub registrations: PathBuf,

    /// Path to the manufacturer-fire CSV (reference charts)
    #[arg(long)]
    pub manufacturer_fires: Option<PathBuf>,

    /// Path to the foreign-fire CSV (reference charts)
    #[arg(long)]
    pub foreign_fires: Option<PathBuf>,

    /// Path to the manufacturer fleet-size CSV (reference charts)
    #[arg(long)]
    pub manufacturer_shares: Option<PathBuf>,
}

impl SourceArgs {
    /// Read every configured source and build the dashboard.
    ///
    /// Any unreadable or malformed source aborts the command; there is no
    /// partial dashboard.
    pub fn load(&self) -> anyhow::Result<Dashboard> {
        let fires = read_source(&self.fires, "fires")?;
        let ev_fires = read_source(&self.ev_fires, "ev_fires")?;
        let chargers = read_source(&self.chargers, "chargers")?;
        let registrations = read_source(&self.registrations, "registrations")?;
        let manufacturer_fires = self
            .manufacturer_fires
            .as_deref()
            .map(|p| read_source(p, "manufacturer_fires"))
            .transpose()?;
        let foreign_fires = self
            .foreign_fires
            .as_deref()
            .map(|p| read_source(p, "foreign_fires"))
            .transpose()?;
        let manufacturer_shares = self
            .manufacturer_shares
            .as_deref()
            .map(|p| read_source(p, "manufacturer_shares"))
            .transpose()?;

        let bundle = CsvBundle {
            fires: &fires,
            ev_fires: &ev_fires,
            chargers: &chargers,
            registrations: &registrations,
            manufacturer_fires: manufacturer_fires.as_deref(),
            foreign_fires: foreign_fires.as_deref(),
            manufacturer_shares: manufacturer_shares.as_deref(),
        };
        let dashboard = Dashboard::from_csv(&bundle, &DashboardConfig::default())?;
        log::info!("Loaded all sources from {}", self.fires.display());
        Ok(dashboard)
    }
}
