//! Command implementations for the EVF CLI.
//!
//! Provides subcommands for exploring the EV fire statistics: headline
//! KPIs, yearly trends, regional charger-density comparisons, filtered
//! cause breakdowns, and the manufacturer/overseas reference tables.

use clap::Subcommand;

pub mod filters;
pub mod output;
pub mod report;
pub mod sources;

use filters::FilterArgs;
use sources::SourceArgs;

#[derive(Subcommand)]
pub enum Command {
    /// Print headline KPIs and registration totals
    Summary {
        #[command(flatten)]
        sources: SourceArgs,

        /// Emit one JSON document instead of text tables
        #[arg(long)]
        json: bool,
    },

    /// Print yearly trends: counts, cumulative totals, growth, shares, rates
    Yearly {
        #[command(flatten)]
        sources: SourceArgs,

        /// Emit one JSON document instead of text tables
        #[arg(long)]
        json: bool,
    },

    /// Print regional charger density, fire rates, and Top-N tables
    Regions {
        #[command(flatten)]
        sources: SourceArgs,

        /// How many rows the Top-N tables show
        #[arg(long, default_value_t = 5)]
        top: usize,

        /// Emit one JSON document instead of text tables
        #[arg(long)]
        json: bool,
    },

    /// Print cause and status breakdowns for a filter selection
    Causes {
        #[command(flatten)]
        sources: SourceArgs,

        #[command(flatten)]
        filters: FilterArgs,

        /// Emit one JSON document instead of text tables
        #[arg(long)]
        json: bool,
    },

    /// Print the manufacturer and overseas reference tables
    Reference {
        #[command(flatten)]
        sources: SourceArgs,

        /// Emit one JSON document instead of text tables
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Summary { sources, json } => report::run_summary(&sources, json),
        Command::Yearly { sources, json } => report::run_yearly(&sources, json),
        Command::Regions { sources, top, json } => report::run_regions(&sources, top, json),
        Command::Causes {
            sources,
            filters,
            json,
        } => report::run_causes(&sources, &filters, json),
        Command::Reference { sources, json } => report::run_reference(&sources, json),
    }
}
