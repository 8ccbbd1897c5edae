//! EVF CLI - Command line tool for exploring EV fire statistics.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "evf-cli",
    version,
    about = "Electric vehicle fire analytics toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: evf_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    evf_cmd::run(cli.command)
}
