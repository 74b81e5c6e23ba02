//! Command implementations for the border crossing CLI.
//!
//! Each subcommand loads the dataset once, applies the requested
//! filters, and prints one of the pipeline's output shapes as JSON for
//! the presentation layer to consume.

use clap::{Args, Subcommand};
use ubc_data::aggregate::TOP_PORTS_DEFAULT;

pub mod report;

/// Filter flags shared by the reporting subcommands. All optional:
/// omitted states/measures mean "all of them", omitted dates mean the
/// full observed range.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// States to include (defaults to every state in the dataset)
    #[arg(short, long, num_args = 1..)]
    pub states: Vec<String>,

    /// Measures to include (defaults to every measure in the dataset)
    #[arg(short, long, num_args = 1..)]
    pub measures: Vec<String>,

    /// First month to include, e.g. "Jan 2019"
    #[arg(long)]
    pub start: Option<String>,

    /// Last month to include, e.g. "Dec 2024"
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the states, measures, and date bounds available for filtering
    Options {
        /// Path to the border crossing CSV
        #[arg(short, long)]
        data: String,
    },

    /// Summary metrics for the filtered records
    Metrics {
        /// Path to the border crossing CSV
        #[arg(short, long)]
        data: String,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Per-port map points and a suggested map view
    Ports {
        /// Path to the border crossing CSV
        #[arg(short, long)]
        data: String,

        #[command(flatten)]
        filter: FilterArgs,

        /// Narrow the map to a single port by name
        #[arg(short, long)]
        port: Option<String>,
    },

    /// Busiest ports by total crossings, descending
    TopPorts {
        /// Path to the border crossing CSV
        #[arg(short, long)]
        data: String,

        #[command(flatten)]
        filter: FilterArgs,

        /// Maximum number of ports to return
        #[arg(short, long, default_value_t = TOP_PORTS_DEFAULT)]
        limit: usize,
    },

    /// Total crossings per month, ascending
    Monthly {
        /// Path to the border crossing CSV
        #[arg(short, long)]
        data: String,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Full dashboard report: metrics, map points, top ports, monthly series
    Report {
        /// Path to the border crossing CSV
        #[arg(short, long)]
        data: String,

        #[command(flatten)]
        filter: FilterArgs,

        /// Maximum number of ports in the top-ports list
        #[arg(short, long, default_value_t = TOP_PORTS_DEFAULT)]
        limit: usize,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Options { data } => report::run_options(&data),
        Command::Metrics { data, filter } => report::run_metrics(&data, &filter),
        Command::Ports { data, filter, port } => {
            report::run_ports(&data, &filter, port.as_deref())
        }
        Command::TopPorts {
            data,
            filter,
            limit,
        } => report::run_top_ports(&data, &filter, limit),
        Command::Monthly { data, filter } => report::run_monthly(&data, &filter),
        Command::Report {
            data,
            filter,
            limit,
        } => report::run_report(&data, &filter, limit),
    }
}
