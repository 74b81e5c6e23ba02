//! ubc-cli - Command line tool for slicing the BTS border crossing dataset.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "ubc-cli",
    version,
    about = "U.S. border crossing data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: ubc_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    ubc_cmd::run(cli.command)
}
