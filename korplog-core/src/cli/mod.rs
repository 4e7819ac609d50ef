//! Commands behind the `korplog` binary.

pub mod config;
pub mod fix;
pub mod parse;
mod records;
pub mod stats;


use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Repair interleaved and split log lines
    Fix(fix::FixArgs),

    /// Reassemble log lines into one record per request
    Parse(parse::ParseArgs),

    /// Aggregate usage statistics
    Stats(stats::StatsArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: config::ConfigCmd,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Fix(args) => fix::run_fix(args),
        Command::Parse(args) => parse::run_parse(args),
        Command::Stats(args) => stats::run_stats(args),
        Command::Config { cmd } => config::run(cmd),
    }
}
