use clap::Parser;
use korplog_core::cli::{self, Command};
use korplog_core::logging::{LogFormat, default_log_format, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "korplog",
    version,
    about = "korplog: Korp backend log repair, parsing and usage statistics"
)]
struct Cli {
    /// Diagnostic log format (default: pretty on a terminal, JSON otherwise)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.log_format.unwrap_or_else(default_log_format));

    if let Err(e) = cli::run(cli.command) {
        eprintln!("korplog: {e:#}");
        std::process::exit(1);
    }
}
