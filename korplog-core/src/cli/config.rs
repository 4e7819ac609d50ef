use crate::conf::{CONFIG_FILE_NAME, ConfigError, discover_config, load_config};
use anyhow::{Result, bail};
use clap::Subcommand;
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to the config file (default: ./korplog.hcl)
        path: Option<PathBuf>,

        /// Print errors without colors
        #[arg(short, long, default_value = "false")]
        plain: bool,
    },
}

pub fn run(cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Check { path, plain } => check(path, plain),
    }
}

pub fn check(path: Option<PathBuf>, plain: bool) -> Result<()> {
    let Some(path) = discover_config(path.as_deref()) else {
        bail!("no {CONFIG_FILE_NAME} in the working directory");
    };

    match load_config(&path) {
        Ok(cfg) => {
            println!("✔ Config loaded successfully");
            println!("✔ {} grouping rules", cfg.grouping.rules().len());
            println!("✔ query commands: {}", cfg.query_commands.join(", "));
            println!("✔ default page size {}", cfg.default_page_size);
            Ok(())
        }
        Err(err) => {
            print_config_error(&err, plain);
            bail!("invalid configuration: {}", path.display());
        }
    }
}

fn print_config_error(err: &ConfigError, plain: bool) {
    let errors: Vec<&ConfigError> = match err {
        ConfigError::Validation(errors) => errors.iter().collect(),
        other => vec![other],
    };

    for err in errors {
        eprintln!();
        if plain {
            eprintln!("error: {err}");
        } else {
            eprintln!("{}: {err}", "error".red().bold());
        }

        if let Some(hint) = config_error_hint(err) {
            eprintln!();
            eprintln!("{hint}");
        }
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        //---------------------------------------------------------------------
        // Grouping
        //---------------------------------------------------------------------
        ConfigError::EmptyGroupName { .. } => Some(
            "Every grouping rule needs a group name.\n\
             \n\
             Example:\n\
             \n\
             grouping_rules = [\n  { group = \"klk\" },\n]",
        ),

        ConfigError::InvalidRegex { .. } => Some(
            "Patterns are regular expressions matched against the whole lower-cased corpus id.\n\
             \n\
             Example:\n\
             \n\
             grouping_rules = [\n  { group = \"klk_fi\", pattern = \"klk_fi_[0-9]{4}.*\" },\n]",
        ),

        //---------------------------------------------------------------------
        // Clients
        //---------------------------------------------------------------------
        ConfigError::InvalidNetwork { .. } => Some(
            "Networks are written in CIDR notation.\n\
             \n\
             Example:\n\
             \n\
             home_networks = [\"128.214.0.0/16\", \"2001:708::/32\"]",
        ),

        ConfigError::InvalidCountryCode { .. } => Some(
            "Use an ISO 3166-1 alpha-2 code such as \"FI\".\n\
             \n\
             Set home_country = \"\" to classify clients by home_networks only.",
        ),

        ConfigError::GeoIp { .. } => Some(
            "geoip_country_db must point to a readable MaxMind country or city database.\n\
             \n\
             Remove the setting to classify clients by home_networks only.",
        ),

        //---------------------------------------------------------------------
        // Statistics
        //---------------------------------------------------------------------
        ConfigError::ZeroPageSize => Some(
            "default_page_size is the number of hits a query without an `end` parameter asks for.\n\
             \n\
             The backend default is 25.",
        ),

        ConfigError::NoQueryCommands => Some(
            "Only requests whose command is listed in query_commands are counted.\n\
             \n\
             Example:\n\
             \n\
             query_commands = [\"query\"]",
        ),

        //---------------------------------------------------------------------
        // Everything else: no hint
        //---------------------------------------------------------------------
        _ => None,
    }
}
