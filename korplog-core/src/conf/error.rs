use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    //-------------------------------------------------------------------------
    // IO / Parsing
    //-------------------------------------------------------------------------
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file: {path}\n\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    //-------------------------------------------------------------------------
    // Grouping
    //-------------------------------------------------------------------------
    #[error("grouping rule {index} has an empty group name")]
    EmptyGroupName { index: usize },

    #[error("invalid pattern for group '{group}': {source}")]
    InvalidRegex {
        group: String,
        #[source]
        source: regex::Error,
    },

    //-------------------------------------------------------------------------
    // Clients
    //-------------------------------------------------------------------------
    #[error("invalid network '{network}' in {field}: {source}")]
    InvalidNetwork {
        field: &'static str,
        network: String,
        #[source]
        source: ipnet::AddrParseError,
    },

    #[error("invalid home country '{code}', expected a two-letter country code")]
    InvalidCountryCode { code: String },

    #[error("failed to open GeoIP database {path}: {reason}")]
    GeoIp { path: PathBuf, reason: String },

    //-------------------------------------------------------------------------
    // Statistics
    //-------------------------------------------------------------------------
    #[error("default_page_size must be greater than zero")]
    ZeroPageSize,

    #[error("query_commands must name at least one command")]
    NoQueryCommands,
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: hcl::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

/// Every problem found while validating one configuration.
#[derive(Debug)]
pub struct ValidationErrors(pub Vec<ConfigError>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "configuration validation failed ({} errors)", self.0.len())?;
        for err in &self.0 {
            write!(f, "\n  - {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
