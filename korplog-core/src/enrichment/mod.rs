//! Client classification: where a request came from and whether it was made
//! by a crawler.

pub mod geoip;
pub mod user_agent;

mod classifier;
#[cfg(test)]
mod tests;

pub use classifier::{ClientClassifier, Exclusion};

use serde::Serialize;

/// Geography of a client relative to the service's home country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Home,
    Other,
}
