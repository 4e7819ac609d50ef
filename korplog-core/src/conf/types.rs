use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `korplog.hcl` as written. Every attribute is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct KorplogSpec {
    /// Two-letter country code; empty disables the country lookup.
    pub home_country: String,
    /// CIDRs whose clients always count as home clients.
    pub home_networks: Vec<String>,
    /// MaxMind country or city database.
    pub geoip_country_db: Option<PathBuf>,
    /// Clients in these CIDRs are left out of the statistics.
    pub exclude_networks: Vec<String>,
    pub exclude_bots: bool,
    /// Commands counted as queries.
    pub query_commands: Vec<String>,
    /// Result window size of a request that logs no `end` parameter.
    pub default_page_size: u64,
    pub total_column: TotalColumnSpec,
    /// Ordered; the first matching rule decides a corpus' group.
    pub grouping_rules: Vec<GroupingRuleSpec>,
}

impl Default for KorplogSpec {
    fn default() -> Self {
        Self {
            home_country: "FI".to_string(),
            home_networks: Vec::new(),
            geoip_country_db: None,
            exclude_networks: Vec::new(),
            exclude_bots: false,
            query_commands: vec!["query".to_string()],
            default_page_size: 25,
            total_column: TotalColumnSpec::default(),
            grouping_rules: Vec::new(),
        }
    }
}

/// A grouping rule. Without `pattern` the rule matches corpora named
/// `<group>_...`; with it, corpora matching the whole expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupingRuleSpec {
    pub group: String,
    #[serde(default)]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalColumnSpec {
    First,
    #[default]
    Last,
}
