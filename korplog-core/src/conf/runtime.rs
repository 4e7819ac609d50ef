use crate::enrichment::ClientClassifier;
use crate::grouping::GroupingResolver;
use crate::stats::TotalPosition;

/// Validated configuration the pipeline runs with.
pub struct RuntimeConfig {
    pub grouping: GroupingResolver,
    pub classifier: ClientClassifier,
    pub query_commands: Vec<String>,
    pub default_page_size: u64,
    pub total_column: TotalPosition,
}

impl RuntimeConfig {
    pub fn is_query_command(&self, command: &str) -> bool {
        self.query_commands.iter().any(|c| c == command)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            grouping: GroupingResolver::default(),
            classifier: ClientClassifier::default(),
            query_commands: vec!["query".to_string()],
            default_page_size: 25,
            total_column: TotalPosition::default(),
        }
    }
}
