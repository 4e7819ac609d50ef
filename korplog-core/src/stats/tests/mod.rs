mod aggregation_tests;
mod render_tests;

use crate::conf::RuntimeConfig;
use crate::enrichment::ClientClassifier;
use crate::grouping::{GroupingResolver, GroupingRule};
use crate::record::LogRecord;

/// Helper: a query request logged on `date` from `ip`.
pub(super) fn query_record(date: &str, ip: &str, params: &str, hits: &str) -> LogRecord {
    LogRecord {
        id: format!("{date}:{ip}"),
        start_date: date.to_string(),
        start_time: "10:15:02,318".to_string(),
        ip: ip.to_string(),
        command: "query".to_string(),
        params: params.to_string(),
        hits: hits.to_string(),
        ..LogRecord::default()
    }
}

/// Helper: `klk_*` corpora grouped as `klk`, 128.214.0.0/16 is home.
pub(super) fn config() -> RuntimeConfig {
    RuntimeConfig {
        grouping: GroupingResolver::new(vec![GroupingRule::prefix("klk")]),
        classifier: ClientClassifier::new()
            .with_home_networks(vec!["128.214.0.0/16".parse().unwrap()]),
        ..RuntimeConfig::default()
    }
}

/// Helper: four requests over two years from one home and one other client.
pub(super) fn sample_records() -> Vec<LogRecord> {
    vec![
        query_record(
            "2016-03-01",
            "128.214.1.1",
            "{'command': 'query', 'corpus': 'SUOMI24,KLK_FI_1900', 'start': '0', 'end': '9'}",
            "{'suomi24': 4, 'klk_fi_1900': 20}",
        ),
        query_record(
            "2016-03-15",
            "10.0.0.2",
            "{'command': 'query', 'corpus': 'KLK_FI_1900,KLK_SV_1900', 'start': 0, 'end': 24}",
            "{'klk_fi_1900': 3, 'klk_sv_1900': 5}",
        ),
        query_record(
            "2016-04-02",
            "128.214.1.1",
            "{'command': 'query', 'corpus': 'SUOMI24'}",
            "{'suomi24': 0}",
        ),
        query_record(
            "2017-01-05",
            "10.0.0.2",
            "{'command': 'query', 'corpus': 'FTB2'}",
            "{'ftb2': 2}",
        ),
    ]
}
