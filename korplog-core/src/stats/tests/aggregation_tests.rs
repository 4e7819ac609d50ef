use super::{config, query_record, sample_records};
use crate::record::LogRecord;
use crate::stats::{
    Analyzer, CellValues, Granularity, ReportOptions, RowKind, StatsAggregator, Statistic,
    TotalPosition,
};
use pretty_assertions::assert_eq;

/// Helper: aggregates `records` in one pass.
fn aggregate(records: &[LogRecord]) -> StatsAggregator {
    let config = config();
    let analyzer = Analyzer::new(&config);
    let mut aggregator = StatsAggregator::new();
    for record in records {
        aggregator.push_record(&analyzer, record);
    }
    aggregator
}

fn values(home: u64, other: u64) -> CellValues {
    CellValues {
        home,
        other,
        all: home + other,
    }
}

#[test]
fn queries_are_counted_per_period_and_region() {
    // Arrange
    let aggregator = aggregate(&sample_records());

    // Act
    let report = aggregator.report(&ReportOptions::default());
    let queries = report
        .table(Statistic::Queries, Granularity::Corpus)
        .unwrap();

    // Assert
    assert_eq!(report.records, 4);
    assert_eq!(
        queries.columns,
        vec!["2016", "2016-03", "2016-04", "2017", "2017-01", "Total"]
    );
    assert_eq!(queries.get("Total", "2016"), Some(values(2, 1)));
    assert_eq!(queries.get("Total", "2016-03"), Some(values(1, 1)));
    assert_eq!(queries.get("Total", "Total"), Some(values(2, 2)));
    assert_eq!(queries.get("klk_fi_1900", "2016-03"), Some(values(1, 1)));
    assert_eq!(queries.get("ftb2", "2016"), Some(values(0, 0)));
}

#[test]
fn distinct_addresses_are_counted_once() {
    // Arrange
    let aggregator = aggregate(&sample_records());

    // Act
    let report = aggregator.report(&ReportOptions::default());
    let query_ips = report
        .table(Statistic::QueryIps, Granularity::Corpus)
        .unwrap();

    // Assert
    assert_eq!(query_ips.get("Total", "Total"), Some(values(1, 1)));
    assert_eq!(query_ips.get("suomi24", "2016"), Some(values(1, 0)));
}

#[test]
fn results_and_hits_follow_the_shown_window() {
    // Arrange
    let aggregator = aggregate(&sample_records());

    // Act
    let report = aggregator.report(&ReportOptions::default());
    let results = report
        .table(Statistic::Results, Granularity::Corpus)
        .unwrap();
    let hits = report.table(Statistic::Hits, Granularity::Corpus).unwrap();

    // Assert
    assert_eq!(results.get("Total", "Total"), Some(values(1, 2)));
    assert_eq!(results.get("suomi24", "Total"), Some(values(1, 0)));
    assert_eq!(hits.get("Total", "Total"), Some(values(10, 10)));
    assert_eq!(hits.get("klk_fi_1900", "2016-03"), Some(values(6, 3)));
    assert_eq!(hits.get("Total", "2016-04"), None);
}

#[test]
fn groups_count_once_per_request_and_sum_hits() {
    // Arrange
    let aggregator = aggregate(&sample_records());

    // Act
    let report = aggregator.report(&ReportOptions::default());
    let queries = report.table(Statistic::Queries, Granularity::Group).unwrap();
    let hits = report.table(Statistic::Hits, Granularity::Group).unwrap();

    // Assert
    assert_eq!(queries.get("klk", "2016-03"), Some(values(1, 1)));
    assert_eq!(queries.row("klk").unwrap().kind, RowKind::Group);
    assert_eq!(queries.row("suomi24").unwrap().kind, RowKind::Corpus);
    assert_eq!(hits.get("klk", "Total"), Some(values(6, 8)));
}

#[test]
fn total_row_comes_first() {
    let report = aggregate(&sample_records()).report(&ReportOptions::default());

    for table in &report.tables {
        assert_eq!(table.rows[0].kind, RowKind::Total, "{}", table.title());
    }
}

#[test]
fn corpus_hits_add_up_to_the_total_row() {
    // Arrange
    let report = aggregate(&sample_records()).report(&ReportOptions::default());
    let hits = report.table(Statistic::Hits, Granularity::Corpus).unwrap();

    // Act & Assert
    for (i, column) in hits.columns.iter().enumerate() {
        let corpus_sum: u64 = hits
            .rows
            .iter()
            .filter(|r| r.kind == RowKind::Corpus)
            .map(|r| r.cells[i].all)
            .sum();
        assert_eq!(corpus_sum, hits.get("Total", column).unwrap().all, "{column}");
    }
}

#[test]
fn distinct_counts_never_exceed_raw_counts() {
    // Arrange
    let report = aggregate(&sample_records()).report(&ReportOptions::default());

    // Act & Assert
    for granularity in Granularity::ALL {
        for (raw, distinct) in [
            (Statistic::Queries, Statistic::QueryIps),
            (Statistic::Results, Statistic::ResultIps),
        ] {
            let raw = report.table(raw, granularity).unwrap();
            let distinct = report.table(distinct, granularity).unwrap();

            for row in &distinct.rows {
                for (i, column) in distinct.columns.iter().enumerate() {
                    let count = raw.get(&row.label, column).unwrap_or_default();
                    assert!(row.cells[i].home <= count.home);
                    assert!(row.cells[i].other <= count.other);
                    assert!(row.cells[i].all <= count.all);
                }
            }
        }
    }
}

#[test]
fn merged_shards_equal_a_single_pass() {
    // Arrange
    let records = sample_records();
    let single = aggregate(&records);

    // Act
    let mut left = aggregate(&records[..2]);
    left.merge(aggregate(&records[2..]));
    let mut right = aggregate(&records[2..]);
    right.merge(aggregate(&records[..2]));

    // Assert
    let options = ReportOptions::default();
    assert_eq!(left.report(&options), single.report(&options));
    assert_eq!(right.report(&options), single.report(&options));
}

#[test]
fn total_column_position_does_not_change_values() {
    // Arrange
    let aggregator = aggregate(&sample_records());
    let first = ReportOptions {
        total_position: TotalPosition::First,
        ..ReportOptions::default()
    };

    // Act
    let report_first = aggregator.report(&first);
    let report_last = aggregator.report(&ReportOptions::default());

    // Assert
    let a = report_first
        .table(Statistic::Hits, Granularity::Corpus)
        .unwrap();
    let b = report_last
        .table(Statistic::Hits, Granularity::Corpus)
        .unwrap();
    assert_eq!(a.columns[0], "Total");
    assert_eq!(b.columns.last().map(String::as_str), Some("Total"));
    for column in &a.columns {
        assert_eq!(a.get("klk_fi_1900", column), b.get("klk_fi_1900", column));
    }
}

#[test]
fn empty_rows_are_zero_filled_on_request() {
    // Arrange
    let records = vec![query_record(
        "2016-04-02",
        "128.214.1.1",
        "{'command': 'query', 'corpus': 'SUOMI24'}",
        "{'suomi24': 0}",
    )];
    let aggregator = aggregate(&records);
    let with_empty = ReportOptions {
        include_empty: true,
        ..ReportOptions::default()
    };

    // Act
    let sparse = aggregator.report(&ReportOptions::default());
    let dense = aggregator.report(&with_empty);

    // Assert
    let sparse_results = sparse
        .table(Statistic::Results, Granularity::Corpus)
        .unwrap();
    assert!(sparse_results.rows.is_empty());

    let dense_results = dense
        .table(Statistic::Results, Granularity::Corpus)
        .unwrap();
    assert_eq!(dense_results.columns, vec!["2016", "2016-04", "Total"]);
    assert_eq!(dense_results.get("suomi24", "Total"), Some(values(0, 0)));
    assert_eq!(dense_results.rows.len(), 2);
}

#[test]
fn skipped_records_are_counted_by_reason() {
    // Arrange
    let mut records = sample_records();
    records[0].command = "info".to_string();
    records[1].start_date = "garbage".to_string();

    // Act
    let aggregator = aggregate(&records);

    // Assert
    assert_eq!(aggregator.records(), 2);
    assert_eq!(aggregator.skipped().not_query, 1);
    assert_eq!(aggregator.skipped().no_date, 1);
}
