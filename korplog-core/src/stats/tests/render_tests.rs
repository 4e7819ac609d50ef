use super::{config, sample_records};
use crate::stats::render::{RenderOptions, render_json, render_text};
use crate::stats::{Analyzer, Report, ReportOptions, StatsAggregator};
use pretty_assertions::assert_eq;
use serde_json::Value;

/// Helper: the report of the first sample request only.
fn single_request_report() -> Report {
    let config = config();
    let analyzer = Analyzer::new(&config);
    let mut aggregator = StatsAggregator::new();
    aggregator.push_record(&analyzer, &sample_records()[0]);
    aggregator.report(&ReportOptions::default())
}

/// Helper: whitespace-separated fields of the first line starting with
/// `label` after the heading `title`.
fn row_fields(text: &str, title: &str, label: &str) -> Vec<String> {
    text.lines()
        .skip_while(|l| *l != title)
        .find(|l| l.starts_with(label))
        .unwrap()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[test]
fn text_report_has_one_aligned_table_per_statistic() {
    // Arrange
    let report = single_request_report();

    // Act
    let text = render_text(&report, RenderOptions::default());

    // Assert
    assert!(text.contains("requests: 1 |"));
    assert!(text.contains("queries by corpus\n-----------------\n"));
    assert!(text.contains("hits by group\n"));
    assert_eq!(
        row_fields(&text, "hits by corpus", "klk_fi_1900"),
        vec!["klk_fi_1900", "6", "6", "6"]
    );
    assert_eq!(
        row_fields(&text, "hits by corpus", "Total"),
        vec!["Total", "10", "10", "10"]
    );
}

#[test]
fn header_columns_line_up_with_values() {
    // Arrange
    let report = single_request_report();

    // Act
    let text = render_text(&report, RenderOptions::default());

    // Assert
    let lines: Vec<&str> = text
        .lines()
        .skip_while(|l| *l != "hits by corpus")
        .skip(2)
        .take(2)
        .collect();
    assert_eq!(lines[0].trim_start(), "2016  2016-03  Total");
    assert_eq!(lines[0].len(), lines[1].len());
}

#[test]
fn split_geo_shows_home_and_other() {
    // Arrange
    let report = single_request_report();

    // Act
    let text = render_text(&report, RenderOptions { split_geo: true });

    // Assert
    assert_eq!(
        row_fields(&text, "hits by corpus", "suomi24"),
        vec!["suomi24", "4/0", "4/0", "4/0"]
    );
}

#[test]
fn json_report_keeps_table_structure() {
    // Arrange
    let report = single_request_report();

    // Act
    let json: Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();

    // Assert
    let first = &json["tables"][0];
    assert_eq!(first["statistic"], "queries");
    assert_eq!(first["granularity"], "corpus");
    assert_eq!(first["columns"][2], "Total");
    assert_eq!(first["rows"][0]["kind"], "total");
    assert_eq!(first["rows"][0]["cells"][2]["home"], 1);
    assert_eq!(json["records"], 1);
}
