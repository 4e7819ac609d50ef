mod common;

use integration_tests::harness::{capture_events, fixture_lines};
use korplog_core::reassemble::Reassembler;
use korplog_core::record::{RecordParser, tsv};
use korplog_core::stats::{
    Analyzer, Granularity, ReportOptions, SkipCounts, StatsAggregator, Statistic,
};
use pretty_assertions::assert_eq;
use tracing::Level;

#[test]
fn interleaved_lines_are_repaired() {
    // Act
    let lines = common::repaired_lines();

    // Assert
    assert_eq!(lines.len(), 31);
    assert!(lines[5].starts_with("[korp.cgi 101 INFO @ 2016-03-01 10:15:02,320] Params: "));
    assert!(lines[5].ends_with("'end': '9', 'defaultcontext': '1 sentence'}"));
    assert_eq!(
        lines[6],
        "[korp.cgi 202 INFO @ 2016-03-01 10:15:02,402] IP: 193.166.3.2"
    );
    assert_eq!(
        lines[9],
        "[korp.cgi 101 DEBUG @ 2016-03-01 10:15:02,330] CQP: show +suomi24;\\nSUOMI24;\\n[word = \"kissa\"];"
    );
}

#[test]
fn repair_statistics_are_reported() {
    // Arrange
    let mut reassembler = Reassembler::new();

    // Act
    for line in fixture_lines(common::LOG) {
        reassembler.push(&line);
    }
    reassembler.finish();
    let repaired = reassembler.drain().count();
    let stats = reassembler.stats();

    // Assert
    assert_eq!(repaired, 31);
    assert_eq!(stats.lines_in, 33);
    assert_eq!(stats.lines_out, 31);
    assert_eq!(stats.split, 1);
    assert_eq!(stats.joined, 1);
    assert_eq!(stats.debug_continuations, 2);
    assert_eq!(stats.orphans, 1);
}

#[test]
fn every_request_becomes_one_record() {
    // Act
    let records = common::records();

    // Assert
    let ids: Vec<&str> = records.iter().map(|r| &r.id[r.id.len() - 5..]).collect();
    assert_eq!(ids, vec!["00202", "00101", "00303", "00404", "00505"]);
}

#[test]
fn split_request_is_reassembled_into_one_record() {
    // Act
    let records = common::records();
    let record = records.iter().find(|r| r.id.ends_with(":00101")).unwrap();

    // Assert
    assert_eq!(record.id, "1456827302318:00101");
    assert_eq!(record.ip, "128.214.1.1");
    assert_eq!(record.command, "query");
    assert_eq!(record.end_time, "10:15:02,711");
    assert_eq!(record.elapsed, "0.393");
    assert_eq!(record.hits, "{'suomi24': 4, 'klk_fi_1900': 20}");
    assert_eq!(
        record.param_map().get_list("corpus"),
        vec!["SUOMI24", "KLK_FI_1900"]
    );
    assert_eq!(
        record.param_map().get_str("defaultcontext"),
        Some("1 sentence")
    );
}

#[test]
fn unterminated_request_is_flushed_at_end_of_input() {
    // Arrange
    let mut parser = RecordParser::new();

    // Act
    let mut records: Vec<_> = common::repaired_lines()
        .iter()
        .filter_map(|line| parser.push_line(line))
        .collect();
    records.extend(parser.finish());
    let stats = parser.stats();

    // Assert
    assert_eq!(stats.records, 5);
    assert_eq!(stats.partial, 1);
    assert_eq!(stats.debug_lines, 1);
    assert_eq!(stats.dropped, 1);
    let last = records.last().unwrap();
    assert_eq!(last.ip, "193.166.3.2");
    assert_eq!(last.hits, "{'klk_sv_1900': 5}");
    assert_eq!(last.elapsed, "");
}

#[test]
fn line_outside_any_request_is_warned_about() {
    // Act
    let (_, events) = capture_events(common::records);

    // Assert
    let dropped = events
        .iter()
        .find(|e| e.message() == "line belongs to no open request, dropped")
        .expect("expected a warning for the dropped line");
    assert_eq!(dropped.level, Level::WARN);
    assert_eq!(dropped.field("line"), Some("korp.cgi restarted by logrotate"));
}

#[test]
fn usage_is_aggregated_from_the_log() {
    // Arrange
    let config = common::config();
    let analyzer = Analyzer::new(&config);
    let mut aggregator = StatsAggregator::new();

    // Act
    for record in common::records() {
        aggregator.push_record(&analyzer, &record);
    }
    let report = aggregator.report(&ReportOptions::default());

    // Assert
    assert_eq!(report.records, 2);
    assert_eq!(
        report.skipped,
        SkipCounts {
            not_query: 1,
            excluded_network: 1,
            crawler: 1,
            no_date: 0,
        }
    );

    let queries = report
        .table(Statistic::Queries, Granularity::Corpus)
        .unwrap();
    assert_eq!(queries.columns, vec!["2016", "2016-03", "2016-04", "Total"]);
    assert_eq!(queries.get("Total", "Total").unwrap().all, 2);

    let hits = report.table(Statistic::Hits, Granularity::Corpus).unwrap();
    let total = hits.get("Total", "Total").unwrap();
    assert_eq!((total.home, total.other, total.all), (10, 5, 15));
    assert_eq!(hits.get("suomi24", "2016-03").unwrap().all, 4);
    assert_eq!(hits.get("klk_fi_1900", "Total").unwrap().all, 6);

    let group_hits = report.table(Statistic::Hits, Granularity::Group).unwrap();
    let klk = group_hits.get("klk", "Total").unwrap();
    assert_eq!((klk.home, klk.other, klk.all), (6, 5, 11));
}

#[test]
fn corpus_hits_add_up_to_the_total_row() {
    // Arrange
    let config = common::config();
    let analyzer = Analyzer::new(&config);
    let mut aggregator = StatsAggregator::new();
    for record in common::records() {
        aggregator.push_record(&analyzer, &record);
    }

    // Act
    let report = aggregator.report(&ReportOptions::default());

    // Assert
    let hits = report.table(Statistic::Hits, Granularity::Corpus).unwrap();
    let total = hits.row("Total").unwrap();
    for (index, column) in hits.columns.iter().enumerate() {
        let sum: u64 = hits
            .rows
            .iter()
            .filter(|r| r.label != "Total")
            .map(|r| r.cells[index].all)
            .sum();
        assert_eq!(sum, total.cells[index].all, "column {column}");
    }
}

#[test]
fn distinct_addresses_never_exceed_requests() {
    // Arrange
    let config = common::config();
    let analyzer = Analyzer::new(&config);
    let mut aggregator = StatsAggregator::new();
    for record in common::records() {
        aggregator.push_record(&analyzer, &record);
    }

    // Act
    let report = aggregator.report(&ReportOptions::default());

    // Assert
    for granularity in Granularity::ALL {
        for (distinct, raw) in [
            (Statistic::QueryIps, Statistic::Queries),
            (Statistic::ResultIps, Statistic::Results),
        ] {
            let distinct = report.table(distinct, granularity).unwrap();
            let raw = report.table(raw, granularity).unwrap();
            for row in &distinct.rows {
                for column in &distinct.columns {
                    let d = distinct.get(&row.label, column).unwrap();
                    let r = raw.get(&row.label, column).unwrap_or_default();
                    assert!(d.all <= r.all, "{} {column}", row.label);
                }
            }
        }
    }
}

#[test]
fn tsv_records_aggregate_like_raw_records() {
    // Arrange
    let config = common::config();
    let analyzer = Analyzer::new(&config);
    let records = common::records();

    let mut buf = Vec::new();
    tsv::write_header(&mut buf).unwrap();
    for record in &records {
        tsv::write_record(&mut buf, record).unwrap();
    }
    let text = String::from_utf8(buf).unwrap();

    let mut from_raw = StatsAggregator::new();
    for record in &records {
        from_raw.push_record(&analyzer, record);
    }

    // Act
    let mut reader = tsv::TsvReader::new();
    let mut from_tsv = StatsAggregator::new();
    for line in text.lines() {
        if let Some(record) = reader.push_line(line) {
            from_tsv.push_record(&analyzer, &record);
        }
    }

    // Assert
    assert_eq!(reader.skipped(), 0);
    let options = ReportOptions::default();
    assert_eq!(from_tsv.report(&options), from_raw.report(&options));
}

#[test]
fn merged_shards_equal_a_single_pass() {
    // Arrange
    let config = common::config();
    let analyzer = Analyzer::new(&config);
    let records = common::records();

    let mut single = StatsAggregator::new();
    for record in &records {
        single.push_record(&analyzer, record);
    }

    // Act
    let mut merged = StatsAggregator::new();
    for record in records.iter().rev() {
        let mut shard = StatsAggregator::new();
        shard.push_record(&analyzer, record);
        merged.merge(shard);
    }

    // Assert
    let options = ReportOptions {
        include_empty: true,
        ..ReportOptions::default()
    };
    assert_eq!(merged.report(&options), single.report(&options));
}
