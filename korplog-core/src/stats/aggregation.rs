use crate::enrichment::Exclusion;
use crate::record::LogRecord;
use crate::stats::report::build_report;
use crate::stats::{
    Analyzer, Column, Granularity, Report, ReportOptions, RowKey, SkipReason, StatCell,
    Statistic, Usage,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::iter;
use tracing::debug;

pub(crate) type Cells = BTreeMap<RowKey, BTreeMap<Column, StatCell>>;
pub(crate) type Tables = BTreeMap<(Granularity, Statistic), Cells>;

/// Records that contributed nothing, by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipCounts {
    pub not_query: u64,
    pub excluded_network: u64,
    pub crawler: u64,
    pub no_date: u64,
}

impl SkipCounts {
    fn count(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::NotQuery => self.not_query += 1,
            SkipReason::Excluded(Exclusion::Network) => self.excluded_network += 1,
            SkipReason::Excluded(Exclusion::Crawler) => self.crawler += 1,
            SkipReason::NoDate => self.no_date += 1,
        }
    }

    fn merge(&mut self, other: &SkipCounts) {
        self.not_query += other.not_query;
        self.excluded_network += other.excluded_network;
        self.crawler += other.crawler;
        self.no_date += other.no_date;
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    tables: Tables,
    records: u64,
    skipped: SkipCounts,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzes `record` and folds it in, or counts why it was skipped.
    pub fn push_record(&mut self, analyzer: &Analyzer<'_>, record: &LogRecord) {
        match analyzer.analyze(record) {
            Ok(usage) => self.push(&usage),
            Err(reason) => {
                debug!(id = %record.id, ?reason, "record skipped");
                self.skipped.count(reason);
            }
        }
    }

    pub fn push(&mut self, usage: &Usage) {
        self.records += 1;

        let columns = [
            Column::Period(usage.period.year()),
            Column::Period(usage.period),
            Column::Total,
        ];
        let region = usage.region;
        let total = RowKey::total();

        for granularity in Granularity::ALL {
            let row_of = |corpus: &str| match granularity {
                Granularity::Corpus => RowKey::corpus(corpus),
                Granularity::Group => usage.group_row(corpus),
            };

            let query_rows: BTreeSet<RowKey> = iter::once(total.clone())
                .chain(usage.corpora.iter().map(|c| row_of(c.as_str())))
                .collect();
            for row in &query_rows {
                for column in columns {
                    self.cell(granularity, Statistic::Queries, row, column)
                        .add(region, 1);
                    self.cell(granularity, Statistic::QueryIps, row, column)
                        .insert(region, &usage.client);
                }
            }

            if usage.hits.is_empty() {
                continue;
            }

            let result_rows: BTreeSet<RowKey> = iter::once(total.clone())
                .chain(usage.hits.iter().map(|(c, _)| row_of(c.as_str())))
                .collect();
            for row in &result_rows {
                for column in columns {
                    self.cell(granularity, Statistic::Results, row, column)
                        .add(region, 1);
                    self.cell(granularity, Statistic::ResultIps, row, column)
                        .insert(region, &usage.client);
                }
            }

            for (corpus, n) in &usage.hits {
                let row = row_of(corpus.as_str());
                for column in columns {
                    self.cell(granularity, Statistic::Hits, &row, column)
                        .add(region, *n);
                    self.cell(granularity, Statistic::Hits, &total, column)
                        .add(region, *n);
                }
            }
        }
    }

    /// Folds `other` into `self`.
    pub fn merge(&mut self, other: StatsAggregator) {
        self.records += other.records;
        self.skipped.merge(&other.skipped);

        for (key, rows) in other.tables {
            let table = self.tables.entry(key).or_default();
            for (row, columns) in rows {
                let cells = table.entry(row).or_default();
                for (column, cell) in columns {
                    match cells.get_mut(&column) {
                        Some(existing) => existing.merge(&cell),
                        None => {
                            cells.insert(column, cell);
                        }
                    }
                }
            }
        }
    }

    /// Requests folded in.
    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn skipped(&self) -> SkipCounts {
        self.skipped
    }

    pub fn report(&self, options: &ReportOptions) -> Report {
        build_report(&self.tables, self.records, self.skipped, options)
    }

    fn cell(
        &mut self,
        granularity: Granularity,
        statistic: Statistic,
        row: &RowKey,
        column: Column,
    ) -> &mut StatCell {
        let cells = self
            .tables
            .entry((granularity, statistic))
            .or_default()
            .entry(row.clone())
            .or_default();

        cells
            .entry(column)
            .or_insert_with(|| StatCell::new(statistic))
    }
}
