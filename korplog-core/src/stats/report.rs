use crate::stats::aggregation::{Cells, Tables};
use crate::stats::{Column, Granularity, RowKey, RowKind, SkipCounts, StatCell, Statistic};
use serde::Serialize;
use std::collections::BTreeSet;

/// Where the `Total` column goes. Never affects the values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalPosition {
    First,
    #[default]
    Last,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub total_position: TotalPosition,
    /// Zero-fill every row and column seen in any statistic.
    pub include_empty: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CellValues {
    pub home: u64,
    pub other: u64,
    pub all: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub label: String,
    pub kind: RowKind,
    pub cells: Vec<CellValues>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub statistic: Statistic,
    pub granularity: Granularity,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn title(&self) -> String {
        format!("{} by {}", self.statistic.as_str(), self.granularity.as_str())
    }

    pub fn row(&self, label: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.label == label)
    }

    pub fn column(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// Values of row `row` in column `column`, both given by label.
    pub fn get(&self, row: &str, column: &str) -> Option<CellValues> {
        let index = self.column(column)?;
        self.row(row)?.cells.get(index).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub records: u64,
    pub skipped: SkipCounts,
    pub tables: Vec<Table>,
}

impl Report {
    pub fn table(&self, statistic: Statistic, granularity: Granularity) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.statistic == statistic && t.granularity == granularity)
    }
}

pub(crate) fn build_report(
    tables: &Tables,
    records: u64,
    skipped: SkipCounts,
    options: &ReportOptions,
) -> Report {
    let all_columns: BTreeSet<Column> = tables
        .values()
        .flat_map(|cells| cells.values().flat_map(|columns| columns.keys().copied()))
        .collect();

    let mut out = Vec::new();
    for statistic in Statistic::ALL {
        for granularity in Granularity::ALL {
            let empty = Cells::new();
            let cells = tables.get(&(granularity, statistic)).unwrap_or(&empty);

            let rows: BTreeSet<RowKey> = if options.include_empty {
                tables
                    .iter()
                    .filter(|((g, _), _)| *g == granularity)
                    .flat_map(|(_, cells)| cells.keys().cloned())
                    .collect()
            } else {
                cells.keys().cloned().collect()
            };

            let columns: BTreeSet<Column> = if options.include_empty {
                all_columns.clone()
            } else {
                cells
                    .values()
                    .flat_map(|columns| columns.keys().copied())
                    .collect()
            };
            let columns = order_columns(columns, options.total_position);

            out.push(Table {
                statistic,
                granularity,
                columns: columns.iter().map(Column::label).collect(),
                rows: rows
                    .into_iter()
                    .map(|row| {
                        let values = cells.get(&row);
                        Row {
                            cells: columns
                                .iter()
                                .map(|column| {
                                    values
                                        .and_then(|v| v.get(column))
                                        .map(StatCell::values)
                                        .unwrap_or_default()
                                })
                                .collect(),
                            label: row.label,
                            kind: row.kind,
                        }
                    })
                    .collect(),
            });
        }
    }

    Report {
        records,
        skipped,
        tables: out,
    }
}

/// Chronological, with `Total` at the requested end.
fn order_columns(columns: BTreeSet<Column>, position: TotalPosition) -> Vec<Column> {
    let has_total = columns.contains(&Column::Total);
    let periods = columns.into_iter().filter(|c| *c != Column::Total);

    let mut out = Vec::new();
    if has_total && position == TotalPosition::First {
        out.push(Column::Total);
    }
    out.extend(periods);
    if has_total && position == TotalPosition::Last {
        out.push(Column::Total);
    }
    out
}
