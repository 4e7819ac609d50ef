use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    /// Query requests.
    Queries,
    /// Distinct client addresses making queries.
    QueryIps,
    /// Requests that showed at least one hit.
    Results,
    /// Distinct client addresses that were shown hits.
    ResultIps,
    /// Hits shown.
    Hits,
}

impl Statistic {
    pub const ALL: [Statistic; 5] = [
        Statistic::Queries,
        Statistic::QueryIps,
        Statistic::Results,
        Statistic::ResultIps,
        Statistic::Hits,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Statistic::Queries => "queries",
            Statistic::QueryIps => "query_ips",
            Statistic::Results => "results",
            Statistic::ResultIps => "result_ips",
            Statistic::Hits => "hits",
        }
    }

    /// Distinct statistics count client addresses, not events.
    pub fn is_distinct(&self) -> bool {
        matches!(self, Statistic::QueryIps | Statistic::ResultIps)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Corpus,
    Group,
}

impl Granularity {
    pub const ALL: [Granularity; 2] = [Granularity::Corpus, Granularity::Group];

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Corpus => "corpus",
            Granularity::Group => "group",
        }
    }
}

/// A year, or a month of a year. A year sorts right before its months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    pub year: i32,
    pub month: Option<u32>,
}

impl Period {
    pub fn month_of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: Some(date.month()),
        }
    }

    pub fn year(&self) -> Self {
        Self {
            year: self.year,
            month: None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month {
            Some(month) => write!(f, "{:04}-{month:02}", self.year),
            None => write!(f, "{:04}", self.year),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Period(Period),
    Total,
}

impl Column {
    pub fn label(&self) -> String {
        match self {
            Column::Period(p) => p.to_string(),
            Column::Total => "Total".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Total,
    Group,
    Corpus,
}

/// A table row. `Total` sorts first, the rest by label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    pub kind: RowKind,
    pub label: String,
}

impl RowKey {
    pub fn total() -> Self {
        Self {
            kind: RowKind::Total,
            label: "Total".to_string(),
        }
    }

    pub fn group(name: &str) -> Self {
        Self {
            kind: RowKind::Group,
            label: name.to_string(),
        }
    }

    pub fn corpus(name: &str) -> Self {
        Self {
            kind: RowKind::Corpus,
            label: name.to_string(),
        }
    }

    fn is_total(&self) -> bool {
        self.kind == RowKind::Total
    }
}

impl Ord for RowKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .is_total()
            .cmp(&self.is_total())
            .then_with(|| self.label.cmp(&other.label))
            .then_with(|| (self.kind as u8).cmp(&(other.kind as u8)))
    }
}

impl PartialOrd for RowKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
