use crate::enrichment::Region;
use crate::stats::{CellValues, Statistic};
use ahash::RandomState;
use std::collections::HashSet;

type ValueSet = HashSet<String, RandomState>;

/// One cell of one statistic, split by client region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatCell {
    Count { home: u64, other: u64 },
    Distinct { home: ValueSet, other: ValueSet },
}

impl StatCell {
    pub fn new(statistic: Statistic) -> Self {
        if statistic.is_distinct() {
            StatCell::Distinct {
                home: ValueSet::default(),
                other: ValueSet::default(),
            }
        } else {
            StatCell::Count { home: 0, other: 0 }
        }
    }

    /// Adds to a counter; a no-op on a distinct cell.
    pub fn add(&mut self, region: Region, n: u64) {
        if let StatCell::Count { home, other } = self {
            match region {
                Region::Home => *home += n,
                Region::Other => *other += n,
            }
        }
    }

    /// Records a value in a distinct cell; a no-op on a counter.
    pub fn insert(&mut self, region: Region, value: &str) {
        if let StatCell::Distinct { home, other } = self {
            let set = match region {
                Region::Home => home,
                Region::Other => other,
            };
            if !set.contains(value) {
                set.insert(value.to_string());
            }
        }
    }

    pub fn merge(&mut self, from: &StatCell) {
        match (self, from) {
            (StatCell::Count { home, other }, StatCell::Count { home: h, other: o }) => {
                *home += h;
                *other += o;
            }
            (StatCell::Distinct { home, other }, StatCell::Distinct { home: h, other: o }) => {
                home.extend(h.iter().cloned());
                other.extend(o.iter().cloned());
            }
            _ => {}
        }
    }

    pub fn values(&self) -> CellValues {
        match self {
            StatCell::Count { home, other } => CellValues {
                home: *home,
                other: *other,
                all: home + other,
            },
            StatCell::Distinct { home, other } => CellValues {
                home: home.len() as u64,
                other: other.len() as u64,
                all: home.union(other).count() as u64,
            },
        }
    }
}
