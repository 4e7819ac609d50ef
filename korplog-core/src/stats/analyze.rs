use crate::conf::RuntimeConfig;
use crate::distribute::distribute_hits;
use crate::enrichment::{Exclusion, Region};
use crate::grouping::CorpusGroup;
use crate::literal::ParamMap;
use crate::record::LogRecord;
use crate::stats::{Period, RowKey};
use chrono::NaiveDate;

/// Why a record contributes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotQuery,
    Excluded(Exclusion),
    NoDate,
}

/// What one query request contributes to the statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usage {
    /// Month the request started in.
    pub period: Period,
    pub region: Region,
    pub client: String,
    /// Requested corpora, lower-cased, each listed once.
    pub corpora: Vec<String>,
    /// Hits shown per corpus, in request order.
    pub hits: Vec<(String, u64)>,
    pub groups: Vec<CorpusGroup>,
}

impl Usage {
    /// Row `corpus` is counted in when reporting by group.
    pub fn group_row(&self, corpus: &str) -> RowKey {
        match self
            .groups
            .iter()
            .find(|g| g.members.iter().any(|m| m == corpus))
        {
            Some(group) if group.grouped => RowKey::group(&group.name),
            _ => RowKey::corpus(corpus),
        }
    }
}

pub struct Analyzer<'a> {
    config: &'a RuntimeConfig,
}

impl<'a> Analyzer<'a> {
    pub fn new(config: &'a RuntimeConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, record: &LogRecord) -> Result<Usage, SkipReason> {
        if !self.config.is_query_command(&record.command) {
            return Err(SkipReason::NotQuery);
        }

        if let Some(exclusion) = self.config.classifier.exclusion(record) {
            return Err(SkipReason::Excluded(exclusion));
        }

        let Ok(date) = NaiveDate::parse_from_str(&record.start_date, "%Y-%m-%d") else {
            return Err(SkipReason::NoDate);
        };

        let params = record.param_map();
        let hit_map = record.hit_map();

        let mut requested: Vec<String> = params
            .get_list("corpus")
            .iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        if requested.is_empty() {
            requested = hit_map.totals.keys().cloned().collect();
        }

        let hits = match self.window(&params) {
            Some((start, end)) => distribute_hits(&requested, &hit_map.totals, start, end)
                .into_iter()
                .map(|(corpus, n)| (corpus.to_string(), n))
                .collect(),
            None => Vec::new(),
        };

        let mut corpora: Vec<String> = Vec::with_capacity(requested.len());
        for corpus in requested {
            if !corpora.contains(&corpus) {
                corpora.push(corpus);
            }
        }

        let groups = self
            .config
            .grouping
            .group_all(corpora.iter().map(String::as_str));

        Ok(Usage {
            period: Period::month_of(date),
            region: self.config.classifier.region(&record.ip),
            client: record.client_ip().to_string(),
            corpora,
            hits,
            groups,
        })
    }

    /// The inclusive rank window the client was shown, or `None` when it
    /// was shown nothing.
    fn window(&self, params: &ParamMap) -> Option<(u64, u64)> {
        let page = i64::try_from(self.config.default_page_size).unwrap_or(i64::MAX);

        let start = params.get_i64("start").unwrap_or(0).max(0);
        let end = params
            .get_i64("end")
            .unwrap_or_else(|| start.saturating_add(page - 1));

        if end < 0 {
            return None;
        }
        Some((start as u64, end as u64))
    }
}
