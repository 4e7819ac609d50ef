use crate::line::LogLine;
use crate::record::pending::PendingEntry;
use crate::record::{Field, LogRecord};
use ahash::RandomState;
use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub lines: u64,
    pub records: u64,
    /// Entries flushed because their pid started a new request.
    pub stale: u64,
    /// Entries still open at end of input.
    pub partial: u64,
    pub debug_lines: u64,
    pub unattributed: u64,
    /// Lines without a log prefix and no open entry to attach them to.
    pub dropped: u64,
}

#[derive(Default)]
pub struct RecordParser {
    open: HashMap<String, PendingEntry, RandomState>,
    next_seq: u64,
    /// Pid of the most recently touched entry.
    last_pid: Option<String>,
    stats: ParseStats,
}

impl RecordParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a complete, finite line sequence.
    pub fn parse_all<I, S>(lines: I) -> Vec<LogRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parser = Self::new();
        let mut records: Vec<LogRecord> = lines
            .into_iter()
            .filter_map(|line| parser.push_line(line.as_ref()))
            .collect();
        records.extend(parser.finish());
        records
    }

    /// Feeds one repaired line. Returns the record the line completed, or
    /// the stale entry it superseded.
    pub fn push_line(&mut self, raw: &str) -> Option<LogRecord> {
        self.stats.lines += 1;

        let Some(line) = LogLine::parse(raw) else {
            self.attach_unattributed(raw);
            return None;
        };

        if line.is_debug() {
            self.stats.debug_lines += 1;
            return None;
        }

        let field = line.key_value().map(|(key, value)| (Field::from_key(key), value));

        let starts_request = match &field {
            Some((Field::Start, _)) => true,
            Some((Field::Ip, _)) => self.open.get(line.pid).is_some_and(PendingEntry::has_ip),
            _ => false,
        };

        let mut stale = None;
        if starts_request {
            if let Some(entry) = self.open.remove(line.pid) {
                debug!(pid = line.pid, "request never terminated, flushing");
                self.stats.stale += 1;
                stale = Some(entry.into_record());
            }
        }

        let entry = match self.open.entry(line.pid.to_string()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                let seq = self.next_seq;
                self.next_seq += 1;
                e.insert(PendingEntry::open(seq, &line))
            }
        };

        entry.touch(&line);
        match field {
            Some((field, value)) => entry.apply(field, value),
            None => {
                self.stats.unattributed += 1;
                entry.append_unattributed(line.body);
            }
        }

        let complete = entry.is_complete();
        self.last_pid = Some(line.pid.to_string());

        if complete {
            let entry = self.open.remove(line.pid)?;
            self.stats.records += 1;
            return Some(entry.into_record());
        }

        if stale.is_some() {
            self.stats.records += 1;
        }
        stale
    }

    /// Flushes all open entries in the order they were opened.
    pub fn finish(&mut self) -> Vec<LogRecord> {
        let mut entries: Vec<PendingEntry> = self.open.drain().map(|(_, e)| e).collect();
        entries.sort_by_key(|e| e.seq);
        self.last_pid = None;

        self.stats.partial += entries.len() as u64;
        self.stats.records += entries.len() as u64;

        let s = &self.stats;
        info!(
            lines = s.lines,
            records = s.records,
            stale = s.stale,
            partial = s.partial,
            unattributed = s.unattributed,
            dropped = s.dropped,
            "log records parsed"
        );

        entries.into_iter().map(PendingEntry::into_record).collect()
    }

    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    fn attach_unattributed(&mut self, raw: &str) {
        if raw.trim().is_empty() {
            return;
        }

        let entry = self
            .last_pid
            .as_deref()
            .and_then(|pid| self.open.get_mut(pid));

        match entry {
            Some(entry) => {
                self.stats.unattributed += 1;
                entry.append_unattributed(raw);
            }
            None => {
                self.stats.dropped += 1;
                warn!(line = raw, "line belongs to no open request, dropped");
            }
        }
    }
}
