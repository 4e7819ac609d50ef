//! Tab-separated hand-off between the parse and stats stages.

use crate::record::LogRecord;
use std::borrow::Cow;
use std::io::{self, Write};
use tracing::warn;

pub const COLUMNS: [&str; 22] = [
    "id",
    "start_date",
    "start_time",
    "end_date",
    "end_time",
    "elapsed",
    "script",
    "referrer",
    "ip",
    "auth_domain",
    "auth_user",
    "user_agent",
    "command",
    "params",
    "loginfo",
    "hits",
    "content_length",
    "cqp_time",
    "cpu_load",
    "cpu_times",
    "memory_max_rss",
    "protocol_version",
];

pub fn header_row() -> String {
    COLUMNS.join("\t")
}

pub fn write_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", header_row())
}

pub fn write_record<W: Write>(out: &mut W, record: &LogRecord) -> io::Result<()> {
    let row: Vec<Cow<'_, str>> = record.values().into_iter().map(escape).collect();
    writeln!(out, "{}", row.join("\t"))
}

/// Escapes tabs and line breaks so a value fits in one cell. Backslashes are
/// written as is.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['\t', '\n', '\r']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Reverses [`escape`]. Only `\t`, `\n` and `\r` are decoded, so a value
/// that held that literal text reads back as the control character.
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Reads rows written by [`write_record`], skipping the header row and any
/// row with the wrong number of columns.
#[derive(Debug)]
pub struct TsvReader {
    header: String,
    rows: u64,
    skipped: u64,
}

impl Default for TsvReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TsvReader {
    pub fn new() -> Self {
        Self {
            header: header_row(),
            rows: 0,
            skipped: 0,
        }
    }

    pub fn push_line(&mut self, line: &str) -> Option<LogRecord> {
        let line = line.trim_end_matches(['\n', '\r']);
        if line.is_empty() || line == self.header {
            return None;
        }

        self.rows += 1;
        let values: Vec<String> = line.split('\t').map(unescape).collect();
        let found = values.len();

        match LogRecord::from_values(values) {
            Some(record) => Some(record),
            None => {
                self.skipped += 1;
                warn!(
                    row = self.rows,
                    columns = found,
                    expected = COLUMNS.len(),
                    "skipping malformed row"
                );
                None
            }
        }
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}
