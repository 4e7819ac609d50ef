//! The backend's log line syntax.
//!
//! ```text
//! [korp.cgi 20311 INFO @ 2016-03-01 10:15:02,318] Elapsed: 0.412
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

const PREFIX_PATTERN: &str = r"\[(?P<script>[^\s\[\]]+) (?P<pid>[^\s\[\]]+) (?P<level>[A-Z]+) @ (?P<date>\d{4}-\d{2}-\d{2}) (?P<time>\d{2}:\d{2}:\d{2}(?:,\d{1,6})?)\] ";

static PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(PREFIX_PATTERN).expect("valid line prefix"));

static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{PREFIX_PATTERN}")).expect("valid line prefix"));

/// One prefixed log line, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub script: &'a str,
    pub pid: &'a str,
    pub level: &'a str,
    pub date: &'a str,
    pub time: &'a str,
    /// Everything after the prefix.
    pub body: &'a str,
}

impl<'a> LogLine<'a> {
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = HEADER.captures(line)?;
        let end = caps.get(0)?.end();

        Some(Self {
            script: caps.name("script")?.as_str(),
            pid: caps.name("pid")?.as_str(),
            level: caps.name("level")?.as_str(),
            date: caps.name("date")?.as_str(),
            time: caps.name("time")?.as_str(),
            body: &line[end..],
        })
    }

    pub fn is_debug(&self) -> bool {
        self.level == "DEBUG"
    }

    /// `key: value` split of the body. The single space after the colon is
    /// not part of the value.
    pub fn key_value(&self) -> Option<(&'a str, &'a str)> {
        let (key, value) = self.body.split_once(':')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key, value.strip_prefix(' ').unwrap_or(value)))
    }
}

/// Whether `line` starts with a log line prefix.
pub fn is_header(line: &str) -> bool {
    HEADER.is_match(line)
}

pub fn is_debug_header(line: &str) -> bool {
    LogLine::parse(line).is_some_and(|l| l.is_debug())
}

/// Offset of the first line prefix starting at or after `min` (and never at
/// offset 0), i.e. a header written into the middle of another line.
pub fn embedded_header(line: &str, min: usize) -> Option<usize> {
    PREFIX
        .find_iter(line)
        .map(|m| m.start())
        .find(|&start| start > 0 && start >= min)
}
