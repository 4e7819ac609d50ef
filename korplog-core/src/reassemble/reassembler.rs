use crate::line::{embedded_header, is_debug_header, is_header};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::VecDeque;
use tracing::{info, warn};

const NUL_ESCAPE: &str = "\\x00";
const NEWLINE_MARKER: &str = "\\n";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepairStats {
    pub lines_in: u64,
    pub lines_out: u64,
    /// Headers found inside another line.
    pub split: u64,
    /// Truncated heads completed with their continuation.
    pub joined: u64,
    /// Truncated heads that never got a continuation.
    pub unrepaired: u64,
    /// Continuation lines folded into a DEBUG entry.
    pub debug_continuations: u64,
    /// Lines that neither start with a header nor continue anything.
    pub orphans: u64,
}

struct DebugEntry {
    line: String,
    continuation: Vec<String>,
}

impl DebugEntry {
    fn join(self) -> String {
        let mut out = self.line;
        for part in self.continuation {
            out.push_str(NEWLINE_MARKER);
            if part.chars().any(|c| c.is_control() && c != '\t') {
                out.push_str(&format!("{part:?}"));
            } else {
                out.push_str(&part);
            }
        }
        out
    }
}

#[derive(Default)]
pub struct Reassembler {
    /// Heads of lines cut short by an embedded header, innermost last.
    held: Vec<String>,
    /// Complete lines split out while heads are held.
    deferred: Vec<String>,
    debug: Option<DebugEntry>,
    ready: VecDeque<String>,
    stats: RepairStats,
}

impl Reassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repairs a complete, finite sequence of lines.
    pub fn repair_all<I, S>(lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut reassembler = Self::new();
        let mut out = Vec::new();

        for line in lines {
            reassembler.push(line.as_ref());
            out.extend(reassembler.drain());
        }
        reassembler.finish();
        out.extend(reassembler.drain());

        out
    }

    /// Feeds the next raw line (without its line terminator).
    pub fn push(&mut self, raw: &str) {
        self.stats.lines_in += 1;
        let line = escape_nul(raw);

        if is_header(&line) {
            self.flush_pending();
            self.accept_header(line.into_owned());
        } else if let Some(head) = self.held.pop() {
            self.stats.joined += 1;
            let min = head.len();
            self.complete(head + line.as_ref(), min);
        } else if let Some(debug) = self.debug.as_mut() {
            self.stats.debug_continuations += 1;
            match embedded_header(&line, 0) {
                Some(offset) => {
                    self.stats.split += 1;
                    debug.continuation.push(line[..offset].to_string());
                    self.flush_pending();
                    self.accept_header(line[offset..].to_string());
                }
                None => debug.continuation.push(line.into_owned()),
            }
        } else if let Some(offset) = embedded_header(&line, 0) {
            self.stats.orphans += 1;
            self.stats.split += 1;
            warn!(
                fragment = &line[..offset],
                "continuation fragment with nothing to continue"
            );
            self.emit(line[..offset].to_string());
            self.accept_header(line[offset..].to_string());
        } else {
            self.stats.orphans += 1;
            warn!(line = %line, "line does not start with a log header");
            self.emit(line.into_owned());
        }
    }

    /// Lines repaired so far, in output order.
    pub fn drain(&mut self) -> impl Iterator<Item = String> + '_ {
        self.stats.lines_out += self.ready.len() as u64;
        self.ready.drain(..)
    }

    /// Flushes everything still buffered. Call once after the last line.
    pub fn finish(&mut self) {
        self.flush_pending();

        let s = &self.stats;
        info!(
            lines_in = s.lines_in,
            split = s.split,
            joined = s.joined,
            unrepaired = s.unrepaired,
            debug_continuations = s.debug_continuations,
            orphans = s.orphans,
            "log lines reassembled"
        );
    }

    pub fn stats(&self) -> RepairStats {
        self.stats
    }

    fn accept_header(&mut self, line: String) {
        if let Some(offset) = embedded_header(&line, 1) {
            self.stats.split += 1;
            let (head, tail) = line.split_at(offset);
            self.held.push(head.to_string());
            self.accept_header(tail.to_string());
        } else if self.held.is_empty() && is_debug_header(&line) {
            self.debug = Some(DebugEntry {
                line,
                continuation: Vec::new(),
            });
        } else {
            self.emit(line);
        }
    }

    /// `line` is a held head plus its continuation; `min` is where the
    /// continuation starts.
    fn complete(&mut self, line: String, min: usize) {
        if let Some(offset) = embedded_header(&line, min) {
            self.stats.split += 1;
            let (head, tail) = line.split_at(offset);
            self.held.push(head.to_string());
            self.accept_header(tail.to_string());
            return;
        }

        self.emit(line);
        if self.held.is_empty() {
            self.ready.extend(self.deferred.drain(..));
        }
    }

    fn emit(&mut self, line: String) {
        if self.held.is_empty() {
            self.ready.push_back(line);
        } else {
            self.deferred.push(line);
        }
    }

    fn flush_pending(&mut self) {
        if let Some(debug) = self.debug.take() {
            self.ready.push_back(debug.join());
        }

        for head in self.held.drain(..) {
            self.stats.unrepaired += 1;
            warn!(line = %head, "truncated line was never continued");
            self.ready.push_back(head);
        }

        self.ready.extend(self.deferred.drain(..));
    }
}

fn escape_nul(line: &str) -> Cow<'_, str> {
    if line.contains('\0') {
        Cow::Owned(line.replace('\0', NUL_ESCAPE))
    } else {
        Cow::Borrowed(line)
    }
}
