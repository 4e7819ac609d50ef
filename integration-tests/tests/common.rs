#![allow(dead_code)]

use integration_tests::harness::{fixture_config, fixture_lines};
use korplog_core::conf::RuntimeConfig;
use korplog_core::reassemble::Reassembler;
use korplog_core::record::{LogRecord, RecordParser};

pub const LOG: &str = "korp-cgi-201603.log";
pub const CONFIG: &str = "korplog.hcl";

pub fn repaired_lines() -> Vec<String> {
    Reassembler::repair_all(fixture_lines(LOG))
}

pub fn records() -> Vec<LogRecord> {
    RecordParser::parse_all(repaired_lines())
}

pub fn config() -> RuntimeConfig {
    fixture_config(CONFIG)
}
