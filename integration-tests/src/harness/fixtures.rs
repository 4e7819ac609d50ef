use korplog_core::conf::{RuntimeConfig, load_config};
use std::fs;
use std::path::PathBuf;

pub fn fixture_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(file)
}

/// Raw lines of a fixture log, without line terminators.
pub fn fixture_lines(file: &str) -> Vec<String> {
    let path = fixture_path(file);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn fixture_config(file: &str) -> RuntimeConfig {
    load_config(&fixture_path(file)).expect("failed to load fixture config")
}
