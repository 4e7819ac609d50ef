mod capture;
mod fixtures;

pub use capture::{CapturedEvent, TestEventLayer, capture_events};
pub use fixtures::{fixture_config, fixture_lines, fixture_path};
