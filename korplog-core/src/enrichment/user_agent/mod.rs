mod woothee_engine;

pub use woothee_engine::WootheeEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Desktop,
    Mobile,
    Tablet,
    Crawler,
    Unknown,
}
