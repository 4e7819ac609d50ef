use crate::enrichment::user_agent::AgentKind;
use woothee::parser::Parser;

pub struct WootheeEngine {
    parser: Parser,
}

impl Default for WootheeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WootheeEngine {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    pub fn classify(&self, ua: &str) -> AgentKind {
        let Some(result) = self.parser.parse(ua) else {
            return AgentKind::Unknown;
        };

        match result.category {
            "pc" => AgentKind::Desktop,
            "smartphone" | "mobilephone" => AgentKind::Mobile,
            "tablet" => AgentKind::Tablet,
            "crawler" => AgentKind::Crawler,
            _ => AgentKind::Unknown,
        }
    }

    pub fn is_crawler(&self, ua: &str) -> bool {
        self.classify(ua) == AgentKind::Crawler
    }
}
