use crate::enrichment::Region;
use crate::enrichment::geoip::CountryDb;
use crate::enrichment::user_agent::WootheeEngine;
use crate::record::LogRecord;
use ipnet::IpNet;
use std::net::IpAddr;

/// Why a record is left out of the statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    Network,
    Crawler,
}

#[derive(Default)]
pub struct ClientClassifier {
    home_networks: Vec<IpNet>,
    home_country: Option<String>,
    country_db: Option<CountryDb>,
    exclude_networks: Vec<IpNet>,
    bots: Option<WootheeEngine>,
}

impl ClientClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_home_networks(mut self, networks: Vec<IpNet>) -> Self {
        self.home_networks = networks;
        self
    }

    /// Clients the database places in `country` count as home clients.
    pub fn with_home_country(mut self, country: &str, db: Option<CountryDb>) -> Self {
        self.home_country = Some(country.to_ascii_uppercase());
        self.country_db = db;
        self
    }

    pub fn with_excluded_networks(mut self, networks: Vec<IpNet>) -> Self {
        self.exclude_networks = networks;
        self
    }

    pub fn excluding_crawlers(mut self) -> Self {
        self.bots = Some(WootheeEngine::new());
        self
    }

    /// Unparseable addresses count as [`Region::Other`].
    pub fn region(&self, ip: &str) -> Region {
        let Some(ip) = parse_ip(ip) else {
            return Region::Other;
        };

        if self.home_networks.iter().any(|net| net.contains(&ip)) {
            return Region::Home;
        }

        let in_home_country = self
            .home_country
            .as_deref()
            .zip(self.country_db.as_ref())
            .and_then(|(home, db)| Some(db.country_code(ip)?.eq_ignore_ascii_case(home)))
            .unwrap_or(false);

        if in_home_country {
            Region::Home
        } else {
            Region::Other
        }
    }

    pub fn exclusion(&self, record: &LogRecord) -> Option<Exclusion> {
        if let Some(ip) = parse_ip(record.client_ip()) {
            if self.exclude_networks.iter().any(|net| net.contains(&ip)) {
                return Some(Exclusion::Network);
            }
        }

        let crawler = self
            .bots
            .as_ref()
            .is_some_and(|engine| engine.is_crawler(&record.user_agent));

        crawler.then_some(Exclusion::Crawler)
    }
}

/// The first address of a possibly comma-separated proxy chain.
fn parse_ip(raw: &str) -> Option<IpAddr> {
    raw.split(',').next()?.trim().parse().ok()
}
