use crate::enrichment::user_agent::{AgentKind, WootheeEngine};
use crate::enrichment::{ClientClassifier, Exclusion, Region};
use crate::record::LogRecord;
use ipnet::IpNet;
use pretty_assertions::assert_eq;

const GOOGLEBOT: &str = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";
const FIREFOX: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/115.0";

/// Helper: parses CIDR literals.
fn nets(cidrs: &[&str]) -> Vec<IpNet> {
    cidrs.iter().map(|c| c.parse().unwrap()).collect()
}

/// Helper: a record from `ip` with user agent `ua`.
fn record(ip: &str, ua: &str) -> LogRecord {
    LogRecord {
        ip: ip.to_string(),
        user_agent: ua.to_string(),
        ..LogRecord::default()
    }
}

#[test]
fn home_network_clients_are_home() {
    // Arrange
    let classifier = ClientClassifier::new().with_home_networks(nets(&["128.214.0.0/16"]));

    // Act & Assert
    assert_eq!(classifier.region("128.214.3.4"), Region::Home);
    assert_eq!(classifier.region("193.166.1.1"), Region::Other);
}

#[test]
fn first_address_of_a_proxy_chain_is_the_client() {
    let classifier = ClientClassifier::new().with_home_networks(nets(&["128.214.0.0/16"]));

    assert_eq!(classifier.region("128.214.3.4, 10.0.0.1"), Region::Home);
}

#[test]
fn unparseable_address_is_other() {
    let classifier = ClientClassifier::new().with_home_networks(nets(&["0.0.0.0/0"]));

    assert_eq!(classifier.region(""), Region::Other);
    assert_eq!(classifier.region("unknown"), Region::Other);
}

#[test]
fn home_country_without_database_matches_nothing() {
    let classifier = ClientClassifier::new().with_home_country("fi", None);

    assert_eq!(classifier.region("128.214.3.4"), Region::Other);
}

#[test]
fn excluded_network_records_are_reported() {
    // Arrange
    let classifier = ClientClassifier::new().with_excluded_networks(nets(&["10.0.0.0/8"]));

    // Act & Assert
    assert_eq!(
        classifier.exclusion(&record("10.1.2.3", FIREFOX)),
        Some(Exclusion::Network)
    );
    assert_eq!(classifier.exclusion(&record("128.214.3.4", FIREFOX)), None);
}

#[test]
fn crawlers_are_excluded_only_when_asked() {
    // Arrange
    let lenient = ClientClassifier::new();
    let strict = ClientClassifier::new().excluding_crawlers();
    let bot = record("66.249.66.1", GOOGLEBOT);

    // Act & Assert
    assert_eq!(lenient.exclusion(&bot), None);
    assert_eq!(strict.exclusion(&bot), Some(Exclusion::Crawler));
    assert_eq!(strict.exclusion(&record("66.249.66.1", FIREFOX)), None);
}

#[test]
fn woothee_engine_classifies_agents() {
    let engine = WootheeEngine::new();

    assert_eq!(engine.classify(GOOGLEBOT), AgentKind::Crawler);
    assert_eq!(engine.classify(FIREFOX), AgentKind::Desktop);
    assert!(!engine.is_crawler(""));
}
