use crate::conf::error::{ConfigError, ValidationErrors};
use crate::conf::runtime::RuntimeConfig;
use crate::conf::types::{GroupingRuleSpec, KorplogSpec, TotalColumnSpec};
use crate::enrichment::ClientClassifier;
use crate::enrichment::geoip::CountryDb;
use crate::grouping::{GroupingResolver, GroupingRule};
use crate::stats::TotalPosition;
use ipnet::IpNet;

#[derive(Default)]
pub(crate) struct ValidationCtx {
    errors: Vec<ConfigError>,
}

impl ValidationCtx {
    pub fn push(&mut self, err: ConfigError) {
        self.errors.push(err);
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

/// Validates `spec` and builds the runtime configuration from it.
pub fn lower_spec(spec: &KorplogSpec) -> Result<RuntimeConfig, ValidationErrors> {
    let mut ctx = ValidationCtx::default();

    let home_country = spec.home_country.trim();
    if !home_country.is_empty()
        && !(home_country.len() == 2 && home_country.chars().all(|c| c.is_ascii_alphabetic()))
    {
        ctx.push(ConfigError::InvalidCountryCode {
            code: spec.home_country.clone(),
        });
    }

    if spec.default_page_size == 0 {
        ctx.push(ConfigError::ZeroPageSize);
    }

    let query_commands: Vec<String> = spec
        .query_commands
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if query_commands.is_empty() {
        ctx.push(ConfigError::NoQueryCommands);
    }

    let home_networks = parse_networks("home_networks", &spec.home_networks, &mut ctx);
    let exclude_networks = parse_networks("exclude_networks", &spec.exclude_networks, &mut ctx);
    let rules = compile_rules(&spec.grouping_rules, &mut ctx);

    let country_db = match &spec.geoip_country_db {
        Some(path) => match CountryDb::open(path) {
            Ok(db) => Some(db),
            Err(e) => {
                ctx.push(ConfigError::GeoIp {
                    path: path.clone(),
                    reason: e.to_string(),
                });
                None
            }
        },
        None => None,
    };

    ctx.into_result()?;

    let mut classifier = ClientClassifier::new()
        .with_home_networks(home_networks)
        .with_excluded_networks(exclude_networks);
    if !home_country.is_empty() {
        classifier = classifier.with_home_country(home_country, country_db);
    }
    if spec.exclude_bots {
        classifier = classifier.excluding_crawlers();
    }

    Ok(RuntimeConfig {
        grouping: GroupingResolver::new(rules),
        classifier,
        query_commands,
        default_page_size: spec.default_page_size,
        total_column: match spec.total_column {
            TotalColumnSpec::First => TotalPosition::First,
            TotalColumnSpec::Last => TotalPosition::Last,
        },
    })
}

fn parse_networks(field: &'static str, cidrs: &[String], ctx: &mut ValidationCtx) -> Vec<IpNet> {
    let mut out = Vec::new();

    for cidr in cidrs {
        match cidr.trim().parse::<IpNet>() {
            Ok(net) => out.push(net),
            Err(source) => ctx.push(ConfigError::InvalidNetwork {
                field,
                network: cidr.clone(),
                source,
            }),
        }
    }

    out
}

fn compile_rules(specs: &[GroupingRuleSpec], ctx: &mut ValidationCtx) -> Vec<GroupingRule> {
    let mut rules = Vec::new();

    for (index, spec) in specs.iter().enumerate() {
        let group = spec.group.trim();
        if group.is_empty() {
            ctx.push(ConfigError::EmptyGroupName { index });
            continue;
        }

        match &spec.pattern {
            None => rules.push(GroupingRule::prefix(group)),
            Some(pattern) => match GroupingRule::full_match(group, pattern) {
                Ok(rule) => rules.push(rule),
                Err(source) => ctx.push(ConfigError::InvalidRegex {
                    group: group.to_string(),
                    source,
                }),
            },
        }
    }

    rules
}
