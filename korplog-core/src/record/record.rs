use crate::literal::{CorpusHitMap, ParamMap};
use serde::{Deserialize, Serialize};

/// A field logged under a name the parser does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraField {
    pub name: String,
    pub value: String,
}

/// One request as reconstructed from the log. Fields that were never logged
/// are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: String,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub elapsed: String,
    pub script: String,
    pub referrer: String,
    pub ip: String,
    pub auth_domain: String,
    pub auth_user: String,
    pub user_agent: String,
    pub command: String,
    pub params: String,
    pub loginfo: String,
    pub hits: String,
    pub content_length: String,
    pub cqp_time: String,
    pub cpu_load: String,
    pub cpu_times: String,
    pub memory_max_rss: String,
    pub protocol_version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<ExtraField>,
}

impl LogRecord {
    /// Values in table column order.
    pub fn values(&self) -> [&str; 22] {
        [
            &self.id,
            &self.start_date,
            &self.start_time,
            &self.end_date,
            &self.end_time,
            &self.elapsed,
            &self.script,
            &self.referrer,
            &self.ip,
            &self.auth_domain,
            &self.auth_user,
            &self.user_agent,
            &self.command,
            &self.params,
            &self.loginfo,
            &self.hits,
            &self.content_length,
            &self.cqp_time,
            &self.cpu_load,
            &self.cpu_times,
            &self.memory_max_rss,
            &self.protocol_version,
        ]
    }

    /// Inverse of [`LogRecord::values`]. `None` unless there are exactly as
    /// many values as columns.
    pub fn from_values(values: Vec<String>) -> Option<Self> {
        let [
            id,
            start_date,
            start_time,
            end_date,
            end_time,
            elapsed,
            script,
            referrer,
            ip,
            auth_domain,
            auth_user,
            user_agent,
            command,
            params,
            loginfo,
            hits,
            content_length,
            cqp_time,
            cpu_load,
            cpu_times,
            memory_max_rss,
            protocol_version,
        ] = <[String; 22]>::try_from(values).ok()?;

        Some(Self {
            id,
            start_date,
            start_time,
            end_date,
            end_time,
            elapsed,
            script,
            referrer,
            ip,
            auth_domain,
            auth_user,
            user_agent,
            command,
            params,
            loginfo,
            hits,
            content_length,
            cqp_time,
            cpu_load,
            cpu_times,
            memory_max_rss,
            protocol_version,
            extra: Vec::new(),
        })
    }

    pub fn param_map(&self) -> ParamMap {
        ParamMap::parse(&self.params)
    }

    pub fn hit_map(&self) -> CorpusHitMap {
        CorpusHitMap::parse(&self.hits)
    }

    /// The client address; proxies may log a comma-separated chain, of
    /// which the first entry is the client.
    pub fn client_ip(&self) -> &str {
        self.ip.split(',').next().unwrap_or_default().trim()
    }
}
