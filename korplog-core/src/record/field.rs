/// A logged field name. Matching is case-insensitive and treats `_` and `-`
/// alike; names outside the known set are kept as [`Field::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Start,
    Script,
    Referrer,
    Ip,
    AuthDomain,
    AuthUser,
    UserAgent,
    Command,
    Params,
    Loginfo,
    Hits,
    ContentLength,
    CqpTime,
    Elapsed,
    CpuLoad,
    CpuTimes,
    MemoryMaxRss,
    ProtocolVersion,
    Unknown(String),
}

impl Field {
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        let normalized = key.to_ascii_lowercase().replace('_', "-");

        match normalized.as_str() {
            "start" => Self::Start,
            "script" => Self::Script,
            "referer" | "referrer" => Self::Referrer,
            "ip" | "client-ip" | "remote-addr" => Self::Ip,
            "auth-domain" => Self::AuthDomain,
            "auth-user" => Self::AuthUser,
            "user-agent" | "useragent" => Self::UserAgent,
            "command" | "cmd" => Self::Command,
            "params" | "parameters" => Self::Params,
            "loginfo" | "log-info" => Self::Loginfo,
            "hits" => Self::Hits,
            "content-length" => Self::ContentLength,
            "cqp-time" => Self::CqpTime,
            "elapsed" => Self::Elapsed,
            "cpu-load" => Self::CpuLoad,
            "cpu-times" => Self::CpuTimes,
            "memory-max-rss" | "memory-peak" | "max-rss" => Self::MemoryMaxRss,
            "protocol" | "protocol-version" => Self::ProtocolVersion,
            _ => Self::Unknown(key.to_string()),
        }
    }
}
