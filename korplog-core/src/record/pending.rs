use crate::line::LogLine;
use crate::record::{ExtraField, Field, LogRecord, make_entry_id};

const UNATTRIBUTED_TAG: &str = "[unattributed]";

/// A request whose terminating fields have not all been seen yet.
#[derive(Debug)]
pub(crate) struct PendingEntry {
    /// Opening order, for flushing at end of input.
    pub seq: u64,
    record: LogRecord,
    seen_elapsed: bool,
    seen_cpu_times: bool,
}

impl PendingEntry {
    pub fn open(seq: u64, line: &LogLine<'_>) -> Self {
        Self {
            seq,
            record: LogRecord {
                id: make_entry_id(line.date, line.time, line.pid),
                start_date: line.date.to_string(),
                start_time: line.time.to_string(),
                end_date: line.date.to_string(),
                end_time: line.time.to_string(),
                script: line.script.to_string(),
                ..LogRecord::default()
            },
            seen_elapsed: false,
            seen_cpu_times: false,
        }
    }

    pub fn has_ip(&self) -> bool {
        !self.record.ip.is_empty()
    }

    /// Moves the end of the entry to `line`.
    pub fn touch(&mut self, line: &LogLine<'_>) {
        self.record.end_date = line.date.to_string();
        self.record.end_time = line.time.to_string();
    }

    pub fn apply(&mut self, field: Field, value: &str) {
        let r = &mut self.record;
        let slot = match field {
            Field::Start => return,
            Field::Loginfo => {
                append(&mut r.loginfo, value);
                return;
            }
            Field::Unknown(name) => {
                r.extra.push(ExtraField {
                    name,
                    value: value.to_string(),
                });
                return;
            }
            Field::Elapsed => {
                self.seen_elapsed = true;
                &mut r.elapsed
            }
            Field::CpuTimes => {
                self.seen_cpu_times = true;
                &mut r.cpu_times
            }
            Field::Script => &mut r.script,
            Field::Referrer => &mut r.referrer,
            Field::Ip => &mut r.ip,
            Field::AuthDomain => &mut r.auth_domain,
            Field::AuthUser => &mut r.auth_user,
            Field::UserAgent => &mut r.user_agent,
            Field::Command => &mut r.command,
            Field::Params => &mut r.params,
            Field::Hits => &mut r.hits,
            Field::ContentLength => &mut r.content_length,
            Field::CqpTime => &mut r.cqp_time,
            Field::CpuLoad => &mut r.cpu_load,
            Field::MemoryMaxRss => &mut r.memory_max_rss,
            Field::ProtocolVersion => &mut r.protocol_version,
        };

        *slot = value.to_string();
    }

    pub fn append_unattributed(&mut self, text: &str) {
        append(
            &mut self.record.loginfo,
            &format!("{UNATTRIBUTED_TAG} {}", text.trim_end()),
        );
    }

    pub fn is_complete(&self) -> bool {
        self.seen_elapsed && self.seen_cpu_times
    }

    pub fn into_record(self) -> LogRecord {
        let mut record = self.record;

        if record.command.is_empty() {
            if let Some(command) = record.param_map().get_str("command") {
                record.command = command.to_string();
            }
        }

        record
    }
}

fn append(target: &mut String, value: &str) {
    if value.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(value);
}
