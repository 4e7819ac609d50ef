use chrono::NaiveDateTime;

/// Identifier of an entry whose start date or time cannot be parsed.
pub const NO_ID: &str = "None";

/// `<epoch seconds><milliseconds>:<pid>` for an entry starting at `date`
/// (`YYYY-MM-DD`) and `time` (`HH:MM:SS,mmm`), read as UTC. Numeric pids are
/// zero-padded to five digits; other pids are used as is. A time without
/// milliseconds counts as `,000`.
pub fn make_entry_id(date: &str, time: &str, pid: &str) -> String {
    let (clock, millis) = time.split_once(',').unwrap_or((time, "000"));

    let Ok(start) =
        NaiveDateTime::parse_from_str(&format!("{date} {clock}"), "%Y-%m-%d %H:%M:%S")
    else {
        return NO_ID.to_string();
    };

    let pid = match pid.parse::<u32>() {
        Ok(n) => format!("{n:05}"),
        Err(_) => pid.to_string(),
    };

    format!("{}{millis}:{pid}", start.and_utc().timestamp())
}
