//! Record Parser
//!
//! Rebuilds one [`LogRecord`] per request from the repaired line stream.
//! Requests served by different processes interleave in the log, so the
//! parser keeps one open entry per pid and emits it once both `Elapsed` and
//! `CPU-times` have been logged for it.

mod field;
mod id;
mod parser;
mod pending;
mod record;
pub mod tsv;


pub use field::Field;
pub use id::{NO_ID, make_entry_id};
pub use parser::{ParseStats, RecordParser};
pub use record::{ExtraField, LogRecord};
