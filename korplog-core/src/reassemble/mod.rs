//! Line Reassembler
//!
//! Several backend processes append to the same log file without any
//! locking, so a line written by one process can be cut in two by a line of
//! another process:
//!
//! ```text
//! [korp.cgi 101 INFO @ ...] Params: {'corpus': 'A,B'[korp.cgi 202 INFO @ ...] IP: 10.0.0.2
//! , 'start': '0'}
//! ```
//!
//! The reassembler reads the raw lines in file order and emits them with
//! such splits repaired:
//!
//! - A header embedded in the middle of a line is split off and emitted as a
//!   line of its own. The truncated head is held back and completed with the
//!   next line that does not start with a header.
//! - Lines following a DEBUG entry that do not start with a header are a
//!   multi-line DEBUG value (e.g. a CQP command). They are joined onto the
//!   DEBUG line with a literal `\n` marker.
//! - NUL bytes are replaced with the text `\x00`.
//!
//! Embedded-header splits take precedence over DEBUG continuation. A
//! continuation line that was itself interrupted by another continuation
//! line cannot be told apart from an ordinary one and is left as is.

mod reassembler;

pub use reassembler::{Reassembler, RepairStats};
