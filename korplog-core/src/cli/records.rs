use crate::io::InputSource;
use crate::reassemble::Reassembler;
use crate::record::{LogRecord, ParseStats, RecordParser};
use anyhow::Result;

/// Streams the records of one raw log input into `sink`, repairing the
/// lines first unless `repair` is off.
pub(crate) fn for_each_record<F>(input: &InputSource, repair: bool, mut sink: F) -> Result<ParseStats>
where
    F: FnMut(LogRecord) -> Result<()>,
{
    let mut reassembler = repair.then(Reassembler::new);
    let mut parser = RecordParser::new();

    for line in input.open()? {
        let line = line?;

        match reassembler.as_mut() {
            Some(reassembler) => {
                reassembler.push(&line);
                for fixed in reassembler.drain() {
                    if let Some(record) = parser.push_line(&fixed) {
                        sink(record)?;
                    }
                }
            }
            None => {
                if let Some(record) = parser.push_line(&line) {
                    sink(record)?;
                }
            }
        }
    }

    if let Some(reassembler) = reassembler.as_mut() {
        reassembler.finish();
        for fixed in reassembler.drain() {
            if let Some(record) = parser.push_line(&fixed) {
                sink(record)?;
            }
        }
    }

    for record in parser.finish() {
        sink(record)?;
    }

    Ok(parser.stats())
}
