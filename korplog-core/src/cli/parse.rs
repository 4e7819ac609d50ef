use crate::cli::records::for_each_record;
use crate::io::{Output, expand_inputs};
use crate::record::{LogRecord, tsv};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RecordFormat {
    /// Tab-separated values with a header row
    #[default]
    Tsv,
    /// One JSON object per line
    Json,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Log files or glob patterns; `-` or nothing reads stdin
    pub inputs: Vec<String>,

    /// Write here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    pub format: RecordFormat,

    /// Input lines are already repaired
    #[arg(long)]
    pub no_fix: bool,
}

pub fn run_parse(args: ParseArgs) -> Result<()> {
    let inputs = expand_inputs(&args.inputs)?;
    let mut output = Output::create(args.output.as_deref())?;

    if args.format == RecordFormat::Tsv {
        tsv::write_header(&mut output).context("failed to write header row")?;
    }

    for input in &inputs {
        let stats = for_each_record(input, !args.no_fix, |record| {
            write_record(&mut output, args.format, &record)
        })
        .with_context(|| format!("failed to parse {input}"))?;

        info!(
            input = %input,
            records = stats.records,
            partial = stats.partial,
            dropped = stats.dropped,
            "input parsed"
        );
    }

    output.finish()?;
    Ok(())
}

fn write_record<W: Write>(out: &mut W, format: RecordFormat, record: &LogRecord) -> Result<()> {
    match format {
        RecordFormat::Tsv => tsv::write_record(out, record)?,
        RecordFormat::Json => {
            serde_json::to_writer(&mut *out, record)?;
            out.write_all(b"\n")?;
        }
    }
    Ok(())
}
