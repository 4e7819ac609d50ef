use crate::io::{Output, expand_inputs};
use crate::reassemble::Reassembler;
use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct FixArgs {
    /// Log files or glob patterns; `-` or nothing reads stdin
    pub inputs: Vec<String>,

    /// Write here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run_fix(args: FixArgs) -> Result<()> {
    let inputs = expand_inputs(&args.inputs)?;
    let mut output = Output::create(args.output.as_deref())?;

    for input in &inputs {
        let mut reassembler = Reassembler::new();

        for line in input.open()? {
            reassembler.push(&line?);
            for fixed in reassembler.drain() {
                writeln!(output, "{fixed}").context("failed to write repaired line")?;
            }
        }

        reassembler.finish();
        for fixed in reassembler.drain() {
            writeln!(output, "{fixed}").context("failed to write repaired line")?;
        }

        let stats = reassembler.stats();
        info!(
            input = %input,
            lines = stats.lines_out,
            split = stats.split,
            joined = stats.joined,
            "input repaired"
        );
    }

    output.finish()?;
    Ok(())
}
