use crate::cli::records::for_each_record;
use crate::conf::load_or_default;
use crate::io::{InputSource, Output, expand_inputs};
use crate::record::tsv::TsvReader;
use crate::stats::render::{RenderOptions, render_json, render_text};
use crate::stats::{Analyzer, ReportOptions, StatsAggregator, TotalPosition};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rayon::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StatsInput {
    /// Backend log files
    #[default]
    Raw,
    /// Records written by `korplog parse`
    Tsv,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Input files or glob patterns; `-` or nothing reads stdin
    pub inputs: Vec<String>,

    /// Write here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (default: ./korplog.hcl if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    pub input: StatsInput,

    /// Put the Total column before the periods
    #[arg(long)]
    pub total_first: bool,

    /// Zero-fill rows and columns that only other statistics have
    #[arg(long)]
    pub empty_rows: bool,

    /// Show home/other values instead of their sum (text only)
    #[arg(long)]
    pub split_geo: bool,

    #[arg(long, value_enum, default_value_t)]
    pub format: ReportFormat,
}

pub fn run_stats(args: StatsArgs) -> Result<()> {
    let config = load_or_default(args.config.as_deref()).context("failed to load configuration")?;
    let inputs = expand_inputs(&args.inputs)?;
    let analyzer = Analyzer::new(&config);

    // Inputs are aggregated independently and merged; the result does not
    // depend on the order they finish in.
    let aggregator = inputs
        .par_iter()
        .map(|input| aggregate_input(&analyzer, input, args.input))
        .try_reduce(StatsAggregator::new, |mut acc, shard| {
            acc.merge(shard);
            Ok(acc)
        })?;

    let skipped = aggregator.skipped();
    info!(
        records = aggregator.records(),
        not_query = skipped.not_query,
        excluded_network = skipped.excluded_network,
        crawler = skipped.crawler,
        no_date = skipped.no_date,
        "usage aggregated"
    );

    let options = ReportOptions {
        total_position: if args.total_first {
            TotalPosition::First
        } else {
            config.total_column
        },
        include_empty: args.empty_rows,
    };
    let report = aggregator.report(&options);

    let rendered = match args.format {
        ReportFormat::Text => render_text(
            &report,
            RenderOptions {
                split_geo: args.split_geo,
            },
        ),
        ReportFormat::Json => {
            let mut json = render_json(&report).context("failed to serialize report")?;
            json.push('\n');
            json
        }
    };

    let mut output = Output::create(args.output.as_deref())?;
    output
        .write_all(rendered.as_bytes())
        .context("failed to write report")?;
    output.finish()?;
    Ok(())
}

fn aggregate_input(
    analyzer: &Analyzer<'_>,
    input: &InputSource,
    format: StatsInput,
) -> Result<StatsAggregator> {
    let mut aggregator = StatsAggregator::new();

    match format {
        StatsInput::Raw => {
            for_each_record(input, true, |record| {
                aggregator.push_record(analyzer, &record);
                Ok(())
            })
            .with_context(|| format!("failed to parse {input}"))?;
        }
        StatsInput::Tsv => {
            let mut reader = TsvReader::new();
            for line in input.open()? {
                if let Some(record) = reader.push_line(&line?) {
                    aggregator.push_record(analyzer, &record);
                }
            }
        }
    }

    Ok(aggregator)
}
