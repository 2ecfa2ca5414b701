use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use log::info;

use tempsmooth::data::export::Comparison;
use tempsmooth::data::model::{FilterConfig, FilterKind};
use tempsmooth::data::{filter, loader};

/// Default window size, in samples (63 hours ≈ 2.6 days of hourly data).
const DEFAULT_WINDOW: usize = 63;

struct Args {
    input: PathBuf,
    output: PathBuf,
    kind: FilterKind,
    window: usize,
    stride: usize,
    original_out: Option<PathBuf>,
}

const USAGE: &str = "usage: tempsmooth <input.csv> <output.csv> [-ma | -low] \
[--window N] [--stride N] [--original-out FILE]";

fn parse_args(mut args: std::env::Args) -> Result<Args> {
    args.next(); // program name
    let input = PathBuf::from(args.next().context(USAGE)?);
    let output = PathBuf::from(args.next().context(USAGE)?);

    let mut parsed = Args {
        input,
        output,
        kind: FilterKind::MovingAverage,
        window: DEFAULT_WINDOW,
        stride: 1,
        original_out: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-ma" => parsed.kind = FilterKind::MovingAverage,
            "-low" => parsed.kind = FilterKind::LowPass,
            "--window" => {
                let raw = args.next().context("--window needs a value")?;
                parsed.window = raw.parse().with_context(|| format!("bad window '{raw}'"))?;
            }
            "--stride" => {
                let raw = args.next().context("--stride needs a value")?;
                parsed.stride = raw.parse().with_context(|| format!("bad stride '{raw}'"))?;
            }
            "--original-out" => {
                parsed.original_out = Some(PathBuf::from(
                    args.next().context("--original-out needs a path")?,
                ));
            }
            other => bail!("unknown argument '{other}'\n{USAGE}"),
        }
    }
    Ok(parsed)
}

fn run(args: Args) -> Result<()> {
    let series = loader::read_csv(&args.input)?;

    // Thin before filtering so both artifacts stay aligned.
    let series = series.limit_stride(args.stride)?;

    let config = match args.kind {
        FilterKind::MovingAverage => FilterConfig::moving_average(args.window),
        FilterKind::LowPass => FilterConfig::low_pass(args.window),
    };
    let filtered = filter::apply(&series, &config)?;

    let comparison = Comparison::pair(&series, &filtered)?;
    comparison.write_filtered_file(&args.output)?;
    if let Some(path) = &args.original_out {
        comparison.write_original_file(path)?;
    }

    info!(
        "filtering completed: {} → {}",
        args.input.display(),
        args.output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args(std::env::args()) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
