use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use bench_plot::{PlotFormat, ScatterPlot};
use bench_table::{LoadOptions, THREAD_COUNT, THROUGHPUT, Table, add_throughput};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const HEAD_ROWS: usize = 5;
/// Largest plot side accepted, keeping a raster canvas under ~200 MB.
const MAX_DIMENSION: i64 = 8192;

#[derive(Parser)]
#[command(name = "throughput-plots", version)]
#[command(
    about = "Summarize throughput benchmark results and plot throughput against thread count",
    long_about = None
)]
struct Cli {
    /// The benchmark output file to load
    #[arg(long, value_parser = readable_file)]
    input_file: PathBuf,

    /// The name for the output plot (png, jpg, jpeg, bmp or svg)
    #[arg(long)]
    output_file: PathBuf,

    /// Plot width in pixels
    #[arg(
        long,
        default_value_t = ScatterPlot::DEFAULT_SIZE.0,
        value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION)
    )]
    width: u32,

    /// Plot height in pixels
    #[arg(
        long,
        default_value_t = ScatterPlot::DEFAULT_SIZE.1,
        value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION)
    )]
    height: u32,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn readable_file(value: &str) -> Result<PathBuf, String> {
    let file = File::open(value).map_err(|err| format!("can't open '{value}': {err}"))?;
    match file.metadata() {
        Ok(meta) if meta.is_file() => Ok(PathBuf::from(value)),
        Ok(_) => Err(format!("can't open '{value}': not a regular file")),
        Err(err) => Err(format!("can't open '{value}': {err}")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    PlotFormat::from_path(&cli.output_file).context("Invalid --output-file")?;

    let mut table = Table::load(&cli.input_file, &LoadOptions::default()).with_context(|| {
        format!(
            "Failed to load benchmark results from {}",
            cli.input_file.display()
        )
    })?;

    for (key, value) in table.metadata() {
        debug!(%key, %value, "Benchmark metadata");
    }

    add_throughput(&mut table).context("Failed to derive throughput")?;

    let description = table.describe().context("Failed to summarize benchmark results")?;

    println!("{}", table.head(HEAD_ROWS));
    println!();
    println!("{description}");

    ScatterPlot::from_table(&table, THREAD_COUNT, THROUGHPUT)?
        .with_size(cli.width, cli.height)
        .save(&cli.output_file)
        .with_context(|| format!("Failed to render plot to {}", cli.output_file.display()))?;

    Ok(())
}
