//! # rangecast
//!
//! Command-line interface for forecasting per-entity counters kept in a
//! sorted key-value store dump.

mod simulate;
mod sink;

use clap::{Args, Parser, Subcommand};
use forecast_facade::{ForecastSink, TrendKind};
use pipeline::{ForecastPipeline, PipelineConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use series_facade::dump::{read_dump, write_dump};
use series_facade::{Granularity, MemoryStore, Observation, ScanSummary, SeriesLoader};
use simulate::{Cidr, Simulation};
use sink::{OutputFormat, OutputSink};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = std::result::Result<T, String>;

const LOG_TARGETS: [&str; 4] = ["rangecast", "pipeline", "series_core", "forecast_core"];

#[derive(Parser)]
#[command(name = "rangecast", version)]
#[command(
    about = "Forecast sparse per-entity counters from a sorted key-value store",
    long_about = None
)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast one or more entities from a store dump
    Forecast(ForecastArgs),

    /// Generate synthetic hits for hosts in a CIDR block and write a store dump
    Simulate(SimulateArgs),

    /// Print the decoded observations of one entity
    Inspect(InspectArgs),
}

#[derive(Args)]
struct ForecastArgs {
    /// Store dump (CSV: key,family,column,value_hex)
    #[arg(short, long)]
    input: PathBuf,

    /// Entity to forecast; repeat for several
    #[arg(short, long = "entity", required_unless_present = "config")]
    entities: Vec<String>,

    /// JSON pipeline configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Column family holding the counter
    #[arg(long)]
    family: Option<String>,

    /// Column qualifier holding the counter
    #[arg(long)]
    column: Option<String>,

    /// Bin width in seconds
    #[arg(long)]
    bin_width: Option<i64>,

    /// Bin width preset: minute, hour or day
    #[arg(long, conflicts_with = "bin_width")]
    granularity: Option<Granularity>,

    /// Seasonal period in bins
    #[arg(long)]
    period: Option<usize>,

    /// Number of future bins
    #[arg(long)]
    horizon: Option<usize>,

    /// Confidence level of the intervals, in (0, 1)
    #[arg(long)]
    confidence: Option<f64>,

    /// Trend shape: linear or piecewise:N
    #[arg(long)]
    trend: Option<TrendKind>,

    /// Fit trend only when the history is shorter than two periods
    #[arg(long)]
    allow_trend_only: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct SimulateArgs {
    /// Hosts are drawn from the usable addresses of this block
    #[arg(short, long, default_value = "10.0.0.0/28")]
    cidr: Cidr,

    /// Total number of hits to record
    #[arg(short, long, default_value = "10000")]
    records: u64,

    /// Length of the simulated window in hours
    #[arg(long, default_value = "72")]
    hours: i64,

    /// Window start in seconds since epoch (default: `hours` before now)
    #[arg(long)]
    start: Option<i64>,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Drop rows older than this many seconds at the end of the window
    #[arg(long)]
    max_age: Option<i64>,

    /// Output dump file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct InspectArgs {
    /// Store dump (CSV: key,family,column,value_hex)
    #[arg(short, long)]
    input: PathBuf,

    /// Entity to inspect
    #[arg(short, long)]
    entity: String,

    /// Column family holding the counter
    #[arg(long, default_value = "stats")]
    family: String,

    /// Column qualifier holding the counter
    #[arg(long, default_value = "ips")]
    column: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

/// Install the stderr logger; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let default_filter = LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",");

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

/// Load a store dump into a fresh in-memory store
fn load_store(path: &Path) -> CliResult<MemoryStore> {
    let file = File::open(path).map_err(|e| format!("Failed to open {:?}: {}", path, e))?;
    let mut store = MemoryStore::open("stats");
    let rows = read_dump(&mut store, BufReader::new(file)).map_err(|e| e.to_string())?;
    info!(path = %path.display(), rows, "Loaded store dump");
    Ok(store)
}

fn open_output(path: Option<&Path>) -> CliResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file =
                File::create(path).map_err(|e| format!("Failed to create {:?}: {}", path, e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Merge the optional JSON configuration with command-line overrides.
fn build_config(args: &ForecastArgs) -> CliResult<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let file =
                File::open(path).map_err(|e| format!("Failed to open {:?}: {}", path, e))?;
            serde_json::from_reader(BufReader::new(file))
                .map_err(|e| format!("Failed to parse config {:?}: {}", path, e))?
        }
        None => {
            let entity = args
                .entities
                .first()
                .ok_or_else(|| "At least one --entity is required".to_string())?;
            PipelineConfig::new(entity)
        }
    };

    if let Some(family) = &args.family {
        config.load.family = family.clone();
    }
    if let Some(column) = &args.column {
        config.load.column = column.clone();
    }
    if let Some(width) = args.bin_width {
        config.resample.bin_width_seconds = width;
    }
    if let Some(granularity) = args.granularity {
        config.resample.bin_width_seconds = granularity.seconds();
    }
    if let Some(period) = args.period {
        config.forecast.seasonal_period_bins = period;
    }
    if let Some(horizon) = args.horizon {
        config.forecast.horizon_bins = horizon;
    }
    if let Some(level) = args.confidence {
        config.forecast.confidence_level = level;
    }
    if let Some(trend) = args.trend {
        config.forecast.trend = trend;
    }
    if args.allow_trend_only {
        config.forecast.allow_trend_only = true;
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn run_forecast(args: ForecastArgs) -> CliResult<()> {
    let base = build_config(&args)?;
    let store = load_store(&args.input)?;

    let configs: Vec<PipelineConfig> = if args.entities.is_empty() {
        vec![base]
    } else {
        args.entities.iter().map(|e| base.for_entity(e)).collect()
    };

    let results = ForecastPipeline::new(&store).run_many(&configs);

    let mut sink = OutputSink::new(args.format, open_output(args.output.as_deref())?);
    let mut failed = 0;
    for (config, result) in configs.iter().zip(results) {
        match result {
            Ok(output) => {
                if !output.summary.is_clean() {
                    warn!(
                        entity = %config.entity,
                        summary = %output.summary,
                        "Rows skipped during scan"
                    );
                }
                sink.set_entity(&output.entity);
                sink.emit(&output.bins, &output.table)
                    .map_err(|e| e.to_string())?;
            }
            Err(e) => {
                eprintln!("Error: {}: {}", config.entity, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} entities failed", failed, configs.len()));
    }
    Ok(())
}

fn run_simulate(args: SimulateArgs) -> CliResult<()> {
    let start = match args.start {
        Some(start) => start,
        None => {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_err(|e| format!("System clock before epoch: {}", e))?;
            let now = i64::try_from(now.as_secs()).map_err(|e| e.to_string())?;
            now - args.hours.saturating_mul(3600)
        }
    };
    let simulation = Simulation {
        cidr: args.cidr,
        records: args.records,
        hours: args.hours,
        start,
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut store = MemoryStore::open("stats");
    if let Some(max_age) = args.max_age {
        store = store.with_max_age(max_age);
    }
    let report = simulation
        .run(&mut store, &mut rng)
        .map_err(|e| e.to_string())?;
    let expired = store.expire(simulation.end()).map_err(|e| e.to_string())?;

    let out = open_output(args.output.as_deref())?;
    let rows = write_dump(&store, out).map_err(|e| e.to_string())?;
    info!(
        cidr = %simulation.cidr,
        records = report.records,
        hosts = report.hosts,
        expired,
        rows,
        "Simulation written"
    );
    Ok(())
}

#[derive(Serialize)]
struct InspectReport<'a> {
    entity: &'a str,
    observations: &'a [Observation],
    summary: &'a ScanSummary,
}

fn run_inspect(args: InspectArgs) -> CliResult<()> {
    let store = load_store(&args.input)?;
    let load = SeriesLoader::new(&args.family, &args.column)
        .load(&store, &args.entity)
        .map_err(|e| e.to_string())?;

    let mut out = io::stdout().lock();
    let written = match args.format {
        OutputFormat::Table => write_observation_table(&mut out, &load.observations, &load.summary),
        OutputFormat::Csv => write_observation_csv(&mut out, &load.observations),
        OutputFormat::Json => {
            let report = InspectReport {
                entity: &args.entity,
                observations: &load.observations,
                summary: &load.summary,
            };
            serde_json::to_writer_pretty(&mut out, &report)
                .map_err(io::Error::from)
                .and_then(|_| writeln!(out))
        }
    };
    written.map_err(|e| format!("Failed to write output: {}", e))
}

fn write_observation_table<W: Write>(
    out: &mut W,
    observations: &[Observation],
    summary: &ScanSummary,
) -> io::Result<()> {
    writeln!(out, "{:>6} {:>20} {:>10}", "", "timestamp", "value")?;
    for (i, observation) in observations.iter().enumerate() {
        writeln!(
            out,
            "{:>6} {:>20} {:>10}",
            i, observation.timestamp, observation.value
        )?;
    }
    writeln!(out, "[{} rows]", observations.len())?;
    writeln!(out, "{}", summary)
}

fn write_observation_csv<W: Write>(out: &mut W, observations: &[Observation]) -> io::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for observation in observations {
        writer.serialize(observation).map_err(io::Error::from)?;
    }
    writer.flush()
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Forecast(args) => run_forecast(args),
        Commands::Simulate(args) => run_simulate(args),
        Commands::Inspect(args) => run_inspect(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
