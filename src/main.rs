//! CLI entry point for the quake_stats tool.
//!
//! Provides subcommands for printing a text report, rendering per-year bar
//! charts, and exporting per-year summaries to CSV.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use quake_stats::aggregate::AggregateError;
use quake_stats::chart::{ChartMetric, render_year_chart};
use quake_stats::output::{Report, append_rows, print_json, print_report};
use quake_stats::parser::{Catalog, parse_catalog};
use quake_stats::query::QueryParams;
use quake_stats::{
    aggregate,
    fetch::{BasicClient, fetch_bytes},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "quake_stats")]
#[command(about = "Fetch USGS earthquake data and report per-year statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the records come from and which query to run when fetching.
#[derive(Args)]
struct SourceArgs {
    /// GeoJSON file or URL; defaults to the USGS query built from the flags below
    #[arg(value_name = "FILE_OR_URL")]
    source: Option<String>,

    /// Query start date (YYYY-MM-DD)
    #[arg(long)]
    start_time: Option<NaiveDate>,

    /// Query end date (YYYY-MM-DD)
    #[arg(long)]
    end_time: Option<NaiveDate>,

    /// Southern latitude bound of the query box
    #[arg(long)]
    min_latitude: Option<f64>,

    /// Northern latitude bound of the query box
    #[arg(long)]
    max_latitude: Option<f64>,

    /// Western longitude bound of the query box
    #[arg(long)]
    min_longitude: Option<f64>,

    /// Eastern longitude bound of the query box
    #[arg(long)]
    max_longitude: Option<f64>,

    /// Minimum magnitude to include
    #[arg(long)]
    min_magnitude: Option<f64>,

    /// Write the raw response to this file before parsing
    #[arg(long)]
    cache_file: Option<String>,
}

impl SourceArgs {
    fn query_params(&self) -> QueryParams {
        let mut params = QueryParams::default();
        if let Some(v) = self.start_time {
            params.start_time = v;
        }
        if let Some(v) = self.end_time {
            params.end_time = v;
        }
        if let Some(v) = self.min_latitude {
            params.min_latitude = v;
        }
        if let Some(v) = self.max_latitude {
            params.max_latitude = v;
        }
        if let Some(v) = self.min_longitude {
            params.min_longitude = v;
        }
        if let Some(v) = self.max_longitude {
            params.max_longitude = v;
        }
        if let Some(v) = self.min_magnitude {
            params.min_magnitude = v;
        }
        params
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    /// Number of earthquakes per year
    Count,
    /// Average magnitude per year
    Average,
}

impl From<MetricArg> for ChartMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Count => ChartMetric::Count,
            MetricArg::Average => ChartMetric::AverageMagnitude,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print total count, strongest quake, and per-year summaries
    Report {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Render a per-year bar chart to an SVG file
    Chart {
        #[command(flatten)]
        source: SourceArgs,

        /// Value to plot on the y axis
        #[arg(short, long, value_enum, default_value_t = MetricArg::Count)]
        metric: MetricArg,

        /// SVG file to write
        #[arg(short, long, default_value = "quakes.svg")]
        output: String,
    },
    /// Append per-year summary rows to a CSV file
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// CSV file to append results to
        #[arg(short, long, default_value = "summary.csv")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/quake_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("quake_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { source } => {
            let catalog = load_catalog(&source).await?;
            match Report::build(&catalog.features) {
                Ok(report) => {
                    print_report(&report);
                    print_json(&report)?;
                }
                Err(AggregateError::EmptyInput) => {
                    println!("No earthquakes matched the query.");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Chart {
            source,
            metric,
            output,
        } => {
            let catalog = load_catalog(&source).await?;
            let summaries = aggregate::year_summaries(&catalog.features)?;
            if summaries.is_empty() {
                println!("No earthquakes matched the query.");
            } else {
                render_year_chart(&output, metric.into(), &summaries)?;
                info!(path = %output, "chart written");
            }
        }
        Commands::Export { source, output } => {
            let catalog = load_catalog(&source).await?;
            match Report::build(&catalog.features) {
                Ok(report) => {
                    append_rows(&output, &report.years)?;
                    info!(path = %output, rows = report.years.len(), "summary rows appended");
                }
                Err(AggregateError::EmptyInput) => {
                    println!("No earthquakes matched the query.");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

/// Loads catalog bytes from a local file, an explicit URL, or the USGS
/// query built from the CLI flags, then parses them. Optionally writes the
/// raw response to a cache file first; the cache is write-once and can be
/// passed back later as FILE_OR_URL.
#[tracing::instrument(skip(args))]
async fn load_catalog(args: &SourceArgs) -> Result<Catalog> {
    let bytes = match &args.source {
        Some(source) => fetcher(source).await?,
        None => {
            let url = args.query_params().url()?;
            info!(url = %url, "querying event service");
            let client = BasicClient::new();
            fetch_bytes(&client, url.as_str()).await?
        }
    };

    if let Some(path) = &args.cache_file {
        std::fs::write(path, &bytes)?;
        info!(path, bytes = bytes.len(), "raw response cached");
    }

    let catalog = parse_catalog(&bytes)?;
    debug!(records = catalog.features.len(), "catalog parsed");

    if let Some(meta) = &catalog.metadata {
        // The feed reports its own count; log a mismatch but trust the
        // parsed records.
        if let Some(reported) = meta.count {
            if reported != catalog.features.len() {
                warn!(
                    reported,
                    parsed = catalog.features.len(),
                    "feed metadata count disagrees with parsed records"
                );
            }
        }
    }

    Ok(catalog)
}

/// Loads catalog data from a local file path or fetches it over HTTP.
#[tracing::instrument(fields(source = %url))]
async fn fetcher(url: &String) -> Result<Vec<u8>> {
    let bytes = if url.starts_with("http") {
        let client = BasicClient::new();
        fetch_bytes(&client, url).await?
    } else {
        std::fs::read(url)?
    };
    Ok(bytes)
}
