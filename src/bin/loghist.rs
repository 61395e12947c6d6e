//! Loghist CLI
//!
//! Parses the date and time from log files and prints an ASCII graph of
//! the occurrences over time.
//!
//! Exactly one grouping granularity is required per run. Input is read
//! from the given files in order, or from standard input when no files are
//! given. The histogram goes to standard output; diagnostics go to
//! standard error.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};
use tracing::warn;

use loghist::render;
use loghist::types::Granularity;
use loghist::{Pipeline, Result, RunConfig};

/// Parse the date and time from log files and print an ASCII graph of the
/// occurrences
#[derive(Parser, Debug)]
#[command(name = "loghist")]
#[command(version)]
#[command(group(
    ArgGroup::new("granularity")
        .required(true)
        .args(["second", "minute", "hour", "day"])
))]
struct Cli {
    /// Group by second
    #[arg(short = 'S', long)]
    second: bool,

    /// Group by minute
    #[arg(short = 'M', long)]
    minute: bool,

    /// Group by hour
    #[arg(short = 'H', long)]
    hour: bool,

    /// Group by day
    #[arg(short = 'D', long)]
    day: bool,

    /// Print status messages while running
    #[arg(short, long)]
    verbose: bool,

    /// Include lines that match this pattern (accepted, not yet implemented)
    #[arg(short, long, value_name = "REGEX")]
    include: Option<String>,

    /// Exclude lines that match this pattern (accepted, not yet implemented)
    #[arg(short = 'x', long, value_name = "REGEX")]
    exclude: Option<String>,

    /// Describe the time format to match on (accepted, not yet implemented)
    #[arg(short = 't', long = "time-format", value_name = "TIMEFORMAT")]
    time_format: Option<String>,

    /// Year to assume for timestamp layouts that carry no year (syslog);
    /// without it such buckets render with year 0000
    #[arg(long = "assume-year", value_name = "YEAR", value_parser = clap::value_parser!(u16).range(..=9999))]
    assume_year: Option<u16>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log files to read as input; standard input when none are given
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Star-bar histogram with a summary block
    Text,
    /// Bucket store and summary as pretty-printed JSON
    Json,
}

impl Cli {
    fn granularity(&self) -> Granularity {
        if self.second {
            Granularity::Second
        } else if self.minute {
            Granularity::Minute
        } else if self.hour {
            Granularity::Hour
        } else {
            Granularity::Day
        }
    }

    fn run_config(&self) -> RunConfig {
        let mut config = RunConfig::new(self.granularity());
        config.assumed_year = self.assume_year;
        config.verbose = self.verbose;
        config.include = self.include.clone();
        config.exclude = self.exclude.clone();
        config.time_format = self.time_format.clone();
        config
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut pipeline = Pipeline::new(cli.run_config());

    if cli.files.is_empty() {
        let stdin = io::stdin();
        pipeline.process_reader(stdin.lock())?;
    } else {
        for path in &cli.files {
            pipeline.process_file(path)?;
        }
    }

    let stats = pipeline.stats();
    if stats.year_ambiguous > 0 {
        warn!(
            lines = stats.year_ambiguous,
            "timestamps without a year were grouped under year 0000; pass --assume-year to pin them"
        );
    }

    let (buckets, _) = pipeline.finish();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Text => render::render_text(&mut out, &buckets)?,
        OutputFormat::Json => render::render_json(&mut out, &buckets)?,
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage problems and -h/--help both exit with code 1; clap
            // routes help text to stdout and errors to stderr.
            let _ = e.print();
            std::process::exit(1);
        }
    };

    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
