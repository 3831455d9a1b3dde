//! Command-line interface components.

use crate::config::RunConfig;
use crate::error::SoundingError;
use crate::models::{ConversionStats, InputLayout, SoundingHeader};
use crate::processor::SoundingProcessor;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "sharppy-convert")]
#[command(about = "Convert radiosonde soundings to SHARPpy text format")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(after_help = "EXAMPLES:\n    \
    sharppy-convert imet --filename 759_001.log --stationID UAH --date 160324 --time 1515\n    \
    sharppy-convert wyoming --filename 2016-03-13_1901.csv --stationID BMX")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory for the SHARPpy file (defaults to the current directory)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print run statistics as JSON instead of the summary
    #[arg(long, global = true)]
    pub json: bool,
}

/// Input layouts, one subcommand each
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a UAH iMet radiosonde log (whitespace table, RH, wind in radians)
    #[command(alias = "uah")]
    Imet(ImetArgs),

    /// Convert a University of Wyoming archive export (CSV with dewpoint)
    Wyoming(WyomingArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ImetArgs {
    /// Sounding file name
    #[arg(long, value_name = "FILE")]
    pub filename: PathBuf,

    /// 3 character station ID (defaults to MSU)
    #[arg(long = "stationID", value_name = "ID")]
    pub station_id: Option<String>,

    /// Launch date in YYMMDD
    #[arg(long, value_name = "YYMMDD")]
    pub date: String,

    /// Launch time in UTC, HHMM
    #[arg(long, value_name = "HHMM")]
    pub time: String,
}

#[derive(ClapArgs, Debug)]
pub struct WyomingArgs {
    /// Sounding file name, normally YYYY-MM-DD_HHMM.csv
    #[arg(long, value_name = "FILE")]
    pub filename: PathBuf,

    /// 3 character station ID (defaults to MSU)
    #[arg(long = "stationID", value_name = "ID")]
    pub station_id: Option<String>,

    /// Launch date in YYMMDD, overrides the file name
    #[arg(long, value_name = "YYMMDD", requires = "time")]
    pub date: Option<String>,

    /// Launch time in UTC, HHMM, overrides the file name
    #[arg(long, value_name = "HHMM", requires = "date")]
    pub time: Option<String>,
}

impl Args {
    /// Log level selected by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Validate the arguments and build the run configuration
    pub fn to_run_config(&self) -> crate::Result<RunConfig> {
        let config = match &self.command {
            Commands::Imet(args) => {
                let header = SoundingHeader::from_parameters(
                    args.station_id.as_deref(),
                    &args.date,
                    &args.time,
                )?;
                RunConfig::new(&args.filename, InputLayout::UahImet, header)
            }
            Commands::Wyoming(args) => {
                let header = match (&args.date, &args.time) {
                    (Some(date), Some(time)) => {
                        SoundingHeader::from_parameters(args.station_id.as_deref(), date, time)?
                    }
                    (None, None) => {
                        SoundingHeader::from_filename(args.station_id.as_deref(), &args.filename)
                            .map_err(|e| {
                                debug!("Launch time not available from file name: {}", e);
                                SoundingError::missing_argument(
                                    "--date and --time (file name is not YYYY-MM-DD_HHMM...)",
                                )
                            })?
                    }
                    (None, Some(_)) => return Err(SoundingError::missing_argument("--date")),
                    (Some(_), None) => return Err(SoundingError::missing_argument("--time")),
                };
                RunConfig::new(&args.filename, InputLayout::Wyoming, header)
            }
        };

        Ok(match &self.output_dir {
            Some(dir) => config.with_output_dir(dir),
            None => config,
        })
    }
}

/// Set up structured logging based on CLI arguments
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sharppy_converter={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Run the conversion selected on the command line
pub fn run(args: &Args) -> Result<ConversionStats> {
    let config = args
        .to_run_config()
        .context("Invalid command-line arguments")?;

    let input_path = config.input_path.clone();
    let stats = SoundingProcessor::new(config)
        .process()
        .with_context(|| format!("Failed to convert {}", input_path.display()))?;

    if args.json {
        println!("{}", stats_json(&stats)?);
    } else if !args.quiet {
        report_summary(&stats);
    }

    Ok(stats)
}

/// Render run statistics for machine consumption
pub fn stats_json(stats: &ConversionStats) -> Result<String> {
    serde_json::to_string_pretty(stats).context("Failed to serialize conversion statistics")
}

/// Print a short summary of the conversion
pub fn report_summary(stats: &ConversionStats) {
    println!("\n{}", "Conversion Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Output:".bright_cyan(),
        stats.output_path.display().to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Levels read:".bright_cyan(),
        stats.levels_read.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Levels written:".bright_cyan(),
        stats.levels_written.to_string().bright_white().bold()
    );
    if stats.levels_non_ascending > 0 {
        println!(
            "  {} {}",
            "Non-ascending levels dropped:".bright_yellow(),
            stats.levels_non_ascending.to_string().bright_yellow()
        );
    }
    if let Some(index) = stats.ceiling_index {
        println!(
            "  {} level {}",
            "Stopped at pressure ceiling:".bright_yellow(),
            index.to_string().bright_yellow()
        );
    }
    if stats.sentinel_levels > 0 {
        println!(
            "  {} {}",
            "Levels with missing values:".bright_red(),
            stats.sentinel_levels.to_string().bright_red().bold()
        );
    }
    if stats.non_finite_dewpoints > 0 {
        println!(
            "  {} {}",
            "Non-finite dewpoints:".bright_red(),
            stats.non_finite_dewpoints.to_string().bright_red().bold()
        );
    }
    if stats.shallow {
        println!(
            "  {} {}",
            "Shallow sounding:".bright_yellow(),
            "may not plot properly".bright_yellow()
        );
    }
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
}
