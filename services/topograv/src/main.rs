//! topograv command line.
//!
//! Each subcommand produces one figure or animation from GRACE, ETOPO or
//! TLE data.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use topograv::commands::{
    self, AnomaliesArgs, EtopoArgs, GroundTrackArgs, LweAnimateArgs, LweExploreArgs, Orbit3dArgs,
};
use topograv::config::LoggingConfig;
use topograv::TopogravConfig;

#[derive(Parser, Debug)]
#[command(name = "topograv")]
#[command(about = "GRACE gravimetry, ETOPO geoid and satellite orbit plots")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "TOPOGRAV_CONFIG", default_value = "config/topograv.yaml")]
    config: PathBuf,

    /// Log level (overrides logging.level)
    #[arg(long, env = "TOPOGRAV_LOG_LEVEL")]
    log_level: Option<String>,

    /// Emit JSON log lines (overrides logging.format)
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// ETOPO geoid resampled to the GRACE grid
    Etopo(EtopoArgs),
    /// Resampled geoid with the GRACE grid lines drawn over it
    GridOverlay(EtopoArgs),
    /// Animate LWE thickness or the derived gravity anomaly
    LweAnimate(LweAnimateArgs),
    /// Step through LWE and gravity maps from the terminal
    LweExplore(LweExploreArgs),
    /// Ground tracks of the satellites in a TLE directory
    Groundtrack(GroundTrackArgs),
    /// Rotating Earth with an orbiting satellite
    Orbit3d(Orbit3dArgs),
    /// Mean, eccentric and true anomaly animation
    Anomalies(AnomaliesArgs),
}

fn init_logging(logging: &LoggingConfig, level_override: Option<&str>, json: bool) -> Result<()> {
    let level = match level_override.unwrap_or(logging.level.as_str()).to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true);

    if json || logging.format == "json" {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = TopogravConfig::load(&args.config)?;
    init_logging(&config.logging, args.log_level.as_deref(), args.json_logs)?;
    info!(config = %args.config.display(), command = ?args.command, "Starting topograv");

    let output = match &args.command {
        Command::Etopo(a) => commands::etopo::run_downsample(&config, a)?,
        Command::GridOverlay(a) => commands::etopo::run_grid_overlay(&config, a)?,
        Command::LweAnimate(a) => commands::lwe::run_animate(&config, a)?,
        Command::LweExplore(a) => commands::lwe::run_explore(&config, a)?,
        Command::Groundtrack(a) => commands::groundtrack::run(&config, a)?,
        Command::Orbit3d(a) => commands::orbit3d::run(&config, a)?,
        Command::Anomalies(a) => commands::anomalies::run(&config, a)?,
    };

    info!(output = %output.display(), "Done");
    Ok(())
}
