#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the wildfire insurance report toolchain.
//!
//! `report` runs every section once against the loaded data and writes
//! chart-ready JSON plus the recovery GeoJSON; `interactive` re-runs the
//! selected pipeline on every parameter change, mirroring the report's
//! selectors.

mod interactive;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use wildfire_atlas_analytics_models::{ClimateTrendParams, FireTrendParams};
use wildfire_atlas_climate_models::ClimateVariable;
use wildfire_atlas_fire_models::{CauseFilter, FireCause};
use wildfire_atlas_ingest::DataContext;
use wildfire_atlas_report::map::homes_feature_collection;
use wildfire_atlas_stats::SeriesAxis;

#[derive(Parser)]
#[command(name = "wildfire_atlas_cli", about = "Wildfire insurance report toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive all report sections and write chart artifacts
    Report {
        /// Directory holding the source tables
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        /// Directory for the generated chart artifacts
        #[arg(long, default_value = "data/generated")]
        out_dir: PathBuf,
        /// Cause selector ("All" or a cause label, e.g. "Lightning")
        #[arg(long, default_value = "All")]
        cause: String,
        /// Trailing moving-average window in years
        #[arg(long, default_value_t = 15)]
        window: usize,
        /// Symmetric climate window in days (each side)
        #[arg(long, default_value_t = 200)]
        climate_window: usize,
        /// Climate variable (`bi` or `fm100`)
        #[arg(long, default_value = "fm100")]
        climate_variable: String,
        /// Show raw series alongside the smoothed line (wide display range)
        #[arg(long)]
        show_raw: bool,
        /// Feed the year axis into the unit-root test instead of the
        /// acreage values
        #[arg(long)]
        test_time_keys: bool,
    },
    /// Prompt-driven exploration that recomputes on each selection
    Interactive {
        /// Directory holding the source tables
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
    /// List the fire-cause taxonomy
    Causes,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            data_dir,
            out_dir,
            cause,
            window,
            climate_window,
            climate_variable,
            show_raw,
            test_time_keys,
        } => {
            let cause = parse_cause(&cause)?;
            let variable: ClimateVariable = climate_variable.parse().map_err(|_| {
                format!("unknown climate variable '{climate_variable}' (expected bi or fm100)")
            })?;
            let axis = if test_time_keys {
                SeriesAxis::TimeKeys
            } else {
                SeriesAxis::Values
            };

            let context = DataContext::load(&data_dir)?;
            run_report(
                &context,
                &FireTrendParams { cause, window },
                &ClimateTrendParams {
                    variable,
                    window: climate_window,
                    show_raw,
                },
                axis,
                &out_dir,
            )?;
        }
        Commands::Interactive { data_dir } => {
            let context = DataContext::load(&data_dir)?;
            interactive::run(&context)?;
        }
        Commands::Causes => {
            for cause in FireCause::ALL {
                println!("{:>2}  {}", cause.code(), cause.label());
            }
        }
    }

    Ok(())
}

fn parse_cause(label: &str) -> Result<CauseFilter, String> {
    CauseFilter::from_label(label).ok_or_else(|| {
        let known: Vec<&str> = FireCause::ALL.iter().map(|c| c.label()).collect();
        format!(
            "unknown cause '{label}'. Expected \"All\" or one of: {}",
            known.join(", "),
        )
    })
}

fn run_report(
    context: &DataContext,
    fire_params: &FireTrendParams,
    climate_params: &ClimateTrendParams,
    axis: SeriesAxis,
    out_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(out_dir)?;

    let fire = wildfire_atlas_report::fire_section(&context.fires, fire_params, axis);
    write_json(&out_dir.join("fire_trend.json"), &fire)?;
    println!("{}", fire.narrative);

    let climate = wildfire_atlas_report::climate_section(&context.climate, climate_params);
    write_json(&out_dir.join("climate_trend.json"), &climate)?;
    log::info!(
        "climate series: {} days, smoothed over +/-{} days",
        climate.raw.len(),
        climate_params.window,
    );

    let recovery = wildfire_atlas_report::recovery_section(&context.destroyed, &context.rebuilt);
    write_json(&out_dir.join("recovery.json"), &recovery)?;
    write_json(
        &out_dir.join("homes.geojson"),
        &homes_feature_collection(&recovery.homes),
    )?;
    println!("{}", recovery.narrative);

    log::info!("artifacts written to {}", out_dir.display());
    Ok(())
}

fn write_json<T: serde::Serialize>(
    path: &Path,
    value: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), value)?;
    Ok(())
}
