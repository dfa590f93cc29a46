//! Prompt-driven exploration loop.
//!
//! Mirrors the report's selectors: pick a section, adjust its
//! parameters, and the affected pipeline is recomputed in full against
//! the session's loaded data. Nothing is cached between selections.

use dialoguer::{Input, Select};
use wildfire_atlas_analytics_models::{ClimateTrendParams, FireTrendParams};
use wildfire_atlas_climate_models::ClimateVariable;
use wildfire_atlas_fire_models::{CauseFilter, FireCause};
use wildfire_atlas_ingest::DataContext;
use wildfire_atlas_stats::SeriesAxis;

/// Section selection for the exploration loop.
enum Section {
    FireTrend,
    ClimateTrend,
    RecoveryMap,
    Quit,
}

impl Section {
    const ALL: &[Self] = &[
        Self::FireTrend,
        Self::ClimateTrend,
        Self::RecoveryMap,
        Self::Quit,
    ];

    const fn label(&self) -> &'static str {
        match self {
            Self::FireTrend => "Annual burned acreage",
            Self::ClimateTrend => "Daily climate factors",
            Self::RecoveryMap => "Santa Rosa recovery",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the exploration loop until the user quits.
///
/// # Errors
///
/// Returns an error if a prompt cannot be displayed or read.
pub fn run(context: &DataContext) -> Result<(), Box<dyn std::error::Error>> {
    println!("Wildfire Atlas");
    println!();

    loop {
        let labels: Vec<&str> = Section::ALL.iter().map(Section::label).collect();
        let idx = Select::new()
            .with_prompt("Which section would you like to explore?")
            .items(&labels)
            .default(0)
            .interact()?;

        match Section::ALL[idx] {
            Section::FireTrend => fire_trend(context)?,
            Section::ClimateTrend => climate_trend(context)?,
            Section::RecoveryMap => recovery(context),
            Section::Quit => return Ok(()),
        }
        println!();
    }
}

fn fire_trend(context: &DataContext) -> Result<(), Box<dyn std::error::Error>> {
    let window: usize = Input::new()
        .with_prompt("Moving average window (years)")
        .default(15)
        .interact_text()?;

    let mut cause_labels = vec!["All"];
    cause_labels.extend(FireCause::ALL.iter().map(|c| c.label()));
    let cause_idx = Select::new()
        .with_prompt("Cause")
        .items(&cause_labels)
        .default(0)
        .interact()?;
    let cause = if cause_idx == 0 {
        CauseFilter::All
    } else {
        CauseFilter::Cause(FireCause::ALL[cause_idx - 1])
    };

    let params = FireTrendParams { cause, window };
    let section =
        wildfire_atlas_report::fire_section(&context.fires, &params, SeriesAxis::Values);

    println!(
        "{} years charted ({} after smoothing over {} years)",
        section.trend.raw.len(),
        section.trend.smoothed.len(),
        params.window,
    );
    println!("{}", section.narrative);
    Ok(())
}

fn climate_trend(context: &DataContext) -> Result<(), Box<dyn std::error::Error>> {
    let window: usize = Input::new()
        .with_prompt("Symmetric moving average window (days on either side)")
        .default(200)
        .interact_text()?;

    let variables = [
        ClimateVariable::DeadFuelMoisture100h,
        ClimateVariable::FireDangerIndex,
    ];
    let variable_idx = Select::new()
        .with_prompt("Variable")
        .items(&variables.iter().map(|v| v.column()).collect::<Vec<_>>())
        .default(0)
        .interact()?;

    let show_raw_idx = Select::new()
        .with_prompt("Show raw numbers")
        .items(&["no", "yes"])
        .default(0)
        .interact()?;

    let params = ClimateTrendParams {
        variable: variables[variable_idx],
        window,
        show_raw: show_raw_idx == 1,
    };
    let trend = wildfire_atlas_report::climate_section(&context.climate, &params);

    println!(
        "{} daily observations of {}, display range {:.0}..{:.0}",
        trend.raw.len(),
        params.variable.column(),
        trend.range.min,
        trend.range.max,
    );
    Ok(())
}

fn recovery(context: &DataContext) {
    let section = wildfire_atlas_report::recovery_section(&context.destroyed, &context.rebuilt);
    println!("{} parcels on the map", section.summary.parcel_count);
    println!("{}", section.narrative);
}
