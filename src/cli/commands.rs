//! Command implementations for the glacier analysis CLI
//!
//! This module contains the command execution logic and logging setup. The
//! library reports failures through [`crate::Error`]; here they are wrapped
//! with `anyhow` context naming the file or argument involved.

use crate::app::models::{CodePattern, Glacier};
use crate::app::services::schema_checker::missing_columns;
use crate::app::services::sheet_loader::{load_glaciers, load_mass_balance};
use crate::app::services::validation::validate_bounded_count;
use crate::app::services::{geo_distance, plot_emitter};
use crate::cli::args::{
    Args, CheckCsvArgs, Commands, DistanceArgs, NearestArgs, PlotArgs, SearchArgs,
};
use crate::config::Config;
use crate::Error;
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use tracing::{debug, info};

/// Main command runner
///
/// 1. Validate arguments and load layered configuration
/// 2. Set up logging
/// 3. Dispatch to the selected subcommand
pub fn run(args: Args) -> Result<()> {
    args.validate()?;

    let config = Config::load_layered(args.config_file.as_deref())
        .context("Failed to load configuration")?;

    setup_logging(&args, &config);
    debug!("Command line arguments: {:?}", args);

    match &args.command {
        Some(Commands::Distance(cmd)) => run_distance(cmd),
        Some(Commands::CheckCsv(cmd)) => run_check_csv(cmd),
        Some(Commands::Search(cmd)) => run_search(cmd),
        Some(Commands::Nearest(cmd)) => run_nearest(cmd),
        Some(Commands::Plot(cmd)) => run_plot(cmd, config),
        None => Ok(()),
    }
}

/// Set up structured logging to stderr
///
/// RUST_LOG wins over -v/-q, which win over the config file level. A second
/// call is a no-op, so tests may run commands repeatedly.
fn setup_logging(args: &Args, config: &Config) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args
        .get_log_level()
        .unwrap_or(config.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("glacier_analysis={}", log_level)));

    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    if initialized.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

fn run_distance(cmd: &DistanceArgs) -> Result<()> {
    let km = geo_distance::distance(cmd.lat1, cmd.lon1, cmd.lat2, cmd.lon2)?;

    println!(
        "{} ({}, {}) {} ({}, {}): {} km",
        "Distance".bright_cyan(),
        cmd.lat1,
        cmd.lon1,
        "to".bright_cyan(),
        cmd.lat2,
        cmd.lon2,
        format!("{:.3}", km).bright_white().bold()
    );
    Ok(())
}

fn run_check_csv(cmd: &CheckCsvArgs) -> Result<()> {
    let required = cmd.columns.as_strs();
    let missing = missing_columns(&cmd.file, &required)
        .with_context(|| format!("Failed to check {}", cmd.file.display()))?;

    if let Some(first) = missing.first() {
        for column in &missing {
            println!("  {} {}", "Missing".bright_red(), column);
        }
        return Err(Error::missing_column(first.clone(), cmd.file.display().to_string()).into());
    }

    println!(
        "{} {} has all {} required columns",
        "OK".bright_green().bold(),
        cmd.file.display(),
        required.len()
    );
    Ok(())
}

fn run_search(cmd: &SearchArgs) -> Result<()> {
    let pattern = CodePattern::parse(&cmd.pattern, cmd.full)?;
    let glaciers = load_glaciers(&cmd.glaciers)
        .with_context(|| format!("Failed to load glacier sheet {}", cmd.glaciers.display()))?;

    let names = glaciers.filter_by_code(&pattern, cmd.full);

    let shown = match cmd.first {
        Some(n) => validate_bounded_count(n, names.len())?,
        None => names.len(),
    };

    println!(
        "{} {} glaciers matching {} ({} mode)",
        "Found".bright_green(),
        names.len().to_string().bright_white().bold(),
        pattern.to_string().bright_white(),
        if cmd.full { "full" } else { "wildcard" }
    );
    for name in &names[..shown] {
        println!("  {}", name);
    }
    Ok(())
}

fn run_nearest(cmd: &NearestArgs) -> Result<()> {
    let glaciers = load_glaciers(&cmd.glaciers)
        .with_context(|| format!("Failed to load glacier sheet {}", cmd.glaciers.display()))?;

    let nearest = glaciers.find_nearest(cmd.lat, cmd.lon, cmd.count)?;
    info!(
        "Ranked {} glaciers around ({}, {})",
        glaciers.len(),
        cmd.lat,
        cmd.lon
    );

    if cmd.json {
        println!("{}", nearest_to_json(&nearest)?);
        return Ok(());
    }

    println!(
        "{} {} glaciers to ({}, {})",
        "Nearest".bright_green(),
        nearest.len().to_string().bright_white().bold(),
        cmd.lat,
        cmd.lon
    );
    for (glacier, km) in nearest {
        println!(
            "  {:>10.3} km  {} [{}] {}",
            km,
            glacier.name,
            glacier.unit,
            glacier.coordinate
        );
    }
    Ok(())
}

/// One row of `nearest --json` output
#[derive(Debug, Serialize)]
struct RankedGlacier<'a> {
    #[serde(flatten)]
    glacier: &'a Glacier,
    distance_km: f64,
}

fn nearest_to_json(nearest: &[(&Glacier, f64)]) -> serde_json::Result<String> {
    let rows: Vec<RankedGlacier> = nearest
        .iter()
        .map(|&(glacier, distance_km)| RankedGlacier {
            glacier,
            distance_km,
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

fn run_plot(cmd: &PlotArgs, config: Config) -> Result<()> {
    let mut config = config;
    if let Some(width) = cmd.width {
        config.plot.width = width;
    }
    if let Some(height) = cmd.height {
        config.plot.height = height;
    }

    let glaciers = load_glaciers(&cmd.glaciers)
        .with_context(|| format!("Failed to load glacier sheet {}", cmd.glaciers.display()))?;
    let glacier = glaciers.require(&cmd.id)?;

    let series = load_mass_balance(&cmd.mass_balance, &cmd.id).with_context(|| {
        format!(
            "Failed to load mass-balance sheet {}",
            cmd.mass_balance.display()
        )
    })?;

    plot_emitter::emit_mass_balance_plot(
        &glacier.name,
        &series.years,
        &series.balances,
        &cmd.output,
        &config.plot,
    )
    .with_context(|| format!("Failed to plot mass balance of {}", glacier.name))?;

    println!(
        "{} {} measurements for {} to {}",
        "Plotted".bright_green(),
        series.len().to_string().bright_white().bold(),
        glacier.name,
        cmd.output.display()
    );
    Ok(())
}
