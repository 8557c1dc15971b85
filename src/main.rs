//! Malaria Projection CLI
//!
//! Loads the burden and population tables, runs the projection and
//! eradication-scenario pipeline, and writes the output tables.

use anyhow::Context;
use clap::Parser;
use malaria_projection::output::write_outputs;
use malaria_projection::sources::{load_burden, load_population, TableResolver};
use malaria_projection::{run_pipeline, Quantity, ScenarioConfig};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "malaria_projection", version, about)]
struct Args {
    /// Cleaned burden table (long format CSV)
    #[arg(long)]
    burden: PathBuf,

    /// UN population estimates (wide format CSV, one column per year)
    #[arg(long)]
    population_estimates: PathBuf,

    /// UN population projections (wide format CSV, one column per year)
    #[arg(long)]
    population_projections: PathBuf,

    /// Directory for output tables
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Override the scenario baseline year
    #[arg(long)]
    baseline_year: Option<u32>,

    /// Override the working-days-lost-per-case assumption
    #[arg(long)]
    work_days_per_case: Option<f64>,

    /// Enable the intermediate 2025 GTS checkpoint
    #[arg(long)]
    enable_2025_checkpoint: bool,
}

fn build_config(args: &Args) -> ScenarioConfig {
    let mut config = ScenarioConfig::who_gts();
    if let Some(year) = args.baseline_year {
        config.baseline_year = year;
    }
    if let Some(days) = args.work_days_per_case {
        config.work_days_per_case = days;
    }
    if args.enable_2025_checkpoint {
        for checkpoint in &mut config.checkpoints {
            if checkpoint.year == 2025 {
                checkpoint.enabled = true;
            }
        }
    }
    config
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = build_config(&args);
    let resolver = TableResolver::builtin();

    let burden = load_burden(&args.burden, &resolver)
        .with_context(|| format!("loading burden table {}", args.burden.display()))?;
    let estimates = load_population(&args.population_estimates, &resolver).with_context(|| {
        format!(
            "loading population estimates {}",
            args.population_estimates.display()
        )
    })?;
    let projections = load_population(&args.population_projections, &resolver).with_context(|| {
        format!(
            "loading population projections {}",
            args.population_projections.display()
        )
    })?;

    println!(
        "Loaded {} burden rows, {} + {} population records",
        burden.len(),
        estimates.len(),
        projections.len()
    );

    let result = run_pipeline(&burden, &estimates, &projections, &config);

    let paths = write_outputs(
        &args.output_dir,
        &result.panel,
        &result.world,
        &result.validation,
    )?;
    for path in &paths {
        println!("Wrote {}", path.display());
    }

    // Headline numbers: cumulative world averted burden at the horizon end
    let cases_idx = Quantity::CasesCentral.index();
    let deaths_idx = Quantity::DeathsCentral.index();
    let days_idx = Quantity::WorkDaysLost.index();
    let total_cases: f64 = result.world.iter().map(|w| w.averted[cases_idx]).sum();
    let total_deaths: f64 = result.world.iter().map(|w| w.averted[deaths_idx]).sum();
    let total_days: f64 = result.world.iter().map(|w| w.averted[days_idx]).sum();

    println!("\nScenario vs. baseline through {}:", config.horizon_end);
    println!("  Cases averted:        {:>16.0}", total_cases);
    println!("  Deaths averted:       {:>16.0}", total_deaths);
    println!("  Working days averted: {:>16.0}", total_days);

    println!("\nValidation checks:");
    for check in &result.validation.checks {
        println!(
            "  [{}] {}: {}",
            if check.passed { "PASS" } else { "FAIL" },
            check.name,
            check.detail
        );
    }

    Ok(())
}
