//! CSV output writers for the derived panel, the world averted series,
//! and the comparator table

use crate::comparators::{NATIONAL_WORKING_DAYS, WORLD_DEATH_TOLLS};
use crate::error::PipelineError;
use crate::panel::{Panel, Quantity, WorldRow};
use crate::validation::ValidationReport;
use std::io::Write;
use std::path::{Path, PathBuf};

fn opt_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => String::new(),
    }
}

/// Write the full derived panel, one row per (country, year)
///
/// Every quantity contributes four columns: baseline, `_if_scenario`,
/// `_averted`, and `_averted_cumulative`. Missing cells serialize as empty
/// fields, never as zero.
pub fn write_panel<W: Write>(panel: &Panel, writer: W) -> Result<(), PipelineError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec![
        "country".to_string(),
        "year".to_string(),
        "population".to_string(),
        "estimated".to_string(),
    ];
    for quantity in Quantity::ALL {
        let name = quantity.column_name();
        header.push(name.to_string());
        header.push(format!("{}_if_scenario", name));
        header.push(format!("{}_averted", name));
        header.push(format!("{}_averted_cumulative", name));
    }
    csv_writer.write_record(&header)?;

    for row in panel.rows() {
        let mut record = vec![
            row.country.clone(),
            row.year.to_string(),
            opt_cell(row.population),
            row.estimated.to_string(),
        ];
        for quantity in Quantity::ALL {
            let idx = quantity.index();
            record.push(opt_cell(row.baseline[idx]));
            record.push(opt_cell(row.if_scenario[idx]));
            record.push(opt_cell(row.averted[idx]));
            record.push(format!("{}", row.averted_cumulative[idx]));
        }
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the world averted series, one row per year
pub fn write_world<W: Write>(world: &[WorldRow], writer: W) -> Result<(), PipelineError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["year".to_string()];
    for quantity in Quantity::ALL {
        header.push(format!("world_{}_averted", quantity.column_name()));
    }
    csv_writer.write_record(&header)?;

    for row in world {
        let mut record = vec![row.year.to_string()];
        for quantity in Quantity::ALL {
            record.push(format!("{}", row.averted[quantity.index()]));
        }
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the static comparator table
pub fn write_comparators<W: Write>(writer: W) -> Result<(), PipelineError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["category", "label", "value", "unit"])?;

    for comparator in NATIONAL_WORKING_DAYS {
        let value = format!("{}", comparator.value);
        csv_writer.write_record([
            "national_working_days",
            comparator.label,
            value.as_str(),
            comparator.unit,
        ])?;
    }
    for comparator in WORLD_DEATH_TOLLS {
        let value = format!("{}", comparator.value);
        csv_writer.write_record([
            "world_death_toll",
            comparator.label,
            value.as_str(),
            comparator.unit,
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the validation report as JSON for downstream tooling
pub fn write_validation<W: Write>(
    report: &ValidationReport,
    writer: W,
) -> Result<(), PipelineError> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// Write all output files into `dir`, creating it if needed
///
/// Returns the paths written: panel, world series, comparators, validation
/// report.
pub fn write_outputs(
    dir: &Path,
    panel: &Panel,
    world: &[WorldRow],
    validation: &ValidationReport,
) -> Result<[PathBuf; 4], PipelineError> {
    std::fs::create_dir_all(dir)?;

    let panel_path = dir.join("malaria_panel.csv");
    write_panel(panel, std::fs::File::create(&panel_path)?)?;

    let world_path = dir.join("world_averted.csv");
    write_world(world, std::fs::File::create(&world_path)?)?;

    let comparators_path = dir.join("comparators.csv");
    write_comparators(std::fs::File::create(&comparators_path)?)?;

    let validation_path = dir.join("validation.json");
    write_validation(validation, std::fs::File::create(&validation_path)?)?;

    Ok([panel_path, world_path, comparators_path, validation_path])
}
