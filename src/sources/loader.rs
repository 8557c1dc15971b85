//! CSV loaders for the burden and population tables
//!
//! The burden table is long format, one row per country-year, with the
//! spreadsheet quirk that a country label only appears on its first row
//! and is blank on the rest; the loader carries the last non-blank label
//! down. The UN population tables are wide format, one column per year,
//! and get reshaped to long records here. Rows whose country cannot be
//! resolved, or whose fields fail to parse, are skipped with a warning.

use super::countries::CountryResolver;
use crate::error::PipelineError;
use crate::panel::{BurdenObservation, PopulationRecord};
use log::warn;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Raw burden row. Expected header:
/// `Country,Year,Cases_Lower,Cases_Point,Cases_Upper,Deaths_Lower,Deaths_Point,Deaths_Upper`
#[derive(Debug, serde::Deserialize)]
struct BurdenCsvRow {
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "Cases_Lower")]
    cases_lower: Option<f64>,
    #[serde(rename = "Cases_Point")]
    cases_point: Option<f64>,
    #[serde(rename = "Cases_Upper")]
    cases_upper: Option<f64>,
    #[serde(rename = "Deaths_Lower")]
    deaths_lower: Option<f64>,
    #[serde(rename = "Deaths_Point")]
    deaths_point: Option<f64>,
    #[serde(rename = "Deaths_Upper")]
    deaths_upper: Option<f64>,
}

/// Load burden observations from a CSV file
pub fn load_burden<P: AsRef<Path>>(
    path: P,
    resolver: &dyn CountryResolver,
) -> Result<Vec<BurdenObservation>, PipelineError> {
    let file = File::open(path.as_ref())?;
    load_burden_from_reader(file, resolver)
}

/// Load burden observations from any reader
pub fn load_burden_from_reader<R: Read>(
    reader: R,
    resolver: &dyn CountryResolver,
) -> Result<Vec<BurdenObservation>, PipelineError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut observations = Vec::new();

    // Carry the last non-blank country label down over blank cells
    let mut last_label: Option<String> = None;

    for result in csv_reader.deserialize() {
        let row: BurdenCsvRow = match result {
            Ok(row) => row,
            Err(err) => {
                warn!("skipping unparseable burden row: {}", err);
                continue;
            }
        };

        let label = if row.country.trim().is_empty() {
            match &last_label {
                Some(label) => label.clone(),
                None => {
                    warn!("burden row with no country label before any labelled row");
                    continue;
                }
            }
        } else {
            let label = row.country.trim().to_string();
            last_label = Some(label.clone());
            label
        };

        let country = match resolver.resolve(&label) {
            Some(code) => code,
            None => {
                warn!("dropping burden rows for unresolved country '{}'", label);
                continue;
            }
        };

        observations.push(BurdenObservation {
            country,
            year: row.year,
            cases_low: row.cases_lower,
            cases_central: row.cases_point,
            cases_high: row.cases_upper,
            deaths_low: row.deaths_lower,
            deaths_central: row.deaths_point,
            deaths_high: row.deaths_upper,
        });
    }

    if observations.is_empty() {
        return Err(PipelineError::EmptyInput("burden table".to_string()));
    }
    Ok(observations)
}

/// Load a wide-format population table (first column country, one column
/// per year) and reshape it to long records
pub fn load_population<P: AsRef<Path>>(
    path: P,
    resolver: &dyn CountryResolver,
) -> Result<Vec<PopulationRecord>, PipelineError> {
    let file = File::open(path.as_ref())?;
    load_population_from_reader(file, resolver)
}

/// Reshape a wide population table from any reader
pub fn load_population_from_reader<R: Read>(
    reader: R,
    resolver: &dyn CountryResolver,
) -> Result<Vec<PopulationRecord>, PipelineError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let year_columns: Vec<(usize, u32)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| h.trim().parse::<u32>().ok().map(|year| (i, year)))
        .collect();
    if year_columns.is_empty() {
        return Err(PipelineError::MissingColumn {
            column: "per-year columns".to_string(),
            file: "population table".to_string(),
        });
    }

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let label = record.get(0).unwrap_or("").trim();
        let country = match resolver.resolve(label) {
            Some(code) => code,
            None => {
                warn!("dropping population row for unresolved country '{}'", label);
                continue;
            }
        };

        for &(column, year) in &year_columns {
            let raw = record.get(column).unwrap_or("").trim();
            if raw.is_empty() {
                continue;
            }
            // UN exports use thousands separators and space grouping
            let cleaned: String = raw.chars().filter(|c| *c != ',' && *c != ' ').collect();
            match cleaned.parse::<f64>() {
                Ok(population) => records.push(PopulationRecord {
                    country: country.clone(),
                    year,
                    population,
                }),
                Err(_) => {
                    warn!(
                        "skipping unparseable population value '{}' ({} {})",
                        raw, country, year
                    );
                }
            }
        }
    }

    if records.is_empty() {
        return Err(PipelineError::EmptyInput("population table".to_string()));
    }
    Ok(records)
}
