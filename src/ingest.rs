//! Ingestion of comma-separated sample text into a [`Dataset`].
//!
//! Input rows carry up to five fields in fixed order:
//! `identifier,moisture,dry_density,correction_factor,porosity`.
//! There is no quoting, escaping or header detection. Malformed numbers
//! never fail the batch; the field default is substituted instead.

use tracing::debug;

use crate::models::{
    parse_number, Dataset, SampleRecord, DEFAULT_CORRECTION_FACTOR, DEFAULT_DRY_DENSITY,
    DEFAULT_MOISTURE, DEFAULT_POROSITY,
};

// ---

const FIELD_COUNT: usize = 5;

/// Parse delimited text into one record per non-blank line.
///
/// Record ids carry the zero-based line position, so skipped blank lines
/// leave gaps (`row-0`, `row-2`, ...).
pub fn parse(text: &str) -> Dataset {
    // ---
    let records: Dataset = text
        .trim()
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_line(index, line))
        .collect();

    debug!("Parsed {} sample rows", records.len());
    records
}

fn parse_line(index: usize, line: &str) -> SampleRecord {
    // ---
    let mut fields: [Option<&str>; FIELD_COUNT] = [None; FIELD_COUNT];
    for (slot, value) in fields.iter_mut().zip(line.split(',')) {
        *slot = Some(value);
    }
    let [sample_id, moisture, dry_density, correction_factor, porosity] = fields;

    SampleRecord {
        id: format!("row-{index}"),
        sample_id: sample_id.map(str::trim).unwrap_or_default().to_string(),
        moisture: numeric_or(moisture, DEFAULT_MOISTURE),
        dry_density: numeric_or(dry_density, DEFAULT_DRY_DENSITY),
        correction_factor: numeric_or(correction_factor, DEFAULT_CORRECTION_FACTOR),
        porosity: numeric_or(porosity, DEFAULT_POROSITY),
    }
}

fn numeric_or(field: Option<&str>, default: f64) -> f64 {
    field.and_then(parse_number).unwrap_or(default)
}

/// Fixed demonstration dataset, usable without any input file.
pub fn generate_sample() -> Dataset {
    // ---
    let rows = [
        ("mock-1", "001234-12", 12.5, 1.85, 5.0, 30.0),
        ("mock-2", "001234-13", 9.8, 1.92, 5.0, 28.0),
        ("mock-3", "003212-01", 15.2, 1.77, 6.0, 31.0),
        ("mock-4", "004123-05", 11.3, 1.88, 5.0, 29.0),
        ("mock-5", "005678-22", 13.7, 1.82, 4.0, 32.0),
    ];

    rows.iter()
        .map(
            |&(id, sample_id, moisture, dry_density, correction_factor, porosity)| SampleRecord {
                id: id.to_string(),
                sample_id: sample_id.to_string(),
                moisture,
                dry_density,
                correction_factor,
                porosity,
            },
        )
        .collect()
}
