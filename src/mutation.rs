//! Single-field edits of raw sample records.

use crate::models::{parse_number, Dataset, SampleField, SampleRecord};

// ---

/// Return a copy of `raw` with `field` of the record identified by `id` set to `value`.
///
/// Numeric fields parse `value` and fall back to the field default when it
/// is not a finite number. An unknown `id` returns the dataset unchanged.
pub fn set_field(raw: &[SampleRecord], id: &str, field: SampleField, value: &str) -> Dataset {
    // ---
    raw.iter()
        .map(|record| {
            if record.id == id {
                with_field(record, field, value)
            } else {
                record.clone()
            }
        })
        .collect()
}

fn with_field(record: &SampleRecord, field: SampleField, value: &str) -> SampleRecord {
    // ---
    let mut updated = record.clone();
    let number = || {
        parse_number(value)
            .or(field.default_value())
            .unwrap_or_default()
    };

    match field {
        SampleField::SampleId => updated.sample_id = value.to_string(),
        SampleField::Moisture => updated.moisture = number(),
        SampleField::DryDensity => updated.dry_density = number(),
        SampleField::CorrectionFactor => updated.correction_factor = number(),
        SampleField::Porosity => updated.porosity = number(),
    }
    updated
}
