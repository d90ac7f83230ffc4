//! Sample record model and derived-value formulas.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---

/// Default moisture (%) when the input is absent or unparsable.
pub const DEFAULT_MOISTURE: f64 = 0.0;

/// Default dry density when the input is absent or unparsable.
pub const DEFAULT_DRY_DENSITY: f64 = 0.0;

/// Default correction factor (%) when the input is absent or blank.
pub const DEFAULT_CORRECTION_FACTOR: f64 = 5.0;

/// Default porosity (%) when the input is absent or blank.
pub const DEFAULT_POROSITY: f64 = 30.0;

/// An ordered set of sample records, in input row order.
pub type Dataset = Vec<SampleRecord>;

/// One soil sample reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    // ---
    /// Batch-scoped row identity (`row-<index>` for parsed input).
    pub id: String,
    /// User-visible label, free text, not required to be unique.
    pub sample_id: String,
    pub moisture: f64,
    pub dry_density: f64,
    pub correction_factor: f64,
    pub porosity: f64,
}

/// Adjusted metrics derived from a single record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdjustedValues {
    // ---
    pub adjusted_moisture: f64,
    pub adjusted_density: f64,
}

impl SampleRecord {
    // ---
    /// `moisture * (1 + correction_factor / 100)`, unrounded.
    pub fn adjusted_moisture(&self) -> f64 {
        self.moisture * (1.0 + self.correction_factor / 100.0)
    }

    /// `dry_density * (1 - porosity / 100)`, unrounded.
    pub fn adjusted_density(&self) -> f64 {
        self.dry_density * (1.0 - self.porosity / 100.0)
    }

    pub fn adjusted(&self) -> AdjustedValues {
        AdjustedValues {
            adjusted_moisture: self.adjusted_moisture(),
            adjusted_density: self.adjusted_density(),
        }
    }
}

/// Editable fields of a [`SampleRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleField {
    // ---
    SampleId,
    Moisture,
    DryDensity,
    CorrectionFactor,
    Porosity,
}

impl SampleField {
    // ---
    /// Fallback used when a numeric value fails to parse.
    ///
    /// Returns `None` for the free-text `sample_id` field.
    pub fn default_value(self) -> Option<f64> {
        match self {
            SampleField::SampleId => None,
            SampleField::Moisture => Some(DEFAULT_MOISTURE),
            SampleField::DryDensity => Some(DEFAULT_DRY_DENSITY),
            SampleField::CorrectionFactor => Some(DEFAULT_CORRECTION_FACTOR),
            SampleField::Porosity => Some(DEFAULT_POROSITY),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SampleField::SampleId => "sample_id",
            SampleField::Moisture => "moisture",
            SampleField::DryDensity => "dry_density",
            SampleField::CorrectionFactor => "correction_factor",
            SampleField::Porosity => "porosity",
        }
    }
}

impl fmt::Display for SampleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse the leading number of a cell, so `"12.5%"` reads as 12.5.
///
/// Returns `None` when the cell does not start with a number or the number
/// is not finite.
pub fn parse_number(text: &str) -> Option<f64> {
    // ---
    let trimmed = text.trim();
    let end = numeric_prefix_len(trimmed.as_bytes());
    if end == 0 {
        return None;
    }
    trimmed[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Length of the longest `[+-]digits[.digits][(e|E)[+-]digits]` prefix, or 0.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    // ---
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut pos = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = digits_from(pos);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = digits_from(pos + 1);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    // exponent only counts when digits follow it
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            pos = exp + exp_digits;
        }
    }
    pos
}
