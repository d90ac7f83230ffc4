//! Aggregate summary over a set of sample records.

use serde::Serialize;

use crate::models::SampleRecord;

// ---

/// Averages of the adjusted metrics plus the number of records averaged.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Summary {
    // ---
    pub avg_moisture: f64,
    pub avg_density: f64,
    pub total_samples: usize,
}

/// Summarize `records`, summing adjusted values in iteration order.
///
/// An empty input yields the all-zero summary.
pub fn summarize<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a SampleRecord>,
{
    // ---
    let (moisture, density, count) = records.into_iter().fold(
        (0.0_f64, 0.0_f64, 0_usize),
        |(moisture, density, count), record| {
            (
                moisture + record.adjusted_moisture(),
                density + record.adjusted_density(),
                count + 1,
            )
        },
    );

    if count == 0 {
        return Summary::default();
    }

    Summary {
        avg_moisture: moisture / count as f64,
        avg_density: density / count as f64,
        total_samples: count,
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::filter::filter;
    use crate::ingest::{generate_sample, parse};

    #[test]
    fn test_empty_summary_is_zero() {
        // ---
        let empty: Vec<SampleRecord> = Vec::new();
        assert_eq!(
            summarize(&empty),
            Summary {
                avg_moisture: 0.0,
                avg_density: 0.0,
                total_samples: 0
            }
        );
    }

    #[test]
    fn test_total_matches_length() {
        // ---
        let dataset = generate_sample();
        assert_eq!(summarize(&dataset).total_samples, dataset.len());
    }

    #[test]
    fn test_averages() {
        // ---
        let dataset = parse("A,10,2.0,5,25\nB,20,4.0,10,50");
        let summary = summarize(&dataset);

        // (10.5 + 22.0) / 2 and (1.5 + 2.0) / 2
        assert!((summary.avg_moisture - 16.25).abs() < 1e-12);
        assert!((summary.avg_density - 1.75).abs() < 1e-12);
        assert_eq!(summary.total_samples, 2);
    }

    #[test]
    fn test_sums_in_dataset_order() {
        // ---
        let dataset = generate_sample();
        let mut expected_moisture = 0.0;
        let mut expected_density = 0.0;
        for record in &dataset {
            expected_moisture += record.adjusted_moisture();
            expected_density += record.adjusted_density();
        }

        let summary = summarize(&dataset);
        assert_eq!(summary.avg_moisture, expected_moisture / 5.0);
        assert_eq!(summary.avg_density, expected_density / 5.0);
    }

    #[test]
    fn test_summarize_filtered_view() {
        // ---
        let dataset = generate_sample();
        let view = filter(&dataset, "001234");
        let summary = summarize(view.iter().copied());

        assert_eq!(summary.total_samples, 2);
        let expected = (dataset[0].adjusted_moisture() + dataset[1].adjusted_moisture()) / 2.0;
        assert_eq!(summary.avg_moisture, expected);
    }
}
