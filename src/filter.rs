//! Sample-id substring filter.

use crate::models::SampleRecord;

// ---

/// Narrow `records` to those whose `sample_id` contains `query`, ignoring case.
///
/// A blank query keeps every record. Source order is preserved and the
/// result borrows from the input, so the same query can be applied to the
/// raw and computed snapshots independently.
pub fn filter<'a, I>(records: I, query: &str) -> Vec<&'a SampleRecord>
where
    I: IntoIterator<Item = &'a SampleRecord>,
{
    // ---
    if query.trim().is_empty() {
        return records.into_iter().collect();
    }

    let needle = query.to_lowercase();
    records
        .into_iter()
        .filter(|r| r.sample_id.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::ingest::{generate_sample, parse};

    fn ids<'a>(records: &[&'a SampleRecord]) -> Vec<&'a str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_blank_query_is_identity() {
        // ---
        let dataset = generate_sample();
        let all: Vec<&SampleRecord> = dataset.iter().collect();

        assert_eq!(filter(&dataset, ""), all);
        assert_eq!(filter(&dataset, "   "), all);
    }

    #[test]
    fn test_substring_match_preserves_order() {
        // ---
        let dataset = generate_sample();
        let matched = filter(&dataset, "001234");

        assert_eq!(ids(&matched), vec!["mock-1", "mock-2"]);
    }

    #[test]
    fn test_case_insensitive() {
        // ---
        let dataset = parse("Clay-A,1\nsand-b,2\nCLAY-c,3");

        assert_eq!(ids(&filter(&dataset, "clay")), vec!["row-0", "row-2"]);
        assert_eq!(ids(&filter(&dataset, "SAND")), vec!["row-1"]);
    }

    #[test]
    fn test_no_match() {
        // ---
        let dataset = generate_sample();
        assert!(filter(&dataset, "zzz").is_empty());
    }

    #[test]
    fn test_idempotent() {
        // ---
        let dataset = parse("ab,1\nabc,2\nb,3\nxab,4");
        let once = filter(&dataset, "ab");
        let twice = filter(once.iter().copied(), "ab");

        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_dataset() {
        // ---
        let dataset: Vec<SampleRecord> = Vec::new();
        assert!(filter(&dataset, "x").is_empty());
    }
}
