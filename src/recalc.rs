//! Recalculation policy: when the computed snapshot catches up with raw.
//!
//! The raw and computed datasets live together in [`Snapshots`]. Raw is
//! replaced through [`RecalcPolicy::ingest`] and [`RecalcPolicy::apply_edit`];
//! computed is only ever written by the policy's private synchronization
//! step, which copies the whole raw dataset.

use tracing::debug;

use crate::models::{Dataset, SampleRecord};

// ---

/// The live raw dataset and the computed snapshot derived metrics are read from.
#[derive(Debug, Clone, Default)]
pub struct Snapshots {
    // ---
    raw: Dataset,
    /// `None` until the first synchronization.
    computed: Option<Dataset>,
}

impl Snapshots {
    // ---
    pub fn raw(&self) -> &[SampleRecord] {
        &self.raw
    }

    pub fn computed(&self) -> &[SampleRecord] {
        self.computed.as_deref().unwrap_or_default()
    }

    /// True when computed differs from raw.
    pub fn is_stale(&self) -> bool {
        self.computed() != self.raw()
    }

    fn synchronize(&mut self) {
        // ---
        debug!("Synchronizing computed snapshot ({} rows)", self.raw.len());
        self.computed = Some(self.raw.clone());
    }
}

/// Decides whether a raw change propagates to the computed snapshot.
#[derive(Debug, Clone, Copy)]
pub struct RecalcPolicy {
    // ---
    auto_recalc: bool,
}

impl Default for RecalcPolicy {
    fn default() -> Self {
        Self { auto_recalc: true }
    }
}

impl RecalcPolicy {
    // ---
    pub fn new(auto_recalc: bool) -> Self {
        Self { auto_recalc }
    }

    pub fn auto_recalc(&self) -> bool {
        self.auto_recalc
    }

    /// Switch modes. Turning auto back on does not resync by itself; the next
    /// raw change does.
    pub fn set_auto_recalc(&mut self, enabled: bool) {
        // ---
        debug!("Auto recalculate: {} -> {}", self.auto_recalc, enabled);
        self.auto_recalc = enabled;
    }

    /// Replace raw with a freshly ingested dataset. Always synchronizes.
    pub fn ingest(&self, snapshots: &mut Snapshots, dataset: Dataset) {
        // ---
        snapshots.raw = dataset;
        snapshots.synchronize();
    }

    /// Replace raw with an edited dataset and propagate it if auto mode is on.
    pub fn apply_edit(&self, snapshots: &mut Snapshots, dataset: Dataset) {
        // ---
        snapshots.raw = dataset;

        let never_populated = snapshots.computed.is_none() && !snapshots.raw.is_empty();
        if self.auto_recalc || never_populated {
            snapshots.synchronize();
        } else {
            debug!("Auto recalculate off, computed snapshot left as is");
        }
    }

    /// Explicit "recalculate now" trigger.
    pub fn recalculate_now(&self, snapshots: &mut Snapshots) {
        snapshots.synchronize();
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::derivation::summarize;
    use crate::ingest::{generate_sample, parse};
    use crate::models::SampleField;
    use crate::mutation::set_field;

    fn loaded(policy: &RecalcPolicy) -> Snapshots {
        // ---
        let mut snapshots = Snapshots::default();
        policy.ingest(&mut snapshots, generate_sample());
        snapshots
    }

    fn edit(policy: &RecalcPolicy, snapshots: &mut Snapshots, value: &str) {
        // ---
        let edited = set_field(snapshots.raw(), "mock-1", SampleField::Moisture, value);
        policy.apply_edit(snapshots, edited);
    }

    #[test]
    fn test_ingest_always_synchronizes() {
        // ---
        let policy = RecalcPolicy::new(false);
        let snapshots = loaded(&policy);

        assert_eq!(snapshots.computed(), snapshots.raw());
        assert!(!snapshots.is_stale());
    }

    #[test]
    fn test_auto_mode_propagates_edits() {
        // ---
        let policy = RecalcPolicy::default();
        let mut snapshots = loaded(&policy);
        let before = summarize(snapshots.computed());

        edit(&policy, &mut snapshots, "40");

        assert_ne!(summarize(snapshots.computed()), before);
        assert_eq!(snapshots.computed()[0].moisture, 40.0);
    }

    #[test]
    fn test_manual_mode_waits_for_trigger() {
        // ---
        let policy = RecalcPolicy::new(false);
        let mut snapshots = loaded(&policy);
        let before = summarize(snapshots.computed());

        edit(&policy, &mut snapshots, "40");
        assert_eq!(summarize(snapshots.computed()), before);
        assert!(snapshots.is_stale());

        policy.recalculate_now(&mut snapshots);
        assert_ne!(summarize(snapshots.computed()), before);
        assert!(!snapshots.is_stale());
    }

    #[test]
    fn test_reenabling_auto_waits_for_next_edit() {
        // ---
        let mut policy = RecalcPolicy::new(false);
        let mut snapshots = loaded(&policy);

        edit(&policy, &mut snapshots, "40");
        policy.set_auto_recalc(true);
        assert!(snapshots.is_stale());
        assert_eq!(snapshots.computed()[0].moisture, 12.5);

        edit(&policy, &mut snapshots, "41");
        assert!(!snapshots.is_stale());
        assert_eq!(snapshots.computed()[0].moisture, 41.0);
    }

    #[test]
    fn test_first_population_ignores_mode() {
        // ---
        let policy = RecalcPolicy::new(false);
        let mut snapshots = Snapshots::default();
        assert!(snapshots.computed().is_empty());

        policy.apply_edit(&mut snapshots, parse("A,1\nB,2"));
        assert_eq!(snapshots.computed().len(), 2);
    }

    #[test]
    fn test_new_ingest_replaces_both() {
        // ---
        let policy = RecalcPolicy::new(false);
        let mut snapshots = loaded(&policy);
        edit(&policy, &mut snapshots, "40");

        policy.ingest(&mut snapshots, parse("X,1"));
        assert_eq!(snapshots.raw().len(), 1);
        assert_eq!(snapshots.computed(), snapshots.raw());
    }
}
