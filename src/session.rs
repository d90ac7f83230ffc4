//! The sample session a UI collaborator drives.
//!
//! Wraps the raw/computed [`Snapshots`] and the [`RecalcPolicy`] together with
//! the state the samples page shows around them: the loaded file name, the
//! filter text and when the data was loaded. Every query here (header text,
//! rows, summary) is computed on demand from that state.

use std::{collections::HashMap, path::Path};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::derivation::{summarize, Summary};
use crate::filter::filter;
use crate::ingest::{generate_sample, parse};
use crate::models::{AdjustedValues, Dataset, SampleField, SampleRecord};
use crate::mutation::set_field;
use crate::recalc::{RecalcPolicy, Snapshots};

// ---

/// File name reported after loading the built-in demonstration data.
pub const MOCK_FILE_NAME: &str = "mock_data.csv";

/// One table row: the editable raw record with the adjusted values from its
/// computed counterpart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRow {
    // ---
    #[serde(flatten)]
    pub record: SampleRecord,
    #[serde(flatten)]
    pub adjusted: AdjustedValues,
}

/// Serializable snapshot of everything the samples page renders.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    // ---
    pub header_text: String,
    pub file_name: Option<String>,
    pub loaded_at: Option<DateTime<Utc>>,
    pub filter_text: String,
    pub auto_recalc: bool,
    pub stale: bool,
    pub total_rows: usize,
    pub summary: Summary,
    pub rows: Vec<SampleRow>,
}

#[derive(Debug, Clone, Default)]
pub struct SampleSession {
    // ---
    snapshots: Snapshots,
    policy: RecalcPolicy,
    file_name: Option<String>,
    filter_text: String,
    loaded_at: Option<DateTime<Utc>>,
}

impl SampleSession {
    // ---
    pub fn new(auto_recalc: bool) -> Self {
        Self {
            policy: RecalcPolicy::new(auto_recalc),
            ..Self::default()
        }
    }

    pub fn raw(&self) -> &[SampleRecord] {
        self.snapshots.raw()
    }

    pub fn computed(&self) -> &[SampleRecord] {
        self.snapshots.computed()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn auto_recalc(&self) -> bool {
        self.policy.auto_recalc()
    }

    /// Ingest the text of a selected file, replacing both snapshots.
    pub fn load_text(&mut self, file_name: Option<&str>, text: &str) {
        // ---
        let dataset = parse(text);
        info!(
            "Loaded {} rows from {}",
            dataset.len(),
            file_name.unwrap_or("<unnamed>")
        );
        self.replace(file_name.map(str::to_string), dataset);
    }

    /// Read a CSV file from disk and ingest it.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        // ---
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read sample file '{}': {}", path.display(), e))?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        self.load_text(file_name.as_deref(), &text);
        Ok(())
    }

    /// Replace both snapshots with the built-in demonstration data.
    pub fn load_mock(&mut self) {
        // ---
        info!("Loading mock sample data");
        self.replace(Some(MOCK_FILE_NAME.to_string()), generate_sample());
    }

    fn replace(&mut self, file_name: Option<String>, dataset: Dataset) {
        // ---
        self.file_name = file_name;
        self.loaded_at = Some(Utc::now());
        self.policy.ingest(&mut self.snapshots, dataset);
    }

    /// Edit one field of the raw record `id`. Returns false if no record matched.
    pub fn set_field(&mut self, id: &str, field: SampleField, value: &str) -> bool {
        // ---
        if !self.raw().iter().any(|r| r.id == id) {
            warn!("Edit of {} ignored, no record with id {}", field, id);
            return false;
        }

        debug!("Set {}.{} = {:?}", id, field, value);
        let edited = set_field(self.raw(), id, field, value);
        self.policy.apply_edit(&mut self.snapshots, edited);
        true
    }

    pub fn set_filter(&mut self, query: &str) {
        // ---
        debug!("Filter text: {:?}", query);
        self.filter_text = query.to_string();
    }

    pub fn set_auto_recalc(&mut self, enabled: bool) {
        self.policy.set_auto_recalc(enabled);
    }

    pub fn recalculate_now(&mut self) {
        // ---
        info!("Recalculating {} rows", self.raw().len());
        self.policy.recalculate_now(&mut self.snapshots);
    }

    /// Summary over the filtered computed snapshot.
    pub fn summary(&self) -> Summary {
        summarize(filter(self.computed(), &self.filter_text))
    }

    /// Filtered raw rows, each paired with adjusted values from the computed
    /// record of the same id (or from the raw record when computed lacks it).
    pub fn rows(&self) -> Vec<SampleRow> {
        // ---
        let computed: HashMap<&str, &SampleRecord> = self
            .computed()
            .iter()
            .map(|c| (c.id.as_str(), c))
            .collect();

        filter(self.raw(), &self.filter_text)
            .into_iter()
            .map(|record| {
                let basis = computed.get(record.id.as_str()).copied().unwrap_or(record);
                SampleRow {
                    record: record.clone(),
                    adjusted: basis.adjusted(),
                }
            })
            .collect()
    }

    /// Page title, e.g. `Samples - file: soil.csv - 12 rows (filtered: 3)`.
    pub fn header_text(&self) -> String {
        // ---
        let mut title = String::from("Samples");
        if let Some(name) = self.file_name.as_deref().filter(|n| !n.is_empty()) {
            title.push_str(&format!(" - file: {name}"));
        }

        let raw = self.raw();
        if !raw.is_empty() {
            title.push_str(&format!(" - {} rows", raw.len()));
            if !self.filter_text.is_empty() {
                let shown = filter(raw, &self.filter_text).len();
                title.push_str(&format!(" (filtered: {shown})"));
            }
        }
        title
    }

    pub fn view(&self) -> SessionView {
        // ---
        SessionView {
            header_text: self.header_text(),
            file_name: self.file_name.clone(),
            loaded_at: self.loaded_at,
            filter_text: self.filter_text.clone(),
            auto_recalc: self.auto_recalc(),
            stale: self.snapshots.is_stale(),
            total_rows: self.raw().len(),
            summary: self.summary(),
            rows: self.rows(),
        }
    }
}
